use rust_decimal::Decimal;
use time::Date;

use kernel::prelude::entity::{Book, DestructBook};

#[derive(Debug, Clone, PartialEq)]
pub struct BookDto {
    pub isbn: String,
    pub title: String,
    pub genre_name: String,
    pub pages: i32,
    pub base_price: Decimal,
    pub quantity: i32,
    pub publish_date: Date,
    pub author_name: String,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            isbn,
            title,
            genre_name,
            pages,
            base_price,
            quantity,
            publish_date,
            author_name,
        } = value.into_destruct();
        Self {
            isbn: isbn.into(),
            title: title.into(),
            genre_name: genre_name.into(),
            pages: pages.into(),
            base_price: base_price.into(),
            quantity: quantity.into(),
            publish_date: publish_date.into(),
            author_name: author_name.into(),
        }
    }
}

pub struct GetBookDto {
    pub isbn: String,
}

pub struct CreateBookDto {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub genre_name: Option<String>,
    pub pages: Option<i32>,
    pub base_price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub publish_date: Option<Date>,
    pub author_name: Option<String>,
}

/// Carries the mutable fields for both full-replace and partial updates.
/// Completeness is enforced by the operation, not by the shape.
pub struct UpdateBookDto {
    pub isbn: String,
    pub title: Option<String>,
    pub genre_name: Option<String>,
    pub pages: Option<i32>,
    pub base_price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub publish_date: Option<Date>,
    pub author_name: Option<String>,
}

pub struct DeleteBookDto {
    pub isbn: String,
}
