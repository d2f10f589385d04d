mod author;
mod genre;
mod isbn;
mod pages;
mod price;
mod publish_date;
mod quantity;
mod title;

pub use self::{
    author::*, genre::*, isbn::*, pages::*, price::*, publish_date::*, quantity::*, title::*,
};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Book {
    isbn: Isbn,
    title: BookTitle,
    genre_name: GenreName,
    pages: BookPages,
    base_price: BookPrice,
    quantity: BookQuantity,
    publish_date: PublishDate,
    author_name: AuthorName,
}

impl Book {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        isbn: Isbn,
        title: BookTitle,
        genre_name: GenreName,
        pages: BookPages,
        base_price: BookPrice,
        quantity: BookQuantity,
        publish_date: PublishDate,
        author_name: AuthorName,
    ) -> Self {
        Self {
            isbn,
            title,
            genre_name,
            pages,
            base_price,
            quantity,
            publish_date,
            author_name,
        }
    }

    /// Copies the present fields of `patch` onto this record, field by field.
    /// Absent fields keep their stored values. The isbn is not part of a
    /// patch and stays untouched.
    pub fn apply(&mut self, patch: BookPatch) {
        let DestructBookPatch {
            title,
            genre_name,
            pages,
            base_price,
            quantity,
            publish_date,
            author_name,
        } = patch.into_destruct();
        self.substitute(|book| {
            if let Some(title) = title {
                *book.title = title;
            }
            if let Some(genre_name) = genre_name {
                *book.genre_name = genre_name;
            }
            if let Some(pages) = pages {
                *book.pages = pages;
            }
            if let Some(base_price) = base_price {
                *book.base_price = base_price;
            }
            if let Some(quantity) = quantity {
                *book.quantity = quantity;
            }
            if let Some(publish_date) = publish_date {
                *book.publish_date = publish_date;
            }
            if let Some(author_name) = author_name {
                *book.author_name = author_name;
            }
        });
    }
}

/// Subset of the mutable book fields, each present or absent.
#[derive(Debug, Clone, Default, Destructure)]
pub struct BookPatch {
    title: Option<BookTitle>,
    genre_name: Option<GenreName>,
    pages: Option<BookPages>,
    base_price: Option<BookPrice>,
    quantity: Option<BookQuantity>,
    publish_date: Option<PublishDate>,
    author_name: Option<AuthorName>,
}

impl BookPatch {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: Option<BookTitle>,
        genre_name: Option<GenreName>,
        pages: Option<BookPages>,
        base_price: Option<BookPrice>,
        quantity: Option<BookQuantity>,
        publish_date: Option<PublishDate>,
        author_name: Option<AuthorName>,
    ) -> Self {
        Self {
            title,
            genre_name,
            pages,
            base_price,
            quantity,
            publish_date,
            author_name,
        }
    }
}
