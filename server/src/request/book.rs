use crate::controller::Intake;
use application::transfer::{CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};
use rust_decimal::Decimal;
use serde::Deserialize;
use time::Date;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    isbn: Option<String>,
    title: Option<String>,
    genre_name: Option<String>,
    pages: Option<i32>,
    base_price: Option<Decimal>,
    quantity: Option<i32>,
    publish_date: Option<Date>,
    author_name: Option<String>,
}

/// Shared payload for PUT and PATCH. Which fields must be present is decided
/// by the operation, so every field deserializes as present-or-absent here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    title: Option<String>,
    genre_name: Option<String>,
    pages: Option<i32>,
    base_price: Option<Decimal>,
    quantity: Option<i32>,
    publish_date: Option<Date>,
    author_name: Option<String>,
}

#[derive(Debug)]
pub struct GetBookRequest {
    isbn: String,
}

impl GetBookRequest {
    pub fn new(isbn: String) -> Self {
        Self { isbn }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    isbn: String,
}

impl DeleteBookRequest {
    pub fn new(isbn: String) -> Self {
        Self { isbn }
    }
}

pub struct BookTransformer;

impl Intake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateBookRequest) -> Self::To {
        CreateBookDto {
            isbn: input.isbn,
            title: input.title,
            genre_name: input.genre_name,
            pages: input.pages,
            base_price: input.base_price,
            quantity: input.quantity,
            publish_date: input.publish_date,
            author_name: input.author_name,
        }
    }
}

impl Intake<(String, UpdateBookRequest)> for BookTransformer {
    type To = UpdateBookDto;
    fn emit(&self, input: (String, UpdateBookRequest)) -> Self::To {
        let (isbn, input) = input;
        UpdateBookDto {
            isbn,
            title: input.title,
            genre_name: input.genre_name,
            pages: input.pages,
            base_price: input.base_price,
            quantity: input.quantity,
            publish_date: input.publish_date,
            author_name: input.author_name,
        }
    }
}

impl Intake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { isbn: input.isbn }
    }
}

impl Intake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        DeleteBookDto { isbn: input.isbn }
    }
}
