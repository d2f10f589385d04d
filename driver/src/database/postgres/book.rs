use error_stack::Report;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use time::Date;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    AuthorName, Book, BookPages, BookPrice, BookQuantity, BookTitle, GenreName, Isbn, PublishDate,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_isbn(
        &self,
        con: &mut PostgresTransaction,
        isbn: &Isbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_isbn(con.connection(), isbn).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con.connection()).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con.connection(), book).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(con.connection(), book).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        isbn: &Isbn,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::delete(con.connection(), isbn).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    isbn: String,
    title: String,
    genre_name: String,
    pages: i32,
    base_price: Decimal,
    quantity: i32,
    publish_date: Date,
    author_name: String,
}

impl TryFrom<BookRow> for Book {
    type Error = Report<KernelError>;
    fn try_from(value: BookRow) -> Result<Self, Self::Error> {
        Ok(Book::new(
            Isbn::new(value.isbn),
            BookTitle::new(value.title),
            GenreName::new(value.genre_name),
            BookPages::new(value.pages)?,
            BookPrice::new(value.base_price)?,
            BookQuantity::new(value.quantity)?,
            PublishDate::new(value.publish_date),
            AuthorName::new(value.author_name),
        ))
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_by_isbn(
        con: &mut PgConnection,
        isbn: &Isbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT isbn, title, genre_name, pages, base_price, quantity, publish_date, author_name
            FROM books
            WHERE isbn = $1
            "#,
        )
        .bind(isbn.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Book::try_from).transpose()
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT isbn, title, genre_name, pages, base_price, quantity, publish_date, author_name
            FROM books
            ORDER BY isbn
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Book::try_from).collect()
    }

    async fn create(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO books (isbn, title, genre_name, pages, base_price, quantity, publish_date, author_name)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (isbn) DO UPDATE
            SET title = EXCLUDED.title,
                genre_name = EXCLUDED.genre_name,
                pages = EXCLUDED.pages,
                base_price = EXCLUDED.base_price,
                quantity = EXCLUDED.quantity,
                publish_date = EXCLUDED.publish_date,
                author_name = EXCLUDED.author_name
            "#,
        )
        .bind(book.isbn().as_ref())
        .bind(book.title().as_ref())
        .bind(book.genre_name().as_ref())
        .bind(book.pages().as_ref())
        .bind(book.base_price().as_ref())
        .bind(book.quantity().as_ref())
        .bind(book.publish_date().as_ref())
        .bind(book.author_name().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE books
            SET title = $2,
                genre_name = $3,
                pages = $4,
                base_price = $5,
                quantity = $6,
                publish_date = $7,
                author_name = $8
            WHERE isbn = $1
            "#,
        )
        .bind(book.isbn().as_ref())
        .bind(book.title().as_ref())
        .bind(book.genre_name().as_ref())
        .bind(book.pages().as_ref())
        .bind(book.base_price().as_ref())
        .bind(book.quantity().as_ref())
        .bind(book.publish_date().as_ref())
        .bind(book.author_name().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, isbn: &Isbn) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM books
            WHERE isbn = $1
            "#,
        )
        .bind(isbn.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
