use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    AuthorName, Book, BookPages, BookPatch, BookPrice, BookQuantity, BookTitle, GenreName, Isbn,
    PublishDate,
};
use kernel::KernelError;

use crate::transfer::{BookDto, CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};

fn required<T>(field: Option<T>, name: &'static str) -> error_stack::Result<T, KernelError> {
    field.ok_or_else(|| {
        Report::new(KernelError::Validation).attach_printable(format!("{name} is required"))
    })
}

#[async_trait::async_trait]
pub trait GetAllBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery
{
    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let books = self.book_query().find_all(&mut connection).await?;
        connection.commit().await?;

        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetAllBookService for T where T: DependOnDatabaseConnection + DependOnBookQuery {}

#[async_trait::async_trait]
pub trait GetBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery
{
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let isbn = Isbn::new(dto.isbn);
        let book = self
            .book_query()
            .find_by_isbn(&mut connection, &isbn)
            .await?;
        connection.commit().await?;

        Ok(book.map(BookDto::from))
    }
}

impl<T> GetBookService for T where T: DependOnDatabaseConnection + DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookModifier
{
    /// Validates the payload as a complete record and persists it. An
    /// existing record under the same isbn is overwritten, matching the
    /// store's save semantics.
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book = Book::new(
            Isbn::new(required(dto.isbn, "isbn")?),
            BookTitle::new(required(dto.title, "title")?),
            GenreName::new(required(dto.genre_name, "genreName")?),
            BookPages::new(required(dto.pages, "pages")?)?,
            BookPrice::new(required(dto.base_price, "basePrice")?)?,
            BookQuantity::new(required(dto.quantity, "quantity")?)?,
            PublishDate::new(required(dto.publish_date, "publishDate")?),
            AuthorName::new(required(dto.author_name, "authorName")?),
        );
        self.book_modifier().create(&mut connection, &book).await?;
        connection.commit().await?;

        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where T: DependOnDatabaseConnection + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpsertBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery + DependOnBookModifier
{
    /// Creates the record when the isbn is unknown, otherwise replaces every
    /// mutable field. Either way the payload must be complete; the isbn
    /// comes from the path, never from the payload.
    async fn upsert_book(&self, dto: UpdateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let isbn = Isbn::new(dto.isbn);
        let title = BookTitle::new(required(dto.title, "title")?);
        let genre_name = GenreName::new(required(dto.genre_name, "genreName")?);
        let pages = BookPages::new(required(dto.pages, "pages")?)?;
        let base_price = BookPrice::new(required(dto.base_price, "basePrice")?)?;
        let quantity = BookQuantity::new(required(dto.quantity, "quantity")?)?;
        let publish_date = PublishDate::new(required(dto.publish_date, "publishDate")?);
        let author_name = AuthorName::new(required(dto.author_name, "authorName")?);

        let found = self
            .book_query()
            .find_by_isbn(&mut connection, &isbn)
            .await?;
        let book = match found {
            Some(mut book) => {
                book.apply(BookPatch::new(
                    Some(title),
                    Some(genre_name),
                    Some(pages),
                    Some(base_price),
                    Some(quantity),
                    Some(publish_date),
                    Some(author_name),
                ));
                self.book_modifier().update(&mut connection, &book).await?;
                book
            }
            None => {
                let book = Book::new(
                    isbn,
                    title,
                    genre_name,
                    pages,
                    base_price,
                    quantity,
                    publish_date,
                    author_name,
                );
                self.book_modifier().create(&mut connection, &book).await?;
                book
            }
        };
        connection.commit().await?;

        Ok(BookDto::from(book))
    }
}

impl<T> UpsertBookService for T where
    T: DependOnDatabaseConnection + DependOnBookQuery + DependOnBookModifier
{
}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery + DependOnBookModifier
{
    /// Merges the present payload fields onto an existing record. A missing
    /// record is reported as NotFound before the payload is inspected.
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let isbn = Isbn::new(dto.isbn);
        let mut book = self
            .book_query()
            .find_by_isbn(&mut connection, &isbn)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("no book registered under isbn {}", isbn.as_ref()))
            })?;

        let patch = BookPatch::new(
            dto.title.map(BookTitle::new),
            dto.genre_name.map(GenreName::new),
            dto.pages.map(BookPages::new).transpose()?,
            dto.base_price.map(BookPrice::new).transpose()?,
            dto.quantity.map(BookQuantity::new).transpose()?,
            dto.publish_date.map(PublishDate::new),
            dto.author_name.map(AuthorName::new),
        );
        book.apply(patch);
        self.book_modifier().update(&mut connection, &book).await?;
        connection.commit().await?;

        Ok(BookDto::from(book))
    }
}

impl<T> UpdateBookService for T where
    T: DependOnDatabaseConnection + DependOnBookQuery + DependOnBookModifier
{
}

#[async_trait::async_trait]
pub trait DeleteBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery + DependOnBookModifier
{
    /// Existence is checked explicitly so a missing record surfaces as
    /// NotFound instead of a silent no-op delete.
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let isbn = Isbn::new(dto.isbn);
        if self
            .book_query()
            .find_by_isbn(&mut connection, &isbn)
            .await?
            .is_none()
        {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("no book registered under isbn {}", isbn.as_ref())));
        }
        self.book_modifier().delete(&mut connection, &isbn).await?;
        connection.commit().await?;

        Ok(())
    }
}

impl<T> DeleteBookService for T where
    T: DependOnDatabaseConnection + DependOnBookQuery + DependOnBookModifier
{
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use rust_decimal::Decimal;
    use time::{Date, Month};

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{BookQuery, DependOnBookQuery};
    use kernel::interface::update::{BookModifier, DependOnBookModifier};
    use kernel::prelude::entity::{Book, Isbn};
    use kernel::KernelError;

    use super::*;

    #[derive(Default)]
    struct MockDatabase {
        books: Arc<Mutex<HashMap<String, Book>>>,
    }

    struct MockTransaction {
        books: Arc<Mutex<HashMap<String, Book>>>,
    }

    #[async_trait::async_trait]
    impl Transaction for MockTransaction {
        async fn commit(self) -> error_stack::Result<(), KernelError> {
            Ok(())
        }

        async fn roll_back(self) -> error_stack::Result<(), KernelError> {
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl DatabaseConnection for MockDatabase {
        type Transaction = MockTransaction;
        async fn transact(&self) -> error_stack::Result<MockTransaction, KernelError> {
            Ok(MockTransaction {
                books: Arc::clone(&self.books),
            })
        }
    }

    struct MockBookRepository;

    #[async_trait::async_trait]
    impl BookQuery for MockBookRepository {
        type Transaction = MockTransaction;

        async fn find_by_isbn(
            &self,
            con: &mut MockTransaction,
            isbn: &Isbn,
        ) -> error_stack::Result<Option<Book>, KernelError> {
            Ok(con.books.lock().unwrap().get(isbn.as_ref()).cloned())
        }

        async fn find_all(
            &self,
            con: &mut MockTransaction,
        ) -> error_stack::Result<Vec<Book>, KernelError> {
            Ok(con.books.lock().unwrap().values().cloned().collect())
        }
    }

    #[async_trait::async_trait]
    impl BookModifier for MockBookRepository {
        type Transaction = MockTransaction;

        async fn create(
            &self,
            con: &mut MockTransaction,
            book: &Book,
        ) -> error_stack::Result<(), KernelError> {
            con.books
                .lock()
                .unwrap()
                .insert(book.isbn().as_ref().clone(), book.clone());
            Ok(())
        }

        async fn update(
            &self,
            con: &mut MockTransaction,
            book: &Book,
        ) -> error_stack::Result<(), KernelError> {
            con.books
                .lock()
                .unwrap()
                .insert(book.isbn().as_ref().clone(), book.clone());
            Ok(())
        }

        async fn delete(
            &self,
            con: &mut MockTransaction,
            isbn: &Isbn,
        ) -> error_stack::Result<(), KernelError> {
            con.books.lock().unwrap().remove(isbn.as_ref());
            Ok(())
        }
    }

    impl DependOnBookQuery for MockDatabase {
        type BookQuery = MockBookRepository;
        fn book_query(&self) -> &Self::BookQuery {
            &MockBookRepository
        }
    }

    impl DependOnBookModifier for MockDatabase {
        type BookModifier = MockBookRepository;
        fn book_modifier(&self) -> &Self::BookModifier {
            &MockBookRepository
        }
    }

    fn date(year: i32, month: Month, day: u8) -> Date {
        Date::from_calendar_date(year, month, day).unwrap()
    }

    fn create_dto(isbn: &str) -> CreateBookDto {
        CreateBookDto {
            isbn: Some(isbn.to_string()),
            title: Some("Dune".to_string()),
            genre_name: Some("Science Fiction".to_string()),
            pages: Some(412),
            base_price: Some(Decimal::new(2325, 2)),
            quantity: Some(12),
            publish_date: Some(date(2015, Month::July, 16)),
            author_name: Some("Frank Herbert".to_string()),
        }
    }

    fn full_update_dto(isbn: &str) -> UpdateBookDto {
        UpdateBookDto {
            isbn: isbn.to_string(),
            title: Some("Harry Potter and the Order of the Phoenix".to_string()),
            genre_name: Some("Fantasy".to_string()),
            pages: Some(815),
            base_price: Some(Decimal::new(699, 2)),
            quantity: Some(30),
            publish_date: Some(date(2014, Month::September, 1)),
            author_name: Some("J. K. Rowling".to_string()),
        }
    }

    fn empty_update_dto(isbn: &str) -> UpdateBookDto {
        UpdateBookDto {
            isbn: isbn.to_string(),
            title: None,
            genre_name: None,
            pages: None,
            base_price: None,
            quantity: None,
            publish_date: None,
            author_name: None,
        }
    }

    #[tokio::test]
    async fn created_book_is_returned_by_get() {
        let db = MockDatabase::default();

        let created = db.create_book(create_dto("9780340960196")).await.unwrap();
        let found = db
            .get_book(GetBookDto {
                isbn: "9780340960196".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn get_on_unknown_isbn_is_none() {
        let db = MockDatabase::default();

        let found = db
            .get_book(GetBookDto {
                isbn: "missing".to_string(),
            })
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn list_returns_every_stored_book() {
        let db = MockDatabase::default();
        db.create_book(create_dto("9780340960196")).await.unwrap();
        db.create_book(create_dto("9781408855690")).await.unwrap();

        let books = db.get_all_books().await.unwrap();

        assert_eq!(books.len(), 2);
        assert!(books.iter().any(|b| b.isbn == "9780340960196"));
        assert!(books.iter().any(|b| b.isbn == "9781408855690"));
    }

    #[tokio::test]
    async fn create_on_existing_isbn_overwrites() {
        let db = MockDatabase::default();
        db.create_book(create_dto("9780340960196")).await.unwrap();

        let mut dto = create_dto("9780340960196");
        dto.title = Some("Dune Messiah".to_string());
        db.create_book(dto).await.unwrap();

        let found = db
            .get_book(GetBookDto {
                isbn: "9780340960196".to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.title, "Dune Messiah");
    }

    #[tokio::test]
    async fn create_rejects_missing_field() {
        let db = MockDatabase::default();

        let mut dto = create_dto("9780340960196");
        dto.author_name = None;
        let report = db.create_book(dto).await.unwrap_err();

        assert!(matches!(report.current_context(), KernelError::Validation));
        assert!(db.get_all_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_negative_numerics() {
        let db = MockDatabase::default();

        let mut dto = create_dto("9780340960196");
        dto.pages = Some(-1);
        let report = db.create_book(dto).await.unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Validation));

        let mut dto = create_dto("9780340960196");
        dto.base_price = Some(Decimal::new(-100, 2));
        let report = db.create_book(dto).await.unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Validation));

        let mut dto = create_dto("9780340960196");
        dto.quantity = Some(-3);
        let report = db.create_book(dto).await.unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Validation));
    }

    #[tokio::test]
    async fn upsert_on_missing_isbn_creates_the_record() {
        let db = MockDatabase::default();

        let upserted = db.upsert_book(full_update_dto("9781408855690")).await.unwrap();

        let found = db
            .get_book(GetBookDto {
                isbn: "9781408855690".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(found, Some(upserted));
    }

    #[tokio::test]
    async fn upsert_on_missing_isbn_rejects_incomplete_payload() {
        let db = MockDatabase::default();

        let mut dto = full_update_dto("9781408855690");
        dto.publish_date = None;
        let report = db.upsert_book(dto).await.unwrap_err();

        assert!(matches!(report.current_context(), KernelError::Validation));
        assert!(db.get_all_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upsert_on_existing_isbn_replaces_every_mutable_field() {
        let db = MockDatabase::default();
        db.create_book(create_dto("9780340960196")).await.unwrap();

        let replaced = db.upsert_book(full_update_dto("9780340960196")).await.unwrap();

        assert_eq!(replaced.isbn, "9780340960196");
        assert_eq!(
            replaced.title,
            "Harry Potter and the Order of the Phoenix"
        );
        assert_eq!(replaced.genre_name, "Fantasy");
        assert_eq!(replaced.pages, 815);
        assert_eq!(replaced.base_price, Decimal::new(699, 2));
        assert_eq!(replaced.quantity, 30);
        assert_eq!(replaced.publish_date, date(2014, Month::September, 1));
        assert_eq!(replaced.author_name, "J. K. Rowling");

        let found = db
            .get_book(GetBookDto {
                isbn: "9780340960196".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(found, Some(replaced));
    }

    #[tokio::test]
    async fn empty_patch_leaves_the_record_unchanged() {
        let db = MockDatabase::default();
        let created = db.create_book(create_dto("9780340960196")).await.unwrap();

        let patched = db
            .update_book(empty_update_dto("9780340960196"))
            .await
            .unwrap();

        assert_eq!(patched, created);
    }

    #[tokio::test]
    async fn patch_changes_only_the_supplied_field() {
        let db = MockDatabase::default();
        let created = db.create_book(create_dto("9780340960196")).await.unwrap();

        let mut dto = empty_update_dto("9780340960196");
        dto.quantity = Some(0);
        let patched = db.update_book(dto).await.unwrap();

        assert_eq!(patched.quantity, 0);
        assert_eq!(patched.isbn, created.isbn);
        assert_eq!(patched.title, created.title);
        assert_eq!(patched.genre_name, created.genre_name);
        assert_eq!(patched.pages, created.pages);
        assert_eq!(patched.base_price, created.base_price);
        assert_eq!(patched.publish_date, created.publish_date);
        assert_eq!(patched.author_name, created.author_name);
    }

    #[tokio::test]
    async fn patch_on_missing_isbn_is_not_found() {
        let db = MockDatabase::default();

        let report = db
            .update_book(full_update_dto("9781408855690"))
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::NotFound));

        // NotFound wins even when the payload itself would not validate.
        let mut dto = empty_update_dto("9781408855690");
        dto.pages = Some(-10);
        let report = db.update_book(dto).await.unwrap_err();
        assert!(matches!(report.current_context(), KernelError::NotFound));
    }

    #[tokio::test]
    async fn patch_rejects_negative_value_on_supplied_field() {
        let db = MockDatabase::default();
        let created = db.create_book(create_dto("9780340960196")).await.unwrap();

        let mut dto = empty_update_dto("9780340960196");
        dto.quantity = Some(-1);
        let report = db.update_book(dto).await.unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Validation));

        let found = db
            .get_book(GetBookDto {
                isbn: "9780340960196".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let db = MockDatabase::default();
        db.create_book(create_dto("9780340960196")).await.unwrap();

        db.delete_book(DeleteBookDto {
            isbn: "9780340960196".to_string(),
        })
        .await
        .unwrap();

        let found = db
            .get_book(GetBookDto {
                isbn: "9780340960196".to_string(),
            })
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn delete_on_missing_isbn_is_not_found() {
        let db = MockDatabase::default();

        let report = db
            .delete_book(DeleteBookDto {
                isbn: "missing".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(report.current_context(), KernelError::NotFound));
    }

    #[tokio::test]
    async fn create_patch_delete_roundtrip() {
        let db = MockDatabase::default();

        let created = db.create_book(create_dto("A")).await.unwrap();
        let found = db
            .get_book(GetBookDto {
                isbn: "A".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(found, Some(created.clone()));

        let mut dto = empty_update_dto("A");
        dto.quantity = Some(0);
        db.update_book(dto).await.unwrap();
        let found = db
            .get_book(GetBookDto {
                isbn: "A".to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.quantity, 0);
        assert_eq!(found.title, created.title);

        db.delete_book(DeleteBookDto {
            isbn: "A".to_string(),
        })
        .await
        .unwrap();
        let found = db
            .get_book(GetBookDto {
                isbn: "A".to_string(),
            })
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
