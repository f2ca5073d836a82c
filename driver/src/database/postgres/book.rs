use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::{BookCopyQuery, DependOnBookCopyQuery};
use kernel::interface::update::{BookCopyModifier, DependOnBookCopyModifier};
use kernel::prelude::entity::{
    BookAuthor, BookCopy, BookCopyId, BookIsbn, BookTitle, CopyVersion, Page,
};
use kernel::KernelError;

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresBookCopyRepository;

#[async_trait::async_trait]
impl BookCopyQuery for PostgresBookCopyRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookCopyId,
    ) -> error_stack::Result<Option<BookCopy>, KernelError> {
        PgBookCopyInternal::find_by_id(con, id).await
    }

    async fn find_by_isbn(
        &self,
        con: &mut PostgresTransaction,
        isbn_no: &BookIsbn,
    ) -> error_stack::Result<Vec<BookCopy>, KernelError> {
        PgBookCopyInternal::find_by_isbn(con, isbn_no).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        page: &Page,
    ) -> error_stack::Result<Vec<BookCopy>, KernelError> {
        PgBookCopyInternal::find_all(con, page).await
    }
}

#[async_trait::async_trait]
impl BookCopyModifier for PostgresBookCopyRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        book_copy: &BookCopy,
    ) -> error_stack::Result<(), KernelError> {
        PgBookCopyInternal::create(con, book_copy).await
    }
}

impl DependOnBookCopyQuery for PostgresDatabase {
    type BookCopyQuery = PostgresBookCopyRepository;
    fn book_copy_query(&self) -> &Self::BookCopyQuery {
        &PostgresBookCopyRepository
    }
}

impl DependOnBookCopyModifier for PostgresDatabase {
    type BookCopyModifier = PostgresBookCopyRepository;
    fn book_copy_modifier(&self) -> &Self::BookCopyModifier {
        &PostgresBookCopyRepository
    }
}

#[derive(sqlx::FromRow)]
struct BookCopyRow {
    id: Uuid,
    isbn_no: String,
    title: String,
    author: String,
    version: i32,
}

impl From<BookCopyRow> for BookCopy {
    fn from(value: BookCopyRow) -> Self {
        BookCopy::new(
            BookCopyId::new(value.id),
            BookIsbn::new(value.isbn_no),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            CopyVersion::new(value.version),
        )
    }
}

pub(in crate::database) struct PgBookCopyInternal;

impl PgBookCopyInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookCopyId,
    ) -> error_stack::Result<Option<BookCopy>, KernelError> {
        let row = sqlx::query_as::<_, BookCopyRow>(
            // language=postgresql
            r#"
            SELECT id, isbn_no, title, author, version
            FROM book_copies
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(BookCopy::from))
    }

    async fn find_by_isbn(
        con: &mut PgConnection,
        isbn_no: &BookIsbn,
    ) -> error_stack::Result<Vec<BookCopy>, KernelError> {
        let rows = sqlx::query_as::<_, BookCopyRow>(
            // language=postgresql
            r#"
            SELECT id, isbn_no, title, author, version
            FROM book_copies
            WHERE isbn_no = $1
            "#,
        )
        .bind(isbn_no.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(BookCopy::from).collect())
    }

    async fn find_all(
        con: &mut PgConnection,
        page: &Page,
    ) -> error_stack::Result<Vec<BookCopy>, KernelError> {
        let rows = sqlx::query_as::<_, BookCopyRow>(
            // language=postgresql
            r#"
            SELECT id, isbn_no, title, author, version
            FROM book_copies
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(BookCopy::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        book_copy: &BookCopy,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO book_copies (id, isbn_no, title, author, version)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(book_copy.id().as_ref())
        .bind(book_copy.isbn_no().as_ref())
        .bind(book_copy.title().as_ref())
        .bind(book_copy.author().as_ref())
        .bind(book_copy.version().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
