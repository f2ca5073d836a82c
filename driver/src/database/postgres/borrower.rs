use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::{BorrowerQuery, DependOnBorrowerQuery};
use kernel::interface::update::{BorrowerModifier, DependOnBorrowerModifier};
use kernel::prelude::entity::{Borrower, BorrowerEmail, BorrowerId, BorrowerName, Page};
use kernel::KernelError;

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresBorrowerRepository;

#[async_trait::async_trait]
impl BorrowerQuery for PostgresBorrowerRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BorrowerId,
    ) -> error_stack::Result<Option<Borrower>, KernelError> {
        PgBorrowerInternal::find_by_id(con, id).await
    }

    async fn find_by_name_and_email(
        &self,
        con: &mut PostgresTransaction,
        name: &BorrowerName,
        email: &BorrowerEmail,
    ) -> error_stack::Result<Option<Borrower>, KernelError> {
        PgBorrowerInternal::find_by_name_and_email(con, name, email).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        page: &Page,
    ) -> error_stack::Result<Vec<Borrower>, KernelError> {
        PgBorrowerInternal::find_all(con, page).await
    }
}

#[async_trait::async_trait]
impl BorrowerModifier for PostgresBorrowerRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        borrower: &Borrower,
    ) -> error_stack::Result<(), KernelError> {
        PgBorrowerInternal::create(con, borrower).await
    }
}

impl DependOnBorrowerQuery for PostgresDatabase {
    type BorrowerQuery = PostgresBorrowerRepository;
    fn borrower_query(&self) -> &Self::BorrowerQuery {
        &PostgresBorrowerRepository
    }
}

impl DependOnBorrowerModifier for PostgresDatabase {
    type BorrowerModifier = PostgresBorrowerRepository;
    fn borrower_modifier(&self) -> &Self::BorrowerModifier {
        &PostgresBorrowerRepository
    }
}

#[derive(sqlx::FromRow)]
struct BorrowerRow {
    id: Uuid,
    name: String,
    email: String,
}

impl From<BorrowerRow> for Borrower {
    fn from(row: BorrowerRow) -> Self {
        Borrower::new(
            BorrowerId::new(row.id),
            BorrowerName::new(row.name),
            BorrowerEmail::new(row.email),
        )
    }
}

pub(in crate::database) struct PgBorrowerInternal;

impl PgBorrowerInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BorrowerId,
    ) -> error_stack::Result<Option<Borrower>, KernelError> {
        let row = sqlx::query_as::<_, BorrowerRow>(
            // language=postgresql
            r#"
            SELECT id, name, email
            FROM borrowers
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Borrower::from))
    }

    async fn find_by_name_and_email(
        con: &mut PgConnection,
        name: &BorrowerName,
        email: &BorrowerEmail,
    ) -> error_stack::Result<Option<Borrower>, KernelError> {
        let row = sqlx::query_as::<_, BorrowerRow>(
            // language=postgresql
            r#"
            SELECT id, name, email
            FROM borrowers
            WHERE name = $1 AND email = $2
            "#,
        )
        .bind(name.as_ref())
        .bind(email.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Borrower::from))
    }

    async fn find_all(
        con: &mut PgConnection,
        page: &Page,
    ) -> error_stack::Result<Vec<Borrower>, KernelError> {
        let rows = sqlx::query_as::<_, BorrowerRow>(
            // language=postgresql
            r#"
            SELECT id, name, email
            FROM borrowers
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Borrower::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        borrower: &Borrower,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO borrowers (id, name, email)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(borrower.id().as_ref())
        .bind(borrower.name().as_ref())
        .bind(borrower.email().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
