use error_stack::Report;
use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::{DependOnLedgerQuery, LedgerQuery};
use kernel::interface::update::{DependOnLedgerModifier, LedgerModifier};
use kernel::prelude::entity::{
    BookCopyId, BorrowerId, LedgerEntry, LedgerEntryId, LedgerStatus,
};
use kernel::{ConflictReason, KernelError};

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresLedgerRepository;

#[async_trait::async_trait]
impl LedgerQuery for PostgresLedgerRepository {
    type Transaction = PostgresTransaction;

    async fn find_open_by_book_copy_id(
        &self,
        con: &mut PostgresTransaction,
        book_copy_id: &BookCopyId,
    ) -> error_stack::Result<Option<LedgerEntry>, KernelError> {
        PgLedgerInternal::find_open_by_book_copy_id(con, book_copy_id).await
    }

    async fn find_by_book_copy_id(
        &self,
        con: &mut PostgresTransaction,
        book_copy_id: &BookCopyId,
    ) -> error_stack::Result<Vec<LedgerEntry>, KernelError> {
        PgLedgerInternal::find_by_book_copy_id(con, book_copy_id).await
    }

    async fn find_by_borrower_id(
        &self,
        con: &mut PostgresTransaction,
        borrower_id: &BorrowerId,
    ) -> error_stack::Result<Vec<LedgerEntry>, KernelError> {
        PgLedgerInternal::find_by_borrower_id(con, borrower_id).await
    }
}

#[async_trait::async_trait]
impl LedgerModifier for PostgresLedgerRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        entry: &LedgerEntry,
    ) -> error_stack::Result<(), KernelError> {
        PgLedgerInternal::create(con, entry).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        entry: &LedgerEntry,
    ) -> error_stack::Result<(), KernelError> {
        PgLedgerInternal::update(con, entry).await
    }
}

impl DependOnLedgerQuery for PostgresDatabase {
    type LedgerQuery = PostgresLedgerRepository;
    fn ledger_query(&self) -> &Self::LedgerQuery {
        &PostgresLedgerRepository
    }
}

impl DependOnLedgerModifier for PostgresDatabase {
    type LedgerModifier = PostgresLedgerRepository;
    fn ledger_modifier(&self) -> &Self::LedgerModifier {
        &PostgresLedgerRepository
    }
}

#[derive(sqlx::FromRow)]
struct LedgerEntryRow {
    id: Uuid,
    book_copy_id: Uuid,
    borrower_id: Uuid,
    status: String,
}

impl TryFrom<LedgerEntryRow> for LedgerEntry {
    type Error = Report<KernelError>;
    fn try_from(value: LedgerEntryRow) -> Result<Self, Self::Error> {
        Ok(LedgerEntry::new(
            LedgerEntryId::new(value.id),
            BookCopyId::new(value.book_copy_id),
            BorrowerId::new(value.borrower_id),
            value.status.parse::<LedgerStatus>()?,
        ))
    }
}

fn into_entries(rows: Vec<LedgerEntryRow>) -> error_stack::Result<Vec<LedgerEntry>, KernelError> {
    rows.into_iter().map(LedgerEntry::try_from).collect()
}

pub(in crate::database) struct PgLedgerInternal;

impl PgLedgerInternal {
    async fn find_open_by_book_copy_id(
        con: &mut PgConnection,
        book_copy_id: &BookCopyId,
    ) -> error_stack::Result<Option<LedgerEntry>, KernelError> {
        let row = sqlx::query_as::<_, LedgerEntryRow>(
            // language=postgresql
            r#"
            SELECT id, book_copy_id, borrower_id, status
            FROM ledger_entries
            WHERE book_copy_id = $1 AND status = $2
            "#,
        )
        .bind(book_copy_id.as_ref())
        .bind(LedgerStatus::Borrowed.as_str())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(LedgerEntry::try_from).transpose()
    }

    async fn find_by_book_copy_id(
        con: &mut PgConnection,
        book_copy_id: &BookCopyId,
    ) -> error_stack::Result<Vec<LedgerEntry>, KernelError> {
        let rows = sqlx::query_as::<_, LedgerEntryRow>(
            // language=postgresql
            r#"
            SELECT id, book_copy_id, borrower_id, status
            FROM ledger_entries
            WHERE book_copy_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(book_copy_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        into_entries(rows)
    }

    async fn find_by_borrower_id(
        con: &mut PgConnection,
        borrower_id: &BorrowerId,
    ) -> error_stack::Result<Vec<LedgerEntry>, KernelError> {
        let rows = sqlx::query_as::<_, LedgerEntryRow>(
            // language=postgresql
            r#"
            SELECT id, book_copy_id, borrower_id, status
            FROM ledger_entries
            WHERE borrower_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(borrower_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        into_entries(rows)
    }

    async fn create(
        con: &mut PgConnection,
        entry: &LedgerEntry,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO ledger_entries (id, book_copy_id, borrower_id, status)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(entry.id().as_ref())
        .bind(entry.book_copy_id().as_ref())
        .bind(entry.borrower_id().as_ref())
        .bind(entry.status().as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(
        con: &mut PgConnection,
        entry: &LedgerEntry,
    ) -> error_stack::Result<(), KernelError> {
        // A concurrent return that already closed the entry leaves nothing to update.
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE ledger_entries
            SET status = $2, updated_at = now()
            WHERE id = $1 AND status <> $2
            "#,
        )
        .bind(entry.id().as_ref())
        .bind(entry.status().as_str())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            tracing::warn!(
                "Ledger entry {} is already {}",
                entry.id().as_ref(),
                entry.status()
            );
            return Err(Report::new(KernelError::from(ConflictReason::NotBorrowed)));
        }
        Ok(())
    }
}
