use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BookCopyId, BorrowerId, LedgerEntry};
use crate::KernelError;

#[async_trait::async_trait]
pub trait LedgerQuery: 'static + Sync + Send {
    type Transaction: Transaction;

    /// The BORROWED entry of the copy, whoever holds it.
    async fn find_open_by_book_copy_id(
        &self,
        con: &mut Self::Transaction,
        book_copy_id: &BookCopyId,
    ) -> error_stack::Result<Option<LedgerEntry>, KernelError>;

    async fn find_by_book_copy_id(
        &self,
        con: &mut Self::Transaction,
        book_copy_id: &BookCopyId,
    ) -> error_stack::Result<Vec<LedgerEntry>, KernelError>;

    async fn find_by_borrower_id(
        &self,
        con: &mut Self::Transaction,
        borrower_id: &BorrowerId,
    ) -> error_stack::Result<Vec<LedgerEntry>, KernelError>;
}

pub trait DependOnLedgerQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type LedgerQuery: LedgerQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn ledger_query(&self) -> &Self::LedgerQuery;
}
