use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BookCopy, BookCopyId, BookIsbn, Page};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookCopyQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookCopyId,
    ) -> error_stack::Result<Option<BookCopy>, KernelError>;

    /// Every copy registered under `isbn_no`, in no particular order.
    async fn find_by_isbn(
        &self,
        con: &mut Self::Transaction,
        isbn_no: &BookIsbn,
    ) -> error_stack::Result<Vec<BookCopy>, KernelError>;

    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        page: &Page,
    ) -> error_stack::Result<Vec<BookCopy>, KernelError>;
}

pub trait DependOnBookCopyQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookCopyQuery: BookCopyQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_copy_query(&self) -> &Self::BookCopyQuery;
}
