use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::BookCopy;
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookCopyModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        book_copy: &BookCopy,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookCopyModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookCopyModifier: BookCopyModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_copy_modifier(&self) -> &Self::BookCopyModifier;
}
