use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Borrower, BorrowerEmail, BorrowerId, BorrowerName, Page};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BorrowerQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BorrowerId,
    ) -> error_stack::Result<Option<Borrower>, KernelError>;

    async fn find_by_name_and_email(
        &self,
        con: &mut Self::Transaction,
        name: &BorrowerName,
        email: &BorrowerEmail,
    ) -> error_stack::Result<Option<Borrower>, KernelError>;

    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        page: &Page,
    ) -> error_stack::Result<Vec<Borrower>, KernelError>;
}

pub trait DependOnBorrowerQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BorrowerQuery: BorrowerQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn borrower_query(&self) -> &Self::BorrowerQuery;
}
