use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::LedgerEntry;
use crate::KernelError;

#[async_trait::async_trait]
pub trait LedgerModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        entry: &LedgerEntry,
    ) -> error_stack::Result<(), KernelError>;

    /// Rewrites the status of the entry with the same id. An entry that
    /// already has the new status is a `NotBorrowed` conflict.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        entry: &LedgerEntry,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnLedgerModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type LedgerModifier: LedgerModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn ledger_modifier(&self) -> &Self::LedgerModifier;
}
