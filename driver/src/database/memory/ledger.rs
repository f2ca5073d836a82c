use kernel::interface::query::{DependOnLedgerQuery, LedgerQuery};
use kernel::interface::update::{DependOnLedgerModifier, LedgerModifier};
use kernel::prelude::entity::{BookCopyId, BorrowerId, LedgerEntry};
use kernel::KernelError;

use crate::database::memory::{InMemoryDatabase, InMemoryTransaction};

pub struct InMemoryLedgerRepository;

#[async_trait::async_trait]
impl LedgerQuery for InMemoryLedgerRepository {
    type Transaction = InMemoryTransaction;

    async fn find_open_by_book_copy_id(
        &self,
        con: &mut InMemoryTransaction,
        book_copy_id: &BookCopyId,
    ) -> error_stack::Result<Option<LedgerEntry>, KernelError> {
        let found = con
            .store()
            .ledger
            .iter()
            .find(|e| e.book_copy_id() == book_copy_id && e.status().is_open());
        Ok(found.cloned())
    }

    async fn find_by_book_copy_id(
        &self,
        con: &mut InMemoryTransaction,
        book_copy_id: &BookCopyId,
    ) -> error_stack::Result<Vec<LedgerEntry>, KernelError> {
        let found = con
            .store()
            .ledger
            .iter()
            .filter(|e| e.book_copy_id() == book_copy_id)
            .cloned()
            .collect();
        Ok(found)
    }

    async fn find_by_borrower_id(
        &self,
        con: &mut InMemoryTransaction,
        borrower_id: &BorrowerId,
    ) -> error_stack::Result<Vec<LedgerEntry>, KernelError> {
        let found = con
            .store()
            .ledger
            .iter()
            .filter(|e| e.borrower_id() == borrower_id)
            .cloned()
            .collect();
        Ok(found)
    }
}

#[async_trait::async_trait]
impl LedgerModifier for InMemoryLedgerRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        entry: &LedgerEntry,
    ) -> error_stack::Result<(), KernelError> {
        con.store_mut().insert_ledger_entry(entry)
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        entry: &LedgerEntry,
    ) -> error_stack::Result<(), KernelError> {
        con.store_mut().replace_ledger_entry(entry)
    }
}

impl DependOnLedgerQuery for InMemoryDatabase {
    type LedgerQuery = InMemoryLedgerRepository;
    fn ledger_query(&self) -> &Self::LedgerQuery {
        &InMemoryLedgerRepository
    }
}

impl DependOnLedgerModifier for InMemoryDatabase {
    type LedgerModifier = InMemoryLedgerRepository;
    fn ledger_modifier(&self) -> &Self::LedgerModifier {
        &InMemoryLedgerRepository
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::LedgerQuery;
    use kernel::interface::update::LedgerModifier;
    use kernel::prelude::entity::{BookCopyId, BorrowerId, LedgerEntry, LedgerEntryId};
    use kernel::{ConflictReason, KernelError};

    use crate::database::memory::{InMemoryDatabase, InMemoryLedgerRepository};

    #[tokio::test]
    async fn one_open_entry_per_copy() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let book_copy_id = BookCopyId::new(Uuid::new_v4());
        let first = LedgerEntry::borrowed(
            LedgerEntryId::new(Uuid::new_v4()),
            book_copy_id.clone(),
            BorrowerId::new(Uuid::new_v4()),
        );
        InMemoryLedgerRepository.create(&mut con, &first).await?;

        let second = LedgerEntry::borrowed(
            LedgerEntryId::new(Uuid::new_v4()),
            book_copy_id.clone(),
            BorrowerId::new(Uuid::new_v4()),
        );
        let report = InMemoryLedgerRepository
            .create(&mut con, &second)
            .await
            .unwrap_err();
        assert_eq!(
            report.current_context(),
            &KernelError::Conflict(ConflictReason::AlreadyBorrowed)
        );

        let closed = first.returned();
        InMemoryLedgerRepository.update(&mut con, &closed).await?;
        let report = InMemoryLedgerRepository
            .update(&mut con, &closed)
            .await
            .unwrap_err();
        assert_eq!(
            report.current_context(),
            &KernelError::Conflict(ConflictReason::NotBorrowed)
        );
        InMemoryLedgerRepository.create(&mut con, &second).await?;

        let history = InMemoryLedgerRepository
            .find_by_book_copy_id(&mut con, &book_copy_id)
            .await?;
        assert_eq!(history, vec![closed, second.clone()]);

        let open = InMemoryLedgerRepository
            .find_open_by_book_copy_id(&mut con, &book_copy_id)
            .await?;
        assert_eq!(open, Some(second));
        Ok(())
    }

    #[tokio::test]
    async fn updating_unknown_entry_fails() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let entry = LedgerEntry::borrowed(
            LedgerEntryId::new(Uuid::new_v4()),
            BookCopyId::new(Uuid::new_v4()),
            BorrowerId::new(Uuid::new_v4()),
        );
        let report = InMemoryLedgerRepository
            .update(&mut con, &entry.returned())
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
        Ok(())
    }
}
