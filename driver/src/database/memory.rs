mod book;
mod borrower;
mod ledger;

use std::sync::Arc;

use error_stack::Report;
use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::prelude::entity::{BookCopy, Borrower, LedgerEntry};
use kernel::{ConflictReason, KernelError};

pub use self::{book::*, borrower::*, ledger::*};

#[derive(Debug, Clone, Default)]
pub(in crate::database) struct MemoryStore {
    book_copies: Vec<BookCopy>,
    borrowers: Vec<Borrower>,
    ledger: Vec<LedgerEntry>,
}

impl MemoryStore {
    fn insert_book_copy(&mut self, copy: &BookCopy) -> error_stack::Result<(), KernelError> {
        let taken = self
            .book_copies
            .iter()
            .any(|c| c.isbn_no() == copy.isbn_no() && c.version() == copy.version());
        if taken {
            return Err(Report::new(KernelError::Concurrency).attach_printable(format!(
                "isbn {} already has version {}",
                copy.isbn_no().as_ref(),
                copy.version().as_ref()
            )));
        }
        self.book_copies.push(copy.clone());
        Ok(())
    }

    fn insert_borrower(&mut self, borrower: &Borrower) -> error_stack::Result<(), KernelError> {
        if self
            .borrowers
            .iter()
            .any(|b| b.is_registered_as(borrower.name(), borrower.email()))
        {
            return Err(Report::new(KernelError::from(ConflictReason::BorrowerExists)));
        }
        self.borrowers.push(borrower.clone());
        Ok(())
    }

    fn insert_ledger_entry(&mut self, entry: &LedgerEntry) -> error_stack::Result<(), KernelError> {
        if entry.status().is_open() && self.open_entry(entry).is_some() {
            return Err(Report::new(KernelError::from(ConflictReason::AlreadyBorrowed)));
        }
        self.ledger.push(entry.clone());
        Ok(())
    }

    fn replace_ledger_entry(&mut self, entry: &LedgerEntry) -> error_stack::Result<(), KernelError> {
        if entry.status().is_open()
            && self
                .open_entry(entry)
                .is_some_and(|open| open.id() != entry.id())
        {
            return Err(Report::new(KernelError::from(ConflictReason::AlreadyBorrowed)));
        }
        let Some(stored) = self.ledger.iter_mut().find(|e| e.id() == entry.id()) else {
            return Err(Report::new(KernelError::Internal).attach_printable(format!(
                "ledger entry {} does not exist",
                entry.id().as_ref()
            )));
        };
        if stored.status() == entry.status() {
            return Err(Report::new(KernelError::from(ConflictReason::NotBorrowed)));
        }
        *stored = entry.clone();
        Ok(())
    }

    fn open_entry(&self, entry: &LedgerEntry) -> Option<&LedgerEntry> {
        self.ledger
            .iter()
            .find(|e| e.book_copy_id() == entry.book_copy_id() && e.status().is_open())
    }
}

/// Process local storage. Every transaction holds the whole store until it is
/// committed or dropped, so units of work run one at a time.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    store: Arc<Mutex<MemoryStore>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = Arc::clone(&self.store).lock_owned().await;
        Ok(InMemoryTransaction {
            guard,
            working: None,
        })
    }
}

/// Reads go to the shared store until the first write. From then on the
/// transaction works on its own copy, which reaches the store only on commit.
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<MemoryStore>,
    working: Option<MemoryStore>,
}

impl InMemoryTransaction {
    pub(in crate::database) fn store(&self) -> &MemoryStore {
        self.working.as_ref().unwrap_or(&*self.guard)
    }

    pub(in crate::database) fn store_mut(&mut self) -> &mut MemoryStore {
        let shared: &MemoryStore = &self.guard;
        self.working.get_or_insert_with(|| shared.clone())
    }

    #[cfg(test)]
    fn is_dirty(&self) -> bool {
        self.working.is_some()
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let InMemoryTransaction { mut guard, working } = self;
        if let Some(working) = working {
            *guard = working;
        }
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::BorrowerQuery;
    use kernel::interface::update::BorrowerModifier;
    use kernel::prelude::entity::{Borrower, BorrowerEmail, BorrowerId, BorrowerName};
    use kernel::KernelError;

    use crate::database::memory::{InMemoryBorrowerRepository, InMemoryDatabase};

    fn borrower() -> Borrower {
        Borrower::new(
            BorrowerId::new(Uuid::new_v4()),
            BorrowerName::new("John"),
            BorrowerEmail::new("j@x.com"),
        )
    }

    #[tokio::test]
    async fn commit_publishes_writes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let borrower = borrower();

        let mut con = db.transact().await?;
        InMemoryBorrowerRepository.create(&mut con, &borrower).await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        let found = InMemoryBorrowerRepository
            .find_by_id(&mut con, borrower.id())
            .await?;
        assert_eq!(found, Some(borrower));
        Ok(())
    }

    #[tokio::test]
    async fn reads_share_the_store_until_first_write() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let borrower = borrower();

        let mut con = db.transact().await?;
        let found = InMemoryBorrowerRepository
            .find_by_id(&mut con, borrower.id())
            .await?;
        assert!(found.is_none());
        assert!(!con.is_dirty());

        InMemoryBorrowerRepository.create(&mut con, &borrower).await?;
        assert!(con.is_dirty());
        let found = InMemoryBorrowerRepository
            .find_by_id(&mut con, borrower.id())
            .await?;
        assert_eq!(found, Some(borrower));
        Ok(())
    }

    #[tokio::test]
    async fn dropped_transaction_discards_writes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let borrower = borrower();

        {
            let mut con = db.transact().await?;
            InMemoryBorrowerRepository.create(&mut con, &borrower).await?;
        }

        let mut con = db.transact().await?;
        InMemoryBorrowerRepository.create(&mut con, &borrower).await?;
        con.roll_back().await?;

        let mut con = db.transact().await?;
        let found = InMemoryBorrowerRepository
            .find_by_id(&mut con, borrower.id())
            .await?;
        assert!(found.is_none());
        Ok(())
    }
}
