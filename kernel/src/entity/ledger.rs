mod id;
mod status;
mod transaction;

pub use self::{id::*, status::*, transaction::*};
use crate::entity::{BookCopyId, BorrowerId};
use destructure::{Destructure, Mutation};
use vodca::References;

/// One borrow of one copy. Refers to the copy and the borrower by id only.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct LedgerEntry {
    id: LedgerEntryId,
    book_copy_id: BookCopyId,
    borrower_id: BorrowerId,
    status: LedgerStatus,
}

impl LedgerEntry {
    pub fn new(
        id: LedgerEntryId,
        book_copy_id: BookCopyId,
        borrower_id: BorrowerId,
        status: LedgerStatus,
    ) -> Self {
        Self {
            id,
            book_copy_id,
            borrower_id,
            status,
        }
    }

    pub fn borrowed(id: LedgerEntryId, book_copy_id: BookCopyId, borrower_id: BorrowerId) -> Self {
        Self::new(id, book_copy_id, borrower_id, LedgerStatus::Borrowed)
    }

    pub fn returned(mut self) -> Self {
        self.substitute(|entry| *entry.status = LedgerStatus::Returned);
        self
    }
}
