use uuid::Uuid;

use kernel::prelude::entity::{DestructLedgerEntry, LedgerEntry, LedgerTransaction};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LedgerEntryDto {
    pub id: Uuid,
    pub book_copy_id: Uuid,
    pub borrower_id: Uuid,
    pub status: String,
}

impl From<LedgerEntry> for LedgerEntryDto {
    fn from(value: LedgerEntry) -> Self {
        let DestructLedgerEntry {
            id,
            book_copy_id,
            borrower_id,
            status,
        } = value.into_destruct();
        Self {
            id: id.into(),
            book_copy_id: book_copy_id.into(),
            borrower_id: borrower_id.into(),
            status: status.to_string(),
        }
    }
}

pub struct LedgerTransactionDto {
    pub book_copy_id: Uuid,
    pub borrower_id: Uuid,
    pub transaction: LedgerTransaction,
}

pub struct GetBookCopyLedgerDto {
    pub book_copy_id: Uuid,
}

pub struct GetBorrowerLedgerDto {
    pub borrower_id: Uuid,
}
