use serde::Serialize;
use uuid::Uuid;

use application::transfer::LedgerEntryDto;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryResponse {
    id: Uuid,
    book_id: Uuid,
    borrower_id: Uuid,
    status: String,
}

impl From<LedgerEntryDto> for LedgerEntryResponse {
    fn from(value: LedgerEntryDto) -> Self {
        Self {
            id: value.id,
            book_id: value.book_copy_id,
            borrower_id: value.borrower_id,
            status: value.status,
        }
    }
}

pub fn into_responses(entries: Vec<LedgerEntryDto>) -> Vec<LedgerEntryResponse> {
    entries.into_iter().map(LedgerEntryResponse::from).collect()
}
