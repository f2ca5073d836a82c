use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    Conflict(ConflictReason),
    Concurrency,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Conflict(reason) => write!(f, "{reason}"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}

/// Business rule violations. Both missing references and illegal ledger
/// transitions are reported as conflicts.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ConflictReason {
    IsbnMismatch,
    BorrowerExists,
    BookCopyNotFound,
    BorrowerNotFound,
    AlreadyBorrowed,
    NotBorrowed,
}

impl Display for ConflictReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            ConflictReason::IsbnMismatch => "Book with same ISBN must have same title and author",
            ConflictReason::BorrowerExists => "Borrower Already Exists",
            ConflictReason::BookCopyNotFound => "Book not exists to borrow",
            ConflictReason::BorrowerNotFound => "Borrower not exists to borrow book",
            ConflictReason::AlreadyBorrowed => "Book is already borrowed by someone",
            ConflictReason::NotBorrowed => "Book is not borrowed to return",
        };
        f.write_str(message)
    }
}

impl From<ConflictReason> for KernelError {
    fn from(reason: ConflictReason) -> Self {
        KernelError::Conflict(reason)
    }
}

#[cfg(test)]
mod test {
    use crate::{ConflictReason, KernelError};

    #[test]
    fn conflict_displays_reason_message() {
        let error = KernelError::from(ConflictReason::AlreadyBorrowed);
        assert_eq!(error.to_string(), "Book is already borrowed by someone");
        assert_eq!(
            KernelError::Conflict(ConflictReason::NotBorrowed).to_string(),
            "Book is not borrowed to return"
        );
    }
}
