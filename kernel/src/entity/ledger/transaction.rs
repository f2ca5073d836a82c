use error_stack::Report;

use crate::entity::LedgerEntry;
use crate::{ConflictReason, KernelError};

/// A request against one book copy.
///
/// A copy is AVAILABLE while it has no open entry and ON_LOAN while it has
/// exactly one. `Borrow` moves AVAILABLE to ON_LOAN and `Return` moves it back.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LedgerTransaction {
    Borrow,
    Return,
}

/// The write a legal transaction results in.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum LedgerEffect {
    /// Insert a fresh BORROWED entry.
    Open,
    /// Persist this entry, now RETURNED, in place of the open one.
    Close(LedgerEntry),
}

impl LedgerTransaction {
    pub fn is_borrow(&self) -> bool {
        matches!(self, LedgerTransaction::Borrow)
    }

    /// Decides the transaction against the copy's open entry, if it has one.
    pub fn resolve(
        self,
        open: Option<LedgerEntry>,
    ) -> error_stack::Result<LedgerEffect, KernelError> {
        match (self, open) {
            (LedgerTransaction::Borrow, None) => Ok(LedgerEffect::Open),
            (LedgerTransaction::Borrow, Some(entry)) => {
                Err(Report::new(KernelError::from(ConflictReason::AlreadyBorrowed))
                    .attach_printable(format!("open entry {:?}", entry.id().as_ref())))
            }
            (LedgerTransaction::Return, Some(entry)) => Ok(LedgerEffect::Close(entry.returned())),
            (LedgerTransaction::Return, None) => {
                Err(Report::new(KernelError::from(ConflictReason::NotBorrowed)))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::entity::{
        BookCopyId, BorrowerId, LedgerEffect, LedgerEntry, LedgerEntryId, LedgerStatus,
        LedgerTransaction,
    };
    use crate::{ConflictReason, KernelError};

    fn open_entry() -> LedgerEntry {
        LedgerEntry::new(
            LedgerEntryId::new(Uuid::new_v4()),
            BookCopyId::new(Uuid::new_v4()),
            BorrowerId::new(Uuid::new_v4()),
            LedgerStatus::Borrowed,
        )
    }

    #[test]
    fn borrow_available_opens_entry() {
        let effect = LedgerTransaction::Borrow.resolve(None).unwrap();
        assert_eq!(effect, LedgerEffect::Open);
    }

    #[test]
    fn borrow_on_loan_is_conflict() {
        let report = LedgerTransaction::Borrow
            .resolve(Some(open_entry()))
            .unwrap_err();
        assert_eq!(
            report.current_context(),
            &KernelError::Conflict(ConflictReason::AlreadyBorrowed)
        );
    }

    #[test]
    fn return_on_loan_closes_same_entry() {
        let entry = open_entry();
        let effect = LedgerTransaction::Return
            .resolve(Some(entry.clone()))
            .unwrap();
        let LedgerEffect::Close(closed) = effect else {
            panic!("return should close the open entry");
        };
        assert_eq!(closed.id(), entry.id());
        assert_eq!(closed.book_copy_id(), entry.book_copy_id());
        assert_eq!(closed.borrower_id(), entry.borrower_id());
        assert_eq!(closed.status(), &LedgerStatus::Returned);
    }

    #[test]
    fn return_available_is_conflict() {
        let report = LedgerTransaction::Return.resolve(None).unwrap_err();
        assert_eq!(
            report.current_context(),
            &KernelError::Conflict(ConflictReason::NotBorrowed)
        );
    }
}
