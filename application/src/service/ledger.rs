use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    BookCopyQuery, BorrowerQuery, DependOnBookCopyQuery, DependOnBorrowerQuery,
    DependOnLedgerQuery, LedgerQuery,
};
use kernel::interface::update::{DependOnLedgerModifier, LedgerModifier};
use kernel::prelude::entity::{BookCopyId, BorrowerId, LedgerEffect, LedgerEntry, LedgerEntryId};
use kernel::{ConflictReason, KernelError};

use crate::transfer::{
    GetBookCopyLedgerDto, GetBorrowerLedgerDto, LedgerEntryDto, LedgerTransactionDto,
};

/// Borrows or returns a single copy.
///
/// Both the copy and the borrower have to exist before the copy's open entry
/// is consulted. A return closes the open entry whoever the given borrower is.
#[async_trait::async_trait]
pub trait HandleLedgerService:
    'static
    + Sync
    + Send
    + DependOnBookCopyQuery
    + DependOnBorrowerQuery
    + DependOnLedgerQuery
    + DependOnLedgerModifier
{
    async fn handle_transaction(
        &self,
        dto: LedgerTransactionDto,
    ) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book_copy_id = BookCopyId::new(dto.book_copy_id);
        let borrower_id = BorrowerId::new(dto.borrower_id);

        let copy = self
            .book_copy_query()
            .find_by_id(&mut connection, &book_copy_id)
            .await?;
        if copy.is_none() {
            tracing::debug!("Book copy {} does not exist", book_copy_id.as_ref());
            return Err(Report::new(KernelError::from(
                ConflictReason::BookCopyNotFound,
            )));
        }

        let borrower = self
            .borrower_query()
            .find_by_id(&mut connection, &borrower_id)
            .await?;
        if borrower.is_none() {
            tracing::debug!("Borrower {} does not exist", borrower_id.as_ref());
            return Err(Report::new(KernelError::from(
                ConflictReason::BorrowerNotFound,
            )));
        }

        let open = self
            .ledger_query()
            .find_open_by_book_copy_id(&mut connection, &book_copy_id)
            .await?;
        tracing::debug!(
            "Copy {} has open entry: {}",
            book_copy_id.as_ref(),
            open.is_some()
        );

        match dto.transaction.resolve(open)? {
            LedgerEffect::Open => {
                let entry = LedgerEntry::borrowed(
                    LedgerEntryId::new(Uuid::new_v4()),
                    book_copy_id,
                    borrower_id,
                );
                self.ledger_modifier()
                    .create(&mut connection, &entry)
                    .await?;
                connection.commit().await?;
                tracing::info!(
                    "Copy {} borrowed by {} (entry {})",
                    entry.book_copy_id().as_ref(),
                    entry.borrower_id().as_ref(),
                    entry.id().as_ref()
                );
            }
            LedgerEffect::Close(entry) => {
                self.ledger_modifier()
                    .update(&mut connection, &entry)
                    .await?;
                connection.commit().await?;
                tracing::info!(
                    "Copy {} returned by {} (entry {})",
                    entry.book_copy_id().as_ref(),
                    borrower_id.as_ref(),
                    entry.id().as_ref()
                );
            }
        }
        Ok(())
    }
}

impl<T> HandleLedgerService for T where
    T: DependOnBookCopyQuery + DependOnBorrowerQuery + DependOnLedgerQuery + DependOnLedgerModifier
{
}

#[async_trait::async_trait]
pub trait GetLedgerService: 'static + Sync + Send + DependOnLedgerQuery {
    async fn get_book_copy_ledger(
        &self,
        dto: GetBookCopyLedgerDto,
    ) -> error_stack::Result<Vec<LedgerEntryDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = BookCopyId::new(dto.book_copy_id);
        let entries = self
            .ledger_query()
            .find_by_book_copy_id(&mut connection, &id)
            .await?;
        Ok(entries.into_iter().map(LedgerEntryDto::from).collect())
    }

    async fn get_borrower_ledger(
        &self,
        dto: GetBorrowerLedgerDto,
    ) -> error_stack::Result<Vec<LedgerEntryDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = BorrowerId::new(dto.borrower_id);
        let entries = self
            .ledger_query()
            .find_by_borrower_id(&mut connection, &id)
            .await?;
        Ok(entries.into_iter().map(LedgerEntryDto::from).collect())
    }
}

impl<T> GetLedgerService for T where T: DependOnLedgerQuery {}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use uuid::Uuid;

    use driver::database::InMemoryDatabase;
    use kernel::prelude::entity::LedgerTransaction;
    use kernel::{ConflictReason, KernelError};

    use crate::service::{
        AddBookCopyService, AddBorrowerService, GetLedgerService, HandleLedgerService,
    };
    use crate::transfer::{
        BookCopyDto, BorrowerDto, CreateBookCopyDto, CreateBorrowerDto, GetBookCopyLedgerDto,
        GetBorrowerLedgerDto, LedgerTransactionDto,
    };

    async fn setup(
        db: &InMemoryDatabase,
    ) -> error_stack::Result<(BookCopyDto, BorrowerDto, BorrowerDto), KernelError> {
        let copy = db
            .add_book_copy(CreateBookCopyDto {
                isbn_no: "X".to_string(),
                title: "Title".to_string(),
                author: "Author".to_string(),
            })
            .await?;
        let first = db
            .add_borrower(CreateBorrowerDto {
                name: "John".to_string(),
                email: "j@x.com".to_string(),
            })
            .await?;
        let second = db
            .add_borrower(CreateBorrowerDto {
                name: "Jane".to_string(),
                email: "jane@x.com".to_string(),
            })
            .await?;
        Ok((copy, first, second))
    }

    fn request(copy: Uuid, borrower: Uuid, transaction: LedgerTransaction) -> LedgerTransactionDto {
        LedgerTransactionDto {
            book_copy_id: copy,
            borrower_id: borrower,
            transaction,
        }
    }

    fn conflict(
        result: error_stack::Result<(), KernelError>,
        reason: ConflictReason,
    ) {
        let report = result.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict(reason));
    }

    #[tokio::test]
    async fn borrow_and_return_alternate() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let (copy, john, jane) = setup(&db).await?;

        db.handle_transaction(request(copy.id, john.id, LedgerTransaction::Borrow))
            .await?;
        conflict(
            db.handle_transaction(request(copy.id, jane.id, LedgerTransaction::Borrow))
                .await,
            ConflictReason::AlreadyBorrowed,
        );

        // Any registered borrower may close the loan.
        db.handle_transaction(request(copy.id, jane.id, LedgerTransaction::Return))
            .await?;
        conflict(
            db.handle_transaction(request(copy.id, john.id, LedgerTransaction::Return))
                .await,
            ConflictReason::NotBorrowed,
        );

        db.handle_transaction(request(copy.id, jane.id, LedgerTransaction::Borrow))
            .await?;

        let history = db
            .get_book_copy_ledger(GetBookCopyLedgerDto {
                book_copy_id: copy.id,
            })
            .await?;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].borrower_id, john.id);
        assert_eq!(history[0].status, "RETURNED");
        assert_eq!(history[1].borrower_id, jane.id);
        assert_eq!(history[1].status, "BORROWED");

        let johns = db
            .get_borrower_ledger(GetBorrowerLedgerDto {
                borrower_id: john.id,
            })
            .await?;
        assert_eq!(johns.len(), 1);
        assert_eq!(johns[0].id, history[0].id);
        Ok(())
    }

    #[tokio::test]
    async fn return_of_available_copy_is_conflict() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let (copy, john, _) = setup(&db).await?;
        conflict(
            db.handle_transaction(request(copy.id, john.id, LedgerTransaction::Return))
                .await,
            ConflictReason::NotBorrowed,
        );
        Ok(())
    }

    #[tokio::test]
    async fn unknown_copy_is_checked_first() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let (copy, john, _) = setup(&db).await?;

        conflict(
            db.handle_transaction(request(Uuid::new_v4(), john.id, LedgerTransaction::Borrow))
                .await,
            ConflictReason::BookCopyNotFound,
        );
        conflict(
            db.handle_transaction(request(
                Uuid::new_v4(),
                Uuid::new_v4(),
                LedgerTransaction::Return,
            ))
            .await,
            ConflictReason::BookCopyNotFound,
        );
        conflict(
            db.handle_transaction(request(copy.id, Uuid::new_v4(), LedgerTransaction::Borrow))
                .await,
            ConflictReason::BorrowerNotFound,
        );

        let history = db
            .get_book_copy_ledger(GetBookCopyLedgerDto {
                book_copy_id: copy.id,
            })
            .await?;
        assert!(history.is_empty());
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_borrows_have_one_winner() -> error_stack::Result<(), KernelError> {
        let db = Arc::new(InMemoryDatabase::new());
        let (copy, _, _) = setup(&db).await?;

        let mut borrowers = Vec::new();
        for i in 0..16 {
            let borrower = db
                .add_borrower(CreateBorrowerDto {
                    name: format!("borrower-{i}"),
                    email: format!("b{i}@x.com"),
                })
                .await?;
            borrowers.push(borrower.id);
        }

        let copy_id = copy.id;
        let handles = borrowers
            .into_iter()
            .map(|borrower| {
                let db = Arc::clone(&db);
                tokio::spawn(async move {
                    db.handle_transaction(request(copy_id, borrower, LedgerTransaction::Borrow))
                        .await
                })
            })
            .collect::<Vec<_>>();

        let mut won = 0;
        for handle in handles {
            match handle.await.expect("borrow task panicked") {
                Ok(()) => won += 1,
                Err(report) => assert_eq!(
                    report.current_context(),
                    &KernelError::Conflict(ConflictReason::AlreadyBorrowed)
                ),
            }
        }
        assert_eq!(won, 1);

        let history = db
            .get_book_copy_ledger(GetBookCopyLedgerDto {
                book_copy_id: copy.id,
            })
            .await?;
        assert_eq!(history.len(), 1);
        Ok(())
    }
}
