use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BorrowerQuery, DependOnBorrowerQuery};
use kernel::interface::update::{BorrowerModifier, DependOnBorrowerModifier};
use kernel::prelude::entity::{Borrower, BorrowerEmail, BorrowerId, BorrowerName, Page};
use kernel::{ConflictReason, KernelError};

use crate::transfer::{BorrowerDto, CreateBorrowerDto, GetBorrowerDto, PageDto};

#[async_trait::async_trait]
pub trait AddBorrowerService:
    'static + Sync + Send + DependOnBorrowerQuery + DependOnBorrowerModifier
{
    async fn add_borrower(
        &self,
        dto: CreateBorrowerDto,
    ) -> error_stack::Result<BorrowerDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let name = BorrowerName::new(dto.name);
        let email = BorrowerEmail::new(dto.email);
        let registered = self
            .borrower_query()
            .find_by_name_and_email(&mut connection, &name, &email)
            .await?;
        if let Some(registered) = registered {
            tracing::debug!(
                "Borrower {} is already registered with this name and email",
                registered.id().as_ref()
            );
            return Err(Report::new(KernelError::from(ConflictReason::BorrowerExists)));
        }

        let borrower = Borrower::new(BorrowerId::new(Uuid::new_v4()), name, email);
        self.borrower_modifier()
            .create(&mut connection, &borrower)
            .await?;
        connection.commit().await?;

        tracing::info!("Registered borrower {}", borrower.id().as_ref());
        Ok(BorrowerDto::from(borrower))
    }
}

impl<T> AddBorrowerService for T where T: DependOnBorrowerQuery + DependOnBorrowerModifier {}

#[async_trait::async_trait]
pub trait GetBorrowerService: 'static + Sync + Send + DependOnBorrowerQuery {
    async fn get_borrower(
        &self,
        dto: GetBorrowerDto,
    ) -> error_stack::Result<Option<BorrowerDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = BorrowerId::new(dto.id);
        let borrower = self.borrower_query().find_by_id(&mut connection, &id).await?;
        Ok(borrower.map(BorrowerDto::from))
    }
}

impl<T> GetBorrowerService for T where T: DependOnBorrowerQuery {}

#[async_trait::async_trait]
pub trait GetAllBorrowerService: 'static + Sync + Send + DependOnBorrowerQuery {
    async fn get_all_borrowers(
        &self,
        dto: PageDto,
    ) -> error_stack::Result<Vec<BorrowerDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let page = Page::from(dto);
        let borrowers = self.borrower_query().find_all(&mut connection, &page).await?;
        Ok(borrowers.into_iter().map(BorrowerDto::from).collect())
    }
}

impl<T> GetAllBorrowerService for T where T: DependOnBorrowerQuery {}
