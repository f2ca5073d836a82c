use kernel::interface::query::{BorrowerQuery, DependOnBorrowerQuery};
use kernel::interface::update::{BorrowerModifier, DependOnBorrowerModifier};
use kernel::prelude::entity::{Borrower, BorrowerEmail, BorrowerId, BorrowerName, Page};
use kernel::KernelError;

use crate::database::memory::{InMemoryDatabase, InMemoryTransaction};

pub struct InMemoryBorrowerRepository;

#[async_trait::async_trait]
impl BorrowerQuery for InMemoryBorrowerRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BorrowerId,
    ) -> error_stack::Result<Option<Borrower>, KernelError> {
        let found = con.store().borrowers.iter().find(|b| b.id() == id);
        Ok(found.cloned())
    }

    async fn find_by_name_and_email(
        &self,
        con: &mut InMemoryTransaction,
        name: &BorrowerName,
        email: &BorrowerEmail,
    ) -> error_stack::Result<Option<Borrower>, KernelError> {
        let found = con
            .store()
            .borrowers
            .iter()
            .find(|b| b.is_registered_as(name, email));
        Ok(found.cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
        page: &Page,
    ) -> error_stack::Result<Vec<Borrower>, KernelError> {
        Ok(page.slice(&con.store().borrowers))
    }
}

#[async_trait::async_trait]
impl BorrowerModifier for InMemoryBorrowerRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        borrower: &Borrower,
    ) -> error_stack::Result<(), KernelError> {
        con.store_mut().insert_borrower(borrower)
    }
}

impl DependOnBorrowerQuery for InMemoryDatabase {
    type BorrowerQuery = InMemoryBorrowerRepository;
    fn borrower_query(&self) -> &Self::BorrowerQuery {
        &InMemoryBorrowerRepository
    }
}

impl DependOnBorrowerModifier for InMemoryDatabase {
    type BorrowerModifier = InMemoryBorrowerRepository;
    fn borrower_modifier(&self) -> &Self::BorrowerModifier {
        &InMemoryBorrowerRepository
    }
}
