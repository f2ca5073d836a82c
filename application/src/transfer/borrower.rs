use uuid::Uuid;

use kernel::prelude::entity::{Borrower, DestructBorrower};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BorrowerDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<Borrower> for BorrowerDto {
    fn from(value: Borrower) -> Self {
        let DestructBorrower { id, name, email } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

pub struct CreateBorrowerDto {
    pub name: String,
    pub email: String,
}

pub struct GetBorrowerDto {
    pub id: Uuid,
}
