mod email;
mod id;
mod name;

pub use self::{email::*, id::*, name::*};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Destructure, References)]
pub struct Borrower {
    id: BorrowerId,
    name: BorrowerName,
    email: BorrowerEmail,
}

impl Borrower {
    pub fn new(id: BorrowerId, name: BorrowerName, email: BorrowerEmail) -> Self {
        Self { id, name, email }
    }

    /// Registration identity. Compared byte for byte.
    pub fn is_registered_as(&self, name: &BorrowerName, email: &BorrowerEmail) -> bool {
        self.name.eq(name) && self.email.eq(email)
    }
}
