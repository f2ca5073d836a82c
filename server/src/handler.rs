use std::ops::Deref;
use std::sync::Arc;

use application::service::{
    AddBookCopyService, AddBorrowerService, GetAllBookCopyService, GetAllBorrowerService,
    GetBookCopyService, GetBorrowerService, GetLedgerService, HandleLedgerService,
};

/// Everything the routes need from a storage backend.
pub trait Backend:
    AddBookCopyService
    + GetBookCopyService
    + GetAllBookCopyService
    + AddBorrowerService
    + GetBorrowerService
    + GetAllBorrowerService
    + HandleLedgerService
    + GetLedgerService
{
}

impl<T> Backend for T where
    T: AddBookCopyService
        + GetBookCopyService
        + GetAllBookCopyService
        + AddBorrowerService
        + GetBorrowerService
        + GetAllBorrowerService
        + HandleLedgerService
        + GetLedgerService
{
}

pub struct AppModule<D>(Arc<D>);

impl<D: Backend> AppModule<D> {
    pub fn new(backend: D) -> Self {
        Self(Arc::new(backend))
    }
}

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = D;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}
