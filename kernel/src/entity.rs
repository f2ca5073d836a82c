mod book;
mod borrower;
mod common;
mod ledger;

pub use self::{book::*, borrower::*, common::*, ledger::*};
