mod book;
mod borrower;
mod ledger;

pub use self::{book::*, borrower::*, ledger::*};
