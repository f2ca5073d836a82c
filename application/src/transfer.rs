mod book;
mod borrower;
mod ledger;
mod page;

pub use self::{book::*, borrower::*, ledger::*, page::*};
