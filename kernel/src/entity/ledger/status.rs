use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;

use crate::KernelError;

const BORROWED: &str = "BORROWED";
const RETURNED: &str = "RETURNED";

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum LedgerStatus {
    Borrowed,
    Returned,
}

impl LedgerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerStatus::Borrowed => BORROWED,
            LedgerStatus::Returned => RETURNED,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, LedgerStatus::Borrowed)
    }
}

impl Display for LedgerStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerStatus {
    type Err = Report<KernelError>;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            BORROWED => Ok(LedgerStatus::Borrowed),
            RETURNED => Ok(LedgerStatus::Returned),
            _ => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown ledger status: {value}"))),
        }
    }
}
