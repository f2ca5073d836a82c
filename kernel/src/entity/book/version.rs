use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

/// Copy number of a book within its ISBN. Starts at 1.
#[derive(
    Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln,
)]
pub struct CopyVersion(i32);

impl CopyVersion {
    pub fn new(version: impl Into<i32>) -> Self {
        Self(version.into())
    }

    pub fn first() -> Self {
        Self(1)
    }

    pub fn next(&self) -> error_stack::Result<Self, KernelError> {
        self.0.checked_add(1).map(Self).ok_or_else(|| {
            Report::new(KernelError::Internal)
                .attach_printable(format!("No copy version after {}", self.0))
        })
    }
}

#[cfg(test)]
mod test {
    use crate::entity::CopyVersion;
    use crate::KernelError;

    #[test]
    fn next_counts_up() {
        assert_eq!(CopyVersion::first().next().unwrap(), CopyVersion::new(2));
    }

    #[test]
    fn last_version_has_no_next() {
        let report = CopyVersion::new(i32::MAX).next().unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
    }
}
