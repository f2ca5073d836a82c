use serde::Deserialize;

use application::transfer::PageDto;
use kernel::prelude::entity::{PageNumber, PageSize};

use crate::error::ValidationErrors;

// Newtypes carry the defaults; serde's default attribute does not take literals.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(default)]
    page_num: PageNumber,
    #[serde(default)]
    page_size: PageSize,
}

impl PageRequest {
    pub fn validate(self) -> Result<PageDto, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let size = *self.page_size.as_ref();
        if size < 1 {
            errors.push("Page size must not be less than one");
        }
        errors.finish(PageDto {
            number: *self.page_num.as_ref(),
            size,
        })
    }
}
