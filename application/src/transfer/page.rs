use kernel::prelude::entity::{Page, PageNumber, PageSize};

#[derive(Debug, Clone, Copy)]
pub struct PageDto {
    pub number: u32,
    pub size: u32,
}

impl From<PageDto> for Page {
    fn from(value: PageDto) -> Self {
        Page::new(PageNumber::new(value.number), PageSize::new(value.size))
    }
}
