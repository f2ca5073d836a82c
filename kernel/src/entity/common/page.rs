use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct PageSize(u32);

impl PageSize {
    pub fn new(value: impl Into<u32>) -> Self {
        PageSize(value.into())
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::new(30u32)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct PageNumber(u32);

impl PageNumber {
    pub fn new(value: impl Into<u32>) -> Self {
        PageNumber(value.into())
    }
}

/// A page request. Page `n` skips `n * size` records.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Page {
    number: PageNumber,
    size: PageSize,
}

impl Page {
    pub fn new(number: PageNumber, size: PageSize) -> Self {
        Self { number, size }
    }

    pub fn limit(&self) -> i64 {
        i64::from(*self.size.as_ref())
    }

    /// Saturates, so a page past any reachable record stays a valid empty page.
    pub fn offset(&self) -> i64 {
        i64::from(*self.number.as_ref()).saturating_mul(self.limit())
    }

    /// Cuts this page out of an in-order sequence.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit()).unwrap_or(usize::MAX);
        items.iter().skip(offset).take(limit).cloned().collect()
    }
}

#[cfg(test)]
mod test {
    use super::{Page, PageNumber, PageSize};

    #[test]
    fn default_page_is_first_thirty() {
        let page = Page::default();
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 30);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let page = Page::new(PageNumber::new(2u32), PageSize::new(10u32));
        assert_eq!(page.offset(), 20);

        let items = (0..25).collect::<Vec<i32>>();
        assert_eq!(page.slice(&items), vec![20, 21, 22, 23, 24]);

        let past_end = Page::new(PageNumber::new(5u32), PageSize::new(10u32));
        assert!(past_end.slice(&items).is_empty());
    }

    #[test]
    fn largest_page_does_not_overflow() {
        let page = Page::new(PageNumber::new(u32::MAX), PageSize::new(u32::MAX));
        assert_eq!(page.limit(), i64::from(u32::MAX));
        assert_eq!(page.offset(), i64::MAX);

        let items = (0..25).collect::<Vec<i32>>();
        assert!(page.slice(&items).is_empty());
    }
}
