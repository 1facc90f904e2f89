//! Page arithmetic shared by the pager display and navigation

/// Everything derivable from (page, total, page_size)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    /// Never less than 1, even for an empty catalog
    pub page_count: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageInfo {
    pub fn new(page: u32, total: u64, page_size: u32) -> Self {
        let size = u64::from(page_size.max(1));
        let page_count = total.div_ceil(size).max(1);

        Self {
            page,
            page_size,
            total,
            page_count,
            has_previous: page > 1,
            has_next: u64::from(page) * size < total,
        }
    }
}
