use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PageSize(pub u16);

impl PageSize {
    pub const MAX: PageSize = PageSize(100);

    /// Clamps to `1..=MAX`.
    pub fn clamped(size: u16) -> Self {
        PageSize(size.clamp(1, Self::MAX.0))
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(20)
    }
}

/// Order of listings by `created_at`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Zero-based offset paging.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct PageRequest {
    pub page: u32,
    pub size: PageSize,
    pub direction: SortDirection,
}

impl PageRequest {
    pub fn new(page: u32, size: u16, direction: SortDirection) -> Self {
        Self {
            page,
            size: PageSize::clamped(size),
            direction,
        }
    }

    pub fn first(size: u16, direction: SortDirection) -> Self {
        Self::new(0, size, direction)
    }

    pub fn limit(&self) -> u64 {
        self.size.0 as u64
    }

    pub fn offset(&self) -> u64 {
        self.page as u64 * self.limit()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u16,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page,
            size: request.size.0,
            total,
        }
    }

    /// Cuts one page out of an already ordered, complete list.
    pub fn slice(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .collect();
        Self::new(items, request, total)
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(self.size as u64)
    }

    pub fn has_next(&self) -> bool {
        (self.page as u64 + 1) < self.total_pages()
    }
}
