//! Partitioning of the active row sequence into fixed-capacity pages.

use std::ops::Range;

/// Half-open range of row indices that make up one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageBoundary {
    pub start: usize,
    pub end: usize,
}

impl PageBoundary {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First and last row index, both inclusive. `None` for the empty page.
    pub fn inclusive(&self) -> Option<(usize, usize)> {
        if self.is_empty() {
            None
        } else {
            Some((self.start, self.end - 1))
        }
    }
}

/// Page boundaries for one pane.
///
/// Boundaries are contiguous, never overlap and cover every row exactly
/// once. There is always at least one page: an empty sequence produces a
/// single empty page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTable {
    boundaries: Vec<PageBoundary>,
    capacity: usize,
    line_count: usize,
}

impl Default for PageTable {
    fn default() -> Self {
        paginate::<()>(&[], 1)
    }
}

impl PageTable {
    pub fn total_pages(&self) -> usize {
        self.boundaries.len()
    }

    pub fn boundaries(&self) -> &[PageBoundary] {
        &self.boundaries
    }

    /// Boundary of a 1-based page number.
    pub fn page(&self, page: usize) -> Option<PageBoundary> {
        page.checked_sub(1)
            .and_then(|idx| self.boundaries.get(idx))
            .copied()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }
}

/// Split `lines` into pages of `capacity` rows.
///
/// Rows are accumulated until the next one would overflow the page; the last
/// page may be short. A capacity of zero is treated as one.
pub fn paginate<T>(lines: &[T], capacity: usize) -> PageTable {
    let capacity = capacity.max(1);
    let line_count = lines.len();

    let mut boundaries = Vec::with_capacity(line_count.div_ceil(capacity).max(1));
    let mut start = 0;
    while start < line_count {
        let end = (start + capacity).min(line_count);
        boundaries.push(PageBoundary::new(start, end));
        start = end;
    }

    if boundaries.is_empty() {
        boundaries.push(PageBoundary::new(0, 0));
    }

    PageTable {
        boundaries,
        capacity,
        line_count,
    }
}
