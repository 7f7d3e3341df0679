use std::ops::Range;

/// The visible window of a paginated, filtered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page actually shown after clamping.
    pub effective_page: usize,
    /// Always at least 1, even for an empty sequence.
    pub total_pages: usize,
    pub start_index: usize,
    /// Exclusive.
    pub end_index: usize,
}

impl PageWindow {
    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    pub fn has_prev(&self) -> bool {
        self.effective_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.effective_page < self.total_pages
    }
}

/// Compute the visible window for `requested_page`.
///
/// Never fails: a zero page size is treated as 1, and any requested page
/// (zero, negative, or past the end) is clamped into `1..=total_pages`.
pub fn paginate(filtered_count: usize, page_size: usize, requested_page: i64) -> PageWindow {
    let page_size = page_size.max(1);
    let total_pages = filtered_count.div_ceil(page_size).max(1);

    let effective_page = if requested_page < 1 {
        1
    } else {
        usize::try_from(requested_page)
            .unwrap_or(usize::MAX)
            .min(total_pages)
    };
    if effective_page as i64 != requested_page {
        tracing::debug!(
            requested_page,
            effective_page,
            total_pages,
            "invalid page clamped"
        );
    }

    let start_index = (effective_page - 1) * page_size;
    let end_index = (start_index + page_size).min(filtered_count);

    PageWindow {
        effective_page,
        total_pages,
        start_index,
        end_index,
    }
}
