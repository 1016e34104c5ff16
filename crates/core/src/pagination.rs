use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use thiserror::Error;

/// Number of items per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PageError {
    #[error("page must be a positive integer, got {0:?}")]
    Invalid(String),
}

/// A 1-based page number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// # Errors
    ///
    /// Returns `PageError::Invalid` for zero.
    pub fn new(page: u32) -> Result<Self, PageError> {
        NonZeroU32::new(page)
            .map(Self)
            .ok_or_else(|| PageError::Invalid(page.to_string()))
    }

    /// Parse a page from an optional query value, defaulting to the first page.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Invalid` for non-numeric, zero, or negative input.
    pub fn parse(raw: Option<&str>) -> Result<Self, PageError> {
        match raw {
            None => Ok(Self::FIRST),
            Some(raw) => raw.parse(),
        }
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    #[must_use]
    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    /// Offset of the first item on this page.
    #[must_use]
    pub fn offset(self, page_size: usize) -> usize {
        let index = usize::try_from(self.get() - 1).unwrap_or(usize::MAX);
        index.saturating_mul(page_size)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Debug for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PageNumber({})", self.0)
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageNumber {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or_else(|| PageError::Invalid(s.to_owned()))
    }
}

/// Slice `items` to the requested page.
///
/// Returns `[start, start + page_size)` clipped to the input; a page past the
/// end is empty rather than an error. Callers supply a stable order.
#[must_use]
pub fn paginate<T>(items: &[T], page: PageNumber, page_size: usize) -> &[T] {
    let start = page.offset(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: u32) -> PageNumber {
        PageNumber::new(n).unwrap()
    }

    #[test]
    fn missing_page_defaults_to_first() {
        assert_eq!(PageNumber::parse(None).unwrap(), PageNumber::FIRST);
    }

    #[test]
    fn non_positive_or_garbage_pages_are_invalid() {
        for raw in ["0", "-1", "abc", "", "1.5"] {
            assert!(PageNumber::parse(Some(raw)).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn first_page_takes_leading_items() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(paginate(&items, page(1), 10), &items[0..10]);
    }

    #[test]
    fn last_page_is_clipped() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(paginate(&items, page(3), 10), &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn pages_past_the_end_are_empty() {
        let items: Vec<u32> = (1..=20).collect();
        assert!(paginate(&items, page(3), 10).is_empty());
        assert!(paginate(&items, page(10_000), 10).is_empty());
        assert!(paginate::<u32>(&[], page(1), 10).is_empty());
    }

    #[test]
    fn pages_concatenate_back_to_the_input() {
        for len in 0..40usize {
            for size in 1..7usize {
                let items: Vec<usize> = (0..len).collect();
                let pages = len.div_ceil(size);
                let mut rebuilt = Vec::with_capacity(len);
                for k in 1..=pages {
                    let k = u32::try_from(k).unwrap();
                    rebuilt.extend_from_slice(paginate(&items, page(k), size));
                }
                assert_eq!(rebuilt, items, "len={len} size={size}");
                let next = u32::try_from(pages + 1).unwrap();
                assert!(paginate(&items, page(next), size).is_empty());
            }
        }
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let items = [1, 2, 3];
        assert!(paginate(&items, page(u32::MAX), usize::MAX).is_empty());
    }
}
