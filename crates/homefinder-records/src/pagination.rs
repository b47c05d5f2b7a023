//! Offset pagination for the record service's list endpoint.
//!
//! The service pages with `limit`/`offset` query parameters and reports the
//! overall row count in `total` when it knows it. A page shorter than the
//! requested size is always the last one.

/// Returns the offset of the next page, or `None` when `page_len` rows at
/// `offset` were the final page.
///
/// An empty page ends pagination even when `total` claims more rows, so a
/// service that miscounts cannot make the caller loop.
#[must_use]
pub fn next_offset(
    offset: u64,
    page_len: usize,
    page_size: u32,
    total: Option<u64>,
) -> Option<u64> {
    if page_len == 0 || page_len < page_size as usize {
        return None;
    }
    let next = offset + page_len as u64;
    match total {
        Some(total) if next >= total => None,
        _ => Some(next),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_page_without_total_continues() {
        assert_eq!(next_offset(0, 100, 100, None), Some(100));
    }

    #[test]
    fn short_page_is_last() {
        assert_eq!(next_offset(200, 37, 100, None), None);
    }

    #[test]
    fn empty_page_is_last_even_if_total_says_otherwise() {
        assert_eq!(next_offset(100, 0, 100, Some(500)), None);
    }

    #[test]
    fn full_page_reaching_total_is_last() {
        assert_eq!(next_offset(100, 100, 100, Some(200)), None);
    }

    #[test]
    fn full_page_below_total_continues() {
        assert_eq!(next_offset(100, 100, 100, Some(250)), Some(200));
    }
}
