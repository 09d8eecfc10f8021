use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use portal_api::response::Pagination;

/// Unreserved characters plus `*`, so the wildcard stays readable in links.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'*');

/// Offsets of the neighbouring pages, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub next_offset: Option<u32>,
    pub previous_offset: Option<u32>,
}

/// - next exists iff `offset + limit < total` and starts at `offset + limit`
/// - previous exists iff `offset > 0` and starts at `max(0, offset - limit)`
pub fn page_bounds(offset: u32, limit: u32, total: u64) -> PageBounds {
    let end = offset as u64 + limit as u64;
    let next_offset = if end < total {
        // offsets past u32::MAX cannot be requested
        u32::try_from(end).ok()
    } else {
        None
    };
    let previous_offset = (offset > 0).then(|| offset.saturating_sub(limit));
    PageBounds { next_offset, previous_offset }
}

pub fn page_link(search_path: &str, query: &str, offset: u32, limit: u32) -> String {
    format!(
        "{}?limit={}&offset={}&query={}",
        search_path,
        limit,
        offset,
        utf8_percent_encode(query, QUERY_COMPONENT)
    )
}

pub fn pagination(search_path: &str, query: &str, offset: u32, limit: u32, total: u64) -> Pagination {
    let bounds = page_bounds(offset, limit, total);
    Pagination {
        offset,
        limit,
        total,
        next: bounds.next_offset.map(|o| page_link(search_path, query, o, limit)),
        previous: bounds.previous_offset.map(|o| page_link(search_path, query, o, limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_encodes_query() {
        assert_eq!(
            page_link("/search", "content:pet store", 10, 5),
            "/search?limit=5&offset=10&query=content%3Apet%20store"
        );
        assert_eq!(page_link("/search", "content:*", 0, 25), "/search?limit=25&offset=0&query=content%3A*");
    }

    #[test]
    fn huge_offsets_do_not_overflow() {
        let b = page_bounds(u32::MAX, u32::MAX, u64::MAX);
        assert_eq!(b.next_offset, None);
        assert_eq!(b.previous_offset, Some(0));
    }
}
