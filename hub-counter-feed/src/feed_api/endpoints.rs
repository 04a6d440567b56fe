//! Feed API endpoint URLs.
//!
//! Pure functions from a base URL and operation parameters to the request
//! URL. Parameter values are appended verbatim.

use crate::entities::FeedType;

const FEEDS_PATH: &str = "/v1/feeds";
const DOCUMENTS_SEGMENT: &str = "documents";
const PAGE_SIZE_PARAM: &str = "pageSize";
const NEXT_OFFSET_PARAM: &str = "nextOffset";
const FEED_TYPE_PARAM: &str = "feedType";

/// URL listing the client's feeds.
///
/// `pageSize` always leads when present; `nextOffset` follows it, or stands
/// alone when no page size is given. These are the query shapes the API
/// accepts.
pub fn feeds(base: &str, next_offset: Option<&str>, page_size: Option<u32>) -> String {
    let mut url = format!("{base}{FEEDS_PATH}");

    match (page_size, next_offset) {
        (Some(size), Some(offset)) => {
            url.push_str(&format!(
                "?{PAGE_SIZE_PARAM}={size}&{NEXT_OFFSET_PARAM}={offset}"
            ));
        }
        (Some(size), None) => url.push_str(&format!("?{PAGE_SIZE_PARAM}={size}")),
        (None, Some(offset)) => url.push_str(&format!("?{NEXT_OFFSET_PARAM}={offset}")),
        (None, None) => {}
    }

    url
}

/// URL of a single feed.
pub fn feed_by_id(base: &str, feed_id: &str) -> String {
    format!("{base}{FEEDS_PATH}/{feed_id}")
}

/// URL of a feed document (input or output; the server decides which).
pub fn document(base: &str, feed_id: &str, document_id: &str) -> String {
    format!("{base}{FEEDS_PATH}/{feed_id}/{DOCUMENTS_SEGMENT}/{document_id}")
}

/// URL for submitting a feed of the given type.
pub fn post_feed(base: &str, feed_type: FeedType) -> String {
    format!("{base}{FEEDS_PATH}?{FEED_TYPE_PARAM}={}", feed_type.code())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://counter.example.com";

    #[test]
    fn feeds_without_params() {
        assert_eq!(feeds(BASE, None, None), "https://counter.example.com/v1/feeds");
    }

    #[test]
    fn feeds_with_page_size_and_offset() {
        assert_eq!(
            feeds(BASE, Some("abc"), Some(50)),
            "https://counter.example.com/v1/feeds?pageSize=50&nextOffset=abc"
        );
    }

    #[test]
    fn feeds_with_page_size_only() {
        assert_eq!(
            feeds(BASE, None, Some(100)),
            "https://counter.example.com/v1/feeds?pageSize=100"
        );
    }

    #[test]
    fn feeds_with_offset_only() {
        assert_eq!(
            feeds(BASE, Some("abc"), None),
            "https://counter.example.com/v1/feeds?nextOffset=abc"
        );
    }

    #[test]
    fn feed_by_id_url() {
        assert_eq!(
            feed_by_id(BASE, "F-123"),
            "https://counter.example.com/v1/feeds/F-123"
        );
    }

    #[test]
    fn document_url() {
        assert_eq!(
            document(BASE, "F-123", "D-9"),
            "https://counter.example.com/v1/feeds/F-123/documents/D-9"
        );
    }

    #[test]
    fn post_feed_uses_wire_codes() {
        assert_eq!(
            post_feed(BASE, FeedType::ThirdPartyFeed),
            "https://counter.example.com/v1/feeds?feedType=3P"
        );
        assert_eq!(
            post_feed(BASE, FeedType::StoreFeed),
            "https://counter.example.com/v1/feeds?feedType=STORE_FEED"
        );
    }
}
