//! Content length extraction utilities.

use reqwest::header::CONTENT_RANGE;
use reqwest::Response;

/// Total size of the resource behind a response, if the server announced it.
///
/// A `Content-Range` total wins over `Content-Length`, since for a ranged
/// response the latter only covers the returned slice.
pub fn get_content_length(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_RANGE)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_content_range_total)
        .or_else(|| response.content_length())
        .filter(|length| *length > 0)
}

/// Parse Content-Range header to extract total size.
///
/// Content-Range header format: "bytes start-end/total"
///
/// ```rust
/// use tranche::utils::parse_content_range_total;
///
/// assert_eq!(parse_content_range_total("bytes 0-1023/2048"), Some(2048));
/// assert_eq!(parse_content_range_total("bytes 0-1023/*"), None);
/// ```
pub fn parse_content_range_total(content_range: &str) -> Option<u64> {
    let (_, total) = content_range.rsplit_once('/')?;
    total.trim().parse::<u64>().ok()
}
