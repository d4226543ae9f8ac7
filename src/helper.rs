/// Parse a count the way the server's paging headers are usually read:
/// leading whitespace is skipped, an optional sign is accepted and the
/// leading run of decimal digits is used. Anything after the digits is ignored,
/// so `"12 comments"` is 12.
/// Empty, non-numeric and negative input is 0, as counts are never negative.
pub fn parse_count(value: &str) -> u64 {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() || negative {
        return 0;
    }
    // digits only, so the one failure left is overflow
    digits.parse().unwrap_or(u64::MAX)
}

/// Make sure a base url ends with a `/`, so that relative resource paths
/// are joined below it instead of replacing its last segment.
/// https://example.org/wp-json/wp/v2
/// becomes
/// https://example.org/wp-json/wp/v2/
pub fn normalize_endpoint(mut url: url::Url) -> url::Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
