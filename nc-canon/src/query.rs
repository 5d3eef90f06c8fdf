use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Query parameters that never survive canonicalization. Matched
/// case-insensitively. robots.txt disallow rules are generated from this
/// same list so the two stay in sync.
pub const TRACKING_PARAMS: [&str; 11] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "ref",
    "fbclid",
    "gclid",
    "msclkid",
    "_hsmi",
    "_hsenc",
];

pub fn is_tracking_param(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    TRACKING_PARAMS.iter().any(|p| *p == lower)
}

/// Split a raw query string into ordered decoded pairs. Bare keys get an
/// empty value; empty pieces between `&` are dropped.
pub fn parse_query(raw: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for piece in raw.split('&') {
        if piece.is_empty() {
            continue;
        }
        let (k, v) = match piece.split_once('=') {
            Some((k, v)) => (k, v),
            None => (piece, ""),
        };
        pairs.push((percent_decode(k), percent_decode(v)));
    }
    pairs
}

/// Copy of `pairs` with every tracking parameter removed. Order of the
/// remainder is preserved; values are untouched.
pub fn strip_tracking_params(pairs: &[(String, String)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .filter(|(k, _)| !is_tracking_param(k))
        .cloned()
        .collect()
}

// Conservative superset of the characters that must not appear raw in a
// query component.
const QUERY_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'=')
    .add(b'?');

/// Re-encode pairs as a query string, preserving order.
pub fn encode_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, QUERY_ENCODE),
                utf8_percent_encode(v, QUERY_ENCODE)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn percent_decode(s: &str) -> String {
    percent_encoding::percent_decode_str(s)
        .decode_utf8_lossy()
        .to_string()
}
