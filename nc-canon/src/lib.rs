pub mod path;
pub mod query;

pub use path::{is_file_like, kebab, normalize_path, with_slash};
pub use query::{encode_query, is_tracking_param, parse_query, strip_tracking_params, TRACKING_PARAMS};

/// Canonical absolute URL for a path: always https, host as given,
/// path normalized.
pub fn absolute_url(host: &str, path: &str) -> String {
    format!("https://{}{}", host, normalize_path(path))
}
