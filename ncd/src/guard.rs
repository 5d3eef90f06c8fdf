use nc_api::status::StatusCode;
use nc_canon as canon;

use crate::proto::http::{Request, Response};
use crate::router::util::percent_decode;
use crate::services::Services;

/// Connection-level facts the request bytes cannot carry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnMeta {
    /// Whether the connection itself was TLS. Behind the proxy this is
    /// false and `x-forwarded-proto` carries the real scheme.
    pub tls: bool,
}

/// Enforce the canonical URL for a request before any routing happens.
/// Returns a 301 response when the request differs from its canonical form,
/// `None` when the content renderer may proceed.
///
/// The target is always https with tracking parameters stripped; the current
/// URL keeps the requested scheme and the raw query string, so the presence
/// of a tracking parameter alone forces a redirect.
pub fn enforce(services: &Services, req: &Request, meta: ConnMeta) -> Option<Response> {
    let scheme = effective_scheme(req, meta);
    let host = effective_host(req, services);
    let path = percent_decode(req.path_only());
    let raw_query = req.query();

    let mut target = canon::absolute_url(&host, &path);
    let kept = canon::strip_tracking_params(&canon::parse_query(raw_query.unwrap_or("")));
    if !kept.is_empty() {
        target.push('?');
        target.push_str(&canon::encode_query(&kept));
    }

    let mut current = format!("{}://{}{}", scheme, host, canon::with_slash(&path));
    if let Some(q) = raw_query.filter(|q| !q.is_empty()) {
        current.push('?');
        current.push_str(q);
    }

    if target == current {
        return None;
    }
    Some(Response {
        code: StatusCode::MovedPermanently,
        headers: vec![("location".to_string(), target)],
        body: Vec::new(),
    })
}

/// Forwarded-protocol header when present and non-empty, else the direct
/// TLS indicator, else http.
fn effective_scheme(req: &Request, meta: ConnMeta) -> String {
    if let Some(proto) = req.header("x-forwarded-proto").map(str::trim).filter(|v| !v.is_empty()) {
        return proto.to_ascii_lowercase();
    }
    if meta.tls { "https".to_string() } else { "http".to_string() }
}

fn effective_host(req: &Request, services: &Services) -> String {
    req.header("host")
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .unwrap_or(services.host.as_str())
        .to_string()
}
