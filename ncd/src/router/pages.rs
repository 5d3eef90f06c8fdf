use anyhow::Result;

use nc_api::status::StatusCode;
use nc_canon as canon;

use crate::proto::http::Response;
use crate::services::Services;

use super::util::{html_response, percent_decode};

/// Serve the minimal HTML shell for a publishable page. The guard has
/// already run, so the path is canonical up to the trailing-slash exemption;
/// anything outside the URL space is a 404.
pub fn serve(services: &Services, path: &str) -> Result<Response> {
    let canonical = canon::normalize_path(&percent_decode(path));
    if !services.is_publishable(&canonical) {
        return Ok(html_response(StatusCode::NotFound, render_not_found().into_bytes()));
    }
    let shell = render_shell(&services.host, &canonical);
    Ok(html_response(StatusCode::Ok, shell.into_bytes()))
}

fn render_shell(host: &str, canonical: &str) -> String {
    let title = page_title(canonical);
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title} | Neural Command</title>\n<link rel=\"canonical\" href=\"https://{host}{canonical}\">\n</head>\n<body>\n<h1>{title}</h1>\n</body>\n</html>\n"
    )
}

fn render_not_found() -> String {
    "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>Not Found</title></head>\n<body><h1>Page not found</h1></body>\n</html>\n".to_string()
}

/// Human title from the last canonical segment: `/services/web-design/` ->
/// "Web Design"; the root is "Home".
fn page_title(canonical: &str) -> String {
    let slug = canonical.trim_matches('/').rsplit('/').next().unwrap_or("");
    if slug.is_empty() {
        return "Home".to_string();
    }
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
