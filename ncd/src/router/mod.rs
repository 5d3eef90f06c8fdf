use anyhow::Result;

use nc_api::status::StatusCode;

use crate::guard::{self, ConnMeta};
use crate::proto::http::{Request, Response};
use crate::services::Services;

mod pages;
mod seo;
pub mod util;

pub fn handle(services: &Services, req: Request) -> Result<Response> {
    handle_with_meta(services, req, ConnMeta::default())
}

/// Route one request. The redirect guard runs first: a non-canonical request
/// never reaches a content handler.
pub fn handle_with_meta(services: &Services, req: Request, meta: ConnMeta) -> Result<Response> {
    if let Some(redirect) = guard::enforce(services, &req, meta) {
        return Ok(redirect);
    }
    match (req.method.as_str(), req.path_only()) {
        ("GET", "/robots.txt") => seo::handle_robots(services),
        ("GET", "/sitemap.xml") => seo::handle_sitemap_matrix(services),
        ("GET", "/sitemap-index.xml") => seo::handle_sitemap_index(services),
        ("GET", path) if path.starts_with("/sitemaps/sitemap-") && path.ends_with(".xml") => {
            seo::handle_sitemap_page(services, &req)
        }
        ("GET", "/health/ready") => Ok(util::json_response(
            StatusCode::Ok,
            b"{\"status\":\"ready\"}".to_vec(),
        )),
        ("GET", path) => pages::serve(services, path),
        _ => Ok(Response {
            code: StatusCode::BadRequest,
            headers: vec![],
            body: vec![],
        }),
    }
}
