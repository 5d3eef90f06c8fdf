use anyhow::Result;
use chrono::Utc;

use nc_api::status::StatusCode;
use nc_canon as canon;

use crate::proto::http::{Request, Response};
use crate::robots;
use crate::services::Services;
use crate::sitemap::{self, render};

use super::util::{text_response, xml_response};

pub fn handle_robots(services: &Services) -> Result<Response> {
    Ok(text_response(StatusCode::Ok, robots::render(&services.host).into_bytes()))
}

/// `GET /sitemap.xml` — page mode over the matrix source only.
pub fn handle_sitemap_matrix(services: &Services) -> Result<Response> {
    let rows = services.matrix_rows();
    let entries = sitemap::validate(sitemap::matrix_entries(&services.host, &rows));
    let xml = render::render_urlset(&entries, Utc::now());
    Ok(xml_response(StatusCode::Ok, xml.into_bytes()))
}

/// `GET /sitemap-index.xml` — index mode over the full enumeration.
pub fn handle_sitemap_index(services: &Services) -> Result<Response> {
    let entries = full_enumeration(services);
    let xml = render::render_index(&services.host, sitemap::page_count(entries.len()), Utc::now());
    Ok(xml_response(StatusCode::Ok, xml.into_bytes()))
}

/// `GET /sitemaps/sitemap-{page}.xml` — one shard of the full enumeration.
pub fn handle_sitemap_page(services: &Services, req: &Request) -> Result<Response> {
    let entries = full_enumeration(services);
    let page = page_number(req);
    let xml = render::render_urlset(sitemap::page_slice(&entries, page), Utc::now());
    Ok(xml_response(StatusCode::Ok, xml.into_bytes()))
}

fn full_enumeration(services: &Services) -> Vec<sitemap::SitemapEntry> {
    let rows = services.matrix_rows();
    sitemap::validate(sitemap::enumerate(&services.catalog, &services.host, &rows))
}

/// 1-based shard selector: a `page` query parameter wins over the number
/// embedded in the filename; anything unparseable means page 1.
fn page_number(req: &Request) -> usize {
    if let Some(query) = req.query() {
        for (k, v) in canon::parse_query(query) {
            if k == "page" {
                if let Ok(n) = v.parse::<usize>() {
                    if n >= 1 {
                        return n;
                    }
                }
            }
        }
    }
    req.path_only()
        .strip_prefix("/sitemaps/sitemap-")
        .and_then(|rest| rest.strip_suffix(".xml"))
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(1)
}
