use chrono::NaiveDate;
use tracing::debug;

use crate::config::SiteCatalog;
use nc_canon as canon;
use nc_data::MatrixRow;

pub mod render;

/// Sitemap protocol cap per document.
pub const SHARD_SIZE: usize = 45_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

/// One publishable URL. `lastmod` is only carried when the source knows it
/// (matrix rows); rendering substitutes the build time otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub priority: f32,
    pub changefreq: ChangeFreq,
    pub lastmod: Option<NaiveDate>,
}

fn entry(host: &str, path: &str, priority: f32, changefreq: ChangeFreq) -> SitemapEntry {
    SitemapEntry {
        loc: canon::absolute_url(host, path),
        priority,
        changefreq,
        lastmod: None,
    }
}

/// Enumerate the full URL universe in a fixed order: core pages, service
/// roots, service x state, service x city-within-state, service x priority
/// city, then matrix rows. The site root gets priority 1.0, other core pages
/// 0.7, everything service-derived 0.8.
pub fn enumerate(catalog: &SiteCatalog, host: &str, rows: &[MatrixRow]) -> Vec<SitemapEntry> {
    let mut entries = Vec::new();

    for page in &catalog.core_pages {
        if page == "/" {
            entries.push(entry(host, page, 1.0, ChangeFreq::Daily));
        } else {
            entries.push(entry(host, page, 0.7, ChangeFreq::Weekly));
        }
    }

    for service in catalog.services.keys() {
        entries.push(entry(host, &format!("/services/{service}/"), 0.8, ChangeFreq::Weekly));
    }

    for service in catalog.services.keys() {
        for state in catalog.states.keys() {
            entries.push(entry(
                host,
                &format!("/services/{service}/{state}/"),
                0.8,
                ChangeFreq::Weekly,
            ));
        }
    }

    for service in catalog.services.keys() {
        for state in catalog.states.values() {
            let abbr = state.abbr.to_lowercase();
            for city in &state.cities {
                entries.push(entry(
                    host,
                    &format!("/services/{service}/{}-{abbr}/", canon::kebab(city)),
                    0.8,
                    ChangeFreq::Weekly,
                ));
            }
        }
    }

    for service in catalog.services.keys() {
        for city in &catalog.priority_cities {
            entries.push(entry(
                host,
                &format!("/services/{service}/{}/", canon::kebab(city)),
                0.8,
                ChangeFreq::Weekly,
            ));
        }
    }

    entries.extend(matrix_entries(host, rows));
    entries
}

/// Entries for the matrix-driven portion alone (the `/sitemap.xml` surface).
/// Fixed priority 0.8 and weekly change frequency; rows may carry their own
/// last-modified date.
pub fn matrix_entries(host: &str, rows: &[MatrixRow]) -> Vec<SitemapEntry> {
    rows.iter()
        .map(|row| SitemapEntry {
            loc: canon::absolute_url(
                host,
                &format!("/services/{}/{}/", canon::kebab(&row.service), canon::kebab(&row.city)),
            ),
            priority: 0.8,
            changefreq: ChangeFreq::Weekly,
            lastmod: row.lastmod,
        })
        .collect()
}

/// Drop entries that violate the sitemap contract: location must be
/// lowercase, query-free, and either slash-terminated or file-like.
/// A data-quality filter, not an error path.
pub fn validate(mut entries: Vec<SitemapEntry>) -> Vec<SitemapEntry> {
    let before = entries.len();
    entries.retain(|e| location_is_valid(&e.loc));
    let dropped = before - entries.len();
    if dropped > 0 {
        debug!(dropped, "sitemap entries filtered out");
    }
    entries
}

fn location_is_valid(loc: &str) -> bool {
    let Ok(parsed) = url::Url::parse(loc) else {
        return false;
    };
    if parsed.query().is_some() {
        return false;
    }
    if loc != loc.to_lowercase() {
        return false;
    }
    loc.ends_with('/') || canon::is_file_like(parsed.path())
}

/// Number of shards for a total entry count; at least one, even when empty.
pub fn page_count(total: usize) -> usize {
    std::cmp::max(1, total.div_ceil(SHARD_SIZE))
}

/// The 1-based `page`-th shard of the ordered entry list. Out-of-range pages
/// are empty, never an error.
pub fn page_slice(entries: &[SitemapEntry], page: usize) -> &[SitemapEntry] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(SHARD_SIZE);
    if start >= entries.len() {
        return &[];
    }
    let end = (start + SHARD_SIZE).min(entries.len());
    &entries[start..end]
}
