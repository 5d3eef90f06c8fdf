use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

/// Host used when neither the request nor the environment names one.
pub const DEFAULT_HOST: &str = "neuralcommand.com";

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceEntry {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StateEntry {
    pub abbr: String,
    pub cities: Vec<String>,
}

/// The enumerable URL universe of the site: core pages plus the
/// service/state/city tables the landing pages are generated from.
/// Ordered maps keep enumeration deterministic.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteCatalog {
    #[serde(default)]
    pub core_pages: Vec<String>,
    #[serde(default)]
    pub services: BTreeMap<String, ServiceEntry>,
    #[serde(default)]
    pub states: BTreeMap<String, StateEntry>,
    #[serde(default)]
    pub priority_cities: Vec<String>,
}

impl Default for SiteCatalog {
    fn default() -> Self {
        let services = [
            ("ai-consulting", "AI Consulting"),
            ("ai-development", "AI Development"),
            ("seo-services", "SEO Services"),
            ("web-design", "Web Design"),
        ]
        .into_iter()
        .map(|(slug, title)| (slug.to_string(), ServiceEntry { title: title.to_string() }))
        .collect();

        let states = [
            ("ca", "CA", &["Los Angeles", "San Diego", "San Jose"][..]),
            ("ny", "NY", &["New York", "Buffalo"][..]),
            ("tx", "TX", &["Austin", "Dallas", "Houston"][..]),
            ("va", "VA", &["Richmond", "Norfolk"][..]),
        ]
        .into_iter()
        .map(|(key, abbr, cities)| {
            (
                key.to_string(),
                StateEntry {
                    abbr: abbr.to_string(),
                    cities: cities.iter().map(|c| c.to_string()).collect(),
                },
            )
        })
        .collect();

        SiteCatalog {
            core_pages: ["/", "/about/", "/contact/", "/services/", "/privacy/", "/terms/"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            services,
            states,
            priority_cities: ["los-angeles-ca", "new-york-ny", "san-francisco-ca", "austin-tx"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

/// Load a catalog from a JSON file; any problem falls back to the built-in
/// catalog so a bad deploy still serves the static URL space.
pub fn load_catalog(path: &Path) -> SiteCatalog {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(err) => {
            eprintln!("[config] catalog {} unreadable: {err}; using built-in catalog", path.display());
            return SiteCatalog::default();
        }
    };
    match serde_json::from_str(&text) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("[config] catalog {} parse error: {err}; using built-in catalog", path.display());
            SiteCatalog::default()
        }
    }
}

pub fn env_str(key: &str, default_val: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default_val.to_string(),
    }
}
