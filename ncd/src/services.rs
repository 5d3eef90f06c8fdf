use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::{self, SiteCatalog};
use nc_data::MatrixRow;

/// Immutable process-wide state, built once in main and passed by reference
/// into the router, guard, and sitemap builder.
#[derive(Debug, Clone)]
pub struct Services {
    pub addr: String,
    pub host: String,
    pub catalog: SiteCatalog,
    pub matrix_path: PathBuf,
}

impl Services {
    /// Assemble from the environment:
    /// - NC_ADDR (default 127.0.0.1:8080)
    /// - NC_HOST (default neuralcommand.com)
    /// - NC_MATRIX (default data/matrix.csv)
    /// - NC_CATALOG (optional JSON catalog path)
    pub fn from_env() -> Self {
        let addr = config::env_str("NC_ADDR", "127.0.0.1:8080");
        let host = config::env_str("NC_HOST", config::DEFAULT_HOST);
        let matrix_path = PathBuf::from(config::env_str("NC_MATRIX", "data/matrix.csv"));
        let catalog = match std::env::var("NC_CATALOG") {
            Ok(p) if !p.trim().is_empty() => config::load_catalog(Path::new(p.trim())),
            _ => SiteCatalog::default(),
        };
        Self { addr, host, catalog, matrix_path }
    }

    /// Current matrix rows. An unreadable source degrades to zero rows; the
    /// configured portions of the sitemap are unaffected.
    pub fn matrix_rows(&self) -> Vec<MatrixRow> {
        match nc_data::load_matrix(&self.matrix_path) {
            Ok(rows) => rows,
            Err(err) => {
                warn!(path = %self.matrix_path.display(), %err, "matrix source unavailable; continuing without it");
                Vec::new()
            }
        }
    }

    /// Whether a canonical path belongs to the publishable URL space:
    /// a core page, or `/services/<known-service>[/<locality>]/`.
    pub fn is_publishable(&self, canonical: &str) -> bool {
        if self.catalog.core_pages.iter().any(|p| p == canonical) {
            return true;
        }
        let Some(rest) = canonical.strip_prefix("/services/") else {
            return false;
        };
        let mut segments = rest.split('/').filter(|s| !s.is_empty());
        let Some(service) = segments.next() else {
            return false;
        };
        self.catalog.services.contains_key(service) && segments.count() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services() -> Services {
        Services {
            addr: "127.0.0.1:0".into(),
            host: "example.com".into(),
            catalog: SiteCatalog::default(),
            matrix_path: PathBuf::from("/nonexistent/matrix.csv"),
        }
    }

    #[test]
    fn core_pages_and_service_paths_are_publishable() {
        let s = services();
        assert!(s.is_publishable("/"));
        assert!(s.is_publishable("/about/"));
        assert!(s.is_publishable("/services/seo-services/"));
        assert!(s.is_publishable("/services/seo-services/austin-tx/"));
    }

    #[test]
    fn unknown_paths_are_not_publishable() {
        let s = services();
        assert!(!s.is_publishable("/nope/"));
        assert!(!s.is_publishable("/services/unknown-service/"));
        assert!(!s.is_publishable("/services/seo-services/too/deep/"));
    }

    #[test]
    fn missing_matrix_degrades_to_empty() {
        assert!(services().matrix_rows().is_empty());
    }
}
