use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("matrix source unreadable: {0}")]
    Io(#[from] std::io::Error),
}

/// One `service,city[,lastmod]` row of the matrix source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub service: String,
    pub city: String,
    pub lastmod: Option<NaiveDate>,
}

/// Read and parse the matrix file. An unreadable file is an error the caller
/// is expected to degrade on (zero rows); malformed rows inside a readable
/// file are skipped, never fatal.
pub fn load_matrix(path: impl AsRef<Path>) -> Result<Vec<MatrixRow>, MatrixError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let rows = parse_matrix(&text);
    debug!(path = %path.display(), rows = rows.len(), "matrix loaded");
    Ok(rows)
}

/// Parse matrix CSV text with tolerant, line-oriented semantics:
/// - blank lines and `#` comment lines are skipped
/// - a leading `service,...` header line is skipped
/// - rows need at least two non-empty fields; others are skipped with a warning
/// - the optional third field is a `YYYY-MM-DD` date; invalid dates degrade
///   to no last-modified value
pub fn parse_matrix(input: &str) -> Vec<MatrixRow> {
    let mut rows = Vec::new();
    for (lineno, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split(',').map(str::trim);
        let service = fields.next().unwrap_or("");
        let city = fields.next().unwrap_or("");
        if lineno == 0 && service.eq_ignore_ascii_case("service") {
            continue;
        }
        if service.is_empty() || city.is_empty() {
            warn!(line = lineno + 1, "matrix row skipped: missing service or city");
            continue;
        }
        let lastmod = match fields.next().filter(|s| !s.is_empty()) {
            Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    warn!(line = lineno + 1, value = raw, "matrix row has invalid lastmod");
                    None
                }
            },
            None => None,
        };
        rows.push(MatrixRow {
            service: service.to_string(),
            city: city.to_string(),
            lastmod,
        });
    }
    rows
}
