/// True iff the final path segment ends in a short alphanumeric extension
/// (2-5 chars, case-insensitive), e.g. `.xml`, `.json`, `.jpg`. File-like
/// paths are exempt from trailing-slash normalization.
pub fn is_file_like(path: &str) -> bool {
    let last = path.rsplit('/').next().unwrap_or(path);
    let Some((_, ext)) = last.rsplit_once('.') else {
        return false;
    };
    (2..=5).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Kebab-case a single path segment: runs of whitespace/underscores become
/// one hyphen, repeated hyphens collapse, everything lowercased.
/// Applied per segment so slashes are never touched.
pub fn kebab(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut run = false;
    for c in segment.chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            run = true;
            continue;
        }
        if run {
            out.push('-');
            run = false;
        }
        for lc in c.to_lowercase() {
            out.push(lc);
        }
    }
    if run {
        out.push('-');
    }
    out
}

/// Append a trailing slash unless the path is file-like or already has one.
pub fn with_slash(path: &str) -> String {
    if path.ends_with('/') || is_file_like(path) {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Normalize a request path to its canonical form:
/// - repeated slashes collapse (empty segments are dropped)
/// - every segment is kebab-cased
/// - `/services/<service>/<city>` city segments get underscores replaced and
///   are kebab-cased again (legacy slug guard; idempotent over the generic
///   pass, kept on purpose)
/// - trailing slash per `with_slash`
///
/// Idempotent: `normalize_path(normalize_path(p)) == normalize_path(p)`.
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(kebab)
        .collect();
    if segments.len() >= 3 && segments[0] == "services" {
        segments[1] = kebab(&segments[1]);
        segments[2] = kebab(&segments[2].replace('_', "-"));
    }
    let joined = format!("/{}", segments.join("/"));
    with_slash(&joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_like_detection() {
        assert!(is_file_like("/sitemap.xml"));
        assert!(is_file_like("/assets/logo.jpg"));
        assert!(is_file_like("/FEED.JSON"));
        assert!(!is_file_like("/about"));
        assert!(!is_file_like("/about/"));
        assert!(!is_file_like("/archive.tar.bz2extra"));
        assert!(!is_file_like("/v1.2/page"));
    }

    #[test]
    fn kebab_spaces_and_underscores() {
        assert_eq!(kebab("My City_Name"), "my-city-name");
        assert_eq!(kebab("double--hyphen"), "double-hyphen");
        assert_eq!(kebab("Already-Kebab"), "already-kebab");
    }

    #[test]
    fn with_slash_respects_file_like() {
        assert_eq!(with_slash("/about"), "/about/");
        assert_eq!(with_slash("/about/"), "/about/");
        assert_eq!(with_slash("/sitemap.xml"), "/sitemap.xml");
    }

    #[test]
    fn normalize_collapses_slashes_and_cases() {
        assert_eq!(normalize_path("//About//Us"), "/about/us/");
        assert_eq!(normalize_path("/Services/SEO Services/New_York"), "/services/seo-services/new-york/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn normalize_preserves_file_like_tail() {
        assert_eq!(normalize_path("/sitemaps//sitemap-2.xml"), "/sitemaps/sitemap-2.xml");
    }

    #[test]
    fn normalize_is_idempotent() {
        for p in [
            "/About",
            "//Services//Web Design//Los_Angeles",
            "/sitemap.xml",
            "/a__b/c  d/",
            "",
            "/services/x/y_z",
        ] {
            let once = normalize_path(p);
            assert_eq!(normalize_path(&once), once, "input {p:?}");
        }
    }

    #[test]
    fn services_city_segment_double_pass() {
        // the city segment goes through the underscore guard and a second
        // kebab pass; result must match the generic normalization
        assert_eq!(normalize_path("/services/seo/Los_Angeles"), "/services/seo/los-angeles/");
        assert_eq!(normalize_path("/services/seo/los-angeles/"), "/services/seo/los-angeles/");
    }
}
