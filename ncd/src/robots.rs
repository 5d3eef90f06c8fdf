use nc_canon::TRACKING_PARAMS;

/// robots.txt for the site: crawl everything except URL variants carrying a
/// tracking parameter, and advertise the matrix sitemap. The disallow rules
/// come from the canonicalizer's denylist so the two never drift apart.
pub fn render(host: &str) -> String {
    let mut out = String::with_capacity(512);
    out.push_str("User-agent: *\n");
    out.push_str("Allow: /\n");
    for param in TRACKING_PARAMS {
        out.push_str(&format!("Disallow: /*?*{param}=\n"));
    }
    out.push('\n');
    out.push_str(&format!("Sitemap: https://{host}/sitemap.xml\n"));
    out
}
