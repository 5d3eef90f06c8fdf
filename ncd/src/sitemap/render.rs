use chrono::{DateTime, SecondsFormat, Utc};

use super::SitemapEntry;
use crate::router::util::escape_xml;

/// Render page mode: one `<url>` per entry. Entries without their own
/// last-modified date get the supplied build time.
pub fn render_urlset(entries: &[SitemapEntry], built_at: DateTime<Utc>) -> String {
    let built = built_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut xml = String::with_capacity(entries.len() * 192 + 128);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for e in entries {
        let lastmod = match e.lastmod {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => built.clone(),
        };
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&e.loc)));
        xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", e.changefreq.as_str()));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", e.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Render index mode: one `<sitemap>` pointer per shard, all stamped with
/// the build time.
pub fn render_index(host: &str, pages: usize, built_at: DateTime<Utc>) -> String {
    let built = built_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut xml = String::with_capacity(pages * 128 + 128);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for page in 1..=pages {
        xml.push_str("  <sitemap>\n");
        xml.push_str(&format!(
            "    <loc>https://{host}/sitemaps/sitemap-{page}.xml</loc>\n"
        ));
        xml.push_str(&format!("    <lastmod>{built}</lastmod>\n"));
        xml.push_str("  </sitemap>\n");
    }
    xml.push_str("</sitemapindex>\n");
    xml
}
