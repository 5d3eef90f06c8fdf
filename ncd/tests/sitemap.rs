use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone, Utc};

use ncd::config::{ServiceEntry, SiteCatalog, StateEntry};
use ncd::sitemap::{
    self, enumerate, matrix_entries, page_count, page_slice, render, validate, ChangeFreq,
    SitemapEntry, SHARD_SIZE,
};
use nc_data::MatrixRow;

fn tiny_catalog() -> SiteCatalog {
    let mut services = BTreeMap::new();
    services.insert("seo".to_string(), ServiceEntry { title: "SEO".to_string() });
    let mut states = BTreeMap::new();
    states.insert(
        "ca".to_string(),
        StateEntry { abbr: "CA".to_string(), cities: vec!["Los Angeles".to_string()] },
    );
    SiteCatalog {
        core_pages: vec![],
        services,
        states,
        priority_cities: vec![],
    }
}

fn synthetic_entries(n: usize) -> Vec<SitemapEntry> {
    (0..n)
        .map(|i| SitemapEntry {
            loc: format!("https://example.com/p{i}/"),
            priority: 0.8,
            changefreq: ChangeFreq::Weekly,
            lastmod: None,
        })
        .collect()
}

#[test]
fn service_state_city_enumeration() {
    let entries = validate(enumerate(&tiny_catalog(), "example.com", &[]));
    let locs: Vec<&str> = entries.iter().map(|e| e.loc.as_str()).collect();
    assert_eq!(
        locs,
        vec![
            "https://example.com/services/seo/",
            "https://example.com/services/seo/ca/",
            "https://example.com/services/seo/los-angeles-ca/",
        ]
    );
    assert!(entries.iter().all(|e| e.priority == 0.8));
}

#[test]
fn core_page_priorities() {
    let catalog = SiteCatalog {
        core_pages: vec!["/".to_string(), "/about/".to_string()],
        services: BTreeMap::new(),
        states: BTreeMap::new(),
        priority_cities: vec![],
    };
    let entries = enumerate(&catalog, "example.com", &[]);
    assert_eq!(entries[0].loc, "https://example.com/");
    assert_eq!(entries[0].priority, 1.0);
    assert_eq!(entries[0].changefreq, ChangeFreq::Daily);
    assert_eq!(entries[1].loc, "https://example.com/about/");
    assert_eq!(entries[1].priority, 0.7);
}

#[test]
fn matrix_rows_become_weekly_entries_with_lastmod() {
    let rows = vec![
        MatrixRow {
            service: "seo".to_string(),
            city: "Los Angeles".to_string(),
            lastmod: NaiveDate::from_ymd_opt(2026, 5, 12),
        },
        MatrixRow { service: "web-design".to_string(), city: "Austin".to_string(), lastmod: None },
    ];
    let entries = matrix_entries("example.com", &rows);
    assert_eq!(entries[0].loc, "https://example.com/services/seo/los-angeles/");
    assert_eq!(entries[0].changefreq, ChangeFreq::Weekly);
    assert_eq!(entries[0].priority, 0.8);
    assert_eq!(entries[0].lastmod, NaiveDate::from_ymd_opt(2026, 5, 12));
    assert_eq!(entries[1].loc, "https://example.com/services/web-design/austin/");
    assert_eq!(entries[1].lastmod, None);
}

#[test]
fn validation_drops_contract_violations() {
    let mut entries = synthetic_entries(1);
    entries.push(SitemapEntry {
        loc: "https://example.com/Page/".to_string(),
        priority: 0.8,
        changefreq: ChangeFreq::Weekly,
        lastmod: None,
    });
    entries.push(SitemapEntry {
        loc: "https://example.com/page/?x=1".to_string(),
        priority: 0.8,
        changefreq: ChangeFreq::Weekly,
        lastmod: None,
    });
    entries.push(SitemapEntry {
        loc: "https://example.com/no-slash".to_string(),
        priority: 0.8,
        changefreq: ChangeFreq::Weekly,
        lastmod: None,
    });
    entries.push(SitemapEntry {
        loc: "https://example.com/sitemap.xml".to_string(),
        priority: 0.8,
        changefreq: ChangeFreq::Weekly,
        lastmod: None,
    });
    let kept = validate(entries);
    let locs: Vec<&str> = kept.iter().map(|e| e.loc.as_str()).collect();
    assert_eq!(locs, vec!["https://example.com/p0/", "https://example.com/sitemap.xml"]);
}

#[test]
fn pagination_at_shard_boundaries() {
    let entries = synthetic_entries(100_001);
    assert_eq!(page_count(entries.len()), 3);
    assert_eq!(page_slice(&entries, 1).len(), SHARD_SIZE);
    assert_eq!(page_slice(&entries, 2).len(), SHARD_SIZE);
    assert_eq!(page_slice(&entries, 3).len(), 10_001);
    assert!(page_slice(&entries, 4).is_empty());
    assert_eq!(page_slice(&entries, 2)[0].loc, "https://example.com/p45000/");
}

#[test]
fn empty_enumeration_still_has_one_page() {
    assert_eq!(page_count(0), 1);
    assert!(page_slice(&[], 1).is_empty());
}

#[test]
fn urlset_rendering() {
    let built_at = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
    let entries = vec![
        SitemapEntry {
            loc: "https://example.com/".to_string(),
            priority: 1.0,
            changefreq: ChangeFreq::Daily,
            lastmod: None,
        },
        SitemapEntry {
            loc: "https://example.com/services/seo/austin/".to_string(),
            priority: 0.8,
            changefreq: ChangeFreq::Weekly,
            lastmod: NaiveDate::from_ymd_opt(2026, 5, 12),
        },
    ];
    let xml = render::render_urlset(&entries, built_at);
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
    assert!(xml.contains("<loc>https://example.com/</loc>"));
    assert!(xml.contains("<lastmod>2026-08-01T12:00:00Z</lastmod>"));
    assert!(xml.contains("<lastmod>2026-05-12</lastmod>"));
    assert!(xml.contains("<changefreq>daily</changefreq>"));
    assert!(xml.contains("<priority>1.0</priority>"));
    assert!(xml.contains("<priority>0.8</priority>"));
    assert!(xml.ends_with("</urlset>\n"));
}

#[test]
fn index_rendering_points_at_every_shard() {
    let built_at = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
    let xml = render::render_index("example.com", 3, built_at);
    assert!(xml.contains("<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
    for page in 1..=3 {
        assert!(xml.contains(&format!("<loc>https://example.com/sitemaps/sitemap-{page}.xml</loc>")));
    }
    assert!(!xml.contains("sitemap-4.xml"));
    assert!(xml.contains("<lastmod>2026-08-01T12:00:00Z</lastmod>"));
}

#[test]
fn full_default_enumeration_is_valid() {
    let catalog = SiteCatalog::default();
    let entries = enumerate(&catalog, "example.com", &[]);
    let kept = validate(entries.clone());
    assert_eq!(kept.len(), entries.len(), "default catalog must survive validation");
    assert_eq!(page_count(kept.len()), 1);
    assert!(sitemap::page_slice(&kept, 1).len() == kept.len());
}
