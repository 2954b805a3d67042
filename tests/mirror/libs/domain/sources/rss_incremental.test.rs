// [tests/mirror/libs/domain/sources/rss_incremental.test.rs]
/**
 * =================================================================
 * APARATO: RSS INCREMENTAL CERTIFICATION (V4.1)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-MIRROR
 * RESPONSABILIDAD: VENTANA DE EDAD, MARCA DE AGUA Y FILTROS DE FEED
 * =================================================================
 */

use chrono::{Duration, Utc};
use educti_domain_sources::rss::common::{
    has_education_category, is_newer_than_watermark, parse_feed_items,
};
use educti_domain_sources::rss::{bleepingcomputer, databreaches_rss, FeedItem};

fn item(title: &str, days_ago: i64, categories: &[&str]) -> FeedItem {
    FeedItem {
        title: title.to_string(),
        link: format!("https://feed.example.org/{}", title.replace(' ', "-")),
        guid: format!("guid-{}", title.replace(' ', "-")),
        published: Some(Utc::now() - Duration::days(days_ago)),
        description: String::new(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        author: None,
    }
}

#[test]
fn certify_watermark_filter_is_strict() {
    let fresh = Some(Utc::now());
    assert!(is_newer_than_watermark(fresh, None));
    assert!(is_newer_than_watermark(fresh, Some("2020-01-01")));

    let old = Some(Utc::now() - Duration::days(3650));
    assert!(!is_newer_than_watermark(old, Some("2030-01-01")));
}

#[test]
fn certify_incremental_harvest_inserts_only_newer_items() {
    // Marca de agua anclada tres días atrás; tres ítems alrededor de ella.
    let watermark = (Utc::now() - Duration::days(3)).format("%Y-%m-%d").to_string();
    let items = vec![
        item("older than watermark", 5, &["Education Sector"]),
        item("one day ago", 1, &["Education Sector"]),
        item("today", 0, &["Education Sector"]),
    ];

    let harvest = databreaches_rss::build_harvest(
        &items,
        30,
        Some(&watermark),
        true,
        "2025-01-05T00:00:00Z",
    );

    assert_eq!(harvest.incidents.len(), 2);
    let titles: Vec<&str> = harvest
        .incidents
        .iter()
        .map(|incident| incident.title.as_deref().unwrap_or(""))
        .collect();
    assert!(titles.contains(&"one day ago"));
    assert!(titles.contains(&"today"));

    // La marca observada es la más nueva del feed completo.
    let expected_newest = Utc::now().format("%Y-%m-%d").to_string();
    assert_eq!(harvest.newest_pubdate.as_deref(), Some(expected_newest.as_str()));
}

#[test]
fn certify_category_gate_for_archive_feed() {
    let items = vec![
        item("education breach", 0, &["Education Sector", "Breach Incidents"]),
        item("healthcare breach", 0, &["Health Data"]),
    ];
    let harvest = databreaches_rss::build_harvest(&items, 30, None, false, "2025-01-05T00:00:00Z");

    assert_eq!(harvest.incidents.len(), 1);
    assert_eq!(harvest.incidents[0].title.as_deref(), Some("education breach"));
    assert!(has_education_category(&["Education Sector".to_string()]));
    assert!(!has_education_category(&["Health Data".to_string()]));
}

#[test]
fn certify_security_plus_keyword_double_gate() {
    let mut security_university = item("University hit by ransomware gang", 0, &["Security"]);
    security_university.description = "Attackers encrypted campus systems.".into();

    let mut security_but_corporate = item("Retail chain breached", 0, &["Security"]);
    security_but_corporate.description = "A store chain lost payment data.".into();

    let mut education_but_not_security = item("University launches new app", 0, &["Software"]);
    education_but_not_security.description = "Campus life application released.".into();

    let items = vec![security_university, security_but_corporate, education_but_not_security];
    let harvest = bleepingcomputer::build_harvest(&items, 30, None, false, "2025-01-05T00:00:00Z");

    assert_eq!(harvest.incidents.len(), 1);
    let incident = &harvest.incidents[0];
    assert_eq!(incident.title.as_deref(), Some("University hit by ransomware gang"));
    // Fuente editorial fiable: confianza alta.
    assert_eq!(incident.source_confidence.as_str(), "high");
    assert_eq!(incident.date_precision.as_str(), "day");
    assert!(incident.primary_url.is_none());
}

#[test]
fn certify_feed_xml_parsing() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
  <title>DataBreaches.net</title>
  <item>
    <title>School district reports breach</title>
    <link>https://databreaches.net/school-district-reports-breach/</link>
    <guid>https://databreaches.net/?p=12345</guid>
    <pubDate>Fri, 03 Jan 2025 10:15:00 +0000</pubDate>
    <category>Education Sector</category>
    <description><![CDATA[<p>A district disclosed a <b>breach</b>.</p>]]></description>
  </item>
</channel></rss>"#;

    let items = parse_feed_items(xml).expect("feed parses");
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.title, "School district reports breach");
    assert_eq!(item.guid, "https://databreaches.net/?p=12345");
    assert!(item.categories.iter().any(|c| c == "Education Sector"));
    assert_eq!(item.description, "A district disclosed a breach.");
    assert_eq!(
        item.published.expect("pubdate").format("%Y-%m-%d").to_string(),
        "2025-01-03"
    );
}
