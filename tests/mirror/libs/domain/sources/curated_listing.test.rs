// [tests/mirror/libs/domain/sources/curated_listing.test.rs]
/**
 * =================================================================
 * APARATO: CURATED LISTING CERTIFICATION (V4.1)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-MIRROR
 * RESPONSABILIDAD: DESTILACIÓN DEL LISTADO CURADO Y DEL ARCHIVO
 * =================================================================
 */

use educti_domain_sources::curated::databreaches::parse_archive_page;
use educti_domain_sources::curated::konbriefing::parse_konbriefing_listing;

const LISTING_FIXTURE: &str = r#"<html><body>
<article class="portfolio-item">
  <img alt="Flag Germany" src="/flags/de.png"> November 1, 2024
  <div style="font-weight: bold;">Cyber attack on a university in Germany</div>
  <div class="kbresbox1">
    <div>header block</div>
    <div>
      <div>Testing University – ransomware incident with data theft</div>
      <div style="margin-left: 12px;">
        <a href="https://news.example.org/a1">Report A</a>
        <a href="https://news.example.org/a2">Report B</a>
        <a href="https://news.example.org/a1">Duplicate A</a>
        <a href="/relative/ignored">Relative</a>
      </div>
    </div>
  </div>
</article>
<article class="portfolio-item">
  <img alt="Flag France" src="/flags/fr.png"> October 2024
  <div style="font-weight: bold;">Incident at a French school</div>
  <div class="kbresbox1">
    <div>header block</div>
    <div>
      <div>École de Test, Paris</div>
      <div style="margin-left: 12px;">
        <a href="https://news.example.org/fr1">Rapport</a>
      </div>
    </div>
  </div>
</article>
</body></html>"#;

#[test]
fn certify_listing_distillation() {
    let incidents = parse_konbriefing_listing(LISTING_FIXTURE, "2025-01-05T00:00:00Z");
    assert_eq!(incidents.len(), 2);

    let first = &incidents[0];
    assert_eq!(first.source, "konbriefing");
    assert_eq!(first.country.as_deref(), Some("Germany"));
    assert_eq!(first.incident_date.as_deref(), Some("2024-11-01"));
    assert_eq!(first.date_precision.as_str(), "day");
    assert_eq!(first.university_name, "Testing University");
    assert_eq!(first.status.as_str(), "confirmed");
    assert_eq!(first.source_confidence.as_str(), "high");
    assert!(first.primary_url.is_none(), "la fase 1 jamás fija el primario");
    // URLs absolutas, únicas y en orden de descubrimiento.
    assert_eq!(
        first.all_urls,
        vec![
            "https://news.example.org/a1".to_string(),
            "https://news.example.org/a2".to_string()
        ]
    );

    let second = &incidents[1];
    assert_eq!(second.country.as_deref(), Some("France"));
    assert_eq!(second.incident_date.as_deref(), Some("2024-10-01"));
    assert_eq!(second.date_precision.as_str(), "month");
    assert_eq!(second.university_name, "École de Test");
}

#[test]
fn certify_listing_identity_is_stable() {
    let first_run = parse_konbriefing_listing(LISTING_FIXTURE, "2025-01-05T00:00:00Z");
    let second_run = parse_konbriefing_listing(LISTING_FIXTURE, "2025-02-01T00:00:00Z");
    assert_eq!(first_run[0].incident_id, second_run[0].incident_id);
    assert_eq!(first_run[1].incident_id, second_run[1].incident_id);
    assert_ne!(first_run[0].incident_id, first_run[1].incident_id);
}

const ARCHIVE_FIXTURE: &str = r#"<html><body>
<article>
  <h2><a href="https://databreaches.net/story-one/">District One breached</a></h2>
  <div class="entry-summary">Records of students exposed in vendor incident.</div>
  <time datetime="2024-09-01T12:00:00+00:00">September 1, 2024</time>
</article>
<article>
  <h2><a href="https://databreaches.net/story-two/">College Two ransomware</a></h2>
  <p>Fallback summary paragraph.</p>
  <time>October 15, 2024</time>
</article>
<article>
  <h2><a href="https://databreaches.net/story-one/">Duplicate of one</a></h2>
</article>
</body></html>"#;

#[test]
fn certify_archive_page_distillation_with_url_dedup() {
    let mut seen = Vec::new();
    let incidents = parse_archive_page(ARCHIVE_FIXTURE, 1, "2025-01-05T00:00:00Z", &mut seen);

    assert_eq!(incidents.len(), 2, "la URL repetida no produce un tercer incidente");

    let first = &incidents[0];
    assert_eq!(first.source, "databreaches");
    assert_eq!(first.incident_date.as_deref(), Some("2024-09-01"));
    assert_eq!(
        first.source_event_id.as_deref(),
        Some("https://databreaches.net/story-one")
    );
    assert_eq!(
        first.subtitle.as_deref(),
        Some("Records of students exposed in vendor incident.")
    );
    assert_eq!(first.notes.as_deref(), Some("news_source=databreaches;page=1"));

    let second = &incidents[1];
    assert_eq!(second.incident_date.as_deref(), Some("2024-10-15"));
    assert_eq!(second.subtitle.as_deref(), Some("Fallback summary paragraph."));
}
