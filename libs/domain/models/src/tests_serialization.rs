// [libs/domain/models/src/tests_serialization.rs]
/**
 * =================================================================
 * APARATO: MODELS SERIALIZATION CERTIFICATION (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-MIRROR
 * RESPONSABILIDAD: PARIDAD BIT-PERFECTA DE LOS DTOs DEL DOMINIO
 * =================================================================
 */

use educti_core_normalize::DatePrecision;
use educti_domain_models::{
    ArticleContent, CtiRecord, Incident, IncidentStatus, SourceConfidence,
};

fn sample_incident() -> Incident {
    Incident {
        incident_id: "konbriefing_00aa11bb22cc33dd".into(),
        source: "konbriefing".into(),
        source_event_id: None,
        university_name: "University of Testing".into(),
        victim_raw_name: "University of Testing".into(),
        institution_type: Some("University".into()),
        country: Some("Germany".into()),
        region: None,
        city: None,
        incident_date: Some("2024-11-01".into()),
        date_precision: DatePrecision::Day,
        source_published_date: Some("2024-11-01".into()),
        ingested_at: "2024-11-02T00:00:00Z".into(),
        title: Some("Cyber attack on university".into()),
        subtitle: None,
        primary_url: None,
        all_urls: vec!["https://example.org/a".into()],
        leak_site_url: None,
        source_detail_url: None,
        screenshot_url: None,
        attack_type_hint: None,
        status: IncidentStatus::Confirmed,
        source_confidence: SourceConfidence::High,
        notes: None,
    }
}

#[test]
fn certify_incident_roundtrip_parity() {
    let incident = sample_incident();
    let serialized = serde_json::to_string(&incident).expect("serialize");
    let decoded: Incident = serde_json::from_str(&serialized).expect("deserialize");

    assert_eq!(decoded.incident_id, incident.incident_id);
    assert_eq!(decoded.date_precision, DatePrecision::Day);
    assert_eq!(decoded.status, IncidentStatus::Confirmed);
    assert_eq!(decoded.source_confidence, SourceConfidence::High);
    assert!(serialized.contains("\"date_precision\":\"day\""));
    assert!(serialized.contains("\"status\":\"confirmed\""));
}

#[test]
fn certify_url_ledger_preserves_order_and_uniqueness() {
    let mut incident = sample_incident();
    incident.push_url("https://example.org/b");
    incident.push_url("https://example.org/a");
    incident.push_url("  ");
    assert_eq!(
        incident.all_urls,
        vec![
            "https://example.org/a".to_string(),
            "https://example.org/b".to_string()
        ]
    );
}

#[test]
fn certify_date_precision_coupling() {
    let mut incident = sample_incident();
    incident.set_incident_date(None, DatePrecision::Day);
    assert!(incident.incident_date.is_none());
    assert_eq!(incident.date_precision, DatePrecision::Unknown);

    incident.set_incident_date(Some("2025-01-02".into()), DatePrecision::Unknown);
    assert_eq!(incident.incident_date.as_deref(), Some("2025-01-02"));
    assert_ne!(incident.date_precision, DatePrecision::Unknown);
}

#[test]
fn certify_cti_record_null_semantics() {
    let record: CtiRecord = serde_json::from_str(
        r#"{"is_edu_cyber_incident": true, "enriched_summary": "Breach at a college."}"#,
    )
    .expect("minimal record");

    assert!(record.is_edu_cyber_incident);
    assert!(record.ransom_amount.is_none());
    assert!(record.timeline.is_none());
    assert!(record.iocs.is_none());
    assert!(record.is_education_related());
}

#[test]
fn certify_failed_article_shape() {
    let article = ArticleContent::failed("https://example.org/x", "timeout");
    assert!(!article.fetch_successful);
    assert!(!article.has_usable_text());
    assert_eq!(article.content_length, 0);
    assert_eq!(article.error_message.as_deref(), Some("timeout"));
}
