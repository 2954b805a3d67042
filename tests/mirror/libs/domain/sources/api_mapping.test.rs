// [tests/mirror/libs/domain/sources/api_mapping.test.rs]
/**
 * =================================================================
 * APARATO: SECTOR API MAPPING CERTIFICATION (V4.1)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-MIRROR
 * RESPONSABILIDAD: VÍCTIMAS DE API → INCIDENTES NORMALIZADOS
 * =================================================================
 */

use educti_domain_sources::curated::ransomware_live::map_victims_to_incidents;
use serde_json::json;

#[test]
fn certify_victim_row_mapping_and_url_segregation() {
    let victims = vec![json!({
        "activity": "Education",
        "victim": "Testing University",
        "group": "lockbit3",
        "attackdate": "2024-10-15 00:00:00",
        "discovered": "2024-10-18 09:30:00",
        "country": "US",
        "domain": "testing.edu",
        "description": "Large public university with teaching hospital.",
        "press": [
            {"source": "https://news.example.org/coverage"},
            "https://other.example.org/story",
            "https://www.ransomware.live/victim/internal-page",
            "https://cdn.example.org/screenshot.png"
        ],
        "url": "https://www.ransomware.live/victim/testing-university",
        "claim_url": "http://leaksite.onion/testing-university",
        "screenshot": "https://images.ransomware.live/testing.png",
        "infostealer": {"employees": 12, "users": 90}
    })];

    let incidents = map_victims_to_incidents(&victims, "2025-01-05T00:00:00Z");
    assert_eq!(incidents.len(), 1);
    let incident = &incidents[0];

    assert_eq!(incident.source, "ransomwarelive");
    assert_eq!(incident.university_name, "Testing University");
    assert_eq!(incident.institution_type.as_deref(), Some("University"));
    assert_eq!(incident.incident_date.as_deref(), Some("2024-10-15"));
    assert_eq!(incident.source_published_date.as_deref(), Some("2024-10-18"));
    assert_eq!(incident.attack_type_hint.as_deref(), Some("ransomware"));
    assert_eq!(incident.status.as_str(), "suspected");
    assert_eq!(incident.source_confidence.as_str(), "medium");

    // Solo artículos de prensa reales en la bóveda de enriquecimiento.
    assert_eq!(
        incident.all_urls,
        vec![
            "https://news.example.org/coverage".to_string(),
            "https://other.example.org/story".to_string()
        ]
    );
    // La infraestructura CTI vive en campos dedicados.
    assert_eq!(
        incident.leak_site_url.as_deref(),
        Some("http://leaksite.onion/testing-university")
    );
    assert_eq!(
        incident.source_detail_url.as_deref(),
        Some("https://www.ransomware.live/victim/testing-university")
    );
    assert_eq!(
        incident.screenshot_url.as_deref(),
        Some("https://images.ransomware.live/testing.png")
    );
    assert_eq!(incident.source_event_id.as_deref(), Some("testing-university"));

    let notes = incident.notes.as_deref().expect("notes");
    assert!(notes.contains("group=lockbit3"));
    assert!(notes.contains("infostealer(employees=12, users=90)"));
}

#[test]
fn certify_non_education_and_nameless_rows_are_filtered() {
    let victims = vec![
        json!({"activity": "Healthcare", "victim": "Clinic"}),
        json!({"activity": "Education", "description": "row without a victim name"}),
        json!({"activity": "Education", "victim": "Real School", "country": "FR"}),
    ];

    let incidents = map_victims_to_incidents(&victims, "2025-01-05T00:00:00Z");
    assert_eq!(incidents.len(), 1);
    assert_eq!(incidents[0].university_name, "Real School");
    assert_eq!(incidents[0].institution_type.as_deref(), Some("School"));
    // Sin fecha de ataque: el par fecha/precisión queda acoplado en unknown.
    assert!(incidents[0].incident_date.is_none());
    assert_eq!(incidents[0].date_precision.as_str(), "unknown");
}

#[test]
fn certify_composite_key_deduplicates_repeated_rows() {
    let row = json!({
        "activity": "Education",
        "victim": "Twice Listed College",
        "group": "akira",
        "attackdate": "2024-12-01 00:00:00",
        "country": "CA",
        "domain": "twice.edu"
    });
    let victims = vec![row.clone(), row];

    let incidents = map_victims_to_incidents(&victims, "2025-01-05T00:00:00Z");
    assert_eq!(incidents.len(), 1);
}
