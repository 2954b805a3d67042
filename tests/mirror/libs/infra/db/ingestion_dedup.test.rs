// [tests/mirror/libs/infra/db/ingestion_dedup.test.rs]
/**
 * =================================================================
 * APARATO: INGESTION DEDUP CERTIFICATION (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-MIRROR
 * RESPONSABILIDAD: IDEMPOTENCIA DE INSERCIÓN Y FUSIÓN DE URLS
 * =================================================================
 */

use educti_core_normalize::DatePrecision;
use educti_domain_models::{make_incident_id, Incident, IncidentStatus, SourceConfidence};
use educti_infra_db::{IncidentRepository, SourceEventRepository, StoreClient};

fn build_incident(source: &str, unique: &str, url: &str, pubdate: &str) -> Incident {
    Incident {
        incident_id: make_incident_id(source, unique),
        source: source.to_string(),
        source_event_id: Some(unique.to_string()),
        university_name: "Test University".into(),
        victim_raw_name: "Test University".into(),
        institution_type: Some("University".into()),
        country: Some("United States".into()),
        region: None,
        city: None,
        incident_date: Some(pubdate.to_string()),
        date_precision: DatePrecision::Day,
        source_published_date: Some(pubdate.to_string()),
        ingested_at: "2025-01-05T00:00:00Z".into(),
        title: Some("Breach at Test University".into()),
        subtitle: None,
        primary_url: None,
        all_urls: vec![url.to_string()],
        leak_site_url: None,
        source_detail_url: None,
        screenshot_url: None,
        attack_type_hint: None,
        status: IncidentStatus::Suspected,
        source_confidence: SourceConfidence::Medium,
        notes: None,
    }
}

#[tokio::test]
async fn certify_reinsertion_merges_urls_without_new_rows() {
    println!("\n🔐 [PROVING_GROUNDS]: Auditing ingestion idempotence...");

    let client = StoreClient::connect("file:mem_ingest_dedup_a?mode=memory&cache=shared")
        .await
        .unwrap();
    let repository = IncidentRepository::new(client.clone());

    let mut incident = build_incident("curated", "evt-1", "https://example.org/a", "2024-11-01");

    let created = repository.insert_incident(&incident).await.unwrap();
    assert!(created);
    assert_eq!(repository.count_incidents().await.unwrap(), 1);

    // Re-ingesta con una URL nueva: fusiona, no duplica.
    incident.all_urls.push("https://example.org/b".into());
    let created_again = repository.insert_incident(&incident).await.unwrap();
    assert!(!created_again);
    assert_eq!(repository.count_incidents().await.unwrap(), 1);

    let stored = repository
        .fetch_incident(&incident.incident_id)
        .await
        .unwrap()
        .expect("incident persisted");
    assert_eq!(
        stored.all_urls,
        vec![
            "https://example.org/a".to_string(),
            "https://example.org/b".to_string()
        ]
    );

    println!("   ✅ [SUCCESS]: URL ledger fused, row count invariant.");
}

#[tokio::test]
async fn certify_source_event_registry_detects_reingestion() {
    let client = StoreClient::connect("file:mem_ingest_dedup_b?mode=memory&cache=shared")
        .await
        .unwrap();
    let events = SourceEventRepository::new(client.clone());

    assert!(!events.source_event_exists("rss", "guid-1").await.unwrap());

    events
        .register_source_event("rss", "guid-1", "rss_0011223344556677", "2025-01-05T00:00:00Z")
        .await
        .unwrap();
    assert!(events.source_event_exists("rss", "guid-1").await.unwrap());

    // El registro es idempotente bajo repetición.
    events
        .register_source_event("rss", "guid-1", "rss_0011223344556677", "2025-01-06T00:00:00Z")
        .await
        .unwrap();
    assert!(events.source_event_exists("rss", "guid-1").await.unwrap());
    assert!(!events.source_event_exists("rss", "guid-2").await.unwrap());
}

#[tokio::test]
async fn certify_unenriched_query_orders_newest_first() {
    let client = StoreClient::connect("file:mem_ingest_dedup_c?mode=memory&cache=shared")
        .await
        .unwrap();
    let repository = IncidentRepository::new(client.clone());

    let mut older = build_incident("curated", "evt-old", "https://example.org/old", "2024-09-01");
    older.ingested_at = "2025-01-01T00:00:00Z".into();
    let mut newer = build_incident("curated", "evt-new", "https://example.org/new", "2024-11-01");
    newer.ingested_at = "2025-01-03T00:00:00Z".into();

    repository.insert_incident(&older).await.unwrap();
    repository.insert_incident(&newer).await.unwrap();

    let staged = repository.get_unenriched_incidents(None).await.unwrap();
    assert_eq!(staged.len(), 2);
    assert_eq!(staged[0].incident_id, newer.incident_id);

    let limited = repository.get_unenriched_incidents(Some(1)).await.unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn certify_incident_without_urls_not_staged() {
    let client = StoreClient::connect("file:mem_ingest_dedup_d?mode=memory&cache=shared")
        .await
        .unwrap();
    let repository = IncidentRepository::new(client.clone());

    let mut incident = build_incident("api", "evt-nourl", "https://example.org/x", "2024-10-01");
    incident.all_urls.clear();
    repository.insert_incident(&incident).await.unwrap();

    let staged = repository.get_unenriched_incidents(None).await.unwrap();
    assert!(staged.is_empty());
}
