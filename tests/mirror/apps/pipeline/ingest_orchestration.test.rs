// [tests/mirror/apps/pipeline/ingest_orchestration.test.rs]
/**
 * =================================================================
 * APARATO: INGEST ORCHESTRATION CERTIFICATION (V4.1)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L4-MIRROR
 * RESPONSABILIDAD: SUMIDERO RESPALDADO POR EL ALMACÉN (DEDUP + LOTES)
 * =================================================================
 */

use educti_core_normalize::DatePrecision;
use educti_domain_models::{make_incident_id, Incident, IncidentStatus, SourceConfidence};
use educti_domain_sources::sink::IncidentSink;
use educti_domain_sources::SourceGroup;
use educti_infra_db::{IncidentRepository, SourceStateRepository, StoreClient};
use educti_pipeline::ingest::StoreSink;

fn curated_incident(event_id: &str, pubdate: &str) -> Incident {
    Incident {
        incident_id: make_incident_id("konbriefing", event_id),
        source: "konbriefing".into(),
        source_event_id: Some(event_id.to_string()),
        university_name: format!("University {}", event_id),
        victim_raw_name: format!("University {}", event_id),
        institution_type: Some("University".into()),
        country: Some("Germany".into()),
        region: None,
        city: None,
        incident_date: Some(pubdate.to_string()),
        date_precision: DatePrecision::Day,
        source_published_date: Some(pubdate.to_string()),
        ingested_at: "2025-01-05T00:00:00Z".into(),
        title: Some(format!("Attack {}", event_id)),
        subtitle: None,
        primary_url: None,
        all_urls: vec![format!("https://news.example.org/{}", event_id)],
        leak_site_url: None,
        source_detail_url: None,
        screenshot_url: None,
        attack_type_hint: None,
        status: IncidentStatus::Confirmed,
        source_confidence: SourceConfidence::High,
        notes: None,
    }
}

#[tokio::test]
async fn certify_first_run_inserts_and_second_run_deduplicates() {
    println!("\n🚜 [PROVING_GROUNDS]: Auditing ingest orchestration strata...");

    let client = StoreClient::connect("file:mem_orchestration_a?mode=memory&cache=shared")
        .await
        .unwrap();
    let incidents = IncidentRepository::new(client.clone());

    // CORRIDA 1: listado curado con tres artículos.
    let first_batch = vec![
        curated_incident("evt-1", "2024-09-01"),
        curated_incident("evt-2", "2024-10-15"),
        curated_incident("evt-3", "2024-11-01"),
    ];
    let mut first_sink = StoreSink::new(client.clone(), SourceGroup::Curated);
    let inserted = first_sink.save_batch(&first_batch).await.unwrap();

    assert_eq!(inserted, 3);
    assert_eq!(first_sink.inserted, 3);
    assert_eq!(incidents.count_incidents().await.unwrap(), 3);
    assert_eq!(first_sink.max_observed_pubdate.as_deref(), Some("2024-11-01"));

    // La marca de agua avanza tras liquidar la corrida.
    let watermarks = SourceStateRepository::new(client.clone());
    watermarks
        .set_last_pubdate("konbriefing", first_sink.max_observed_pubdate.as_deref().unwrap())
        .await
        .unwrap();
    assert_eq!(
        watermarks.get_last_pubdate("konbriefing").await.unwrap().as_deref(),
        Some("2024-11-01")
    );

    // CORRIDA 2: el listado re-observa los tres y trae uno nuevo.
    let mut second_batch = first_batch.clone();
    second_batch.push(curated_incident("evt-4", "2024-12-10"));
    let mut second_sink = StoreSink::new(client.clone(), SourceGroup::Curated);
    let inserted_again = second_sink.save_batch(&second_batch).await.unwrap();

    assert_eq!(inserted_again, 1, "exactamente un incidente nuevo");
    assert_eq!(second_sink.skipped, 3);
    assert_eq!(incidents.count_incidents().await.unwrap(), 4);
    assert_eq!(second_sink.max_observed_pubdate.as_deref(), Some("2024-12-10"));

    watermarks
        .set_last_pubdate("konbriefing", second_sink.max_observed_pubdate.as_deref().unwrap())
        .await
        .unwrap();
    assert_eq!(
        watermarks.get_last_pubdate("konbriefing").await.unwrap().as_deref(),
        Some("2024-12-10")
    );

    println!("   ✅ [SUCCESS]: Idempotent re-run with watermark advance certified.");
}

#[tokio::test]
async fn certify_empty_batch_produces_no_writes() {
    let client = StoreClient::connect("file:mem_orchestration_b?mode=memory&cache=shared")
        .await
        .unwrap();
    let incidents = IncidentRepository::new(client.clone());

    let mut sink = StoreSink::new(client.clone(), SourceGroup::Rss);
    let inserted = sink.save_batch(&[]).await.unwrap();

    assert_eq!(inserted, 0);
    assert_eq!(incidents.count_incidents().await.unwrap(), 0);
    assert!(sink.max_observed_pubdate.is_none());
}

#[tokio::test]
async fn certify_cross_source_collision_merges_by_identity() {
    let client = StoreClient::connect("file:mem_orchestration_c?mode=memory&cache=shared")
        .await
        .unwrap();
    let incidents = IncidentRepository::new(client.clone());

    // Dos fuentes observan la misma URL canónica: misma identidad digest.
    let canonical_url = "https://news.example.org/shared-story";
    let mut from_archive = curated_incident("evt-x", "2024-11-01");
    from_archive.source = "databreaches".into();
    from_archive.incident_id = make_incident_id("databreaches", canonical_url);
    from_archive.source_event_id = Some(canonical_url.into());
    from_archive.all_urls = vec![canonical_url.to_string()];

    let mut re_observed = from_archive.clone();
    re_observed.all_urls.push("https://mirror.example.org/extra".into());
    re_observed.source_event_id = None; // sin ID nativo: dedup por digest

    let mut sink = StoreSink::new(client.clone(), SourceGroup::Curated);
    sink.save_batch(&[from_archive.clone()]).await.unwrap();
    sink.save_batch(&[re_observed]).await.unwrap();

    assert_eq!(incidents.count_incidents().await.unwrap(), 1);
    let stored = incidents
        .fetch_incident(&from_archive.incident_id)
        .await
        .unwrap()
        .expect("merged incident");
    assert_eq!(stored.all_urls.len(), 2, "la re-observación fusionó la URL extra");
}
