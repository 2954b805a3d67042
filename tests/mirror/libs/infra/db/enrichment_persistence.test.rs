// [tests/mirror/libs/infra/db/enrichment_persistence.test.rs]
/**
 * =================================================================
 * APARATO: ENRICHMENT PERSISTENCE CERTIFICATION (V4.1)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-MIRROR
 * RESPONSABILIDAD: TRANSACCIÓN DUAL (PLENA + PLANA) Y REVERSIÓN
 * =================================================================
 */

use educti_core_normalize::DatePrecision;
use educti_domain_models::{
    make_incident_id, ArticleContent, FlatEnrichment, Incident, IncidentStatus, SourceConfidence,
};
use educti_infra_db::{
    ArticleRepository, EnrichmentRepository, IncidentEnrichmentUpdate, IncidentRepository,
    StoreClient,
};

fn seeded_incident() -> Incident {
    Incident {
        incident_id: make_incident_id("curated", "enrich-evt-1"),
        source: "curated".into(),
        source_event_id: Some("enrich-evt-1".into()),
        university_name: "Testing University".into(),
        victim_raw_name: "Testing University".into(),
        institution_type: Some("University".into()),
        country: None,
        region: None,
        city: None,
        incident_date: None,
        date_precision: DatePrecision::Unknown,
        source_published_date: Some("2024-11-01".into()),
        ingested_at: "2025-01-05T00:00:00Z".into(),
        title: Some("Ransomware at Testing University".into()),
        subtitle: None,
        primary_url: None,
        all_urls: vec![
            "https://news.example.org/u1".into(),
            "https://news.example.org/u2".into(),
        ],
        leak_site_url: None,
        source_detail_url: None,
        screenshot_url: None,
        attack_type_hint: Some("ransomware".into()),
        status: IncidentStatus::Suspected,
        source_confidence: SourceConfidence::Medium,
        notes: None,
    }
}

fn fetched_article(url: &str, content: &str) -> ArticleContent {
    ArticleContent {
        url: url.to_string(),
        title: "Some headline".into(),
        content: content.to_string(),
        author: None,
        publish_date: Some("2024-11-02".into()),
        fetch_successful: true,
        error_message: None,
        content_length: content.len(),
    }
}

fn flat_with_ransomware(incident_id: &str) -> FlatEnrichment {
    let mut flat = FlatEnrichment::default();
    flat.incident_id = incident_id.to_string();
    flat.is_education_related = Some(true);
    flat.institution_name = Some("Testing University".into());
    flat.attack_category = Some("ransomware_double_extortion".into());
    flat.ransomware_family = Some("lockbit_3".into());
    flat.was_ransom_demanded = Some(true);
    flat.ransom_amount = Some(4_750_000.0);
    flat.systems_affected_json = Some(r#"["email_system","backup_systems"]"#.into());
    flat.enriched_summary = Some("LockBit double extortion against Testing University.".into());
    flat.timeline_events_count = Some(2);
    flat
}

#[tokio::test]
async fn certify_dual_projection_transaction_and_article_cycle() {
    println!("\n💾 [PROVING_GROUNDS]: Auditing dual projection strata...");

    let client = StoreClient::connect("file:mem_enrich_persist_a?mode=memory&cache=shared")
        .await
        .unwrap();
    let incidents = IncidentRepository::new(client.clone());
    let articles = ArticleRepository::new(client.clone());
    let enrichments = EnrichmentRepository::new(client.clone());

    let incident = seeded_incident();
    incidents.insert_incident(&incident).await.unwrap();

    articles
        .upsert_article(&incident.incident_id, &fetched_article("https://news.example.org/u1", &"short mention of the title ".repeat(4)))
        .await
        .unwrap();
    articles
        .upsert_article(&incident.incident_id, &fetched_article("https://news.example.org/u2", &"rich details ransom family systems ".repeat(8)))
        .await
        .unwrap();

    let flat = flat_with_ransomware(&incident.incident_id);
    let update = IncidentEnrichmentUpdate {
        primary_url: Some("https://news.example.org/u2".into()),
        summary: "LockBit double extortion against Testing University.".into(),
        timeline_json: Some("[]".into()),
        mitre_json: None,
        attack_dynamics_json: Some("{}".into()),
        corrected_country: Some("United States".into()),
        corrected_country_code: Some("US".into()),
        corrected_incident_date: Some("2024-10-28".into()),
        corrected_date_precision: Some("day".into()),
    };

    enrichments
        .save_enrichment(&incident.incident_id, r#"{"is_edu_cyber_incident": true}"#, &flat, &update)
        .await
        .unwrap();

    // 1. El incidente mutó: primario, fecha corregida, fuera del backlog.
    let stored = incidents
        .fetch_incident(&incident.incident_id)
        .await
        .unwrap()
        .expect("incident");
    assert_eq!(stored.primary_url.as_deref(), Some("https://news.example.org/u2"));
    assert_eq!(stored.incident_date.as_deref(), Some("2024-10-28"));
    assert!(stored.all_urls.contains(&"https://news.example.org/u2".to_string()));
    assert!(incidents.get_unenriched_incidents(None).await.unwrap().is_empty());

    // 2. Fila plena + fila plana, exactamente una de cada una.
    assert!(enrichments
        .get_enrichment_json(&incident.incident_id)
        .await
        .unwrap()
        .is_some());
    let flat_row = enrichments
        .get_flat_row(&incident.incident_id)
        .await
        .unwrap()
        .expect("flat row");
    assert_eq!(flat_row.ransomware_family.as_deref(), Some("lockbit_3"));
    assert_eq!(flat_row.ransom_amount, Some(4_750_000.0));
    assert_eq!(flat_row.was_ransom_demanded, Some(true));

    // 3. Ciclo de artículos: solo el primario sobrevive.
    assert_eq!(articles.count_articles_for_incident(&incident.incident_id).await.unwrap(), 1);
    assert_eq!(
        articles.primary_article_url(&incident.incident_id).await.unwrap().as_deref(),
        Some("https://news.example.org/u2")
    );

    let stats = enrichments.get_enrichment_stats().await.unwrap();
    assert_eq!(stats.enriched, 1);
    assert_eq!(stats.unenriched, 0);

    println!("   ✅ [SUCCESS]: Dual projection sealed and article cycle closed.");
}

#[tokio::test]
async fn certify_skip_marks_incident_with_reason() {
    let client = StoreClient::connect("file:mem_enrich_persist_b?mode=memory&cache=shared")
        .await
        .unwrap();
    let incidents = IncidentRepository::new(client.clone());
    let enrichments = EnrichmentRepository::new(client.clone());

    let incident = seeded_incident();
    incidents.insert_incident(&incident).await.unwrap();

    enrichments
        .mark_incident_skipped(&incident.incident_id, "The affected entity is a retail chain.")
        .await
        .unwrap();

    let stored = incidents
        .fetch_incident(&incident.incident_id)
        .await
        .unwrap()
        .expect("incident");
    let notes = stored.notes.expect("notes populated");
    assert!(notes.contains("LLM_ENRICHMENT_SKIPPED: The affected entity is a retail chain."));

    // Saltado cuenta como tratado: fuera del backlog, sin fila plana.
    assert!(incidents.get_unenriched_incidents(None).await.unwrap().is_empty());
    assert!(enrichments.get_flat_row(&incident.incident_id).await.unwrap().is_none());

    let stats = enrichments.get_enrichment_stats().await.unwrap();
    assert_eq!(stats.skipped, 1);
}

#[tokio::test]
async fn certify_revert_returns_incident_to_new_state() {
    let client = StoreClient::connect("file:mem_enrich_persist_c?mode=memory&cache=shared")
        .await
        .unwrap();
    let incidents = IncidentRepository::new(client.clone());
    let articles = ArticleRepository::new(client.clone());
    let enrichments = EnrichmentRepository::new(client.clone());

    let incident = seeded_incident();
    incidents.insert_incident(&incident).await.unwrap();
    articles
        .upsert_article(&incident.incident_id, &fetched_article("https://news.example.org/u2", &"rich ".repeat(30)))
        .await
        .unwrap();

    let flat = flat_with_ransomware(&incident.incident_id);
    let update = IncidentEnrichmentUpdate {
        primary_url: Some("https://news.example.org/u2".into()),
        summary: "Summary".into(),
        ..IncidentEnrichmentUpdate::default()
    };
    enrichments
        .save_enrichment(&incident.incident_id, "{}", &flat, &update)
        .await
        .unwrap();

    enrichments.revert_enrichment(&incident.incident_id).await.unwrap();

    let stored = incidents
        .fetch_incident(&incident.incident_id)
        .await
        .unwrap()
        .expect("incident");
    assert!(stored.primary_url.is_none());
    assert!(enrichments.get_enrichment_json(&incident.incident_id).await.unwrap().is_none());
    assert!(enrichments.get_flat_row(&incident.incident_id).await.unwrap().is_none());
    assert_eq!(articles.count_articles_for_incident(&incident.incident_id).await.unwrap(), 0);

    // De vuelta en el backlog de enriquecimiento.
    assert_eq!(incidents.get_unenriched_incidents(None).await.unwrap().len(), 1);
}
