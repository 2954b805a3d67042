// [tests/mirror/apps/pipeline/enrichment_pass.test.rs]
/**
 * =================================================================
 * APARATO: ENRICHMENT PASS CERTIFICATION (V4.1)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L4-MIRROR
 * RESPONSABILIDAD: FLUJO COMPLETO ENRIQUECER → PROYECTAR → PERSISTIR
 * =================================================================
 */

use educti_core_normalize::DatePrecision;
use educti_domain_enrichment::{
    derive_incident_mutation, project_flat, EnrichmentOutcome, ExtractionGateway, GatewayFault,
    IncidentEnricher,
};
use educti_domain_models::{
    make_incident_id, ArticleContent, Incident, IncidentStatus, SourceConfidence,
};
use educti_infra_db::{
    ArticleRepository, EnrichmentRepository, IncidentEnrichmentUpdate, IncidentRepository,
    StoreClient,
};
use serde_json::{json, Value};

struct ScriptedGateway;

impl ExtractionGateway for ScriptedGateway {
    async fn extract_value(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Value, GatewayFault> {
        // U1 solo conoce el titular; U2 conoce familia, monto y sistemas.
        if user_prompt.contains("news.example.org/u1") {
            return Ok(json!({
                "is_edu_cyber_incident": true,
                "enriched_summary": "Testing University suffered an incident."
            }));
        }
        if user_prompt.contains("news.example.org/u2") {
            return Ok(json!({
                "is_edu_cyber_incident": true,
                "enriched_summary": "LockBit 3.0 double extortion against Testing University.",
                "institution_name": "Testing University",
                "country": "USA",
                "attack_category": "ransomware_double_extortion",
                "ransomware_family": "LockBit 3.0",
                "was_ransom_demanded": "yes",
                "ransom_amount": "$4.75 million",
                "systems_affected": ["email", "backup systems"],
                "incident_date": "2024-10-28",
                "incident_date_precision": "exact"
            }));
        }
        Err(GatewayFault::CallFailed("no scripted response".into()))
    }
}

fn staged_incident() -> Incident {
    Incident {
        incident_id: make_incident_id("curated", "pass-evt"),
        source: "curated".into(),
        source_event_id: Some("pass-evt".into()),
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
        title: Some("Incident at Testing University".into()),
        subtitle: None,
        primary_url: None,
        all_urls: vec![
            "https://news.example.org/u1".into(),
            "https://news.example.org/u2".into(),
        ],
        leak_site_url: Some("http://leaksite.onion/testing".into()),
        source_detail_url: None,
        screenshot_url: None,
        attack_type_hint: Some("ransomware".into()),
        status: IncidentStatus::Suspected,
        source_confidence: SourceConfidence::Medium,
        notes: None,
    }
}

fn article(url: &str) -> ArticleContent {
    let content = format!("Coverage hosted at {} with enough body text for extraction. ", url).repeat(3);
    ArticleContent {
        url: url.to_string(),
        title: "Headline".into(),
        content_length: content.len(),
        content,
        author: None,
        publish_date: Some("2024-11-02".into()),
        fetch_successful: true,
        error_message: None,
    }
}

#[tokio::test]
async fn certify_full_flow_selects_primary_and_projects_flat_row() {
    println!("\n🧪 [PROVING_GROUNDS]: Auditing enrich→project→persist flow...");

    let client = StoreClient::connect("file:mem_pass_flow_a?mode=memory&cache=shared")
        .await
        .unwrap();
    let incidents = IncidentRepository::new(client.clone());
    let articles = ArticleRepository::new(client.clone());
    let enrichments = EnrichmentRepository::new(client.clone());

    let incident = staged_incident();
    incidents.insert_incident(&incident).await.unwrap();

    let fetched = vec![
        article("https://news.example.org/u1"),
        article("https://news.example.org/u2"),
    ];
    for fetched_article in &fetched {
        articles
            .upsert_article(&incident.incident_id, fetched_article)
            .await
            .unwrap();
    }

    // Arbitraje con pasarela guionada.
    let enricher = IncidentEnricher::new(ScriptedGateway);
    let outcome = enricher
        .process_incident(&incident, &fetched, true)
        .await
        .expect("no rate limit");

    let artifact = match outcome {
        EnrichmentOutcome::Enriched(artifact) => artifact,
        other => panic!("expected Enriched, got {:?}", other),
    };
    assert_eq!(artifact.primary_url, "https://news.example.org/u2");

    // Proyección + persistencia transaccional.
    let flat = project_flat(&incident.incident_id, &artifact.record);
    let mutation = derive_incident_mutation(
        &artifact.record,
        &artifact.primary_url,
        incident.leak_site_url.as_deref(),
    );
    let update = IncidentEnrichmentUpdate {
        primary_url: mutation.primary_url,
        summary: mutation.summary,
        timeline_json: mutation.timeline_json,
        mitre_json: mutation.mitre_json,
        attack_dynamics_json: mutation.attack_dynamics_json,
        corrected_country: mutation.corrected_country,
        corrected_country_code: mutation.corrected_country_code,
        corrected_incident_date: mutation.corrected_incident_date,
        corrected_date_precision: mutation.corrected_date_precision,
    };
    let serialized = serde_json::to_string_pretty(&artifact.normalized).unwrap();
    enrichments
        .save_enrichment(&incident.incident_id, &serialized, &flat, &update)
        .await
        .unwrap();

    // Certificación del estado final.
    let stored = incidents
        .fetch_incident(&incident.incident_id)
        .await
        .unwrap()
        .expect("incident");
    assert_eq!(stored.primary_url.as_deref(), Some("https://news.example.org/u2"));
    assert_eq!(stored.incident_date.as_deref(), Some("2024-10-28"));
    assert_eq!(stored.country.as_deref(), Some("United States"));
    assert!(stored.all_urls.contains(&"https://news.example.org/u2".to_string()));

    let flat_row = enrichments
        .get_flat_row(&incident.incident_id)
        .await
        .unwrap()
        .expect("flat row");
    assert_eq!(flat_row.ransomware_family.as_deref(), Some("lockbit_3"));
    assert_eq!(flat_row.ransom_amount, Some(4_750_000.0));
    assert_eq!(flat_row.was_ransom_demanded, Some(true));
    assert_eq!(flat_row.country_code.as_deref(), Some("US"));
    let systems = flat_row.systems_affected_json.expect("systems json");
    assert!(systems.contains("email_system"));
    assert!(systems.contains("backup_systems"));

    // El artículo U1 fue descartado dentro de la misma transacción.
    assert_eq!(articles.count_articles_for_incident(&incident.incident_id).await.unwrap(), 1);
    assert_eq!(
        articles.primary_article_url(&incident.incident_id).await.unwrap().as_deref(),
        Some("https://news.example.org/u2")
    );

    // primary_url ∈ all_urls y consistencia plena/plana.
    assert!(enrichments.get_enrichment_json(&incident.incident_id).await.unwrap().is_some());
    let stats = enrichments.get_enrichment_stats().await.unwrap();
    assert_eq!(stats.enriched, 1);
    assert_eq!(stats.unenriched, 0);

    println!("   ✅ [SUCCESS]: Full enrichment flow certified end to end.");
}
