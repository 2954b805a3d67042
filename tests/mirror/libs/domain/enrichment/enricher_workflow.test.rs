// [tests/mirror/libs/domain/enrichment/enricher_workflow.test.rs]
/**
 * =================================================================
 * APARATO: ENRICHER WORKFLOW CERTIFICATION (V4.1)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-MIRROR
 * RESPONSABILIDAD: ARBITRAJE MULTI-ARTÍCULO, COMPUERTA EDUCATIVA Y
 *                  PROPAGACIÓN DEL LÍMITE DE TASA
 * =================================================================
 */

use educti_core_normalize::DatePrecision;
use educti_domain_enrichment::{
    EnrichmentOutcome, ExtractionGateway, GatewayFault, IncidentEnricher,
};
use educti_domain_models::{make_incident_id, ArticleContent, Incident, IncidentStatus, SourceConfidence};
use serde_json::{json, Value};

/// Pasarela guionada: responde según la URL incrustada en el prompt.
struct ScriptedGateway {
    responses: Vec<(&'static str, Value)>,
    rate_limited: bool,
}

impl ExtractionGateway for ScriptedGateway {
    async fn extract_value(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Value, GatewayFault> {
        if self.rate_limited {
            return Err(GatewayFault::RateLimitExhausted("HTTP_429 after 5 strikes".into()));
        }
        for (marker, response) in &self.responses {
            if user_prompt.contains(marker) {
                return Ok(response.clone());
            }
        }
        Err(GatewayFault::CallFailed("no scripted response".into()))
    }
}

fn incident_under_test() -> Incident {
    Incident {
        incident_id: make_incident_id("curated", "workflow-evt"),
        source: "curated".into(),
        source_event_id: Some("workflow-evt".into()),
        university_name: "Testing University".into(),
        victim_raw_name: "Testing University".into(),
        institution_type: None,
        country: None,
        region: None,
        city: None,
        incident_date: None,
        date_precision: DatePrecision::Unknown,
        source_published_date: None,
        ingested_at: "2025-01-05T00:00:00Z".into(),
        title: Some("Incident".into()),
        subtitle: None,
        primary_url: None,
        all_urls: vec![
            "https://news.example.org/u1".into(),
            "https://news.example.org/u2".into(),
        ],
        leak_site_url: None,
        source_detail_url: None,
        screenshot_url: None,
        attack_type_hint: None,
        status: IncidentStatus::Suspected,
        source_confidence: SourceConfidence::Medium,
        notes: None,
    }
}

fn article(url: &str, content: &str) -> ArticleContent {
    ArticleContent {
        url: url.to_string(),
        title: "Headline".into(),
        content: content.to_string(),
        author: None,
        publish_date: None,
        fetch_successful: true,
        error_message: None,
        content_length: content.len(),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn certify_multi_article_arbitration_selects_densest_source() {
    println!("\n🧠 [PROVING_GROUNDS]: Auditing multi-article arbitration...");

    // U1 menciona solo el título; U2 trae familia, monto y sistemas.
    let gateway = ScriptedGateway {
        rate_limited: false,
        responses: vec![
            (
                "news.example.org/u1",
                json!({
                    "is_edu_cyber_incident": true,
                    "enriched_summary": "A university suffered an incident."
                }),
            ),
            (
                "news.example.org/u2",
                json!({
                    "is_edu_cyber_incident": true,
                    "enriched_summary": "LockBit hit Testing University.",
                    "ransomware_family": "lockbit",
                    "ransom_amount": 4750000,
                    "was_ransom_demanded": true,
                    "systems_affected": ["email_system", "backup_systems"]
                }),
            ),
        ],
    };

    let enricher = IncidentEnricher::new(gateway);
    let incident = incident_under_test();
    let articles = vec![
        article("https://news.example.org/u1", &"thin coverage of the event ".repeat(4)),
        article("https://news.example.org/u2", &"dense coverage with details ".repeat(4)),
    ];

    let outcome = enricher
        .process_incident(&incident, &articles, true)
        .await
        .expect("no rate limit");

    match outcome {
        EnrichmentOutcome::Enriched(artifact) => {
            assert_eq!(artifact.primary_url, "https://news.example.org/u2");
            assert_eq!(artifact.record.ransomware_family.as_deref(), Some("lockbit"));
            assert_eq!(artifact.record.ransom_amount, Some(4_750_000.0));
            assert!(artifact.coverage > 0);
            println!("   ✅ [SUCCESS]: Densest article won primary ({} fields).", artifact.coverage);
        }
        other => panic!("expected Enriched, got {:?}", other),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn certify_education_gate_distinguishes_verdict_from_failure() {
    let gateway = ScriptedGateway {
        rate_limited: false,
        responses: vec![(
            "news.example.org/u1",
            json!({
                "is_edu_cyber_incident": false,
                "education_relevance_reasoning": "The affected entity is a retail chain.",
                "enriched_summary": "Retail breach, not education."
            }),
        )],
    };

    let enricher = IncidentEnricher::new(gateway);
    let mut incident = incident_under_test();
    incident.all_urls.truncate(1);
    let articles = vec![article(
        "https://news.example.org/u1",
        &"a corporate breach story ".repeat(4),
    )];

    let outcome = enricher
        .process_incident(&incident, &articles, true)
        .await
        .expect("no rate limit");

    match outcome {
        EnrichmentOutcome::NotEducationRelated { reasoning } => {
            assert_eq!(reasoning, "The affected entity is a retail chain.");
        }
        other => panic!("expected NotEducationRelated, got {:?}", other),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn certify_gate_disabled_keeps_non_education_extractions() {
    let gateway = ScriptedGateway {
        rate_limited: false,
        responses: vec![(
            "news.example.org/u1",
            json!({
                "is_edu_cyber_incident": false,
                "enriched_summary": "Retail breach, still extracted."
            }),
        )],
    };

    let enricher = IncidentEnricher::new(gateway);
    let mut incident = incident_under_test();
    incident.all_urls.truncate(1);
    let articles = vec![article(
        "https://news.example.org/u1",
        &"a corporate breach story ".repeat(4),
    )];

    let outcome = enricher
        .process_incident(&incident, &articles, false)
        .await
        .expect("no rate limit");
    assert!(matches!(outcome, EnrichmentOutcome::Enriched(_)));
}

#[tokio::test(flavor = "current_thread")]
async fn certify_no_usable_articles_sentinel() {
    let gateway = ScriptedGateway { rate_limited: false, responses: vec![] };
    let enricher = IncidentEnricher::new(gateway);
    let incident = incident_under_test();

    // Un fallo de cosecha y un cuerpo bajo el umbral de 50 caracteres.
    let articles = vec![
        ArticleContent::failed("https://news.example.org/u1", "bot wall"),
        article("https://news.example.org/u2", "too short"),
    ];

    let outcome = enricher
        .process_incident(&incident, &articles, true)
        .await
        .expect("no rate limit");
    assert!(matches!(outcome, EnrichmentOutcome::NoValidArticles));
}

#[tokio::test(flavor = "current_thread")]
async fn certify_rate_limit_exhaustion_propagates_without_outcome() {
    let gateway = ScriptedGateway { rate_limited: true, responses: vec![] };
    let enricher = IncidentEnricher::new(gateway);
    let incident = incident_under_test();
    let articles = vec![article(
        "https://news.example.org/u1",
        &"long enough body for extraction ".repeat(4),
    )];

    let fault = enricher
        .process_incident(&incident, &articles, true)
        .await
        .expect_err("rate limit must abort the pass");
    assert!(matches!(fault, GatewayFault::RateLimitExhausted(_)));
}

#[tokio::test(flavor = "current_thread")]
async fn certify_all_articles_failing_is_failure_not_verdict() {
    // La pasarela no tiene guion para U1: fallo recuperable por artículo.
    let gateway = ScriptedGateway { rate_limited: false, responses: vec![] };
    let enricher = IncidentEnricher::new(gateway);
    let mut incident = incident_under_test();
    incident.all_urls.truncate(1);
    let articles = vec![article(
        "https://news.example.org/u1",
        &"body long enough for the threshold ".repeat(4),
    )];

    let outcome = enricher
        .process_incident(&incident, &articles, true)
        .await
        .expect("recoverable failures do not abort");
    assert!(matches!(outcome, EnrichmentOutcome::Failed { .. }));
}
