// [apps/pipeline/src/enrich.rs]
/*!
 * =================================================================
 * APARATO: ENRICHMENT PASS RUNNER (V4.4 - SEQUENTIAL ARBITER)
 * CLASIFICACIÓN: APPLICATION SERVICE (ESTRATO L4)
 * RESPONSABILIDAD: PASADA DE ENRIQUECIMIENTO LOTE A LOTE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SEQUENTIAL BY DESIGN: un incidente a la vez; la latencia del
 *    modelo y la cortesía hacia los objetivos dominan el reloj.
 * 2. RATE ABORT: el agotamiento del límite de tasa aborta la pasada
 *    sin avanzar al siguiente incidente ni dejar estado parcial.
 * 3. SKIP SEMANTICS: "no educativo" y "sin artículos" marcan el
 *    incidente como saltado con la razón en `notes`.
 * =================================================================
 */

use std::time::Duration;

use educti_domain_enrichment::{
    coverage, dedup, derive_incident_mutation, project_flat, EnrichmentOutcome, ExtractionGateway,
    GatewayFault, IncidentEnricher, EXTRACTION_SCHEMA,
};
use educti_infra_db::{
    ArticleRepository, EnrichmentRepository, IncidentEnrichmentUpdate, IncidentRepository,
    StoreClient,
};
use educti_infra_fetch::{ArticleExtractor, FetchClient};
use educti_infra_llm::{parse_json_lenient, LlmError, OllamaGateway};
use educti_shared_argus::global_metrics;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Fallos fatales de una pasada de enriquecimiento.
#[derive(Error, Debug)]
pub enum EnrichmentPassError {
    /// Límite de tasa persistente del proveedor del modelo.
    #[error("[L4_PASS_FAULT]: RATE_LIMIT_ABORT -> {0}")]
    RateLimitAbort(String),

    /// Fallo estructural del almacén.
    #[error("[L4_PASS_FAULT]: STORE_FAULT -> {0}")]
    StoreFault(String),
}

/// Resumen de una pasada completa.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnrichmentPassReport {
    pub processed: usize,
    pub enriched: usize,
    pub skipped_not_education: usize,
    pub skipped_no_articles: usize,
    pub failed: usize,
}

/// Adaptador del puerto de extracción sobre la pasarela Ollama.
pub struct OllamaExtractionGateway {
    gateway: OllamaGateway,
}

impl OllamaExtractionGateway {
    pub fn new(gateway: OllamaGateway) -> Self {
        Self { gateway }
    }
}

impl ExtractionGateway for OllamaExtractionGateway {
    async fn extract_value(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Value, GatewayFault> {
        let raw_content = self
            .gateway
            .extract_json(system_prompt, user_prompt, Some(&EXTRACTION_SCHEMA))
            .await
            .map_err(|fault| match fault {
                LlmError::RateLimitExhausted { attempts, detail } => {
                    GatewayFault::RateLimitExhausted(format!("{} strikes: {}", attempts, detail))
                }
                other => GatewayFault::CallFailed(other.to_string()),
            })?;

        parse_json_lenient(&raw_content).map_err(|fault| GatewayFault::CallFailed(fault.to_string()))
    }
}

/**
 * Ejecuta una pasada de enriquecimiento sobre los incidentes pendientes.
 *
 * Por incidente: pre-cosecha de artículos → arbitraje multi-artículo →
 * persistencia transaccional (o marca de salto clasificada).
 */
#[instrument(skip_all)]
pub async fn run_enrichment_pass<G: ExtractionGateway>(
    store_client: &StoreClient,
    fetch_client: &FetchClient,
    enricher: &IncidentEnricher<G>,
    limit: Option<u32>,
    skip_if_not_education: bool,
    rate_limit_delay_seconds: f64,
) -> Result<EnrichmentPassReport, EnrichmentPassError> {
    let incident_repository = IncidentRepository::new(store_client.clone());
    let article_repository = ArticleRepository::new(store_client.clone());
    let enrichment_repository = EnrichmentRepository::new(store_client.clone());
    let metrics = global_metrics();

    let pending = incident_repository
        .get_unenriched_incidents(limit)
        .await
        .map_err(|fault| EnrichmentPassError::StoreFault(fault.to_string()))?;

    if pending.is_empty() {
        info!("🧠 [ENRICH_PASS]: No unenriched incidents staged.");
        return Ok(EnrichmentPassReport::default());
    }

    info!("🧠 [ENRICH_PASS]: {} incidents staged for enrichment.", pending.len());

    let progress = ProgressBar::new(pending.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let article_extractor = ArticleExtractor::new(fetch_client);
    let mut report = EnrichmentPassReport::default();

    for incident in &pending {
        progress.set_message(incident.incident_id.clone());
        report.processed += 1;

        // 1. PRE-COSECHA: un artículo por URL de la bóveda.
        let articles = article_extractor.fetch_multiple(&incident.all_urls).await;
        for article in &articles {
            if let Err(fault) = article_repository.upsert_article(&incident.incident_id, article).await
            {
                warn!("⚠️ [ENRICH_PASS]: Article persist failed: {}", fault);
            }
        }

        // 2. ARBITRAJE Y EXTRACCIÓN
        let outcome = match enricher
            .process_incident(incident, &articles, skip_if_not_education)
            .await
        {
            Ok(outcome) => outcome,
            Err(GatewayFault::RateLimitExhausted(detail)) => {
                progress.abandon_with_message("rate-limited");
                metrics.increment("enrichment_runs", 1, &[("status", "error")]);
                return Err(EnrichmentPassError::RateLimitAbort(detail));
            }
            Err(GatewayFault::CallFailed(detail)) => {
                warn!("✗ [ENRICH_PASS]: Gateway fault for {}: {}", incident.incident_id, detail);
                metrics.increment("enrichment_failures", 1, &[]);
                report.failed += 1;
                progress.inc(1);
                continue;
            }
        };

        // 3. LIQUIDACIÓN CLASIFICADA
        match outcome {
            EnrichmentOutcome::Enriched(artifact) => {
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

                let enrichment_json = serde_json::to_string_pretty(&artifact.normalized)
                    .unwrap_or_else(|_| "{}".to_string());

                enrichment_repository
                    .save_enrichment(&incident.incident_id, &enrichment_json, &flat, &update)
                    .await
                    .map_err(|fault| EnrichmentPassError::StoreFault(fault.to_string()))?;

                metrics.increment("enrichment_incidents", 1, &[]);
                report.enriched += 1;
            }
            EnrichmentOutcome::NotEducationRelated { reasoning } => {
                enrichment_repository
                    .mark_incident_skipped(&incident.incident_id, &reasoning)
                    .await
                    .map_err(|fault| EnrichmentPassError::StoreFault(fault.to_string()))?;
                metrics.increment("enrichment_skipped_not_education", 1, &[]);
                report.skipped_not_education += 1;
            }
            EnrichmentOutcome::NoValidArticles => {
                enrichment_repository
                    .mark_incident_skipped(&incident.incident_id, "No valid articles available")
                    .await
                    .map_err(|fault| EnrichmentPassError::StoreFault(fault.to_string()))?;
                metrics.increment("enrichment_skipped_no_articles", 1, &[]);
                report.skipped_no_articles += 1;
            }
            EnrichmentOutcome::Failed { reason } => {
                // El incidente queda sin cambios; la próxima pasada reintenta.
                warn!("✗ [ENRICH_PASS]: {} failed: {}", incident.incident_id, reason);
                metrics.increment("enrichment_failures", 1, &[]);
                report.failed += 1;
            }
        }

        progress.inc(1);

        // Cortesía entre llamadas al proveedor del modelo.
        if rate_limit_delay_seconds > 0.0 {
            tokio::time::sleep(Duration::from_secs_f64(rate_limit_delay_seconds)).await;
        }
    }

    progress.finish_with_message("pass complete");
    metrics.increment("enrichment_runs", 1, &[("status", "success")]);

    info!(
        "🧠 [ENRICH_PASS]: Complete. enriched={}, not_education={}, no_articles={}, failed={}",
        report.enriched, report.skipped_not_education, report.skipped_no_articles, report.failed
    );
    Ok(report)
}

/**
 * Pasada opcional de deduplicación post-enriquecimiento (§ narrativas).
 *
 * Conserva el incidente con mayor puntaje de cobertura dentro de cada
 * grupo duplicado; el resto se elimina del ledger.
 */
#[instrument(skip(store_client))]
pub async fn run_dedup_pass(
    store_client: &StoreClient,
    window_days: i64,
) -> Result<usize, EnrichmentPassError> {
    let incident_repository = IncidentRepository::new(store_client.clone());
    let enrichment_repository = EnrichmentRepository::new(store_client.clone());

    let identities = incident_repository
        .list_enriched_identities()
        .await
        .map_err(|fault| EnrichmentPassError::StoreFault(fault.to_string()))?
        .into_iter()
        .map(|(incident_id, institution_name, incident_date)| dedup::EnrichedIdentity {
            incident_id,
            institution_name,
            incident_date,
        })
        .collect::<Vec<_>>();

    let groups = dedup::group_duplicate_incidents(&identities, window_days);
    if groups.is_empty() {
        info!("🧬 [DEDUP]: No duplicate narratives detected.");
        return Ok(0);
    }

    let mut removed = 0usize;
    for group in groups {
        // Puntaje de cobertura desde el registro pleno almacenado.
        let mut best: Option<(String, usize)> = None;
        let mut scores: Vec<(String, usize)> = Vec::new();

        for incident_id in &group {
            let score = match enrichment_repository.get_enrichment_json(incident_id).await {
                Ok(Some(serialized)) => serde_json::from_str::<Value>(&serialized)
                    .map(|value| coverage::count_filled_fields(&value))
                    .unwrap_or(0),
                _ => 0,
            };
            scores.push((incident_id.clone(), score));
            match &best {
                Some((_, best_score)) if *best_score >= score => {}
                _ => best = Some((incident_id.clone(), score)),
            }
        }

        let keeper = best.map(|(id, _)| id).unwrap_or_else(|| group[0].clone());
        for (incident_id, score) in scores {
            if incident_id != keeper {
                info!(
                    "🧬 [DEDUP]: Removing duplicate {} (coverage {}) in favor of {}",
                    incident_id, score, keeper
                );
                incident_repository
                    .delete_incident(&incident_id)
                    .await
                    .map_err(|fault| EnrichmentPassError::StoreFault(fault.to_string()))?;
                removed += 1;
            }
        }
    }

    info!("🧬 [DEDUP]: Pass complete, {} duplicates removed.", removed);
    Ok(removed)
}
