// [libs/domain/enrichment/src/enricher.rs]
/*!
 * =================================================================
 * APARATO: INCIDENT ENRICHER (V4.4 - MULTI-ARTICLE ARBITER)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: FLUJO DE ENRIQUECIMIENTO POR INCIDENTE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ARBITRATION: con múltiples artículos cada uno se enriquece de
 *    forma independiente; gana el de mayor puntaje de cobertura.
 * 2. EDUCATION GATE: "no es del sector educativo" es un VEREDICTO,
 *    no un fallo; los llamadores deben distinguir ambos destinos.
 * 3. RATE PROPAGATION: el agotamiento del límite de tasa atraviesa el
 *    flujo sin tocar estado y aborta la pasada completa.
 * =================================================================
 */

use educti_domain_models::{ArticleContent, CtiRecord, Incident};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::coverage::coverage_score;
use crate::normalize::normalize_and_validate;
use crate::prompt::{build_user_prompt, SYSTEM_PROMPT};

/// Fallos del enlace con el modelo vistos desde el dominio.
#[derive(Error, Debug)]
pub enum GatewayFault {
    /// Límite de tasa persistente: fatal para la pasada completa.
    #[error("[L2_GATEWAY_FAULT]: RATE_LIMIT_EXHAUSTED -> {0}")]
    RateLimitExhausted(String),

    /// Cualquier otro fallo de transporte o parseo del sobre.
    #[error("[L2_GATEWAY_FAULT]: EXTRACTION_CALL_FAILED -> {0}")]
    CallFailed(String),
}

/// Puerto hacia la pasarela de extracción (implementado en el borde).
pub trait ExtractionGateway {
    /// Retorna el payload JSON ya parseado del sobre del modelo.
    fn extract_value(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> impl std::future::Future<Output = Result<Value, GatewayFault>> + Send;
}

/// Artefacto completo de un enriquecimiento exitoso.
#[derive(Debug, Clone)]
pub struct EnrichedArtifact {
    pub record: CtiRecord,
    pub normalized: Value,
    pub primary_url: String,
    pub coverage: usize,
}

/// Destino clasificado de una pasada sobre un incidente.
#[derive(Debug)]
pub enum EnrichmentOutcome {
    /// Enriquecimiento listo para persistir.
    Enriched(Box<EnrichedArtifact>),
    /// El modelo determinó que ningún artículo es del sector educativo.
    NotEducationRelated { reasoning: String },
    /// Ningún artículo con texto utilizable.
    NoValidArticles,
    /// Todos los artículos fallaron en extraer o validar.
    Failed { reason: String },
}

pub struct IncidentEnricher<G: ExtractionGateway> {
    gateway: G,
}

impl<G: ExtractionGateway> IncidentEnricher<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /**
     * Procesa un incidente con sus artículos pre-cosechados.
     *
     * # Errors:
     * Solo el agotamiento del límite de tasa retorna `Err`; el resto de
     * destinos se clasifica dentro de `EnrichmentOutcome`.
     */
    #[instrument(skip_all, fields(incident_id = %incident.incident_id))]
    pub async fn process_incident(
        &self,
        incident: &Incident,
        articles: &[ArticleContent],
        skip_if_not_education: bool,
    ) -> Result<EnrichmentOutcome, GatewayFault> {
        let usable_articles: Vec<&ArticleContent> = articles
            .iter()
            .filter(|article| article.has_usable_text())
            .collect();

        if usable_articles.is_empty() {
            warn!("⊘ [ENRICHER]: No usable articles for {}", incident.incident_id);
            return Ok(EnrichmentOutcome::NoValidArticles);
        }

        info!(
            "🧠 [ENRICHER]: Arbitrating {} article(s) for {}",
            usable_articles.len(),
            incident.incident_id
        );

        let mut scored: Vec<EnrichedArtifact> = Vec::new();
        let mut rejection_reasons: Vec<String> = Vec::new();
        let mut all_not_education = true;

        for (index, article) in usable_articles.iter().enumerate() {
            info!(
                "   [{}/{}] Enriching {}",
                index + 1,
                usable_articles.len(),
                article.url
            );

            match self.enrich_single_article(article).await {
                Ok((record, normalized)) => {
                    if skip_if_not_education && !record.is_education_related() {
                        let reasoning = record
                            .education_reasoning()
                            .unwrap_or("No education-sector evidence in the article")
                            .to_string();
                        info!("   ⊘ Not education-related: {}", article.url);
                        rejection_reasons.push(reasoning);
                        continue;
                    }

                    all_not_education = false;
                    let coverage = coverage_score(&record);
                    info!("   ✓ {} fields covered by {}", coverage, article.url);
                    scored.push(EnrichedArtifact {
                        record,
                        normalized,
                        primary_url: article.url.clone(),
                        coverage,
                    });
                }
                Err(ArticleFault::RateLimit(detail)) => {
                    return Err(GatewayFault::RateLimitExhausted(detail));
                }
                Err(ArticleFault::Recoverable(detail)) => {
                    all_not_education = false;
                    warn!("   ✗ Extraction failed for {}: {}", article.url, detail);
                }
            }
        }

        if scored.is_empty() {
            if all_not_education {
                let reasoning = rejection_reasons
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| "All articles judged outside the education sector".into());
                return Ok(EnrichmentOutcome::NotEducationRelated { reasoning });
            }
            return Ok(EnrichmentOutcome::Failed {
                reason: "All articles failed extraction or validation".into(),
            });
        }

        let best = scored
            .into_iter()
            .max_by_key(|artifact| artifact.coverage)
            .expect("non-empty scored set");

        info!(
            "🏆 [ENRICHER]: PRIMARY selected {} ({} fields)",
            best.primary_url, best.coverage
        );

        Ok(EnrichmentOutcome::Enriched(Box::new(best)))
    }

    /// Extracción + normalización + validación de un artículo individual.
    async fn enrich_single_article(
        &self,
        article: &ArticleContent,
    ) -> Result<(CtiRecord, Value), ArticleFault> {
        let user_prompt = build_user_prompt(&article.url, &article.title, &article.content);

        let raw_value = self
            .gateway
            .extract_value(SYSTEM_PROMPT, &user_prompt)
            .await
            .map_err(|fault| match fault {
                GatewayFault::RateLimitExhausted(detail) => ArticleFault::RateLimit(detail),
                GatewayFault::CallFailed(detail) => ArticleFault::Recoverable(detail),
            })?;

        let (record, normalized) = normalize_and_validate(&raw_value)
            .map_err(|fault| ArticleFault::Recoverable(fault.to_string()))?;

        Ok((record, normalized))
    }
}

enum ArticleFault {
    RateLimit(String),
    Recoverable(String),
}
