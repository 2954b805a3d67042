// [libs/domain/enrichment/src/lib.rs]
#![recursion_limit = "512"]
/*!
 * =================================================================
 * APARATO: ENRICHMENT DOMAIN GATEWAY (V4.2)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: SEMÁNTICA COMPLETA DE EXTRACCIÓN CTI
 * =================================================================
 */

pub mod coverage;
pub mod dedup;
pub mod enricher;
pub mod enums;
pub mod mapper;
pub mod normalize;
pub mod prompt;
pub mod schema;

pub use coverage::{count_filled_fields, coverage_score};
pub use dedup::{group_duplicate_incidents, EnrichedIdentity, DEFAULT_DEDUP_WINDOW_DAYS};
pub use enricher::{
    EnrichedArtifact, EnrichmentOutcome, ExtractionGateway, GatewayFault, IncidentEnricher,
};
pub use mapper::{derive_incident_mutation, project_flat, IncidentMutation};
pub use normalize::{normalize_and_validate, normalize_response, validate_record, ValidationFault};
pub use prompt::{build_user_prompt, SYSTEM_PROMPT};
pub use schema::EXTRACTION_SCHEMA;
