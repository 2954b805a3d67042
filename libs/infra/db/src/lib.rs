// [libs/infra/db/src/lib.rs]
/*!
 * =================================================================
 * APARATO: PERSISTENCE STRATUM GATEWAY (V4.2)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: EXPOSICIÓN NOMINAL DEL ALMACÉN EMBEBIDO
 * =================================================================
 */

pub mod client;
pub mod errors;
pub mod repositories;
pub mod schema;

pub use client::StoreClient;
pub use errors::DbError;
pub use repositories::{
    ArticleRepository, EnrichmentRepository, EnrichmentStats, IncidentEnrichmentUpdate,
    IncidentRepository, SourceEventRepository, SourceStateRepository,
};
