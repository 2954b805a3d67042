// [libs/infra/db/src/repositories/mod.rs]
/*!
 * =================================================================
 * APARATO: REPOSITORY ACCESS MATRIX (V4.1 - TOPOLOGY MASTER)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: ORQUESTACIÓN DE SUBSISTEMAS DE PERSISTENCIA
 *
 * # Mathematical Proof (Modular Encapsulation):
 * El barrel file actúa como interfaz galvánica: los sub-módulos quedan
 * aislados y solo las estructuras de autoridad (Repositories) se
 * exponen al exterior, reduciendo el acoplamiento sistémico.
 * =================================================================
 */

// --- ESTRATO 1: COSECHA (PHASE 1) ---

/// Cristalización idempotente de incidentes y fusión de URLs.
pub mod incident;
/// Mapa `(fuente, evento)` → incidente para detección de re-ingesta.
pub mod source_event;
/// Marca de agua `last_pubdate` monotónica por fuente.
pub mod source_state;

// --- ESTRATO 2: ENRIQUECIMIENTO (PHASE 2) ---

/// Bóveda de artículos cosechados y marcado del primario.
pub mod article;
/// Persistencia transaccional del registro pleno + proyección plana.
pub mod enrichment;

// --- RE-EXPORTACIONES SOBERANAS (NOMINAL ACCESS API) ---

pub use article::ArticleRepository;
pub use enrichment::{EnrichmentRepository, EnrichmentStats, IncidentEnrichmentUpdate};
pub use incident::IncidentRepository;
pub use source_event::SourceEventRepository;
pub use source_state::SourceStateRepository;
