// [libs/domain/sources/src/lib.rs]
/*!
 * =================================================================
 * APARATO: SOURCE ADAPTER REGISTRY (V4.2)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: COLECTORES NORMALIZADOS POR CLASE DE FUENTE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SINK SEAM: los adaptadores jamás escriben al almacén; emiten
 *    lotes a través del `IncidentSink` inyectado.
 * 2. SOURCE CLASSES: listado curado (una página), archivo paginado,
 *    búsqueda por palabra clave (render de cliente), API sectorial y
 *    RSS incremental con marca de agua.
 * =================================================================
 */

pub mod common;
pub mod curated;
pub mod news;
pub mod rss;
pub mod sink;

pub use common::{contains_education_keywords, matches_news_keywords, SourceGroup};
pub use sink::{IncidentSink, MemorySink, SinkFault};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    /// Fallo de cosecha que invalida la fuente completa en esta corrida.
    #[error("[L2_SOURCE_FAULT]: HARVEST_FAILED -> {0}")]
    HarvestFault(#[from] educti_infra_fetch::FetchError),

    /// Desafío CAPTCHA: se aborta la caminata de esta fuente/término.
    #[error("[L2_SOURCE_FAULT]: CAPTCHA_WALK_ABORTED -> {0}")]
    CaptchaAborted(String),

    /// El sumidero de persistencia rechazó un lote.
    #[error("[L2_SOURCE_FAULT]: SINK_REJECTED -> {0}")]
    SinkFault(#[from] sink::SinkFault),

    /// La respuesta de la fuente no tiene la forma esperada.
    #[error("[L2_SOURCE_FAULT]: PAYLOAD_SHAPE_VIOLATION -> {0}")]
    PayloadShape(String),
}
