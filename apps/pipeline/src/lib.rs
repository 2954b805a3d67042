// [apps/pipeline/src/lib.rs]
/*!
 * =================================================================
 * APARATO: PIPELINE COMPOSITION LIBRARY (V4.2)
 * CLASIFICACIÓN: COMPOSITION ROOT (ESTRATO L0)
 * RESPONSABILIDAD: REGISTRO DE SERVICIOS DE APLICACIÓN DEL PIPELINE
 * =================================================================
 */

/// Configuración explícita del proceso.
pub mod config;
/// Pasada de enriquecimiento y deduplicación post-enriquecimiento.
pub mod enrich;
/// Orquestación de la cosecha por grupo de fuentes.
pub mod ingest;
/// Planificador cooperativo de trabajos periódicos.
pub mod scheduler;

pub use config::PipelineConfig;
pub use enrich::{
    run_dedup_pass, run_enrichment_pass, EnrichmentPassError, EnrichmentPassReport,
    OllamaExtractionGateway,
};
pub use ingest::{ingest_group, IngestOptions, IngestReport, StoreSink};
pub use scheduler::{
    rss_job_due, weekly_job_due, Clock, JobName, PipelineScheduler, SchedulerConfig, SystemClock,
};
