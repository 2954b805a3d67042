// [libs/domain/sources/src/curated/mod.rs]
/*!
 * =================================================================
 * APARATO: CURATED SOURCES REGISTRY (V4.1)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: FUENTES CON SECCIÓN EDUCATIVA DEDICADA
 * =================================================================
 */

/// Listado curado de ataques a universidades (una sola página).
pub mod konbriefing;
/// Archivo paginado del sector educación.
pub mod databreaches;
/// API sectorial de víctimas de ransomware.
pub mod ransomware_live;

pub use databreaches::collect_databreaches_archive;
pub use konbriefing::collect_konbriefing_listing;
pub use ransomware_live::collect_ransomware_live_victims;
