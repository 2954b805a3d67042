// [libs/domain/sources/src/rss/mod.rs]
/*!
 * =================================================================
 * APARATO: RSS SOURCES REGISTRY (V4.1)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: FEEDS INCREMENTALES CON MARCA DE AGUA POR FUENTE
 * =================================================================
 */

pub mod common;
/// Feed del archivo de brechas, filtrado por categoría sectorial.
pub mod databreaches_rss;
/// Feed de noticias de seguridad, filtrado por categoría + vocabulario.
pub mod bleepingcomputer;

pub use bleepingcomputer::collect_bleepingcomputer_rss;
pub use common::{FeedItem, RssHarvest};
pub use databreaches_rss::collect_databreaches_rss;
