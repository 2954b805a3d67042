// [libs/domain/sources/src/news/mod.rs]
/*!
 * =================================================================
 * APARATO: NEWS SOURCES REGISTRY (V4.1)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: BÚSQUEDA POR PALABRA CLAVE EN PRENSA ESPECIALIZADA
 * =================================================================
 */

/// Buscador del sitio con resultados renderizados en cliente (Algolia).
pub mod securityweek;

pub use securityweek::collect_securityweek_search;
