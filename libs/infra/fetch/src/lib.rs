// [libs/infra/fetch/src/lib.rs]
/*!
 * =================================================================
 * APARATO: HARVEST STRATUM GATEWAY (V4.2)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: EXPOSICIÓN NOMINAL DEL COSECHADOR RESILIENTE
 * =================================================================
 */

pub mod archive;
pub mod browser;
pub mod captcha;
pub mod client;
pub mod errors;
pub mod extract;
pub mod policy;

pub use archive::{fetch_archived_html, lookup_archive_snapshot, strip_wayback_toolbar};
pub use browser::looks_blocked;
pub use captcha::detect_captcha;
pub use client::{FetchClient, GetOptions, HttpPayload};
pub use errors::FetchError;
pub use extract::{extract_article_from_html, ArticleExtractor};
pub use policy::FetchPolicy;
