// [libs/core/normalize/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CANONICAL NORMALIZATION CORE (V4.0)
 * CLASIFICACIÓN: CORE UTILITY (ESTRATO L1)
 * RESPONSABILIDAD: CANONICALIZACIÓN DE FECHAS, PAÍSES Y NOMBRES
 * =================================================================
 */

pub mod countries;
pub mod dates;
pub mod institution;
pub mod pagination;

pub use countries::{country_code_for, normalize_country};
pub use dates::{now_utc_iso, parse_date_with_precision, parse_rfc822_datetime, DatePrecision};
pub use institution::normalize_institution_name;
