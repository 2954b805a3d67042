// [libs/core/normalize/src/dates.rs]
/*!
 * =================================================================
 * APARATO: TEMPORAL CANONICALIZER (V4.0)
 * CLASIFICACIÓN: CORE UTILITY (ESTRATO L1)
 * RESPONSABILIDAD: PARSEO DE FECHAS HUMANAS, RSS E ISO CON PRECISIÓN
 *
 * # Mathematical Proof (Precision Coupling):
 * El parseo retorna siempre el par (fecha, precisión); una fecha ausente
 * implica precisión 'Unknown' y viceversa, sellando el invariante del
 * dominio en el punto único de entrada temporal.
 * =================================================================
 */

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Granularidad conocida de una fecha de incidente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePrecision {
    Day,
    Month,
    Year,
    Unknown,
}

impl DatePrecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePrecision::Day => "day",
            DatePrecision::Month => "month",
            DatePrecision::Year => "year",
            DatePrecision::Unknown => "unknown",
        }
    }

    pub fn parse(raw: &str) -> DatePrecision {
        match raw.trim().to_ascii_lowercase().as_str() {
            "day" => DatePrecision::Day,
            "month" => DatePrecision::Month,
            "year" => DatePrecision::Year,
            _ => DatePrecision::Unknown,
        }
    }
}

/// Formatos con resolución de día observados en las fuentes cosechadas.
const DAY_LEVEL_FORMATS: &[&str] = &[
    "%B %d, %Y", // April 17, 2025
    "%b %d, %Y", // Apr 17, 2025
    "%d %B %Y",  // 10 December 2021
    "%d %b %Y",  // 10 Dec 2021
    "%Y-%m-%d",  // 2025-08-11
];

/// Interpreta una fecha humana arbitraria y retorna `(iso, precisión)`.
///
/// Acepta formatos de día, mes-año y año puro; cualquier otra cosa
/// degrada a `(None, Unknown)` sin fallar.
pub fn parse_date_with_precision(raw: &str) -> (Option<String>, DatePrecision) {
    let cleaned = raw.replace('\u{a0}', " ");
    let candidate = cleaned.trim();
    if candidate.is_empty() {
        return (None, DatePrecision::Unknown);
    }

    for format in DAY_LEVEL_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(candidate, format) {
            return (Some(parsed.format("%Y-%m-%d").to_string()), DatePrecision::Day);
        }
    }

    // Mes-año: anclamos al primer día del mes para ordenar de forma estable.
    for format in ["%B %Y", "%b %Y"] {
        let anchored = format!("{} 1", candidate);
        let anchored_format = format!("{} %d", format);
        if let Ok(parsed) = NaiveDate::parse_from_str(&anchored, &anchored_format) {
            return (
                Some(parsed.format("%Y-%m-%d").to_string()),
                DatePrecision::Month,
            );
        }
    }

    // Año puro: cuatro dígitos exactos.
    if candidate.len() == 4 && candidate.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(year) = candidate.parse::<i32>() {
            if let Some(parsed) = NaiveDate::from_ymd_opt(year, 1, 1) {
                return (
                    Some(parsed.format("%Y-%m-%d").to_string()),
                    DatePrecision::Year,
                );
            }
        }
    }

    (None, DatePrecision::Unknown)
}

/// Marca temporal UTC actual en ISO-8601 con sufijo 'Z' y sin microsegundos.
pub fn now_utc_iso() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Interpreta un `pubDate` RSS (RFC-822/1123, ISO-8601 o naive) hacia UTC.
pub fn parse_rfc822_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let candidate = raw.trim();
    if candidate.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(candidate) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(candidate) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(candidate, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&parsed));
    }
    // RFC-822 con zona literal ("GMT"/"UTC") que rfc2822 estricto rechaza.
    for format in ["%a, %d %b %Y %H:%M:%S GMT", "%a, %d %b %Y %H:%M:%S UTC"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(candidate, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }

    None
}

static ISO_DATE_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2})").expect("static regex"));

/// Normaliza una fecha de publicación arbitraria a `YYYY-MM-DD`.
///
/// Cadena de intentos: fragmento ISO incrustado, RFC-822, formatos humanos
/// y numéricos comunes. Retorna `None` si ninguna estrategia aplica.
pub fn normalize_date_to_iso(raw: &str) -> Option<String> {
    let candidate = raw.trim();
    if candidate.is_empty() {
        return None;
    }

    if let Some(found) = ISO_DATE_FRAGMENT.captures(candidate) {
        let fragment = &found[1];
        if NaiveDate::parse_from_str(fragment, "%Y-%m-%d").is_ok() {
            return Some(fragment.to_string());
        }
    }

    if let Some(parsed) = parse_rfc822_datetime(candidate) {
        return Some(parsed.format("%Y-%m-%d").to_string());
    }

    const HUMAN_FORMATS: &[&str] = &[
        "%B %d, %Y",
        "%b %d, %Y",
        "%d %B %Y",
        "%d %b %Y",
        "%m/%d/%Y",
        "%d/%m/%Y",
    ];
    for format in HUMAN_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(candidate, format) {
            return Some(parsed.format("%Y-%m-%d").to_string());
        }
    }

    None
}

/// Ventana de antigüedad para ítems RSS: `edad <= max_age_days`.
pub fn is_within_max_age(pub_date: Option<DateTime<Utc>>, max_age_days: i64) -> bool {
    match pub_date {
        Some(published) => {
            let age = Utc::now().signed_duration_since(published);
            age <= chrono::Duration::days(max_age_days)
        }
        None => false,
    }
}

/// Comparación de fechas dentro de una ventana simétrica de días.
pub fn dates_within_window(first: Option<NaiveDate>, second: Option<NaiveDate>, days: i64) -> bool {
    match (first, second) {
        (Some(a), Some(b)) => (a - b).num_days().abs() <= days,
        _ => false,
    }
}

/// Parseo permisivo de una fecha `YYYY-MM-DD` almacenada.
pub fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    let candidate = raw.trim();
    if candidate.is_empty() {
        return None;
    }
    let prefix = candidate.get(..10).unwrap_or(candidate);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_level_dates_anchor_to_first_day() {
        let (date, precision) = parse_date_with_precision("April 2025");
        assert_eq!(date.as_deref(), Some("2025-04-01"));
        assert_eq!(precision, DatePrecision::Month);
    }

    #[test]
    fn non_breaking_spaces_are_tolerated() {
        let (date, precision) = parse_date_with_precision("April\u{a0}17, 2025");
        assert_eq!(date.as_deref(), Some("2025-04-17"));
        assert_eq!(precision, DatePrecision::Day);
    }

    #[test]
    fn year_extraction_requires_four_digits() {
        assert_eq!(parse_date_with_precision("202").1, DatePrecision::Unknown);
        let (date, precision) = parse_date_with_precision("2021");
        assert_eq!(date.as_deref(), Some("2021-01-01"));
        assert_eq!(precision, DatePrecision::Year);
    }
}
