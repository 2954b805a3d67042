// [libs/core/normalize/src/institution.rs]
/*!
 * =================================================================
 * APARATO: INSTITUTIONAL IDENTITY CANONICALIZER (V4.0)
 * CLASIFICACIÓN: CORE UTILITY (ESTRATO L1)
 * RESPONSABILIDAD: FIRMA NOMINAL ESTABLE PARA DEDUPLICACIÓN
 *
 * # Mathematical Proof (Narrative Collapse):
 * Dos narrativas del mismo incidente convergen a la misma firma nominal
 * si y solo si su institución normalizada coincide; la firma es
 * idempotente bajo re-normalización.
 * =================================================================
 */

use once_cell::sync::Lazy;
use regex::Regex;

static PREFIX_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^university\s+of\s+",
        r"^the\s+university\s+of\s+",
        r"^the\s+",
        r"^university\s+",
        r"^college\s+of\s+",
        r"^college\s+",
        r"^school\s+of\s+",
        r"^school\s+",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("static regex"))
    .collect()
});

static SUFFIX_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\s+university\s+system$",
        r"\s+university$",
        r"\s+college$",
        r"\s+school$",
        r"\s+institute$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("static regex"))
    .collect()
});

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").expect("static regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Colapsa un nombre institucional a su firma nominal comparativa.
///
/// Minúsculas, prefijos/sufijos genéricos fuera, puntuación fuera,
/// espacios colapsados.
pub fn normalize_institution_name(name: &str) -> String {
    let mut normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return normalized;
    }

    for pattern in PREFIX_PATTERNS.iter() {
        normalized = pattern.replace(&normalized, "").into_owned();
    }
    for pattern in SUFFIX_PATTERNS.iter() {
        normalized = pattern.replace(&normalized, "").into_owned();
    }

    normalized = NON_WORD.replace_all(&normalized, "").into_owned();
    normalized = WHITESPACE_RUN.replace_all(&normalized, " ").into_owned();

    normalized.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::normalize_institution_name;

    #[test]
    fn prefixes_and_suffixes_collapse() {
        assert_eq!(normalize_institution_name("The University of Michigan"), "michigan");
        assert_eq!(normalize_institution_name("Michigan University"), "michigan");
        assert_eq!(normalize_institution_name("St. Mary's College"), "st marys");
    }

    #[test]
    fn signature_is_idempotent() {
        let first = normalize_institution_name("University of Western Ontario");
        let second = normalize_institution_name(&first);
        assert_eq!(first, second);
    }
}
