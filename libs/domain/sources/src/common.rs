// [libs/domain/sources/src/common.rs]
/*!
 * =================================================================
 * APARATO: SOURCE COMMON STRATA (V4.1)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: VOCABULARIO EDUCATIVO Y UTILIDADES COMPARTIDAS
 * =================================================================
 */

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Grupos de fuentes reconocidos por el orquestador de ingesta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceGroup {
    Curated,
    News,
    Rss,
}

impl SourceGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceGroup::Curated => "curated",
            SourceGroup::News => "news",
            SourceGroup::Rss => "rss",
        }
    }

    pub fn parse(raw: &str) -> Option<SourceGroup> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "curated" => Some(SourceGroup::Curated),
            "news" => Some(SourceGroup::News),
            "rss" => Some(SourceGroup::Rss),
            _ => None,
        }
    }
}

/// Palabras clave de los buscadores de prensa generalista.
pub const NEWS_KEYWORDS: &[&str] = &[
    "university",
    "universities",
    "school",
    "college",
    "campus",
    "education",
    "academy",
];

/// Vocabulario educativo para filtrar feeds RSS.
///
/// Mantenido deliberadamente corto: términos que identifican al sector
/// con baja tasa de falsos positivos en titulares de brechas.
pub const EDUCATION_KEYWORDS: &[&str] = &[
    "university",
    "college",
    "school district",
    "school board",
    "student data",
    "student records",
    "student information",
    "faculty",
    "alumni",
    "k-12",
    "k12",
    "high school",
    "elementary school",
    "middle school",
    "campus",
    "higher education",
    "research institute",
    "research university",
    "academic research",
    "department of education",
    "ministry of education",
    "public schools",
];

static WORD_BOUNDARY_CACHE: Lazy<Vec<(String, Regex)>> = Lazy::new(|| {
    EDUCATION_KEYWORDS
        .iter()
        .filter(|keyword| keyword.len() <= 5)
        .map(|keyword| {
            let pattern = format!(r"\b{}\b", regex::escape(keyword));
            (
                keyword.to_string(),
                Regex::new(&pattern).expect("static regex"),
            )
        })
        .collect()
});

/// Coincidencia contra las palabras clave de prensa generalista.
pub fn matches_news_keywords(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let lowered = text.to_lowercase();
    NEWS_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
        || contains_education_keywords(&lowered)
}

/// Coincidencia contra el vocabulario educativo del feed RSS.
///
/// Las palabras cortas usan frontera de palabra: "alumni" sí, "calumnia" no.
pub fn contains_education_keywords(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let lowered = text.to_lowercase();

    for keyword in EDUCATION_KEYWORDS {
        if keyword.len() <= 5 {
            if WORD_BOUNDARY_CACHE
                .iter()
                .find(|(cached, _)| cached == keyword)
                .map(|(_, pattern)| pattern.is_match(&lowered))
                .unwrap_or(false)
            {
                return true;
            }
        } else if lowered.contains(keyword) {
            return true;
        }
    }
    false
}

/// Resolución de un href relativo contra la URL base de la página.
pub fn absolute_url(base: &str, href: &str) -> String {
    let trimmed = href.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match Url::parse(base).and_then(|base_url| base_url.join(trimmed)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Elimina etiquetas HTML y colapsa espacios (descripciones RSS).
pub fn strip_html_tags(raw: &str) -> String {
    static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("static regex"));
    let without_cdata = raw.replace("<![CDATA[", "").replace("]]>", "");
    let without_tags = TAG_PATTERN.replace_all(&without_cdata, "");
    without_tags.split_whitespace().collect::<Vec<_>>().join(" ")
}
