// [libs/core/normalize/src/countries.rs]
/*!
 * =================================================================
 * APARATO: GEO-SOVEREIGN COUNTRY TABLE (V4.0)
 * CLASIFICACIÓN: CORE UTILITY (ESTRATO L1)
 * RESPONSABILIDAD: CANONICALIZACIÓN ISO-3166-1 DE PAÍSES Y ALIAS
 * =================================================================
 */

/// Tabla ISO 3166-1 alpha-2 → nombre completo. Constante y acíclica;
/// no se genera en runtime.
pub const COUNTRY_CODE_TO_NAME: &[(&str, &str)] = &[
    ("US", "United States"),
    ("GB", "United Kingdom"),
    ("CA", "Canada"),
    ("AU", "Australia"),
    ("DE", "Germany"),
    ("FR", "France"),
    ("IT", "Italy"),
    ("ES", "Spain"),
    ("NL", "Netherlands"),
    ("BE", "Belgium"),
    ("CH", "Switzerland"),
    ("AT", "Austria"),
    ("SE", "Sweden"),
    ("NO", "Norway"),
    ("DK", "Denmark"),
    ("FI", "Finland"),
    ("PL", "Poland"),
    ("CZ", "Czech Republic"),
    ("IE", "Ireland"),
    ("PT", "Portugal"),
    ("GR", "Greece"),
    ("HU", "Hungary"),
    ("RO", "Romania"),
    ("BG", "Bulgaria"),
    ("HR", "Croatia"),
    ("SK", "Slovakia"),
    ("SI", "Slovenia"),
    ("LT", "Lithuania"),
    ("LV", "Latvia"),
    ("EE", "Estonia"),
    ("LU", "Luxembourg"),
    ("MT", "Malta"),
    ("CY", "Cyprus"),
    ("IS", "Iceland"),
    ("JP", "Japan"),
    ("CN", "China"),
    ("IN", "India"),
    ("KR", "South Korea"),
    ("SG", "Singapore"),
    ("MY", "Malaysia"),
    ("TH", "Thailand"),
    ("PH", "Philippines"),
    ("ID", "Indonesia"),
    ("VN", "Vietnam"),
    ("NZ", "New Zealand"),
    ("BR", "Brazil"),
    ("MX", "Mexico"),
    ("AR", "Argentina"),
    ("CL", "Chile"),
    ("CO", "Colombia"),
    ("PE", "Peru"),
    ("ZA", "South Africa"),
    ("EG", "Egypt"),
    ("NG", "Nigeria"),
    ("KE", "Kenya"),
    ("IL", "Israel"),
    ("AE", "United Arab Emirates"),
    ("SA", "Saudi Arabia"),
    ("TR", "Turkey"),
    ("RU", "Russia"),
    ("UA", "Ukraine"),
    ("PK", "Pakistan"),
    ("BD", "Bangladesh"),
    ("TW", "Taiwan"),
    ("HK", "Hong Kong"),
];

/// Variaciones y alias frecuentes en prensa hacia el nombre canónico.
pub const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("United States of America", "United States"),
    ("USA", "United States"),
    ("U.S.A.", "United States"),
    ("U.S.", "United States"),
    ("UK", "United Kingdom"),
    ("U.K.", "United Kingdom"),
    ("Great Britain", "United Kingdom"),
    ("Britain", "United Kingdom"),
    ("England", "United Kingdom"),
    ("Scotland", "United Kingdom"),
    ("Wales", "United Kingdom"),
    ("Northern Ireland", "United Kingdom"),
];

/// Normaliza un código, alias o nombre de país al nombre canónico ISO.
///
/// Los valores fuera de tabla se devuelven tal cual: la cosecha no debe
/// perder información geográfica desconocida.
pub fn normalize_country(country: &str) -> Option<String> {
    let candidate = country.trim();
    if candidate.is_empty() {
        return None;
    }

    if COUNTRY_CODE_TO_NAME
        .iter()
        .any(|(_, name)| *name == candidate)
    {
        return Some(candidate.to_string());
    }

    if let Some((_, canonical)) = COUNTRY_ALIASES.iter().find(|(alias, _)| *alias == candidate) {
        return Some((*canonical).to_string());
    }

    let upper = candidate.to_ascii_uppercase();
    if let Some((_, name)) = COUNTRY_CODE_TO_NAME.iter().find(|(code, _)| *code == upper) {
        return Some((*name).to_string());
    }

    let lowered = candidate.to_lowercase();
    if let Some((_, name)) = COUNTRY_CODE_TO_NAME
        .iter()
        .find(|(_, name)| name.to_lowercase() == lowered)
    {
        return Some((*name).to_string());
    }

    Some(candidate.to_string())
}

/// Código ISO 3166-1 alpha-2 para un nombre (o código) de país.
pub fn country_code_for(country: &str) -> Option<String> {
    let normalized = normalize_country(country)?;
    COUNTRY_CODE_TO_NAME
        .iter()
        .find(|(_, name)| *name == normalized)
        .map(|(code, _)| (*code).to_string())
}
