// [tests/mirror/libs/core/normalize/country_strata.test.rs]
/**
 * =================================================================
 * APARATO: COUNTRY TABLE CERTIFICATION (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-MIRROR
 * RESPONSABILIDAD: CANONICALIZACIÓN ISO-3166 Y ALIAS DE PRENSA
 * =================================================================
 */

use educti_core_normalize::{country_code_for, normalize_country};

#[test]
fn certify_codes_resolve_to_full_names() {
    assert_eq!(normalize_country("US").as_deref(), Some("United States"));
    assert_eq!(normalize_country("us").as_deref(), Some("United States"));
    assert_eq!(normalize_country("GB").as_deref(), Some("United Kingdom"));
    assert_eq!(normalize_country("DE").as_deref(), Some("Germany"));
}

#[test]
fn certify_press_aliases_collapse() {
    for alias in ["USA", "U.S.", "U.S.A.", "United States of America"] {
        assert_eq!(normalize_country(alias).as_deref(), Some("United States"), "alias: {}", alias);
    }
    for alias in ["UK", "Britain", "Great Britain", "England", "Scotland"] {
        assert_eq!(normalize_country(alias).as_deref(), Some("United Kingdom"), "alias: {}", alias);
    }
}

#[test]
fn certify_case_insensitive_full_names() {
    assert_eq!(normalize_country("united states").as_deref(), Some("United States"));
    assert_eq!(normalize_country("GERMANY").as_deref(), Some("Germany"));
}

#[test]
fn certify_unknown_countries_pass_through() {
    // La cosecha no debe perder geografía fuera de tabla.
    assert_eq!(normalize_country("Wakanda").as_deref(), Some("Wakanda"));
    assert!(normalize_country("   ").is_none());
}

#[test]
fn certify_alpha2_code_derivation() {
    assert_eq!(country_code_for("United States").as_deref(), Some("US"));
    assert_eq!(country_code_for("USA").as_deref(), Some("US"));
    assert_eq!(country_code_for("Britain").as_deref(), Some("GB"));
    assert!(country_code_for("Wakanda").is_none());
}
