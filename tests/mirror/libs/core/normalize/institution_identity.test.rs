// [tests/mirror/libs/core/normalize/institution_identity.test.rs]
/**
 * =================================================================
 * APARATO: INSTITUTIONAL SIGNATURE CERTIFICATION (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-MIRROR
 * RESPONSABILIDAD: FIRMA NOMINAL ESTABLE PARA DEDUPLICACIÓN
 * =================================================================
 */

use educti_core_normalize::normalize_institution_name;

#[test]
fn certify_narrative_variants_converge() {
    let variants = [
        "University of Western Ontario",
        "The University of Western Ontario",
        "Western Ontario University",
    ];
    let signatures: Vec<String> = variants
        .iter()
        .map(|name| normalize_institution_name(name))
        .collect();

    assert_eq!(signatures[0], "western ontario");
    assert!(signatures.iter().all(|signature| signature == &signatures[0]));
}

#[test]
fn certify_punctuation_and_whitespace_collapse() {
    assert_eq!(normalize_institution_name("St. Mary's   College"), "st marys");
    assert_eq!(normalize_institution_name("  The   Ohio State University  "), "ohio state");
}

#[test]
fn certify_distinct_institutions_stay_distinct() {
    let first = normalize_institution_name("University of Michigan");
    let second = normalize_institution_name("Michigan State University");
    assert_ne!(first, second);
}

#[test]
fn certify_empty_input_is_empty_signature() {
    assert_eq!(normalize_institution_name(""), "");
    assert_eq!(normalize_institution_name("   "), "");
}
