// [tests/mirror/libs/domain/enrichment/coverage_scoring.test.rs]
/**
 * =================================================================
 * APARATO: COVERAGE SCORER CERTIFICATION (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-MIRROR
 * RESPONSABILIDAD: CONTEO RECURSIVO DE HOJAS INFORMATIVAS
 * =================================================================
 */

use educti_domain_enrichment::{count_filled_fields, coverage_score, normalize_response, validate_record};
use serde_json::json;

#[test]
fn certify_recursive_leaf_count() {
    assert_eq!(count_filled_fields(&json!(null)), 0);
    assert_eq!(count_filled_fields(&json!("")), 0);
    assert_eq!(count_filled_fields(&json!("   ")), 0);
    assert_eq!(count_filled_fields(&json!("text")), 1);
    assert_eq!(count_filled_fields(&json!(false)), 1);
    assert_eq!(count_filled_fields(&json!(0)), 1);

    let nested = json!({
        "a": "x",
        "b": null,
        "c": {"c1": 1, "c2": null, "c3": ["y", null, "z"]},
        "d": []
    });
    // a + c1 + y + z = 4 hojas informativas.
    assert_eq!(count_filled_fields(&nested), 4);
}

#[test]
fn certify_richer_article_scores_strictly_higher() {
    let sparse = validate_record(&normalize_response(&json!({
        "is_edu_cyber_incident": true,
        "enriched_summary": "A university was attacked."
    })))
    .expect("sparse record");

    let dense = validate_record(&normalize_response(&json!({
        "is_edu_cyber_incident": true,
        "enriched_summary": "A university was attacked.",
        "ransomware_family": "lockbit",
        "ransom_amount": 4750000,
        "was_ransom_demanded": true,
        "systems_affected": ["email_system", "backup_systems"],
        "students_affected": 45000
    })))
    .expect("dense record");

    let sparse_score = coverage_score(&sparse);
    let dense_score = coverage_score(&dense);
    assert!(
        dense_score > sparse_score,
        "dense {} must outrank sparse {}",
        dense_score,
        sparse_score
    );
}
