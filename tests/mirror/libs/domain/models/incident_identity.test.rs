// [tests/mirror/libs/domain/models/incident_identity.test.rs]
/**
 * =================================================================
 * APARATO: INCIDENT IDENTITY CERTIFICATION (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-MIRROR
 * RESPONSABILIDAD: ESTABILIDAD Y FORMATO DEL DIGESTO DE IDENTIDAD
 * =================================================================
 */

use educti_domain_models::make_incident_id;
use proptest::prelude::*;

#[test]
fn certify_identity_is_stable_across_invocations() {
    let first = make_incident_id("konbriefing", "unique_string_123");
    let second = make_incident_id("konbriefing", "unique_string_123");
    assert_eq!(first, second);
}

#[test]
fn certify_identity_discriminates_inputs() {
    let base = make_incident_id("source1", "unique_string_123");
    assert_ne!(base, make_incident_id("source1", "unique_string_456"));
    assert_ne!(base, make_incident_id("source2", "unique_string_123"));
}

#[test]
fn certify_identity_format() {
    let incident_id = make_incident_id("test_source", "unique_string");

    assert!(incident_id.starts_with("test_source_"));
    assert_eq!(incident_id.len(), "test_source_".len() + 16);

    // El sufijo son 16 hex minúsculas (rsplit tolera guiones bajos en la fuente).
    let suffix = incident_id.rsplit('_').next().expect("hex suffix");
    assert_eq!(suffix.len(), 16);
    assert!(suffix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

proptest! {
    #[test]
    fn certify_identity_determinism_for_arbitrary_inputs(
        source in "[a-z][a-z0-9_]{0,20}",
        unique in ".{0,120}",
    ) {
        let first = make_incident_id(&source, &unique);
        let second = make_incident_id(&source, &unique);
        prop_assert_eq!(&first, &second);
        let expected_prefix = format!("{}_", source);
        prop_assert!(first.starts_with(&expected_prefix));
        prop_assert_eq!(first.len(), source.len() + 1 + 16);
    }

    #[test]
    fn certify_distinct_unique_strings_rarely_collide(
        source in "[a-z]{3,8}",
        left in "[a-zA-Z0-9 ]{1,40}",
        right in "[a-zA-Z0-9 ]{1,40}",
    ) {
        prop_assume!(left != right);
        prop_assert_ne!(
            make_incident_id(&source, &left),
            make_incident_id(&source, &right)
        );
    }
}
