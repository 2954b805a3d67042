// [tests/mirror/libs/domain/enrichment/normalization_pass.test.rs]
/**
 * =================================================================
 * APARATO: NORMALIZATION PASS CERTIFICATION (V4.1)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-MIRROR
 * RESPONSABILIDAD: PASADA PERMISIVO → ESTRICTO E IDEMPOTENCIA
 * =================================================================
 */

use educti_domain_enrichment::normalize::parse_monetary_usd;
use educti_domain_enrichment::{normalize_and_validate, normalize_response, validate_record};
use serde_json::json;

#[test]
fn certify_single_wrapper_key_is_unwrapped() {
    let wrapped = json!({
        "cti_extraction": {
            "is_edu_cyber_incident": true,
            "enriched_summary": "A university breach.",
            "attack_category": "ransomware"
        }
    });

    let normalized = normalize_response(&wrapped);
    assert_eq!(normalized["is_edu_cyber_incident"], true);
    assert_eq!(normalized["enriched_summary"], "A university breach.");
    assert_eq!(normalized["attack_category"], "ransomware_encryption");
    assert!(normalized.get("cti_extraction").is_none());
}

#[test]
fn certify_mitre_string_conversion() {
    let raw = json!({
        "is_edu_cyber_incident": true,
        "enriched_summary": "Breach.",
        "mitre_attack_techniques": ["T1078: Valid Accounts", "T1486", "not-a-technique"]
    });

    let normalized = normalize_response(&raw);
    let techniques = normalized["mitre_attack_techniques"].as_array().expect("array");
    assert_eq!(techniques.len(), 2);
    assert_eq!(techniques[0]["technique_id"], "T1078");
    assert_eq!(techniques[0]["technique_name"], "Valid Accounts");
    assert_eq!(techniques[1]["technique_id"], "T1486");
    assert!(techniques[1]["technique_name"].is_null());
}

#[test]
fn certify_mitre_alias_rename_and_tactic_id_mapping() {
    let raw = json!({
        "is_edu_cyber_incident": true,
        "enriched_summary": "Breach.",
        "mitre_attack": [
            {"id": "T1566.001", "name": "Spearphishing Attachment", "tactic_id": "TA0001", "confidence": "likely"}
        ]
    });

    let normalized = normalize_response(&raw);
    let techniques = normalized["mitre_attack_techniques"].as_array().expect("renamed");
    assert_eq!(techniques[0]["technique_id"], "T1566.001");
    assert_eq!(techniques[0]["technique_name"], "Spearphishing Attachment");
    assert_eq!(techniques[0]["tactic"], "initial_access");
    assert!(techniques[0].get("confidence").is_none());
}

#[test]
fn certify_education_relevance_coercion_from_flat_fields() {
    let raw = json!({
        "is_edu_cyber_incident": false,
        "education_relevance_reasoning": "The affected entity is a retail chain.",
        "enriched_summary": "Retail breach."
    });

    let normalized = normalize_response(&raw);
    let relevance = &normalized["education_relevance"];
    assert_eq!(relevance["is_education_related"], false);
    assert_eq!(relevance["reasoning"], "The affected entity is a retail chain.");
}

#[test]
fn certify_enum_coercion_with_alias_and_substring() {
    let raw = json!({
        "is_edu_cyber_incident": true,
        "enriched_summary": "Breach.",
        "attack_vector": ["attack via phishing email", "second ignored"],
        "systems_affected": ["Email", "Student Portal", "mainframe of mystery"],
        "attack_chain": ["Recon", "Delivery", "Actions on Objectives", "interpretive dance"],
        "ransomware_family": "LockBit 3.0"
    });

    let normalized = normalize_response(&raw);
    assert_eq!(normalized["attack_vector"], "phishing_email");
    assert_eq!(normalized["ransomware_family"], "lockbit_3");

    let systems = normalized["systems_affected"].as_array().expect("systems");
    assert!(systems.contains(&json!("email_system")));
    assert!(systems.contains(&json!("student_portal")));
    // Los desconocidos de esta lista colapsan a `other`.
    assert!(systems.contains(&json!("other")));

    let chain = normalized["attack_chain"].as_array().expect("chain");
    assert_eq!(
        chain,
        &vec![
            json!("reconnaissance"),
            json!("initial_access"),
            json!("impact")
        ]
    );
}

#[test]
fn certify_tristate_boolean_and_unknown_scrub() {
    let raw = json!({
        "is_edu_cyber_incident": true,
        "enriched_summary": "Breach.",
        "ransom_paid": "unknown",
        "data_exfiltrated": "Yes",
        "data_encrypted": "no",
        "threat_actor_name": "Unknown",
        "country": "USA"
    });

    let normalized = normalize_response(&raw);
    assert!(normalized["ransom_paid"].is_null(), "unknown nunca degrada a false");
    assert_eq!(normalized["data_exfiltrated"], true);
    assert_eq!(normalized["data_encrypted"], false);
    assert!(normalized["threat_actor_name"].is_null());
}

#[test]
fn certify_monetary_standardization() {
    assert_eq!(parse_monetary_usd("$4.75 million"), Some(4_750_000.0));
    assert_eq!(parse_monetary_usd("5.2M"), Some(5_200_000.0));
    assert_eq!(parse_monetary_usd("120k"), Some(120_000.0));
    assert_eq!(parse_monetary_usd("$1,250,000"), Some(1_250_000.0));
    assert_eq!(parse_monetary_usd("2 billion"), Some(2_000_000_000.0));
    assert_eq!(parse_monetary_usd("a king's ransom"), None);

    let raw = json!({
        "is_edu_cyber_incident": true,
        "enriched_summary": "Breach.",
        "ransom_amount": "$4.75 million",
        "students_affected": "45,000"
    });
    let normalized = normalize_response(&raw);
    assert_eq!(normalized["ransom_amount"], 4_750_000.0);
    assert_eq!(normalized["students_affected"], 45_000);
}

#[test]
fn certify_deprecated_fields_are_dropped() {
    let raw = json!({
        "is_edu_cyber_incident": true,
        "enriched_summary": "Breach.",
        "confidence": 0.9,
        "extraction_confidence": 0.8,
        "url_scores": [{"url": "x", "confidence_score": 0.5}]
    });

    let normalized = normalize_response(&raw);
    assert!(normalized.get("confidence").is_none());
    assert!(normalized.get("extraction_confidence").is_none());
    assert!(normalized.get("url_scores").is_none());
}

#[test]
fn certify_normalization_is_idempotent() {
    let raw = json!({
        "incident_analysis": {
            "is_edu_cyber_incident": true,
            "summary": "Campus breach with ransom.",
            "attack_category": "double extortion",
            "attack_vector": "stolen credentials",
            "was_ransom_demanded": "yes",
            "ransom_amount": "$2.5 million",
            "timeline": [
                {"date": "2024-10-01", "description": "Attackers got in", "event": "Initial Access"},
                "a stray string event"
            ],
            "mitre_attack_techniques": ["T1078: Valid Accounts"],
            "systems_affected": ["email", "backups"]
        }
    });

    let first_pass = normalize_response(&raw);
    let second_pass = normalize_response(&first_pass);
    assert_eq!(first_pass, second_pass, "normalize(normalize(x)) == normalize(x)");

    // El resultado normalizado además valida contra el modelo estricto.
    let record = validate_record(&first_pass).expect("normalized instance validates");
    assert_eq!(record.attack_category.as_deref(), Some("ransomware_double_extortion"));
    assert_eq!(record.was_ransom_demanded, Some(true));
    assert_eq!(record.ransom_amount, Some(2_500_000.0));
    let timeline = record.timeline.expect("timeline survives");
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].event_type.as_deref(), Some("initial_access"));
}

#[test]
fn certify_validation_catches_malformed_constraints() {
    // Un vector fuera de vocabulario inyectado tras la normalización.
    let mut tampered = normalize_response(&json!({
        "is_edu_cyber_incident": true,
        "enriched_summary": "Breach."
    }));
    tampered["attack_vector"] = json!("teleportation");
    assert!(validate_record(&tampered).is_err());

    // La vía oficial re-normaliza una vez y repara la violación.
    let (record, _normalized) = normalize_and_validate(&tampered).expect("renormalization repairs");
    assert_eq!(record.attack_vector.as_deref(), Some("other"));
}
