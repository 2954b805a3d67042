// [tests/mirror/libs/infra/llm/envelope_repair.test.rs]
/**
 * =================================================================
 * APARATO: ENVELOPE SURGEON CERTIFICATION (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-MIRROR
 * RESPONSABILIDAD: RECUPERACIÓN DEL PAYLOAD JSON DEL MODELO
 * =================================================================
 */

use educti_infra_llm::{parse_json_lenient, recover_json_payload};

#[test]
fn certify_markdown_fences_are_stripped() {
    let fenced = "```json\n{\"is_edu_cyber_incident\": true}\n```";
    let recovered = recover_json_payload(fenced);
    assert_eq!(recovered, "{\"is_edu_cyber_incident\": true}");

    let parsed = parse_json_lenient(fenced).expect("fenced payload parses");
    assert_eq!(parsed["is_edu_cyber_incident"], true);
}

#[test]
fn certify_prose_around_object_is_sliced_away() {
    let chatty = "Here is the extraction you asked for:\n{\"enriched_summary\": \"A breach.\", \"nested\": {\"x\": 1}}\nHope this helps!";
    let parsed = parse_json_lenient(chatty).expect("chatty payload parses");
    assert_eq!(parsed["enriched_summary"], "A breach.");
    assert_eq!(parsed["nested"]["x"], 1);
}

#[test]
fn certify_brace_slicing_respects_strings() {
    let tricky = r#"{"summary": "uses } inside a string", "ok": true} trailing"#;
    let parsed = parse_json_lenient(tricky).expect("brace balance respects strings");
    assert_eq!(parsed["ok"], true);
}

#[test]
fn certify_invalid_escape_repair() {
    // `\'` no es un escape JSON válido; los modelos lo emiten seguido.
    let broken = r#"{"enriched_summary": "the attacker\'s toolkit"}"#;
    let parsed = parse_json_lenient(broken).expect("escape repaired");
    assert_eq!(parsed["enriched_summary"], "the attacker's toolkit");
}

#[test]
fn certify_unrecoverable_payload_fails() {
    assert!(parse_json_lenient("no json here at all").is_err());
    assert!(parse_json_lenient("{\"unterminated\": ").is_err());
}
