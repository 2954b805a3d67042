// [libs/domain/enrichment/src/normalize.rs]
/*!
 * =================================================================
 * APARATO: PERMISSIVE RESPONSE CANONICALIZER (V4.5 - SEALED)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: PASADA DETERMINISTA PERMISIVO → ESTRICTO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. UNWRAP: desenvuelve claves contenedoras conocidas.
 * 2. ALIAS: renombra variantes de campo hacia el nombre canónico.
 * 3. COERCE: listas→escalar, sí/no/unknown→booleano/null, dinero→USD,
 *    cadenas MITRE→objetos, enums libres→conjuntos cerrados.
 * 4. SEAL: garantiza los obligatorios y descarta lo deprecado.
 *
 * # Mathematical Proof (Idempotence):
 * Toda transformación mapea valores ya canónicos a sí mismos;
 * normalize(normalize(x)) == normalize(x) por composición.
 * =================================================================
 */

use educti_domain_models::CtiRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::enums::{self, coerce_to_closed_set, UnknownPolicy};

#[derive(Error, Debug)]
pub enum ValidationFault {
    #[error("[L2_SCHEMA_FAULT]: STRICT_BIND_REJECTED -> {0}")]
    BindError(String),

    #[error("[L2_SCHEMA_FAULT]: CONSTRAINT_VIOLATIONS -> {0}")]
    ConstraintError(String),
}

/// Claves contenedoras que los modelos envuelven alrededor del payload.
const WRAPPER_KEYS: &[&str] = &["cti_extraction", "incident_analysis", "result", "data", "response"];

/// Campos deprecados que se eliminan sin reemplazo.
const DEPRECATED_FIELDS: &[&str] = &["confidence", "confidence_score", "extraction_confidence", "url_scores"];

/// Campos booleanos del registro estricto (coerción sí/no/unknown).
const BOOLEAN_FIELDS: &[&str] = &[
    "threat_actor_claimed",
    "was_ransom_demanded",
    "ransom_paid",
    "ransom_negotiated",
    "ransom_deadline_given",
    "decryptor_received",
    "decryptor_worked",
    "data_breached",
    "data_exfiltrated",
    "data_encrypted",
    "data_destroyed",
    "data_published",
    "data_sold",
    "critical_systems_affected",
    "network_compromised",
    "domain_admin_compromised",
    "backup_compromised",
    "insurance_claim",
    "breach_notification_required",
    "notification_sent",
    "investigation_opened",
    "fine_imposed",
    "lawsuits_filed",
    "class_action_filed",
    "incident_response_activated",
    "law_enforcement_involved",
    "fbi_involved",
    "cisa_involved",
    "public_disclosure",
];

/// Montos monetarios normalizados a número USD.
const MONETARY_FIELDS: &[&str] = &[
    "ransom_amount",
    "ransom_amount_min",
    "ransom_amount_max",
    "ransom_amount_exact",
    "ransom_paid_amount",
    "estimated_total_cost_usd",
    "ransom_cost_usd",
    "recovery_cost_usd",
    "legal_cost_usd",
    "notification_cost_usd",
    "credit_monitoring_cost_usd",
    "lost_revenue_usd",
    "insurance_payout_usd",
    "fine_amount_usd",
    "settlement_amount_usd",
];

/// Números reales no monetarios (duraciones, volúmenes).
const NUMERIC_FIELDS: &[&str] = &[
    "dwell_time_days",
    "data_volume_gb",
    "outage_duration_hours",
    "downtime_days",
    "partial_service_days",
    "recovery_duration_days",
    "mttd_hours",
    "mttr_hours",
    "disclosure_delay_days",
    "ransom_deadline_days",
];

/// Conteos enteros (usuarios, registros, sistemas).
const INTEGER_FIELDS: &[&str] = &[
    "records_affected_min",
    "records_affected_max",
    "records_affected_exact",
    "systems_encrypted_count",
    "servers_affected_count",
    "endpoints_affected_count",
    "students_affected",
    "staff_affected",
    "faculty_affected",
    "alumni_affected",
    "applicants_affected",
    "patients_affected",
    "donors_affected",
    "total_individuals_affected",
    "lawsuit_count",
    "updates_provided_count",
];

/// Cadenas libres donde "unknown" no aporta información.
const FREE_STRING_FIELDS: &[&str] = &[
    "institution_name",
    "country",
    "region",
    "city",
    "threat_actor_name",
    "threat_actor_origin_country",
    "ransom_currency",
    "attack_campaign_name",
    "ir_firm_engaged",
    "forensics_firm_engaged",
    "legal_counsel_engaged",
    "pr_firm_engaged",
    "initial_access_description",
    "common_vulnerability_exploited",
    "source_publisher",
];

/// Ranuras escalares que a veces llegan como lista (se toma la primera).
const SCALAR_SLOTS: &[&str] = &[
    "attack_category",
    "attack_vector",
    "ransomware_family",
    "institution_type",
    "institution_size",
    "incident_severity",
    "incident_status",
    "business_impact_severity",
    "encryption_extent",
    "recovery_method",
    "threat_actor_name",
    "transparency_level",
    "disclosure_source",
];

/// Fechas ISO obligatorias (lo inválido colapsa a null).
const DATE_FIELDS: &[&str] = &[
    "incident_date",
    "discovery_date",
    "publication_date",
    "notification_sent_date",
    "outage_start_date",
    "outage_end_date",
    "recovery_started_date",
    "recovery_completed_date",
    "public_disclosure_date",
];

static TECHNIQUE_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^T\d{4}(\.\d{3})?$").expect("static regex"));
static CVE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^CVE-\d{4}-\d+$").expect("static regex"));

/**
 * Pasada completa de normalización permisivo → canónico.
 *
 * Pura y determinista; no consulta red ni reloj.
 */
pub fn normalize_response(raw_response: &Value) -> Value {
    let mut root = match raw_response {
        Value::Object(map) => map.clone(),
        other => return other.clone(),
    };

    unwrap_known_wrappers(&mut root);
    rename_top_level_aliases(&mut root);
    synthesize_education_relevance(&mut root);
    drop_deprecated_fields(&mut root);
    normalize_timeline(&mut root);
    normalize_mitre_techniques(&mut root);
    normalize_vulnerabilities(&mut root);
    collapse_scalar_slots(&mut root);
    scrub_unknown_free_strings(&mut root);
    coerce_boolean_fields(&mut root);
    coerce_numeric_fields(&mut root);
    normalize_date_fields(&mut root);
    coerce_scalar_enums(&mut root);
    coerce_list_enums(&mut root);
    sanitize_ioc_bundle(&mut root);
    seal_required_fields(&mut root);

    Value::Object(root)
}

/**
 * Normaliza y valida; ante un rechazo re-ejecuta la normalización una
 * única vez antes de fallar (§ política de doble intento).
 */
pub fn normalize_and_validate(raw_response: &Value) -> Result<(CtiRecord, Value), ValidationFault> {
    let normalized = normalize_response(raw_response);
    match validate_record(&normalized) {
        Ok(record) => Ok((record, normalized)),
        Err(first_fault) => {
            debug!("🔁 [NORMALIZE]: Validation rejected ({}). Re-running pass...", first_fault);
            let renormalized = normalize_response(&normalized);
            let record = validate_record(&renormalized)?;
            Ok((record, renormalized))
        }
    }
}

/// Ata el árbol canónico al registro estricto y verifica restricciones.
pub fn validate_record(normalized: &Value) -> Result<CtiRecord, ValidationFault> {
    let record: CtiRecord = serde_json::from_value(normalized.clone())
        .map_err(|fault| ValidationFault::BindError(fault.to_string()))?;

    let mut violations: Vec<String> = Vec::new();

    if record.enriched_summary.trim().is_empty() {
        violations.push("enriched_summary empty".into());
    }

    if let Some(category) = &record.attack_category {
        if !enums::ATTACK_CATEGORIES.contains(&category.as_str()) {
            violations.push(format!("attack_category '{}' outside vocabulary", category));
        }
    }
    if let Some(vector) = &record.attack_vector {
        if !enums::ATTACK_VECTORS.contains(&vector.as_str()) {
            violations.push(format!("attack_vector '{}' outside vocabulary", vector));
        }
    }
    if let Some(family) = &record.ransomware_family {
        if !enums::RANSOMWARE_FAMILIES.contains(&family.as_str()) {
            violations.push(format!("ransomware_family '{}' outside vocabulary", family));
        }
    }
    if let Some(chain) = &record.attack_chain {
        for phase in chain {
            if !enums::KILL_CHAIN_PHASES.contains(&phase.as_str()) {
                violations.push(format!("attack_chain phase '{}' outside vocabulary", phase));
            }
        }
    }
    if let Some(techniques) = &record.mitre_attack_techniques {
        for technique in techniques {
            if let Some(technique_id) = &technique.technique_id {
                if !TECHNIQUE_ID_PATTERN.is_match(technique_id) {
                    violations.push(format!("technique_id '{}' malformed", technique_id));
                }
            }
        }
    }
    if let Some(vulnerabilities) = &record.vulnerabilities_exploited {
        for vulnerability in vulnerabilities {
            if let Some(cve_id) = &vulnerability.cve_id {
                if !CVE_PATTERN.is_match(cve_id) {
                    violations.push(format!("cve_id '{}' malformed", cve_id));
                }
            }
            if let Some(score) = vulnerability.cvss_score {
                if !(0.0..=10.0).contains(&score) {
                    violations.push(format!("cvss_score {} out of range", score));
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(record)
    } else {
        Err(ValidationFault::ConstraintError(violations.join("; ")))
    }
}

// =================================================================
// PASOS INDIVIDUALES DE LA PASADA
// =================================================================

fn unwrap_known_wrappers(root: &mut Map<String, Value>) {
    for wrapper_key in WRAPPER_KEYS {
        let wrapped = match root.get(*wrapper_key) {
            Some(Value::Object(inner)) => inner.clone(),
            _ => continue,
        };
        root.remove(*wrapper_key);
        for (key, value) in wrapped {
            // Los campos del contenedor ganan sobre los de nivel superior.
            root.insert(key, value);
        }
        debug!("📦 [NORMALIZE]: Unwrapped '{}' envelope", wrapper_key);
        break;
    }
}

fn rename_top_level_aliases(root: &mut Map<String, Value>) {
    if !root.contains_key("mitre_attack_techniques") {
        if let Some(value) = root.remove("mitre_attack") {
            root.insert("mitre_attack_techniques".into(), value);
        }
    }

    if !root.contains_key("education_relevance") {
        if let Some(Value::Object(review)) = root.get("incident_review") {
            if review.contains_key("is_education_related") || review.contains_key("reasoning") {
                let value = root.remove("incident_review").unwrap_or(Value::Null);
                root.insert("education_relevance".into(), value);
            }
        }
    }

    if !root.contains_key("initial_access_description") {
        for alias in ["initial_access", "access_method", "how_attacker_gained_access", "attack_entry_point"] {
            if let Some(value) = root.remove(alias) {
                if value.is_string() {
                    root.insert("initial_access_description".into(), value);
                    break;
                }
            }
        }
    }

    if !root.contains_key("enriched_summary") {
        if let Some(value) = root.remove("summary") {
            root.insert("enriched_summary".into(), value);
        }
    }
}

fn synthesize_education_relevance(root: &mut Map<String, Value>) {
    let mut relevance = match root.remove("education_relevance") {
        Some(Value::Object(map)) => map,
        Some(_) | None => Map::new(),
    };

    // Alias interno: institution_name → institution_identified.
    if !relevance.contains_key("institution_identified") {
        if let Some(value) = relevance.remove("institution_name") {
            relevance.insert("institution_identified".into(), value);
        }
    }
    relevance.remove("confidence");
    relevance.remove("confidence_score");

    // Coerción desde los campos planos de nivel superior.
    if !relevance.contains_key("is_education_related") {
        let flat_verdict = root
            .get("is_edu_cyber_incident")
            .and_then(Value::as_bool)
            .or_else(|| root.get("is_education_related").and_then(Value::as_bool));
        relevance.insert(
            "is_education_related".into(),
            Value::Bool(flat_verdict.unwrap_or(false)),
        );
    }
    if !relevance.contains_key("reasoning") || relevance.get("reasoning") == Some(&Value::Null) {
        let reasoning = root
            .get("education_relevance_reasoning")
            .and_then(Value::as_str)
            .or_else(|| root.get("education_reasoning").and_then(Value::as_str))
            .unwrap_or("Education relevance reasoning not provided by the model");
        relevance.insert("reasoning".into(), Value::String(reasoning.to_string()));
    }
    if !relevance.contains_key("institution_identified") {
        let institution = root.get("institution_name").cloned().unwrap_or(Value::Null);
        relevance.insert("institution_identified".into(), institution);
    }

    root.remove("is_education_related");
    root.remove("education_reasoning");

    // Espejo coherente del veredicto plano obligatorio.
    let verdict = relevance
        .get("is_education_related")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    root.entry("is_edu_cyber_incident".to_string())
        .or_insert(Value::Bool(verdict));

    root.insert("education_relevance".into(), Value::Object(relevance));
}

fn drop_deprecated_fields(root: &mut Map<String, Value>) {
    for field in DEPRECATED_FIELDS {
        root.remove(*field);
    }
}

fn normalize_timeline(root: &mut Map<String, Value>) {
    let events = match root.get("timeline") {
        Some(Value::Array(events)) => events.clone(),
        Some(Value::Null) | None => return,
        Some(_) => {
            root.insert("timeline".into(), Value::Null);
            return;
        }
    };

    let mut normalized_events: Vec<Value> = Vec::new();
    for event in events {
        let mut event_map = match event {
            Value::Object(map) => map,
            // Un string suelto no porta estructura temporal; se descarta.
            _ => continue,
        };

        if !event_map.contains_key("event_description") {
            for alias in ["description", "details", "summary", "note"] {
                if let Some(value) = event_map.remove(alias) {
                    event_map.insert("event_description".into(), value);
                    break;
                }
            }
        }
        if !event_map.contains_key("event_type") {
            if let Some(value) = event_map.remove("event") {
                event_map.insert("event_type".into(), value);
            }
        }

        if let Some(event_type) = event_map.get("event_type").and_then(Value::as_str) {
            let coerced = coerce_to_closed_set(
                event_type,
                enums::TIMELINE_EVENT_TYPES,
                enums::TIMELINE_EVENT_TYPE_ALIASES,
                UnknownPolicy::MapToOther,
            );
            event_map.insert(
                "event_type".into(),
                coerced.map(Value::String).unwrap_or(Value::Null),
            );
        }

        if let Some(precision) = event_map.get("date_precision").and_then(Value::as_str) {
            let lowered = precision.to_lowercase();
            let canonical = if enums::TIMELINE_DATE_PRECISIONS.contains(&lowered.as_str()) {
                lowered
            } else if lowered.contains("day") || lowered.contains("exact") {
                "day".into()
            } else if lowered.contains("month") {
                "month".into()
            } else if lowered.contains("year") {
                "year".into()
            } else {
                "approximate".into()
            };
            event_map.insert("date_precision".into(), Value::String(canonical));
        }

        if let Some(date) = event_map.get("date").and_then(Value::as_str) {
            let normalized_date = educti_core_normalize::dates::normalize_date_to_iso(date);
            event_map.insert(
                "date".into(),
                normalized_date.map(Value::String).unwrap_or(Value::Null),
            );
        }

        if let Some(Value::Array(indicators)) = event_map.get("indicators") {
            if indicators.is_empty() {
                event_map.insert("indicators".into(), Value::Null);
            }
        }

        normalized_events.push(Value::Object(event_map));
    }

    root.insert(
        "timeline".into(),
        if normalized_events.is_empty() {
            Value::Null
        } else {
            Value::Array(normalized_events)
        },
    );
}

fn normalize_mitre_techniques(root: &mut Map<String, Value>) {
    let raw_techniques = match root.get("mitre_attack_techniques") {
        Some(Value::Array(techniques)) => techniques.clone(),
        Some(Value::Object(container)) => match container.get("techniques") {
            Some(Value::Array(techniques)) => techniques.clone(),
            _ => {
                root.insert("mitre_attack_techniques".into(), Value::Null);
                return;
            }
        },
        Some(Value::Null) | None => return,
        Some(_) => {
            root.insert("mitre_attack_techniques".into(), Value::Null);
            return;
        }
    };

    let mut normalized_techniques: Vec<Value> = Vec::new();
    for technique in raw_techniques {
        let technique_map = match technique {
            Value::String(raw) => match parse_technique_string(&raw) {
                Some(parsed) => parsed,
                None => continue,
            },
            Value::Object(map) => normalize_technique_object(map),
            _ => continue,
        };

        // Identificadores malformados no sobreviven a la pasada.
        let keeps_valid_id = technique_map
            .get("technique_id")
            .and_then(Value::as_str)
            .map(|id| TECHNIQUE_ID_PATTERN.is_match(id))
            .unwrap_or(false);
        if keeps_valid_id {
            normalized_techniques.push(Value::Object(technique_map));
        }
    }

    root.insert(
        "mitre_attack_techniques".into(),
        if normalized_techniques.is_empty() {
            Value::Null
        } else {
            Value::Array(normalized_techniques)
        },
    );
}

/// `"T1078: Valid Accounts"` → objeto estructurado.
fn parse_technique_string(raw: &str) -> Option<Map<String, Value>> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('T') {
        return None;
    }

    let (technique_id, technique_name) = match trimmed.split_once(':') {
        Some((id, name)) => (id.trim().to_string(), {
            let name = name.trim();
            if name.is_empty() {
                Value::Null
            } else {
                Value::String(name.to_string())
            }
        }),
        None => (trimmed.to_string(), Value::Null),
    };

    let mut technique = Map::new();
    technique.insert("technique_id".into(), Value::String(technique_id));
    technique.insert("technique_name".into(), technique_name);
    technique.insert("tactic".into(), Value::Null);
    technique.insert("description".into(), Value::Null);
    technique.insert("sub_techniques".into(), Value::Null);
    Some(technique)
}

fn normalize_technique_object(mut technique: Map<String, Value>) -> Map<String, Value> {
    if !technique.contains_key("technique_id") {
        for alias in ["id", "technique", "mitre_id", "attack_id"] {
            if let Some(value) = technique.remove(alias) {
                if value.is_string() {
                    technique.insert("technique_id".into(), value);
                    break;
                }
            }
        }
    }
    if !technique.contains_key("technique_name") {
        for alias in ["name", "title", "attack_name"] {
            if let Some(value) = technique.remove(alias) {
                if value.is_string() {
                    technique.insert("technique_name".into(), value);
                    break;
                }
            }
        }
    }
    if !technique.contains_key("description") {
        for alias in ["how_used", "usage", "details", "explanation"] {
            if let Some(value) = technique.remove(alias) {
                if value.is_string() {
                    technique.insert("description".into(), value);
                    break;
                }
            }
        }
    }

    // Táctica: alias de campo, luego identificador TA####, luego coerción.
    if !technique.contains_key("tactic") {
        for alias in ["tactic_name", "phase", "kill_chain_phase", "mitre_tactic"] {
            if let Some(value) = technique.remove(alias) {
                if value.is_string() {
                    technique.insert("tactic".into(), value);
                    break;
                }
            }
        }
    }
    if !technique.contains_key("tactic") {
        if let Some(tactic_id) = technique.get("tactic_id").and_then(Value::as_str) {
            let mapped = enums::TACTIC_ID_TO_NAME
                .iter()
                .find(|(id, _)| id.eq_ignore_ascii_case(tactic_id))
                .map(|(_, name)| Value::String((*name).to_string()))
                .unwrap_or(Value::Null);
            technique.insert("tactic".into(), mapped);
        }
    }
    technique.remove("tactic_id");

    if let Some(tactic) = technique.get("tactic").and_then(Value::as_str) {
        let coerced = coerce_to_closed_set(
            tactic,
            enums::KILL_CHAIN_PHASES,
            enums::KILL_CHAIN_ALIASES,
            UnknownPolicy::Drop,
        );
        technique.insert(
            "tactic".into(),
            coerced.map(Value::String).unwrap_or(Value::Null),
        );
    }

    for deprecated in ["confidence", "confidence_level", "certainty"] {
        technique.remove(deprecated);
    }

    if let Some(Value::Array(subs)) = technique.get("sub_techniques") {
        if subs.is_empty() {
            technique.insert("sub_techniques".into(), Value::Null);
        }
    }

    technique
}

fn normalize_vulnerabilities(root: &mut Map<String, Value>) {
    let vulnerabilities = match root.get("vulnerabilities_exploited") {
        Some(Value::Array(list)) => list.clone(),
        _ => return,
    };

    let mut normalized: Vec<Value> = Vec::new();
    for vulnerability in vulnerabilities {
        let mut vulnerability_map = match vulnerability {
            Value::Object(map) => map,
            Value::String(raw) if CVE_PATTERN.is_match(raw.trim()) => {
                let mut map = Map::new();
                map.insert("cve_id".into(), Value::String(raw.trim().to_string()));
                map
            }
            _ => continue,
        };

        if let Some(cve) = vulnerability_map.get("cve_id").and_then(Value::as_str) {
            let upper = cve.trim().to_uppercase();
            if CVE_PATTERN.is_match(&upper) {
                vulnerability_map.insert("cve_id".into(), Value::String(upper));
            } else {
                vulnerability_map.insert("cve_id".into(), Value::Null);
            }
        }
        if let Some(score) = vulnerability_map.get("cvss_score").and_then(Value::as_f64) {
            vulnerability_map.insert(
                "cvss_score".into(),
                serde_json::json!(score.clamp(0.0, 10.0)),
            );
        }
        if let Some(kind) = vulnerability_map.get("vulnerability_type").and_then(Value::as_str) {
            let coerced = coerce_to_closed_set(
                kind,
                enums::VULNERABILITY_TYPES,
                &[],
                UnknownPolicy::MapToOther,
            );
            vulnerability_map.insert(
                "vulnerability_type".into(),
                coerced.map(Value::String).unwrap_or(Value::Null),
            );
        }

        normalized.push(Value::Object(vulnerability_map));
    }

    root.insert(
        "vulnerabilities_exploited".into(),
        if normalized.is_empty() {
            Value::Null
        } else {
            Value::Array(normalized)
        },
    );
}

fn collapse_scalar_slots(root: &mut Map<String, Value>) {
    for field in SCALAR_SLOTS {
        if let Some(Value::Array(values)) = root.get(*field) {
            let first = values.iter().find(|value| !value.is_null()).cloned();
            root.insert((*field).to_string(), first.unwrap_or(Value::Null));
        }
    }
}

fn scrub_unknown_free_strings(root: &mut Map<String, Value>) {
    for field in FREE_STRING_FIELDS {
        if let Some(Value::String(raw)) = root.get(*field) {
            let lowered = raw.trim().to_lowercase();
            if lowered.is_empty()
                || lowered == "unknown"
                || lowered == "n/a"
                || lowered == "not available"
                || lowered == "none"
            {
                root.insert((*field).to_string(), Value::Null);
            }
        }
    }
}

fn coerce_boolean_fields(root: &mut Map<String, Value>) {
    for field in BOOLEAN_FIELDS {
        let coerced = match root.get(*field) {
            Some(Value::String(raw)) => Some(string_to_tristate_bool(raw)),
            Some(Value::Number(number)) => {
                Some(number.as_f64().map(|v| Value::Bool(v != 0.0)).unwrap_or(Value::Null))
            }
            Some(Value::Object(inner)) => {
                // Objetos tipo {confirmed: true}: extraer el veredicto.
                let confirmed = inner
                    .get("confirmed")
                    .or_else(|| inner.get("occurred"))
                    .and_then(Value::as_bool);
                Some(confirmed.map(Value::Bool).unwrap_or(Value::Null))
            }
            _ => None,
        };
        if let Some(value) = coerced {
            root.insert((*field).to_string(), value);
        }
    }
}

/// "yes"/"no"/"unknown" → true/false/null (jamás false por ignorancia).
fn string_to_tristate_bool(raw: &str) -> Value {
    match raw.trim().to_lowercase().as_str() {
        "yes" | "true" | "confirmed" | "occurred" | "1" => Value::Bool(true),
        "no" | "false" | "not" | "none" | "0" => Value::Bool(false),
        _ => Value::Null,
    }
}

fn coerce_numeric_fields(root: &mut Map<String, Value>) {
    for field in MONETARY_FIELDS {
        if let Some(Value::String(raw)) = root.get(*field) {
            let parsed = parse_monetary_usd(raw);
            root.insert(
                (*field).to_string(),
                parsed.map(|v| serde_json::json!(v)).unwrap_or(Value::Null),
            );
        }
    }
    for field in NUMERIC_FIELDS {
        if let Some(Value::String(raw)) = root.get(*field) {
            let parsed = raw.trim().replace(',', "").parse::<f64>().ok();
            root.insert(
                (*field).to_string(),
                parsed.map(|v| serde_json::json!(v)).unwrap_or(Value::Null),
            );
        }
    }
    for field in INTEGER_FIELDS {
        match root.get(*field) {
            Some(Value::String(raw)) => {
                let parsed = raw.trim().replace(',', "").parse::<i64>().ok();
                root.insert(
                    (*field).to_string(),
                    parsed.map(|v| serde_json::json!(v)).unwrap_or(Value::Null),
                );
            }
            Some(Value::Number(number)) if number.is_f64() => {
                let truncated = number.as_f64().map(|v| v as i64);
                root.insert(
                    (*field).to_string(),
                    truncated.map(|v| serde_json::json!(v)).unwrap_or(Value::Null),
                );
            }
            _ => {}
        }
    }
}

/// "$4.75 million" → 4750000.0; "5.2M" → 5200000.0; "120k" → 120000.0.
pub fn parse_monetary_usd(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().to_lowercase().replace(['$', ','], "");
    if cleaned.is_empty() {
        return None;
    }

    let multiplier = if cleaned.contains("billion") || cleaned.trim_end().ends_with('b') {
        1_000_000_000.0
    } else if cleaned.contains("million") || cleaned.trim_end().ends_with('m') {
        1_000_000.0
    } else if cleaned.contains("thousand") || cleaned.trim_end().ends_with('k') {
        1_000.0
    } else {
        1.0
    };

    let numeric_portion: String = cleaned
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    numeric_portion.parse::<f64>().ok().map(|base| base * multiplier)
}

fn normalize_date_fields(root: &mut Map<String, Value>) {
    for field in DATE_FIELDS {
        if let Some(Value::String(raw)) = root.get(*field) {
            let normalized = educti_core_normalize::dates::normalize_date_to_iso(raw);
            root.insert(
                (*field).to_string(),
                normalized.map(Value::String).unwrap_or(Value::Null),
            );
        }
    }
}

fn coerce_scalar_enums(root: &mut Map<String, Value>) {
    let coercions: &[(&str, &[&str], &[(&str, &str)], UnknownPolicy)] = &[
        ("attack_category", enums::ATTACK_CATEGORIES, enums::ATTACK_CATEGORY_ALIASES, UnknownPolicy::MapToOther),
        ("attack_vector", enums::ATTACK_VECTORS, enums::ATTACK_VECTOR_ALIASES, UnknownPolicy::MapToOther),
        ("ransomware_family", enums::RANSOMWARE_FAMILIES, enums::RANSOMWARE_ALIASES, UnknownPolicy::MapToOther),
        ("institution_type", enums::INSTITUTION_TYPES, &[], UnknownPolicy::Drop),
        ("institution_size", enums::INSTITUTION_SIZES, &[], UnknownPolicy::Drop),
        ("incident_severity", enums::INCIDENT_SEVERITIES, &[], UnknownPolicy::Drop),
        ("incident_status", enums::INCIDENT_STATUSES, &[], UnknownPolicy::Drop),
        ("incident_date_precision", enums::INCIDENT_DATE_PRECISIONS, &[], UnknownPolicy::Drop),
        ("threat_actor_category", enums::THREAT_ACTOR_CATEGORIES, &[], UnknownPolicy::MapToOther),
        ("threat_actor_motivation", enums::THREAT_ACTOR_MOTIVATIONS, &[], UnknownPolicy::Drop),
        ("ransom_cryptocurrency", enums::RANSOM_CRYPTOCURRENCIES, enums::RANSOM_CRYPTOCURRENCY_ALIASES, UnknownPolicy::MapToOther),
        ("business_impact_severity", enums::BUSINESS_IMPACT_SEVERITIES, enums::BUSINESS_IMPACT_ALIASES, UnknownPolicy::Drop),
        ("encryption_extent", enums::ENCRYPTION_EXTENTS, enums::ENCRYPTION_EXTENT_ALIASES, UnknownPolicy::Drop),
        ("recovery_method", enums::RECOVERY_METHODS, enums::RECOVERY_METHOD_ALIASES, UnknownPolicy::Drop),
        ("disclosure_source", enums::DISCLOSURE_SOURCES, &[], UnknownPolicy::MapToOther),
        ("transparency_level", enums::TRANSPARENCY_LEVELS, &[], UnknownPolicy::Drop),
        ("sector_targeting_pattern", enums::SECTOR_TARGETING_PATTERNS, &[], UnknownPolicy::Drop),
    ];

    for (field, allowed, aliases, policy) in coercions {
        if let Some(Value::String(raw)) = root.get(*field) {
            let coerced = coerce_to_closed_set(raw, allowed, aliases, *policy);
            root.insert(
                (*field).to_string(),
                coerced.map(Value::String).unwrap_or(Value::Null),
            );
        }
    }
}

fn coerce_list_enums(root: &mut Map<String, Value>) {
    let coercions: &[(&str, &[&str], &[(&str, &str)], UnknownPolicy)] = &[
        ("attack_chain", enums::KILL_CHAIN_PHASES, enums::KILL_CHAIN_ALIASES, UnknownPolicy::Drop),
        ("systems_affected", enums::SYSTEMS_AFFECTED, enums::SYSTEMS_AFFECTED_ALIASES, UnknownPolicy::MapToOther),
        ("operational_impacts", enums::OPERATIONAL_IMPACTS, enums::OPERATIONAL_IMPACT_ALIASES, UnknownPolicy::MapToOther),
        ("data_categories", enums::DATA_CATEGORIES, enums::DATA_CATEGORY_ALIASES, UnknownPolicy::MapToOther),
        ("applicable_regulations", enums::APPLICABLE_REGULATIONS, enums::REGULATION_ALIASES, UnknownPolicy::MapToOther),
        ("security_improvements", enums::SECURITY_IMPROVEMENTS, enums::SECURITY_IMPROVEMENT_ALIASES, UnknownPolicy::MapToOther),
        ("recovery_phases", enums::RECOVERY_PHASES, enums::RECOVERY_PHASE_ALIASES, UnknownPolicy::Drop),
    ];

    for (field, allowed, aliases, policy) in coercions {
        let raw_list = match root.get(*field) {
            Some(Value::Array(values)) => values.clone(),
            Some(Value::String(single)) => vec![Value::String(single.clone())],
            _ => continue,
        };

        let mut coerced_list: Vec<Value> = Vec::new();
        for value in raw_list {
            if let Value::String(raw) = value {
                if let Some(canonical) = coerce_to_closed_set(&raw, allowed, aliases, *policy) {
                    let entry = Value::String(canonical);
                    if !coerced_list.contains(&entry) {
                        coerced_list.push(entry);
                    }
                }
            }
        }

        root.insert(
            (*field).to_string(),
            if coerced_list.is_empty() {
                Value::Null
            } else {
                Value::Array(coerced_list)
            },
        );
    }
}

fn sanitize_ioc_bundle(root: &mut Map<String, Value>) {
    match root.get("iocs") {
        Some(Value::Object(_)) | Some(Value::Null) | None => {}
        Some(_) => {
            root.insert("iocs".into(), Value::Null);
        }
    }
}

fn seal_required_fields(root: &mut Map<String, Value>) {
    let verdict = match root.get("is_edu_cyber_incident") {
        Some(Value::Bool(value)) => *value,
        Some(Value::String(raw)) => string_to_tristate_bool(raw).as_bool().unwrap_or(false),
        _ => false,
    };
    root.insert("is_edu_cyber_incident".into(), Value::Bool(verdict));

    let summary_missing = match root.get("enriched_summary") {
        Some(Value::String(summary)) => summary.trim().is_empty(),
        _ => true,
    };
    if summary_missing {
        root.insert(
            "enriched_summary".into(),
            Value::String("Summary not provided by the model".into()),
        );
    }
}
