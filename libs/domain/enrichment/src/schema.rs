// [libs/domain/enrichment/src/schema.rs]
/*!
 * =================================================================
 * APARATO: EXTRACTION SCHEMA FORGE (V4.2)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: ESQUEMA JSON RESTRICTIVO PARA LA EXTRACCIÓN CTI
 *
 * # Mathematical Proof (Single Vocabulary Source):
 * El esquema se forja desde las mismas tablas constantes que usa la
 * normalización; vocabulario del prompt y vocabulario de la coerción
 * no pueden divergir.
 * =================================================================
 */

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::enums;

fn enum_array(values: &[&str]) -> Value {
    Value::Array(values.iter().map(|value| json!(value)).collect())
}

/// Esquema JSON (draft-07) enviado al modelo como contrato de salida.
pub static EXTRACTION_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Cyber Threat Intelligence - Educational Sector Incident",
        "description": "Comprehensive schema for extracting threat intelligence from education sector cyber incidents",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "is_edu_cyber_incident": {
                "type": "boolean",
                "description": "Whether this incident is related to the education sector"
            },
            "education_relevance_reasoning": {
                "type": "string",
                "description": "Brief explanation (1-2 sentences) of why this is or isn't education-related"
            },
            "institution_name": {
                "type": "string",
                "description": "Full official name of the affected educational institution"
            },
            "institution_aliases": {"type": "array", "items": {"type": "string"}},
            "institution_type": {"type": "string", "enum": enum_array(enums::INSTITUTION_TYPES)},
            "institution_size": {"type": "string", "enum": enum_array(enums::INSTITUTION_SIZES)},
            "country": {"type": "string"},
            "country_code": {"type": "string", "pattern": "^[A-Z]{2}$"},
            "region": {"type": "string"},
            "city": {"type": "string"},

            "incident_severity": {"type": "string", "enum": enum_array(enums::INCIDENT_SEVERITIES)},
            "incident_status": {"type": "string", "enum": enum_array(enums::INCIDENT_STATUSES)},

            "incident_date": {"type": "string", "pattern": "^\\d{4}-\\d{2}-\\d{2}$"},
            "incident_date_precision": {"type": "string", "enum": enum_array(enums::INCIDENT_DATE_PRECISIONS)},
            "discovery_date": {"type": "string", "pattern": "^\\d{4}-\\d{2}-\\d{2}$"},
            "publication_date": {"type": "string", "pattern": "^\\d{4}-\\d{2}-\\d{2}$"},
            "dwell_time_days": {"type": "number", "description": "Days between initial compromise and discovery"},
            "timeline": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "date": {"type": "string", "pattern": "^\\d{4}-\\d{2}-\\d{2}$"},
                        "date_precision": {"type": "string", "enum": enum_array(enums::TIMELINE_DATE_PRECISIONS)},
                        "event_description": {"type": "string"},
                        "event_type": {"type": "string", "enum": enum_array(enums::TIMELINE_EVENT_TYPES)},
                        "actor_attribution": {"type": "string"},
                        "indicators": {"type": "array", "items": {"type": "string"}}
                    }
                }
            },

            "attack_category": {"type": "string", "enum": enum_array(enums::ATTACK_CATEGORIES)},
            "secondary_attack_categories": {"type": "array", "items": {"type": "string"}},
            "attack_vector": {"type": "string", "enum": enum_array(enums::ATTACK_VECTORS)},
            "initial_access_description": {"type": "string"},
            "attack_chain": {
                "type": "array",
                "items": {"type": "string", "enum": enum_array(enums::KILL_CHAIN_PHASES)}
            },

            "vulnerabilities_exploited": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "cve_id": {"type": "string", "pattern": "^CVE-\\d{4}-\\d+$"},
                        "vulnerability_name": {"type": "string"},
                        "vulnerability_type": {"type": "string", "enum": enum_array(enums::VULNERABILITY_TYPES)},
                        "affected_product": {"type": "string"},
                        "cvss_score": {"type": "number", "minimum": 0, "maximum": 10}
                    }
                }
            },

            "mitre_attack_techniques": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "technique_id": {"type": "string", "pattern": "^T\\d{4}(\\.\\d{3})?$"},
                        "technique_name": {"type": "string"},
                        "tactic": {"type": "string", "enum": enum_array(enums::KILL_CHAIN_PHASES)},
                        "description": {"type": "string"},
                        "sub_techniques": {"type": "array", "items": {"type": "string"}}
                    }
                }
            },

            "threat_actor_claimed": {"type": "boolean"},
            "threat_actor_name": {"type": "string"},
            "threat_actor_aliases": {"type": "array", "items": {"type": "string"}},
            "threat_actor_category": {"type": "string", "enum": enum_array(enums::THREAT_ACTOR_CATEGORIES)},
            "threat_actor_motivation": {"type": "string", "enum": enum_array(enums::THREAT_ACTOR_MOTIVATIONS)},
            "threat_actor_origin_country": {"type": "string"},
            "threat_actor_claim_url": {"type": "string"},

            "ransomware_family": {"type": "string", "enum": enum_array(enums::RANSOMWARE_FAMILIES)},
            "malware_families": {"type": "array", "items": {"type": "string"}},
            "attacker_communication_channel": {"type": "string"},
            "was_ransom_demanded": {"type": "boolean"},
            "ransom_amount": {"type": "number", "description": "Standardized to USD"},
            "ransom_amount_min": {"type": "number"},
            "ransom_amount_max": {"type": "number"},
            "ransom_amount_exact": {"type": "number"},
            "ransom_currency": {"type": "string"},
            "ransom_cryptocurrency": {"type": "string", "enum": enum_array(enums::RANSOM_CRYPTOCURRENCIES)},
            "ransom_paid": {"type": "boolean"},
            "ransom_paid_amount": {"type": "number"},
            "ransom_negotiated": {"type": "boolean"},
            "ransom_deadline_given": {"type": "boolean"},
            "ransom_deadline_days": {"type": "number"},
            "decryptor_received": {"type": "boolean"},
            "decryptor_worked": {"type": "boolean"},

            "iocs": {
                "type": "object",
                "properties": {
                    "ip_addresses": {"type": "array", "items": {"type": "string"}},
                    "domains": {"type": "array", "items": {"type": "string"}},
                    "urls": {"type": "array", "items": {"type": "string"}},
                    "file_hashes": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "hash_type": {"type": "string", "enum": ["md5", "sha1", "sha256", "sha512"]},
                                "hash_value": {"type": "string"}
                            }
                        }
                    },
                    "email_addresses": {"type": "array", "items": {"type": "string"}},
                    "cryptocurrency_wallets": {"type": "array", "items": {"type": "string"}},
                    "file_names": {"type": "array", "items": {"type": "string"}},
                    "registry_keys": {"type": "array", "items": {"type": "string"}}
                }
            },

            "data_breached": {"type": "boolean"},
            "data_exfiltrated": {"type": "boolean"},
            "data_encrypted": {"type": "boolean"},
            "data_destroyed": {"type": "boolean"},
            "data_published": {"type": "boolean"},
            "data_sold": {"type": "boolean"},
            "data_categories": {
                "type": "array",
                "items": {"type": "string", "enum": enum_array(enums::DATA_CATEGORIES)}
            },
            "records_affected_min": {"type": "integer"},
            "records_affected_max": {"type": "integer"},
            "records_affected_exact": {"type": "integer"},
            "data_volume_gb": {"type": "number"},

            "infrastructure_type": {"type": "string", "enum": ["on_premises", "cloud_only", "hybrid", "multi_cloud", "unknown"]},
            "cloud_provider": {"type": "string", "enum": ["aws", "azure", "gcp", "oracle", "other", "none", "unknown"]},
            "systems_affected": {
                "type": "array",
                "items": {"type": "string", "enum": enum_array(enums::SYSTEMS_AFFECTED)}
            },
            "critical_systems_affected": {"type": "boolean"},
            "network_compromised": {"type": "boolean"},
            "domain_admin_compromised": {"type": "boolean"},
            "backup_compromised": {"type": "boolean"},
            "encryption_extent": {"type": "string", "enum": enum_array(enums::ENCRYPTION_EXTENTS)},
            "systems_encrypted_count": {"type": "integer"},
            "servers_affected_count": {"type": "integer"},
            "endpoints_affected_count": {"type": "integer"},

            "outage_start_date": {"type": "string", "pattern": "^\\d{4}-\\d{2}-\\d{2}$"},
            "outage_end_date": {"type": "string", "pattern": "^\\d{4}-\\d{2}-\\d{2}$"},
            "outage_duration_hours": {"type": "number"},
            "downtime_days": {"type": "number"},
            "partial_service_days": {"type": "number"},
            "operational_impacts": {
                "type": "array",
                "items": {"type": "string", "enum": enum_array(enums::OPERATIONAL_IMPACTS)}
            },

            "students_affected": {"type": "integer"},
            "staff_affected": {"type": "integer"},
            "faculty_affected": {"type": "integer"},
            "alumni_affected": {"type": "integer"},
            "applicants_affected": {"type": "integer"},
            "patients_affected": {"type": "integer"},
            "donors_affected": {"type": "integer"},
            "total_individuals_affected": {"type": "integer"},

            "estimated_total_cost_usd": {"type": "number"},
            "ransom_cost_usd": {"type": "number"},
            "recovery_cost_usd": {"type": "number"},
            "legal_cost_usd": {"type": "number"},
            "notification_cost_usd": {"type": "number"},
            "credit_monitoring_cost_usd": {"type": "number"},
            "lost_revenue_usd": {"type": "number"},
            "insurance_claim": {"type": "boolean"},
            "insurance_payout_usd": {"type": "number"},
            "business_impact_severity": {"type": "string", "enum": enum_array(enums::BUSINESS_IMPACT_SEVERITIES)},

            "applicable_regulations": {
                "type": "array",
                "items": {"type": "string", "enum": enum_array(enums::APPLICABLE_REGULATIONS)}
            },
            "breach_notification_required": {"type": "boolean"},
            "notification_sent": {"type": "boolean"},
            "notification_sent_date": {"type": "string", "pattern": "^\\d{4}-\\d{2}-\\d{2}$"},
            "regulators_notified": {"type": "array", "items": {"type": "string"}},
            "investigation_opened": {"type": "boolean"},
            "investigating_agencies": {"type": "array", "items": {"type": "string"}},
            "fine_imposed": {"type": "boolean"},
            "fine_amount_usd": {"type": "number"},
            "lawsuits_filed": {"type": "boolean"},
            "lawsuit_count": {"type": "integer"},
            "class_action_filed": {"type": "boolean"},
            "settlement_amount_usd": {"type": "number"},

            "incident_response_activated": {"type": "boolean"},
            "ir_firm_engaged": {"type": "string"},
            "forensics_firm_engaged": {"type": "string"},
            "legal_counsel_engaged": {"type": "string"},
            "pr_firm_engaged": {"type": "string"},
            "law_enforcement_involved": {"type": "boolean"},
            "law_enforcement_agencies": {"type": "array", "items": {"type": "string"}},
            "fbi_involved": {"type": "boolean"},
            "cisa_involved": {"type": "boolean"},
            "recovery_method": {"type": "string", "enum": enum_array(enums::RECOVERY_METHODS)},
            "recovery_started_date": {"type": "string", "pattern": "^\\d{4}-\\d{2}-\\d{2}$"},
            "recovery_completed_date": {"type": "string", "pattern": "^\\d{4}-\\d{2}-\\d{2}$"},
            "recovery_duration_days": {"type": "number"},
            "mttd_hours": {"type": "number", "description": "Mean Time To Detect"},
            "mttr_hours": {"type": "number", "description": "Mean Time To Recover"},
            "security_improvements": {
                "type": "array",
                "items": {"type": "string", "enum": enum_array(enums::SECURITY_IMPROVEMENTS)}
            },

            "public_disclosure": {"type": "boolean"},
            "public_disclosure_date": {"type": "string", "pattern": "^\\d{4}-\\d{2}-\\d{2}$"},
            "disclosure_delay_days": {"type": "number"},
            "disclosure_source": {"type": "string", "enum": enum_array(enums::DISCLOSURE_SOURCES)},
            "transparency_level": {"type": "string", "enum": enum_array(enums::TRANSPARENCY_LEVELS)},
            "official_statement_url": {"type": "string"},
            "incident_report_url": {"type": "string"},
            "updates_provided_count": {"type": "integer"},

            "attack_campaign_name": {"type": "string", "description": "If part of a larger campaign (e.g., MOVEit exploitation wave)"},
            "related_incidents": {"type": "array", "items": {"type": "string"}},
            "common_vulnerability_exploited": {"type": "string"},
            "sector_targeting_pattern": {"type": "string", "enum": enum_array(enums::SECTOR_TARGETING_PATTERNS)},

            "source_url": {"type": "string"},
            "source_headline": {"type": "string"},
            "source_publisher": {"type": "string"},
            "source_language": {"type": "string"},
            "key_quotes": {"type": "array", "items": {"type": "string"}},

            "enriched_summary": {
                "type": "string",
                "description": "Comprehensive 2-3 paragraph summary of the incident for threat intelligence"
            },
            "extraction_notes": {
                "type": "string",
                "description": "Notes about data quality, missing information, or extraction challenges"
            }
        },
        "required": ["is_edu_cyber_incident", "enriched_summary"]
    })
});
