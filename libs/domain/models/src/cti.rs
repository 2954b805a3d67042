// [libs/domain/models/src/cti.rs]
/*!
 * =================================================================
 * APARATO: CTI STRICT RECORD (V4.2 - SCHEMA SEALED)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: MODELO TIPADO ESTRICTO DEL PAYLOAD DE EXTRACCIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NULL SEMANTICS: todo campo ausente en el artículo es `None`; jamás
 *    0, false o lista vacía por omisión.
 * 2. PERMISSIVE INGRESS: el árbol permisivo (`serde_json::Value`) solo
 *    cruza a este modelo tras la pasada de normalización.
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// Veredicto de pertenencia al sector educativo.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EducationRelevance {
    pub is_education_related: bool,
    pub reasoning: String,
    pub institution_identified: Option<String>,
}

/// Evento individual de la línea temporal del incidente.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TimelineEvent {
    pub date: Option<String>,
    pub date_precision: Option<String>,
    pub event_description: Option<String>,
    pub event_type: Option<String>,
    pub actor_attribution: Option<String>,
    pub indicators: Option<Vec<String>>,
}

/// Técnica MITRE ATT&CK observada.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MitreTechnique {
    pub technique_id: Option<String>,
    pub technique_name: Option<String>,
    pub tactic: Option<String>,
    pub description: Option<String>,
    pub sub_techniques: Option<Vec<String>>,
}

/// Vulnerabilidad explotada referenciada por CVE.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VulnerabilityRef {
    pub cve_id: Option<String>,
    pub vulnerability_name: Option<String>,
    pub vulnerability_type: Option<String>,
    pub affected_product: Option<String>,
    pub cvss_score: Option<f64>,
}

/// Hash de archivo con su algoritmo.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FileHashRef {
    pub hash_type: Option<String>,
    pub hash_value: Option<String>,
}

/// Paquete de indicadores de compromiso.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IocBundle {
    pub ip_addresses: Option<Vec<String>>,
    pub domains: Option<Vec<String>>,
    pub urls: Option<Vec<String>>,
    pub file_hashes: Option<Vec<FileHashRef>>,
    pub email_addresses: Option<Vec<String>>,
    pub cryptocurrency_wallets: Option<Vec<String>>,
    pub file_names: Option<Vec<String>>,
    pub registry_keys: Option<Vec<String>>,
}

/// Registro estricto de inteligencia extraída para un incidente.
///
/// La forma espejea el esquema de extracción: los grupos opcionales
/// permanecen `None` cuando el artículo no los soporta.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CtiRecord {
    // --- RELEVANCIA EDUCATIVA (OBLIGATORIA) ---
    pub is_edu_cyber_incident: bool,
    pub education_relevance_reasoning: Option<String>,
    /// Objeto nominal sintetizado por la pasada de normalización.
    pub education_relevance: Option<EducationRelevance>,

    // --- CLASIFICACIÓN INSTITUCIONAL ---
    pub institution_name: Option<String>,
    pub institution_aliases: Option<Vec<String>>,
    pub institution_type: Option<String>,
    pub institution_size: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub incident_severity: Option<String>,
    pub incident_status: Option<String>,

    // --- ESTRATO TEMPORAL ---
    pub incident_date: Option<String>,
    pub incident_date_precision: Option<String>,
    pub discovery_date: Option<String>,
    pub publication_date: Option<String>,
    pub dwell_time_days: Option<f64>,
    pub timeline: Option<Vec<TimelineEvent>>,

    // --- CLASIFICACIÓN DEL ATAQUE ---
    pub attack_category: Option<String>,
    pub secondary_attack_categories: Option<Vec<String>>,
    pub attack_vector: Option<String>,
    pub initial_access_description: Option<String>,
    pub attack_chain: Option<Vec<String>>,
    pub vulnerabilities_exploited: Option<Vec<VulnerabilityRef>>,
    pub mitre_attack_techniques: Option<Vec<MitreTechnique>>,

    // --- ACTOR DE AMENAZA ---
    pub threat_actor_claimed: Option<bool>,
    pub threat_actor_name: Option<String>,
    pub threat_actor_aliases: Option<Vec<String>>,
    pub threat_actor_category: Option<String>,
    pub threat_actor_motivation: Option<String>,
    pub threat_actor_origin_country: Option<String>,
    pub threat_actor_claim_url: Option<String>,

    // --- RANSOMWARE Y RESCATE ---
    pub ransomware_family: Option<String>,
    pub malware_families: Option<Vec<String>>,
    pub attacker_tools: Option<Vec<String>>,
    pub attacker_communication_channel: Option<String>,
    pub was_ransom_demanded: Option<bool>,
    pub ransom_amount: Option<f64>,
    pub ransom_amount_min: Option<f64>,
    pub ransom_amount_max: Option<f64>,
    pub ransom_amount_exact: Option<f64>,
    pub ransom_currency: Option<String>,
    pub ransom_cryptocurrency: Option<String>,
    pub ransom_paid: Option<bool>,
    pub ransom_paid_amount: Option<f64>,
    pub ransom_negotiated: Option<bool>,
    pub ransom_deadline_given: Option<bool>,
    pub ransom_deadline_days: Option<f64>,
    pub decryptor_received: Option<bool>,
    pub decryptor_worked: Option<bool>,

    // --- INDICADORES DE COMPROMISO ---
    pub iocs: Option<IocBundle>,

    // --- IMPACTO SOBRE DATOS ---
    pub data_breached: Option<bool>,
    pub data_exfiltrated: Option<bool>,
    pub data_encrypted: Option<bool>,
    pub data_destroyed: Option<bool>,
    pub data_published: Option<bool>,
    pub data_sold: Option<bool>,
    pub data_categories: Option<Vec<String>>,
    pub records_affected_min: Option<i64>,
    pub records_affected_max: Option<i64>,
    pub records_affected_exact: Option<i64>,
    pub data_volume_gb: Option<f64>,

    // --- IMPACTO SOBRE SISTEMAS ---
    pub infrastructure_type: Option<String>,
    pub cloud_provider: Option<String>,
    pub systems_affected: Option<Vec<String>>,
    pub critical_systems_affected: Option<bool>,
    pub network_compromised: Option<bool>,
    pub domain_admin_compromised: Option<bool>,
    pub backup_compromised: Option<bool>,
    pub encryption_extent: Option<String>,
    pub systems_encrypted_count: Option<i64>,
    pub servers_affected_count: Option<i64>,
    pub endpoints_affected_count: Option<i64>,

    // --- IMPACTO OPERACIONAL ---
    pub outage_start_date: Option<String>,
    pub outage_end_date: Option<String>,
    pub outage_duration_hours: Option<f64>,
    pub downtime_days: Option<f64>,
    pub partial_service_days: Option<f64>,
    pub operational_impacts: Option<Vec<String>>,

    // --- IMPACTO SOBRE USUARIOS ---
    pub students_affected: Option<i64>,
    pub staff_affected: Option<i64>,
    pub faculty_affected: Option<i64>,
    pub alumni_affected: Option<i64>,
    pub applicants_affected: Option<i64>,
    pub patients_affected: Option<i64>,
    pub donors_affected: Option<i64>,
    pub total_individuals_affected: Option<i64>,

    // --- IMPACTO FINANCIERO (USD) ---
    pub estimated_total_cost_usd: Option<f64>,
    pub ransom_cost_usd: Option<f64>,
    pub recovery_cost_usd: Option<f64>,
    pub legal_cost_usd: Option<f64>,
    pub notification_cost_usd: Option<f64>,
    pub credit_monitoring_cost_usd: Option<f64>,
    pub lost_revenue_usd: Option<f64>,
    pub insurance_claim: Option<bool>,
    pub insurance_payout_usd: Option<f64>,
    pub business_impact_severity: Option<String>,

    // --- IMPACTO REGULATORIO ---
    pub applicable_regulations: Option<Vec<String>>,
    pub breach_notification_required: Option<bool>,
    pub notification_sent: Option<bool>,
    pub notification_sent_date: Option<String>,
    pub regulators_notified: Option<Vec<String>>,
    pub investigation_opened: Option<bool>,
    pub investigating_agencies: Option<Vec<String>>,
    pub fine_imposed: Option<bool>,
    pub fine_amount_usd: Option<f64>,
    pub lawsuits_filed: Option<bool>,
    pub lawsuit_count: Option<i64>,
    pub class_action_filed: Option<bool>,
    pub settlement_amount_usd: Option<f64>,

    // --- RESPUESTA Y RECUPERACIÓN ---
    pub incident_response_activated: Option<bool>,
    pub ir_firm_engaged: Option<String>,
    pub forensics_firm_engaged: Option<String>,
    pub legal_counsel_engaged: Option<String>,
    pub pr_firm_engaged: Option<String>,
    pub law_enforcement_involved: Option<bool>,
    pub law_enforcement_agencies: Option<Vec<String>>,
    pub fbi_involved: Option<bool>,
    pub cisa_involved: Option<bool>,
    pub recovery_method: Option<String>,
    pub recovery_started_date: Option<String>,
    pub recovery_completed_date: Option<String>,
    pub recovery_duration_days: Option<f64>,
    pub mttd_hours: Option<f64>,
    pub mttr_hours: Option<f64>,
    pub security_improvements: Option<Vec<String>>,

    // --- TRANSPARENCIA ---
    pub public_disclosure: Option<bool>,
    pub public_disclosure_date: Option<String>,
    pub disclosure_delay_days: Option<f64>,
    pub disclosure_source: Option<String>,
    pub transparency_level: Option<String>,
    pub official_statement_url: Option<String>,
    pub incident_report_url: Option<String>,
    pub updates_provided_count: Option<i64>,

    // --- ANÁLISIS CRUZADO ---
    pub attack_campaign_name: Option<String>,
    pub related_incidents: Option<Vec<String>>,
    pub common_vulnerability_exploited: Option<String>,
    pub sector_targeting_pattern: Option<String>,

    // --- METADATOS DE FUENTE ---
    pub source_url: Option<String>,
    pub source_headline: Option<String>,
    pub source_publisher: Option<String>,
    pub source_language: Option<String>,
    pub key_quotes: Option<Vec<String>>,

    // --- RESUMEN (OBLIGATORIO) ---
    pub enriched_summary: String,
    pub extraction_notes: Option<String>,
}

impl CtiRecord {
    /// Veredicto educativo efectivo, tolerante a objetos parcialmente
    /// normalizados.
    pub fn is_education_related(&self) -> bool {
        self.education_relevance
            .as_ref()
            .map(|relevance| relevance.is_education_related)
            .unwrap_or(self.is_edu_cyber_incident)
    }

    /// Razonamiento del veredicto educativo, si el modelo lo entregó.
    pub fn education_reasoning(&self) -> Option<&str> {
        self.education_relevance
            .as_ref()
            .map(|relevance| relevance.reasoning.as_str())
            .filter(|reasoning| !reasoning.is_empty())
            .or(self.education_relevance_reasoning.as_deref())
    }
}
