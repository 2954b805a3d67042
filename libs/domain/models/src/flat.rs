// [libs/domain/models/src/flat.rs]
/*!
 * =================================================================
 * APARATO: FLAT ANALYTIC PROJECTION (V4.1)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: FILA ANCHA POR INCIDENTE PARA CONSULTAS ANALÍTICAS
 *
 * # Mathematical Proof (Projection Totality):
 * Cada incidente enriquecido produce exactamente una fila plana; el
 * mapeo desde el registro estricto es total y determinista.
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// Proyección plana de un enriquecimiento: una columna tipada por campo
/// analítico. Los `None` cristalizan como NULL en el almacén.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatEnrichment {
    pub incident_id: String,

    // --- EDUCACIÓN E INSTITUCIÓN ---
    pub is_education_related: Option<bool>,
    pub institution_name: Option<String>,
    pub institution_type: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,

    // --- DETALLE DEL ATAQUE ---
    pub attack_category: Option<String>,
    pub attack_vector: Option<String>,
    pub initial_access_description: Option<String>,
    pub ransomware_family: Option<String>,
    pub threat_actor_name: Option<String>,
    pub threat_actor_category: Option<String>,
    pub threat_actor_motivation: Option<String>,
    pub threat_actor_claim_url: Option<String>,

    // --- RESCATE ---
    pub was_ransom_demanded: Option<bool>,
    pub ransom_amount: Option<f64>,
    pub ransom_currency: Option<String>,
    pub ransom_cryptocurrency: Option<String>,
    pub ransom_paid: Option<bool>,
    pub ransom_paid_amount: Option<f64>,
    pub ransom_negotiated: Option<bool>,
    pub ransom_deadline_days: Option<f64>,
    pub decryptor_received: Option<bool>,
    pub decryptor_worked: Option<bool>,

    // --- IMPACTO SOBRE DATOS ---
    pub data_breached: Option<bool>,
    pub data_exfiltrated: Option<bool>,
    pub data_encrypted: Option<bool>,
    pub data_destroyed: Option<bool>,
    pub data_categories_json: Option<String>,
    pub records_affected_exact: Option<i64>,
    pub records_affected_min: Option<i64>,
    pub records_affected_max: Option<i64>,
    pub data_volume_gb: Option<f64>,

    // --- IMPACTO SOBRE SISTEMAS ---
    pub systems_affected_json: Option<String>,
    pub critical_systems_affected: Option<bool>,
    pub network_compromised: Option<bool>,
    pub domain_admin_compromised: Option<bool>,
    pub backup_compromised: Option<bool>,
    pub encryption_extent: Option<String>,
    pub systems_encrypted_count: Option<i64>,
    pub servers_affected_count: Option<i64>,
    pub endpoints_affected_count: Option<i64>,

    // --- IMPACTO OPERACIONAL ---
    pub operational_impacts_json: Option<String>,
    pub outage_duration_hours: Option<f64>,
    pub downtime_days: Option<f64>,
    pub partial_service_days: Option<f64>,

    // --- IMPACTO SOBRE USUARIOS ---
    pub students_affected: Option<i64>,
    pub staff_affected: Option<i64>,
    pub faculty_affected: Option<i64>,
    pub alumni_affected: Option<i64>,
    pub patients_affected: Option<i64>,
    pub total_individuals_affected: Option<i64>,

    // --- IMPACTO FINANCIERO (USD) ---
    pub estimated_total_cost_usd: Option<f64>,
    pub recovery_cost_usd: Option<f64>,
    pub legal_cost_usd: Option<f64>,
    pub notification_cost_usd: Option<f64>,
    pub lost_revenue_usd: Option<f64>,
    pub insurance_claim: Option<bool>,
    pub insurance_payout_usd: Option<f64>,
    pub business_impact_severity: Option<String>,

    // --- IMPACTO REGULATORIO ---
    pub applicable_regulations_json: Option<String>,
    pub breach_notification_required: Option<bool>,
    pub notification_sent: Option<bool>,
    pub investigation_opened: Option<bool>,
    pub fine_imposed: Option<bool>,
    pub fine_amount_usd: Option<f64>,
    pub lawsuits_filed: Option<bool>,
    pub class_action_filed: Option<bool>,
    pub settlement_amount_usd: Option<f64>,

    // --- RECUPERACIÓN ---
    pub recovery_method: Option<String>,
    pub recovery_started_date: Option<String>,
    pub recovery_completed_date: Option<String>,
    pub recovery_duration_days: Option<f64>,
    pub mttd_hours: Option<f64>,
    pub mttr_hours: Option<f64>,
    pub security_improvements_json: Option<String>,
    pub incident_response_firm: Option<String>,
    pub forensics_firm: Option<String>,
    pub law_enforcement_involved: Option<bool>,

    // --- TRANSPARENCIA ---
    pub public_disclosure: Option<bool>,
    pub public_disclosure_date: Option<String>,
    pub disclosure_delay_days: Option<f64>,
    pub disclosure_source: Option<String>,
    pub transparency_level: Option<String>,

    // --- ANÁLISIS CRUZADO ---
    pub attack_campaign_name: Option<String>,
    pub sector_targeting_pattern: Option<String>,

    // --- LÍNEA TEMPORAL Y MITRE (JSON SERIALIZADO) ---
    pub timeline_json: Option<String>,
    pub timeline_events_count: Option<i64>,
    pub mitre_techniques_json: Option<String>,
    pub mitre_techniques_count: Option<i64>,

    // --- RESUMEN ---
    pub enriched_summary: Option<String>,
    pub extraction_notes: Option<String>,
}
