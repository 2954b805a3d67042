// [libs/domain/enrichment/src/mapper.rs]
/*!
 * =================================================================
 * APARATO: FLAT PROJECTION MAPPER (V4.2)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: REGISTRO ESTRICTO → FILA ANALÍTICA + MUTACIÓN
 *
 * # Mathematical Proof (Projection Totality):
 * El mapeo es total: cada campo del registro estricto tiene exactamente
 * un destino (columna tipada o serialización JSON); no hay pérdida ni
 * ambigüedad de destino.
 * =================================================================
 */

use educti_core_normalize::{country_code_for, normalize_country};
use educti_domain_models::{CtiRecord, FlatEnrichment};
use serde_json::json;

use crate::coverage::coverage_score;

/// Mutación del incidente derivada del registro (espejo del repositorio).
#[derive(Debug, Clone, Default)]
pub struct IncidentMutation {
    pub primary_url: Option<String>,
    pub summary: String,
    pub timeline_json: Option<String>,
    pub mitre_json: Option<String>,
    pub attack_dynamics_json: Option<String>,
    pub corrected_country: Option<String>,
    pub corrected_country_code: Option<String>,
    pub corrected_incident_date: Option<String>,
    pub corrected_date_precision: Option<String>,
}

fn to_json_string<T: serde::Serialize>(value: &Option<T>) -> Option<String> {
    value
        .as_ref()
        .and_then(|inner| serde_json::to_string(inner).ok())
}

/// Precisión del esquema de extracción → precisión del dominio.
fn map_extraction_precision(raw: Option<&str>) -> Option<String> {
    match raw {
        Some("exact") | Some("approximate") => Some("day".to_string()),
        Some("month_only") => Some("month".to_string()),
        Some("year_only") => Some("year".to_string()),
        _ => None,
    }
}

/// Proyecta el registro estricto a la fila analítica plana.
pub fn project_flat(incident_id: &str, record: &CtiRecord) -> FlatEnrichment {
    let normalized_country = record
        .country
        .as_deref()
        .and_then(normalize_country);
    let resolved_country_code = record.country_code.clone().or_else(|| {
        normalized_country
            .as_deref()
            .and_then(country_code_for)
    });

    let institution_name = record.institution_name.clone().or_else(|| {
        record
            .education_relevance
            .as_ref()
            .and_then(|relevance| relevance.institution_identified.clone())
    });

    FlatEnrichment {
        incident_id: incident_id.to_string(),

        is_education_related: Some(record.is_education_related()),
        institution_name,
        institution_type: record.institution_type.clone(),
        country: normalized_country,
        country_code: resolved_country_code,
        region: record.region.clone(),
        city: record.city.clone(),

        attack_category: record.attack_category.clone(),
        attack_vector: record.attack_vector.clone(),
        initial_access_description: record.initial_access_description.clone(),
        ransomware_family: record.ransomware_family.clone(),
        threat_actor_name: record.threat_actor_name.clone(),
        threat_actor_category: record.threat_actor_category.clone(),
        threat_actor_motivation: record.threat_actor_motivation.clone(),
        threat_actor_claim_url: record.threat_actor_claim_url.clone(),

        was_ransom_demanded: record.was_ransom_demanded,
        ransom_amount: record.ransom_amount.or(record.ransom_amount_exact),
        ransom_currency: record.ransom_currency.clone(),
        ransom_cryptocurrency: record.ransom_cryptocurrency.clone(),
        ransom_paid: record.ransom_paid,
        ransom_paid_amount: record.ransom_paid_amount,
        ransom_negotiated: record.ransom_negotiated,
        ransom_deadline_days: record.ransom_deadline_days,
        decryptor_received: record.decryptor_received,
        decryptor_worked: record.decryptor_worked,

        data_breached: record.data_breached,
        data_exfiltrated: record.data_exfiltrated,
        data_encrypted: record.data_encrypted,
        data_destroyed: record.data_destroyed,
        data_categories_json: to_json_string(&record.data_categories),
        records_affected_exact: record.records_affected_exact,
        records_affected_min: record.records_affected_min,
        records_affected_max: record.records_affected_max,
        data_volume_gb: record.data_volume_gb,

        systems_affected_json: to_json_string(&record.systems_affected),
        critical_systems_affected: record.critical_systems_affected,
        network_compromised: record.network_compromised,
        domain_admin_compromised: record.domain_admin_compromised,
        backup_compromised: record.backup_compromised,
        encryption_extent: record.encryption_extent.clone(),
        systems_encrypted_count: record.systems_encrypted_count,
        servers_affected_count: record.servers_affected_count,
        endpoints_affected_count: record.endpoints_affected_count,

        operational_impacts_json: to_json_string(&record.operational_impacts),
        outage_duration_hours: record.outage_duration_hours,
        downtime_days: record.downtime_days,
        partial_service_days: record.partial_service_days,

        students_affected: record.students_affected,
        staff_affected: record.staff_affected,
        faculty_affected: record.faculty_affected,
        alumni_affected: record.alumni_affected,
        patients_affected: record.patients_affected,
        total_individuals_affected: record.total_individuals_affected,

        estimated_total_cost_usd: record.estimated_total_cost_usd,
        recovery_cost_usd: record.recovery_cost_usd,
        legal_cost_usd: record.legal_cost_usd,
        notification_cost_usd: record.notification_cost_usd,
        lost_revenue_usd: record.lost_revenue_usd,
        insurance_claim: record.insurance_claim,
        insurance_payout_usd: record.insurance_payout_usd,
        business_impact_severity: record.business_impact_severity.clone(),

        applicable_regulations_json: to_json_string(&record.applicable_regulations),
        breach_notification_required: record.breach_notification_required,
        notification_sent: record.notification_sent,
        investigation_opened: record.investigation_opened,
        fine_imposed: record.fine_imposed,
        fine_amount_usd: record.fine_amount_usd,
        lawsuits_filed: record.lawsuits_filed,
        class_action_filed: record.class_action_filed,
        settlement_amount_usd: record.settlement_amount_usd,

        recovery_method: record.recovery_method.clone(),
        recovery_started_date: record.recovery_started_date.clone(),
        recovery_completed_date: record.recovery_completed_date.clone(),
        recovery_duration_days: record.recovery_duration_days,
        mttd_hours: record.mttd_hours,
        mttr_hours: record.mttr_hours,
        security_improvements_json: to_json_string(&record.security_improvements),
        incident_response_firm: record.ir_firm_engaged.clone(),
        forensics_firm: record.forensics_firm_engaged.clone(),
        law_enforcement_involved: record.law_enforcement_involved,

        public_disclosure: record.public_disclosure,
        public_disclosure_date: record.public_disclosure_date.clone(),
        disclosure_delay_days: record.disclosure_delay_days,
        disclosure_source: record.disclosure_source.clone(),
        transparency_level: record.transparency_level.clone(),

        attack_campaign_name: record.attack_campaign_name.clone(),
        sector_targeting_pattern: record.sector_targeting_pattern.clone(),

        timeline_json: to_json_string(&record.timeline),
        timeline_events_count: record
            .timeline
            .as_ref()
            .map(|timeline| timeline.len() as i64),
        mitre_techniques_json: to_json_string(&record.mitre_attack_techniques),
        mitre_techniques_count: record
            .mitre_attack_techniques
            .as_ref()
            .map(|techniques| techniques.len() as i64),

        enriched_summary: Some(record.enriched_summary.clone()),
        extraction_notes: record.extraction_notes.clone(),
    }
}

/// Deriva la mutación del incidente que acompaña al enriquecimiento.
pub fn derive_incident_mutation(
    record: &CtiRecord,
    primary_url: &str,
    leak_site_fallback: Option<&str>,
) -> IncidentMutation {
    let normalized_country = record.country.as_deref().and_then(normalize_country);
    let corrected_country_code = record.country_code.clone().or_else(|| {
        normalized_country.as_deref().and_then(country_code_for)
    });

    // La fecha extraída por el modelo corrige la fecha de publicación; si
    // falta, el evento más temprano de la línea temporal la aproxima.
    let (corrected_incident_date, corrected_date_precision) = match &record.incident_date {
        Some(date) => (
            Some(date.clone()),
            map_extraction_precision(record.incident_date_precision.as_deref())
                .or_else(|| Some("day".to_string())),
        ),
        None => earliest_timeline_date(record),
    };

    let claim_url = record
        .threat_actor_claim_url
        .clone()
        .or_else(|| leak_site_fallback.map(str::to_string));

    let attack_dynamics_json = serde_json::to_string(&json!({
        "attack_vector": record.attack_vector,
        "attack_chain": record.attack_chain,
        "ransomware_family": record.ransomware_family,
        "data_exfiltration": record.data_exfiltrated,
        "encryption_impact": record.encryption_extent,
        "ransom_demanded": record.was_ransom_demanded,
        "ransom_amount": record.ransom_amount,
        "ransom_paid": record.ransom_paid,
        "business_impact": record.business_impact_severity,
        "operational_impact": record.operational_impacts,
        "threat_actor_claim_url": claim_url,
    }))
    .ok();

    IncidentMutation {
        primary_url: Some(primary_url.to_string()),
        summary: record.enriched_summary.clone(),
        timeline_json: to_json_string(&record.timeline),
        mitre_json: to_json_string(&record.mitre_attack_techniques),
        attack_dynamics_json,
        corrected_country: normalized_country,
        corrected_country_code,
        corrected_incident_date,
        corrected_date_precision,
    }
}

fn earliest_timeline_date(record: &CtiRecord) -> (Option<String>, Option<String>) {
    let timeline = match &record.timeline {
        Some(timeline) => timeline,
        None => return (None, None),
    };

    let earliest = timeline
        .iter()
        .filter_map(|event| event.date.as_ref().map(|date| (date, event)))
        .min_by(|(a, _), (b, _)| a.cmp(b));

    match earliest {
        Some((date, event)) => {
            let precision = match event.date_precision.as_deref() {
                Some("month") => Some("month".to_string()),
                Some("year") => Some("year".to_string()),
                _ => Some("day".to_string()),
            };
            (Some(date.clone()), precision)
        }
        None => (None, None),
    }
}

/// Puntaje de cobertura re-exportado junto al mapeo (conveniencia).
pub fn score_record(record: &CtiRecord) -> usize {
    coverage_score(record)
}
