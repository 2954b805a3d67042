// [libs/domain/enrichment/src/dedup.rs]
/*!
 * =================================================================
 * APARATO: POST-ENRICHMENT DEDUPLICATOR (V4.1)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: COLAPSO DE NARRATIVAS DUPLICADAS DEL MISMO EVENTO
 * =================================================================
 */

use educti_core_normalize::dates::{dates_within_window, parse_stored_date};
use educti_core_normalize::normalize_institution_name;

/// Ventana por defecto: dos semanas alrededor de la fecha del incidente.
pub const DEFAULT_DEDUP_WINDOW_DAYS: i64 = 14;

/// Identidad mínima de un incidente enriquecido para deduplicación.
#[derive(Debug, Clone)]
pub struct EnrichedIdentity {
    pub incident_id: String,
    pub institution_name: String,
    pub incident_date: Option<String>,
}

/**
 * Agrupa incidentes enriquecidos que narran el mismo evento real.
 *
 * Criterio: misma firma institucional normalizada y fechas dentro de la
 * ventana. Solo retorna grupos con al menos dos miembros; el llamador
 * conserva el de mayor cobertura y elimina el resto.
 */
pub fn group_duplicate_incidents(
    identities: &[EnrichedIdentity],
    window_days: i64,
) -> Vec<Vec<String>> {
    let mut processed: Vec<bool> = vec![false; identities.len()];
    let mut groups: Vec<Vec<String>> = Vec::new();

    for anchor_index in 0..identities.len() {
        if processed[anchor_index] {
            continue;
        }

        let anchor = &identities[anchor_index];
        let anchor_signature = normalize_institution_name(&anchor.institution_name);
        if anchor_signature.is_empty() {
            processed[anchor_index] = true;
            continue;
        }
        let anchor_date = anchor
            .incident_date
            .as_deref()
            .and_then(parse_stored_date);

        let mut group = vec![anchor.incident_id.clone()];
        processed[anchor_index] = true;

        for candidate_index in (anchor_index + 1)..identities.len() {
            if processed[candidate_index] {
                continue;
            }
            let candidate = &identities[candidate_index];
            let candidate_signature = normalize_institution_name(&candidate.institution_name);
            if candidate_signature != anchor_signature {
                continue;
            }
            let candidate_date = candidate
                .incident_date
                .as_deref()
                .and_then(parse_stored_date);

            if dates_within_window(anchor_date, candidate_date, window_days) {
                group.push(candidate.incident_id.clone());
                processed[candidate_index] = true;
            }
        }

        if group.len() > 1 {
            groups.push(group);
        }
    }

    groups
}
