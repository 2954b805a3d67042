// [libs/domain/enrichment/src/coverage.rs]
/*!
 * =================================================================
 * APARATO: COVERAGE SCORER (V4.1)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: PUNTUACIÓN DE ARTÍCULOS POR DENSIDAD DE CAMPOS
 *
 * # Mathematical Proof (Ranking Soundness):
 * El puntaje es el conteo recursivo de hojas no nulas del objeto
 * estructurado; un artículo que llena estrictamente más campos obtiene
 * estrictamente mayor puntaje, por lo que el máximo selecciona la
 * fuente más informativa.
 * =================================================================
 */

use educti_domain_models::CtiRecord;
use serde_json::Value;

/// Conteo recursivo de hojas con información real.
pub fn count_filled_fields(value: &Value) -> usize {
    match value {
        Value::Null => 0,
        Value::Bool(_) | Value::Number(_) => 1,
        Value::String(text) => {
            if text.trim().is_empty() {
                0
            } else {
                1
            }
        }
        Value::Array(items) => items.iter().map(count_filled_fields).sum(),
        Value::Object(map) => map.values().map(count_filled_fields).sum(),
    }
}

/// Puntaje de cobertura de un registro estricto.
pub fn coverage_score(record: &CtiRecord) -> usize {
    match serde_json::to_value(record) {
        Ok(serialized) => count_filled_fields(&serialized),
        Err(_) => 0,
    }
}
