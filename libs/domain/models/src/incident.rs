// [libs/domain/models/src/incident.rs]
/*!
 * =================================================================
 * APARATO: INCIDENT ENTITY (V4.1 - SOVEREIGN IDENTITY)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: ENTIDAD CANÓNICA DE INCIDENTE Y DIGESTO DE IDENTIDAD
 *
 * # Mathematical Proof (Identity Stability):
 * El identificador `<fuente>_<16hex>` se deriva de SHA-256 sobre la
 * tupla `(fuente, cadena_única)`; para entradas idénticas el digesto es
 * bit-perfecto entre corridas, garantizando deduplicación determinista.
 * =================================================================
 */

use educti_core_normalize::DatePrecision;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Estado de confirmación de un incidente observado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Suspected,
    Confirmed,
}

impl IncidentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Suspected => "suspected",
            IncidentStatus::Confirmed => "confirmed",
        }
    }

    pub fn parse(raw: &str) -> IncidentStatus {
        match raw.trim().to_ascii_lowercase().as_str() {
            "confirmed" => IncidentStatus::Confirmed,
            _ => IncidentStatus::Suspected,
        }
    }
}

/// Confianza atribuida a la clase de fuente que reportó el incidente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceConfidence {
    Low,
    Medium,
    High,
}

impl SourceConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceConfidence::Low => "low",
            SourceConfidence::Medium => "medium",
            SourceConfidence::High => "high",
        }
    }

    pub fn parse(raw: &str) -> SourceConfidence {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => SourceConfidence::High,
            "low" => SourceConfidence::Low,
            _ => SourceConfidence::Medium,
        }
    }
}

/// Incidente cibernético observado contra una institución educativa.
///
/// Fase 1 lo cristaliza con `primary_url = None`; la fase de
/// enriquecimiento selecciona la URL primaria y cuelga las proyecciones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub incident_id: String,
    pub source: String,
    pub source_event_id: Option<String>,

    // --- IDENTIDAD DE LA VÍCTIMA ---
    pub university_name: String,
    pub victim_raw_name: String,
    pub institution_type: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,

    // --- ESTRATO TEMPORAL ---
    pub incident_date: Option<String>,
    pub date_precision: DatePrecision,
    pub source_published_date: Option<String>,
    pub ingested_at: String,

    // --- NARRATIVA ---
    pub title: Option<String>,
    pub subtitle: Option<String>,

    // --- URLS DE ENRIQUECIMIENTO ---
    pub primary_url: Option<String>,
    pub all_urls: Vec<String>,

    // --- URLS DE INFRAESTRUCTURA CTI ---
    pub leak_site_url: Option<String>,
    pub source_detail_url: Option<String>,
    pub screenshot_url: Option<String>,

    // --- CLASIFICACIÓN BASE ---
    pub attack_type_hint: Option<String>,
    pub status: IncidentStatus,
    pub source_confidence: SourceConfidence,

    pub notes: Option<String>,
}

impl Incident {
    /// Fija fecha y precisión como un par acoplado.
    ///
    /// Invariante: fecha ausente ⟺ precisión `Unknown`.
    pub fn set_incident_date(&mut self, date: Option<String>, precision: DatePrecision) {
        match date {
            Some(value) if !value.trim().is_empty() => {
                self.incident_date = Some(value);
                self.date_precision = if precision == DatePrecision::Unknown {
                    DatePrecision::Day
                } else {
                    precision
                };
            }
            _ => {
                self.incident_date = None;
                self.date_precision = DatePrecision::Unknown;
            }
        }
    }

    /// Anexa una URL preservando orden de descubrimiento y unicidad.
    pub fn push_url(&mut self, url: &str) {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return;
        }
        if !self.all_urls.iter().any(|existing| existing == trimmed) {
            self.all_urls.push(trimmed.to_string());
        }
    }
}

/// Deriva el identificador estable `<fuente>_<16hex>` de un incidente.
pub fn make_incident_id(source: &str, unique_string: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.update(b"|");
    hasher.update(unique_string.as_bytes());
    let digest = hasher.finalize();
    format!("{}_{}", source, hex::encode(&digest[..8]))
}
