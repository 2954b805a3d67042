// [libs/domain/sources/src/curated/ransomware_live.rs]
/*!
 * =================================================================
 * APARATO: SECTOR API ADAPTER (V4.3 - RANSOMWARE.LIVE)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: MAPEO DE VÍCTIMAS EDUCATIVAS DESDE LA API SECTORIAL
 *
 * Reglas de URLs: solo artículos de prensa reales entran a `all_urls`;
 * las páginas internas del agregador y las imágenes quedan fuera. Las
 * URLs de infraestructura (claim, detalle, captura) viven en campos
 * dedicados del incidente.
 * =================================================================
 */

use educti_core_normalize::{now_utc_iso, parse_date_with_precision, DatePrecision};
use educti_domain_models::{make_incident_id, Incident, IncidentStatus, SourceConfidence};
use educti_infra_fetch::FetchClient;
use serde_json::Value;
use tracing::{info, instrument};

use crate::sink::IncidentSink;
use crate::AdapterError;

pub const SOURCE_NAME: &str = "ransomwarelive";
const API_BASE_URL: &str = "https://api.ransomware.live/v2";

/**
 * Cosecha `/sectorvictims/Education` y emite un único lote.
 */
#[instrument(skip(fetch_client, sink))]
pub async fn collect_ransomware_live_victims(
    fetch_client: &FetchClient,
    sink: &mut impl IncidentSink,
) -> Result<Vec<Incident>, AdapterError> {
    let endpoint = format!("{}/sectorvictims/Education", API_BASE_URL);
    let payload = fetch_client.get_json(&endpoint).await?;

    let victims = extract_victim_rows(&payload)?;
    let incidents = map_victims_to_incidents(&victims, &now_utc_iso());

    info!("🩸 [RANSOMWARE_LIVE]: {} education victims mapped.", incidents.len());

    if !incidents.is_empty() {
        sink.save_batch(&incidents).await?;
    }
    Ok(incidents)
}

/// La API retorna lista directa o un objeto con `victims`/`data`.
fn extract_victim_rows(payload: &Value) -> Result<Vec<Value>, AdapterError> {
    match payload {
        Value::Array(rows) => Ok(rows.clone()),
        Value::Object(map) => {
            for key in ["victims", "data"] {
                if let Some(Value::Array(rows)) = map.get(key) {
                    return Ok(rows.clone());
                }
            }
            Ok(Vec::new())
        }
        _ => Err(AdapterError::PayloadShape(
            "sectorvictims payload is neither array nor object".into(),
        )),
    }
}

/// Mapeo puro de filas de la API a incidentes normalizados.
pub fn map_victims_to_incidents(victims: &[Value], ingested_at: &str) -> Vec<Incident> {
    let mut incidents = Vec::new();
    let mut seen_keys: Vec<String> = Vec::new();

    for row in victims {
        let activity = field_str(row, "activity");
        if !activity.is_empty() && !activity.eq_ignore_ascii_case("education") {
            continue;
        }

        let victim_name = first_non_empty(row, &["victim", "name", "company"]);
        if victim_name.is_empty() {
            continue;
        }
        let description = field_str(row, "description");
        let group = field_str(row, "group");
        let raw_attack_date = field_str(row, "attackdate");
        let raw_discovered = field_str(row, "discovered");
        let country = first_non_empty(row, &["country", "countrycode"]);
        let domain = field_str(row, "domain");

        let uniq_key = format!("{}|{}|{}|{}|{}", victim_name, domain, raw_attack_date, group, country);
        if seen_keys.iter().any(|seen| *seen == uniq_key) {
            continue;
        }
        seen_keys.push(uniq_key);

        // attackdate: "2024-10-15 00:00:00" → parte de fecha.
        let (incident_date, date_precision) = match raw_attack_date.split(' ').next() {
            Some(date_part) if !date_part.is_empty() => parse_date_with_precision(date_part),
            _ => (None, DatePrecision::Unknown),
        };
        let source_published_date = raw_discovered
            .split(' ')
            .next()
            .and_then(|date_part| parse_date_with_precision(date_part).0)
            .or_else(|| incident_date.clone());

        let press_urls = extract_press_article_urls(row.get("press"));

        let detail_url = field_str(row, "url");
        let claim_url = field_str(row, "claim_url");
        let screenshot_url = field_str(row, "screenshot");

        // Identificador nativo: slug de la página de detalle del agregador.
        let source_event_id = [detail_url.as_str(), claim_url.as_str()]
            .iter()
            .find(|candidate| !candidate.is_empty())
            .map(|candidate| {
                candidate
                    .trim_end_matches('/')
                    .rsplit('/')
                    .next()
                    .unwrap_or("")
                    .to_string()
            })
            .filter(|slug| !slug.is_empty());

        let notes = build_notes(&group, row.get("infostealer"));
        let institution_type = guess_institution_type(&victim_name, &description);

        let incident_id = make_incident_id(
            SOURCE_NAME,
            &format!(
                "{}|{}|{}|{}|{}",
                victim_name,
                domain,
                incident_date.as_deref().unwrap_or(""),
                group,
                country
            ),
        );

        let mut incident = Incident {
            incident_id,
            source: SOURCE_NAME.to_string(),
            source_event_id,
            university_name: victim_name.clone(),
            victim_raw_name: victim_name.clone(),
            institution_type: Some(institution_type.to_string()),
            country: if country.is_empty() { None } else { Some(country) },
            region: None,
            city: None,
            incident_date: None,
            date_precision: DatePrecision::Unknown,
            source_published_date,
            ingested_at: ingested_at.to_string(),
            title: Some(victim_name),
            subtitle: truncate_subtitle(&description),
            primary_url: None,
            all_urls: press_urls,
            leak_site_url: if claim_url.is_empty() { None } else { Some(claim_url) },
            source_detail_url: if detail_url.is_empty() { None } else { Some(detail_url) },
            screenshot_url: if screenshot_url.is_empty() { None } else { Some(screenshot_url) },
            attack_type_hint: Some("ransomware".to_string()),
            status: IncidentStatus::Suspected,
            source_confidence: SourceConfidence::Medium,
            notes,
        };
        incident.set_incident_date(incident_date, date_precision);

        incidents.push(incident);
    }

    incidents
}

/**
 * Solo artículos externos reales: fuera páginas del agregador e imágenes.
 */
fn extract_press_article_urls(press_field: Option<&Value>) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    match press_field {
        Some(Value::Object(map)) => {
            for key in ["source", "url", "link"] {
                if let Some(Value::String(url)) = map.get(key) {
                    candidates.push(url.clone());
                }
            }
        }
        Some(Value::Array(items)) => {
            for item in items {
                match item {
                    Value::String(url) => candidates.push(url.clone()),
                    Value::Object(map) => {
                        for key in ["source", "url", "link"] {
                            if let Some(Value::String(url)) = map.get(key) {
                                candidates.push(url.clone());
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }

    let mut urls: Vec<String> = Vec::new();
    for candidate in candidates {
        let trimmed = candidate.trim().to_string();
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            continue;
        }
        if trimmed.contains("ransomware.live") {
            continue;
        }
        let lowered = trimmed.to_lowercase();
        if [".png", ".jpg", ".jpeg", ".gif", ".webp"]
            .iter()
            .any(|extension| lowered.ends_with(extension))
        {
            continue;
        }
        if !urls.iter().any(|existing| *existing == trimmed) {
            urls.push(trimmed);
        }
    }
    urls
}

/// Clasificación gruesa por tokens del nombre; la fase 2 la refina.
fn guess_institution_type(name: &str, description: &str) -> &'static str {
    let base = format!("{} {}", name, description).to_lowercase();

    if ["school district", "county schools", "high school"]
        .iter()
        .any(|token| base.contains(token))
    {
        return "School";
    }
    if ["school", "schule", "école", "escuela", "colegio", "scuola", "skola"]
        .iter()
        .any(|token| base.contains(token))
    {
        return "School";
    }
    if ["university", "universität", "universidade", "universidad", "université", "università"]
        .iter()
        .any(|token| base.contains(token))
    {
        return "University";
    }
    if ["institute", "instituto", "institut", "research", "academy", "akademie", "akademia"]
        .iter()
        .any(|token| base.contains(token))
    {
        return "Research Institute";
    }
    "Unknown"
}

fn build_notes(group: &str, infostealer: Option<&Value>) -> Option<String> {
    let mut note_parts: Vec<String> = Vec::new();
    if !group.is_empty() {
        note_parts.push(format!("group={}", group));
    }

    if let Some(Value::Object(stealer)) = infostealer {
        let mut brief: Vec<String> = Vec::new();
        for key in ["employees", "users", "thirdparties"] {
            if let Some(value) = stealer.get(key) {
                brief.push(format!("{}={}", key, value));
            }
        }
        if !brief.is_empty() {
            note_parts.push(format!("infostealer({})", brief.join(", ")));
        }
    }

    if note_parts.is_empty() {
        None
    } else {
        Some(note_parts.join("; "))
    }
}

fn truncate_subtitle(description: &str) -> Option<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(200).collect())
}

fn field_str(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string()
}

fn first_non_empty(row: &Value, keys: &[&str]) -> String {
    for key in keys {
        let value = field_str(row, key);
        if !value.is_empty() {
            return value;
        }
    }
    String::new()
}
