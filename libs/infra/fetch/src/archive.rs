// [libs/infra/fetch/src/archive.rs]
/*!
 * =================================================================
 * APARATO: ARCHIVAL MIRROR CHANNEL (V4.2)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: RESCATE DE PÁGINAS HISTÓRICAS VÍA WAYBACK
 *
 * # Mathematical Proof (Variation Probing):
 * La API de disponibilidad es de coincidencia exacta; probar las
 * permutaciones {www, sin-www} × {https, http} maximiza la probabilidad
 * de localizar el snapshot sin costo adicional significativo.
 * =================================================================
 */

use serde_json::Value;
use tracing::{debug, info, instrument};
use url::Url;

use crate::client::{FetchClient, GetOptions};
use crate::errors::FetchError;

const AVAILABILITY_ENDPOINT: &str = "https://archive.org/wayback/available?url=";

/// Permutaciones de la URL para el sondeo de disponibilidad.
fn url_variations(original: &str) -> Vec<String> {
    let mut variations = vec![original.to_string()];

    if let Ok(parsed) = Url::parse(original) {
        if let Some(host) = parsed.host_str() {
            let scheme = parsed.scheme();
            let tail = &original[original.find(host).map(|i| i + host.len()).unwrap_or(0)..];

            if let Some(bare_host) = host.strip_prefix("www.") {
                variations.push(format!("{}://{}{}", scheme, bare_host, tail));
            } else {
                variations.push(format!("{}://www.{}{}", scheme, host, tail));
            }
        }
    }

    if original.starts_with("https://") {
        for variation in variations.clone() {
            variations.push(variation.replacen("https://", "http://", 1));
        }
    }

    variations
}

/**
 * Consulta el snapshot canónico más cercano para una URL.
 *
 * Un fallo de la API se trata como "sin snapshot": el espejo es un
 * canal de rescate, nunca una fuente de errores propios.
 */
#[instrument(skip(client))]
pub async fn lookup_archive_snapshot(client: &FetchClient, url: &str) -> Option<String> {
    for candidate in url_variations(url) {
        let api_url = format!(
            "{}{}",
            AVAILABILITY_ENDPOINT,
            urlencode_component(&candidate)
        );

        let payload = match client
            .get(&api_url, &GetOptions { allow_status: vec![], allow_404: true })
            .await
        {
            Ok(Some(payload)) if payload.status == 200 => payload,
            _ => continue,
        };

        let parsed: Value = match serde_json::from_str(&payload.body) {
            Ok(parsed) => parsed,
            Err(_) => continue,
        };

        let closest = parsed
            .get("archived_snapshots")
            .and_then(|snapshots| snapshots.get("closest"));

        if let Some(closest) = closest {
            let available = closest
                .get("available")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            if available {
                if let Some(snapshot_url) = closest.get("url").and_then(Value::as_str) {
                    let timestamp = closest
                        .get("timestamp")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown");
                    info!(
                        "🏛️ [ARCHIVE]: Snapshot located for {} (timestamp {})",
                        url, timestamp
                    );
                    return Some(snapshot_url.to_string());
                }
            }
        }
    }

    debug!("🏛️ [ARCHIVE]: No snapshot available for {}", url);
    None
}

/**
 * Cosecha el HTML capturado de un snapshot, sin la barra del archivo.
 */
pub async fn fetch_archived_html(
    client: &FetchClient,
    original_url: &str,
) -> Result<Option<String>, FetchError> {
    let snapshot_url = match lookup_archive_snapshot(client, original_url).await {
        Some(snapshot_url) => snapshot_url,
        None => return Ok(None),
    };

    let payload = client
        .get(&snapshot_url, &GetOptions::default())
        .await?
        .ok_or_else(|| FetchError::TransportError(format!("EMPTY_SNAPSHOT: {}", snapshot_url)))?;

    Ok(Some(strip_wayback_toolbar(&payload.body)))
}

/// Recorta el marcado inyectado por la barra del archivo.
pub fn strip_wayback_toolbar(html: &str) -> String {
    const TOOLBAR_BEGIN: &str = "<!-- BEGIN WAYBACK TOOLBAR INSERT -->";
    const TOOLBAR_END: &str = "<!-- END WAYBACK TOOLBAR INSERT -->";

    if let (Some(begin), Some(end)) = (html.find(TOOLBAR_BEGIN), html.find(TOOLBAR_END)) {
        if begin < end {
            let mut stripped = String::with_capacity(html.len());
            stripped.push_str(&html[..begin]);
            stripped.push_str(&html[end + TOOLBAR_END.len()..]);
            return stripped;
        }
    }
    html.to_string()
}

/// Codificación mínima del componente de consulta (la API es tolerante).
fn urlencode_component(raw: &str) -> String {
    raw.replace('%', "%25")
        .replace('&', "%26")
        .replace('?', "%3F")
        .replace('#', "%23")
        .replace(' ', "%20")
}
