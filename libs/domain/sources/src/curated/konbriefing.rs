// [libs/domain/sources/src/curated/konbriefing.rs]
/*!
 * =================================================================
 * APARATO: CURATED LISTING ADAPTER (V4.3 - KONBRIEFING)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: COSECHA DEL LISTADO CURADO DE ATAQUES EDUCATIVOS
 *
 * Estructura de la página: bloques `article.portfolio-item` con bandera
 * del país, fecha adyacente, título en negrita y un bloque secundario
 * con subtítulo + enlaces salientes.
 * =================================================================
 */

use educti_core_normalize::{now_utc_iso, parse_date_with_precision};
use educti_domain_models::{make_incident_id, Incident, IncidentStatus, SourceConfidence};
use educti_infra_fetch::FetchClient;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, instrument};

use crate::sink::IncidentSink;
use crate::AdapterError;

pub const SOURCE_NAME: &str = "konbriefing";
const LISTING_URL: &str = "https://konbriefing.com/en-topics/cyber-attacks-universities.html";

/**
 * Cosecha el listado completo y emite un único lote al sumidero.
 *
 * Fuente de una sola página: el lote se emite tras procesar todos los
 * bloques del listado.
 */
#[instrument(skip(fetch_client, sink))]
pub async fn collect_konbriefing_listing(
    fetch_client: &FetchClient,
    sink: &mut impl IncidentSink,
) -> Result<Vec<Incident>, AdapterError> {
    let html = fetch_client.get_html(LISTING_URL, true).await?;
    let incidents = parse_konbriefing_listing(&html, &now_utc_iso());

    info!("📋 [KONBRIEFING]: {} incidents distilled from listing.", incidents.len());

    if !incidents.is_empty() {
        sink.save_batch(&incidents).await?;
    }
    Ok(incidents)
}

/// Destila el HTML del listado en incidentes normalizados (pura).
pub fn parse_konbriefing_listing(html: &str, ingested_at: &str) -> Vec<Incident> {
    let document = Html::parse_document(html);
    let article_selector = Selector::parse("article.portfolio-item").expect("static selector");
    let flag_selector = Selector::parse("img[alt^='Flag ']").expect("static selector");
    let title_selector = Selector::parse("div[style*='bold']").expect("static selector");

    let mut incidents = Vec::new();

    for article in document.select(&article_selector) {
        let flag_image = match article.select(&flag_selector).next() {
            Some(image) => image,
            None => continue,
        };

        let country = flag_image
            .value()
            .attr("alt")
            .unwrap_or("")
            .trim_start_matches("Flag ")
            .trim()
            .to_string();

        let raw_date = text_after_image(&flag_image);
        let (incident_date, date_precision) = parse_date_with_precision(&raw_date);

        let title = article
            .select(&title_selector)
            .next()
            .map(|node| collapse(&node.text().collect::<String>()))
            .unwrap_or_default();

        let (subtitle, links) = extract_subtitle_and_links(&article);

        // Nombre institucional aproximado desde el subtítulo.
        let institution = guess_institution(&subtitle);

        let urls_joined = links.join(";");
        let unique_string = format!(
            "{}|{}|{}",
            institution,
            incident_date.as_deref().unwrap_or(""),
            urls_joined
        );

        let mut incident = Incident {
            incident_id: make_incident_id(SOURCE_NAME, &unique_string),
            source: SOURCE_NAME.to_string(),
            source_event_id: None,
            university_name: institution.clone(),
            victim_raw_name: institution,
            institution_type: Some("University".to_string()),
            country: if country.is_empty() { None } else { Some(country) },
            region: None,
            city: None,
            incident_date: None,
            date_precision: educti_core_normalize::DatePrecision::Unknown,
            source_published_date: incident_date.clone(),
            ingested_at: ingested_at.to_string(),
            title: if title.is_empty() { None } else { Some(title) },
            subtitle: if subtitle.is_empty() { None } else { Some(subtitle) },
            primary_url: None,
            all_urls: links,
            leak_site_url: None,
            source_detail_url: None,
            screenshot_url: None,
            attack_type_hint: None,
            status: IncidentStatus::Confirmed,
            source_confidence: SourceConfidence::High,
            notes: None,
        };
        incident.set_incident_date(incident_date, date_precision);

        incidents.push(incident);
    }

    incidents
}

/// Texto adyacente a la imagen de bandera (la fecha del listado).
fn text_after_image(image: &ElementRef<'_>) -> String {
    for sibling in image.next_siblings() {
        if let Some(text) = sibling.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }

    // Respaldo: texto del contenedor sin el alt de la bandera.
    if let Some(parent) = image.parent().and_then(ElementRef::wrap) {
        let parent_text = collapse(&parent.text().collect::<String>());
        let alt = image.value().attr("alt").unwrap_or("");
        return parent_text.replace(alt, "").trim().to_string();
    }
    String::new()
}

/// Hijos directos `<div>` de un elemento (sin selector :scope).
fn direct_div_children<'a>(element: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "div")
        .collect()
}

/// Subtítulo + enlaces absolutos únicos del bloque secundario.
fn extract_subtitle_and_links(article: &ElementRef<'_>) -> (String, Vec<String>) {
    let box_selector = Selector::parse("div.kbresbox1").expect("static selector");
    let anchor_selector = Selector::parse("a[href]").expect("static selector");

    let content_box = match article.select(&box_selector).next() {
        Some(content_box) => content_box,
        None => return (String::new(), Vec::new()),
    };

    let top_blocks = direct_div_children(&content_box);
    let block_b = match top_blocks.get(1) {
        Some(block) => *block,
        None => return (String::new(), Vec::new()),
    };

    let subtitle = direct_div_children(&block_b)
        .first()
        .map(|node| collapse(&node.text().collect::<String>()))
        .unwrap_or_default();

    let mut links: Vec<String> = Vec::new();
    for anchor in block_b.select(&anchor_selector) {
        let href = anchor.value().attr("href").unwrap_or("").trim();
        if (href.starts_with("http://") || href.starts_with("https://"))
            && !links.iter().any(|existing| existing == href)
        {
            links.push(href.to_string());
        }
    }

    (subtitle, links)
}

fn guess_institution(subtitle: &str) -> String {
    for separator in ["–", "—", " - ", "--"] {
        if let Some((head, _)) = subtitle.split_once(separator) {
            let candidate = head.trim();
            if !candidate.is_empty() {
                return candidate.to_string();
            }
        }
    }
    if let Some((head, _)) = subtitle.split_once(',') {
        let candidate = head.trim();
        if candidate.len() > 3 {
            return candidate.to_string();
        }
    }
    String::new()
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
