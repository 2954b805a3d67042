// [libs/domain/sources/src/curated/databreaches.rs]
/*!
 * =================================================================
 * APARATO: PAGINATED ARCHIVE ADAPTER (V4.3 - DATABREACHES)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: CAMINATA COMPLETA DEL ARCHIVO DEL SECTOR EDUCATIVO
 *
 * # Mathematical Proof (Page-Granular Progress):
 * El lote se emite al cierre de cada folio; una corrida interrumpida en
 * el folio N conserva los N-1 folios previos cristalizados.
 * =================================================================
 */

use educti_core_normalize::pagination::extract_last_page_from_numbers;
use educti_core_normalize::{now_utc_iso, parse_date_with_precision, DatePrecision};
use educti_domain_models::{make_incident_id, Incident, IncidentStatus, SourceConfidence};
use educti_infra_fetch::{FetchClient, FetchError};
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};

use crate::sink::IncidentSink;
use crate::AdapterError;

pub const SOURCE_NAME: &str = "databreaches";
const BASE_URL: &str = "https://databreaches.net/category/education-sector/";

fn page_url(page_number: u32) -> String {
    if page_number <= 1 {
        BASE_URL.to_string()
    } else {
        format!("{}page/{}/", BASE_URL, page_number)
    }
}

/**
 * Camina el archivo paginado y emite un lote por folio procesado.
 */
#[instrument(skip(fetch_client, sink))]
pub async fn collect_databreaches_archive(
    fetch_client: &FetchClient,
    max_pages: Option<u32>,
    sink: &mut impl IncidentSink,
) -> Result<Vec<Incident>, AdapterError> {
    let first_page_html = fetch_client.get_html(BASE_URL, true).await?;
    let last_page = discover_last_page(&first_page_html);
    let target_last = max_pages.map(|limit| limit.min(last_page)).unwrap_or(last_page);

    info!(
        "📚 [DATABREACHES]: Archive walk: last={}, target={}",
        last_page, target_last
    );

    let ingested_at = now_utc_iso();
    let mut all_incidents: Vec<Incident> = Vec::new();
    let mut seen_urls: Vec<String> = Vec::new();

    for page_number in 1..=target_last {
        let page_html = if page_number == 1 {
            first_page_html.clone()
        } else {
            match fetch_client.get_html(&page_url(page_number), true).await {
                Ok(html) => html,
                Err(FetchError::HttpStatus { status: 404, .. }) => break,
                Err(fault) => return Err(fault.into()),
            }
        };

        let page_incidents =
            parse_archive_page(&page_html, page_number, &ingested_at, &mut seen_urls);
        debug!(
            "📚 [DATABREACHES]: Page {} -> {} incidents",
            page_number,
            page_incidents.len()
        );

        if !page_incidents.is_empty() {
            sink.save_batch(&page_incidents).await?;
            all_incidents.extend(page_incidents);
        }
    }

    info!("📚 [DATABREACHES]: Walk complete, {} incidents total.", all_incidents.len());
    Ok(all_incidents)
}

fn discover_last_page(html: &str) -> u32 {
    let document = Html::parse_document(html);
    let pagination_selector = Selector::parse("ul.page-numbers").expect("static selector");
    extract_last_page_from_numbers(document.select(&pagination_selector).next())
}

/// Destila un folio del archivo en incidentes normalizados (pura).
pub fn parse_archive_page(
    html: &str,
    page_number: u32,
    ingested_at: &str,
    seen_urls: &mut Vec<String>,
) -> Vec<Incident> {
    let document = Html::parse_document(html);
    let article_selector = Selector::parse("article").expect("static selector");
    let title_selector = Selector::parse("h2 a").expect("static selector");
    let summary_selector = Selector::parse(".entry-summary").expect("static selector");
    let paragraph_selector = Selector::parse("p").expect("static selector");
    let time_selector = Selector::parse("time").expect("static selector");

    let mut incidents = Vec::new();

    for article in document.select(&article_selector) {
        let title_anchor = match article.select(&title_selector).next() {
            Some(anchor) => anchor,
            None => continue,
        };

        let title = collapse(&title_anchor.text().collect::<String>());
        let article_url = title_anchor.value().attr("href").unwrap_or("").trim().to_string();
        if article_url.is_empty() || seen_urls.iter().any(|seen| *seen == article_url) {
            continue;
        }
        seen_urls.push(article_url.clone());

        let summary = article
            .select(&summary_selector)
            .next()
            .or_else(|| article.select(&paragraph_selector).next())
            .map(|node| collapse(&node.text().collect::<String>()))
            .unwrap_or_default();

        let raw_date = article
            .select(&time_selector)
            .next()
            .map(|time_node| {
                time_node
                    .value()
                    .attr("datetime")
                    .map(str::to_string)
                    .unwrap_or_else(|| collapse(&time_node.text().collect::<String>()))
            })
            .unwrap_or_default();
        let (incident_date, date_precision) = extract_archive_date(&raw_date);

        let mut incident = Incident {
            incident_id: make_incident_id(SOURCE_NAME, &article_url),
            source: SOURCE_NAME.to_string(),
            source_event_id: Some(article_url.trim_end_matches('/').to_string()),
            university_name: String::new(),
            victim_raw_name: String::new(),
            institution_type: None,
            country: None,
            region: None,
            city: None,
            incident_date: None,
            date_precision: DatePrecision::Unknown,
            source_published_date: incident_date.clone(),
            ingested_at: ingested_at.to_string(),
            title: if title.is_empty() { None } else { Some(title) },
            subtitle: if summary.is_empty() { None } else { Some(summary) },
            primary_url: None,
            all_urls: vec![article_url],
            leak_site_url: None,
            source_detail_url: None,
            screenshot_url: None,
            attack_type_hint: None,
            status: IncidentStatus::Suspected,
            source_confidence: SourceConfidence::Medium,
            notes: Some(format!("news_source={};page={}", SOURCE_NAME, page_number)),
        };
        incident.set_incident_date(incident_date, date_precision);

        incidents.push(incident);
    }

    incidents
}

/// El atributo datetime trae ISO completo; el texto, formatos humanos.
fn extract_archive_date(raw: &str) -> (Option<String>, DatePrecision) {
    if raw.trim().is_empty() {
        return (None, DatePrecision::Unknown);
    }
    if let Some(iso) = educti_core_normalize::dates::normalize_date_to_iso(raw) {
        return (Some(iso), DatePrecision::Day);
    }
    parse_date_with_precision(raw)
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
