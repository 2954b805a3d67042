// [libs/domain/sources/src/news/securityweek.rs]
/*!
 * =================================================================
 * APARATO: KEYWORD SEARCH ADAPTER (V4.3 - SECURITYWEEK)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: CAMINATA DEL BUSCADOR ALGOLIA POR TÉRMINO EDUCATIVO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CLIENT-RENDERED: los resultados se materializan en cliente; el
 *    chequeo de contenido fuerza el canal de navegador cuando el HTML
 *    plano llega sin nodos de resultado.
 * 2. CAPTCHA ABORT: un desafío detectado aborta la caminata del
 *    término completo; las demás fuentes continúan.
 * 3. PAGE BATCHES: un lote al sumidero por folio procesado.
 * =================================================================
 */

use educti_core_normalize::pagination::extract_last_page_from_attr;
use educti_core_normalize::{now_utc_iso, DatePrecision};
use educti_domain_models::{make_incident_id, Incident, IncidentStatus, SourceConfidence};
use educti_infra_fetch::{detect_captcha, FetchClient};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};

use crate::common::matches_news_keywords;
use crate::sink::IncidentSink;
use crate::AdapterError;

pub const SOURCE_NAME: &str = "securityweek";
const BASE_URL: &str = "https://www.securityweek.com/";

/// Términos de búsqueda del sector por defecto.
pub const DEFAULT_SEARCH_TERMS: &[&str] = &["college", "university", "school"];

static LAST_PAGE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Page\s+(\d+)").expect("static regex"));

fn search_url(term: &str, page: u32) -> String {
    if page > 1 {
        format!("{}?s={}&page={}", BASE_URL, term, page)
    } else {
        format!("{}?s={}", BASE_URL, term)
    }
}

fn has_result_nodes(html: &str) -> bool {
    html.contains("ais-Hits-item")
}

/**
 * Camina el buscador para cada término configurado.
 *
 * Un CAPTCHA aborta el término en curso; los términos restantes y las
 * demás fuentes no se ven afectados.
 */
#[instrument(skip(fetch_client, sink))]
pub async fn collect_securityweek_search(
    fetch_client: &FetchClient,
    search_terms: Option<&[&str]>,
    max_pages: Option<u32>,
    sink: &mut impl IncidentSink,
) -> Result<Vec<Incident>, AdapterError> {
    let terms = search_terms.unwrap_or(DEFAULT_SEARCH_TERMS);
    let ingested_at = now_utc_iso();
    let mut all_incidents: Vec<Incident> = Vec::new();
    let mut seen_urls: Vec<String> = Vec::new();

    for term in terms {
        info!("🔎 [SECURITYWEEK]: Walking search term '{}'", term);
        match walk_single_term(
            fetch_client,
            term,
            max_pages,
            &ingested_at,
            &mut seen_urls,
            sink,
        )
        .await
        {
            Ok(mut term_incidents) => all_incidents.append(&mut term_incidents),
            Err(AdapterError::CaptchaAborted(detail)) => {
                warn!("🛑 [SECURITYWEEK]: CAPTCHA aborted term '{}': {}", term, detail);
                continue;
            }
            Err(other) => return Err(other),
        }
    }

    info!("🔎 [SECURITYWEEK]: {} incidents across all terms.", all_incidents.len());
    Ok(all_incidents)
}

async fn walk_single_term(
    fetch_client: &FetchClient,
    term: &str,
    max_pages: Option<u32>,
    ingested_at: &str,
    seen_urls: &mut Vec<String>,
    sink: &mut impl IncidentSink,
) -> Result<Vec<Incident>, AdapterError> {
    let first_url = search_url(term, 1);
    let first_html = fetch_client
        .get_html_checked(&first_url, true, has_result_nodes)
        .await?;

    if detect_captcha(&first_html) {
        return Err(AdapterError::CaptchaAborted(first_url));
    }

    let last_page = discover_last_page(&first_html);
    let target_last = max_pages.map(|limit| limit.min(last_page)).unwrap_or(last_page);
    info!(
        "🔎 [SECURITYWEEK]: Term '{}' spans {} page(s) (walking {})",
        term, last_page, target_last
    );

    let mut term_incidents: Vec<Incident> = Vec::new();

    for page_number in 1..=target_last {
        let page_html = if page_number == 1 {
            first_html.clone()
        } else {
            let page_url = search_url(term, page_number);
            let html = fetch_client
                .get_html_checked(&page_url, true, has_result_nodes)
                .await?;
            if detect_captcha(&html) {
                return Err(AdapterError::CaptchaAborted(page_url));
            }
            html
        };

        let page_incidents =
            parse_search_results(&page_html, term, page_number, ingested_at, seen_urls);
        debug!(
            "🔎 [SECURITYWEEK]: Term '{}' page {} -> {} incidents",
            term,
            page_number,
            page_incidents.len()
        );

        if page_incidents.is_empty() && page_number > 1 {
            // Folio sin resultados: la caminata del término terminó.
            break;
        }
        if !page_incidents.is_empty() {
            sink.save_batch(&page_incidents).await?;
            term_incidents.extend(page_incidents);
        }
    }

    Ok(term_incidents)
}

fn discover_last_page(html: &str) -> u32 {
    let document = Html::parse_document(html);
    let pagination_selector =
        Selector::parse("ul.ais-Pagination-list").expect("static selector");
    let last_page_selector =
        Selector::parse("li.ais-Pagination-item--lastPage a[aria-label]").expect("static selector");

    // Primero el aria-label del enlace "Last Page, Page N".
    if let Some(last_link) = document.select(&last_page_selector).next() {
        if let Some(label) = last_link.value().attr("aria-label") {
            if let Some(captured) = LAST_PAGE_LABEL.captures(label) {
                if let Ok(page) = captured[1].parse::<u32>() {
                    return page;
                }
            }
        }
    }

    extract_last_page_from_attr(document.select(&pagination_selector).next(), "aria-label")
}

/// Destila los nodos de resultado de un folio del buscador (pura).
pub fn parse_search_results(
    html: &str,
    term: &str,
    page_number: u32,
    ingested_at: &str,
    seen_urls: &mut Vec<String>,
) -> Vec<Incident> {
    let document = Html::parse_document(html);
    let node_selector = Selector::parse("li.ais-Hits-item").expect("static selector");
    let title_selector = Selector::parse("a.ais-hits--title-link[href]").expect("static selector");
    let fallback_anchor = Selector::parse("a[href]").expect("static selector");
    let snippet_selector =
        Selector::parse("span.suggestion-post-content.ais-hits--content-snippet")
            .expect("static selector");
    let time_selector =
        Selector::parse("time.post-date.updated[itemprop='datePublished']").expect("static selector");
    let any_time = Selector::parse("time").expect("static selector");

    let mut incidents = Vec::new();

    for node in document.select(&node_selector) {
        let title_anchor = node
            .select(&title_selector)
            .next()
            .or_else(|| node.select(&fallback_anchor).next());
        let title_anchor = match title_anchor {
            Some(anchor) => anchor,
            None => continue,
        };

        let article_url = title_anchor.value().attr("href").unwrap_or("").trim().to_string();
        if article_url.is_empty() || seen_urls.iter().any(|seen| *seen == article_url) {
            continue;
        }

        let title = collapse(&title_anchor.text().collect::<String>());
        if title.is_empty() {
            continue;
        }

        let snippet = node
            .select(&snippet_selector)
            .next()
            .map(|element| collapse(&element.text().collect::<String>()))
            .unwrap_or_default();

        let text_blob = format!("{} {}", title, snippet);
        if !matches_news_keywords(&text_blob) {
            continue;
        }
        seen_urls.push(article_url.clone());

        let raw_date = node
            .select(&time_selector)
            .next()
            .or_else(|| node.select(&any_time).next())
            .map(|time_node| {
                time_node
                    .value()
                    .attr("datetime")
                    .map(str::to_string)
                    .unwrap_or_else(|| collapse(&time_node.text().collect::<String>()))
            })
            .unwrap_or_default();
        let (incident_date, date_precision) = match educti_core_normalize::dates::normalize_date_to_iso(&raw_date) {
            Some(iso) => (Some(iso), DatePrecision::Day),
            None => educti_core_normalize::parse_date_with_precision(&raw_date),
        };

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
            title: Some(title),
            subtitle: if snippet.is_empty() { None } else { Some(snippet) },
            primary_url: None,
            all_urls: vec![article_url],
            leak_site_url: None,
            source_detail_url: None,
            screenshot_url: None,
            attack_type_hint: None,
            status: IncidentStatus::Suspected,
            source_confidence: SourceConfidence::Medium,
            notes: Some(format!(
                "news_source={};term={};page={}",
                SOURCE_NAME, term, page_number
            )),
        };
        incident.set_incident_date(incident_date, date_precision);

        incidents.push(incident);
    }

    incidents
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
