// [libs/domain/sources/src/rss/databreaches_rss.rs]
/*!
 * =================================================================
 * APARATO: RSS ADAPTER (V4.2 - DATABREACHES FEED)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: FEED DEL ARCHIVO FILTRADO POR CATEGORÍA SECTORIAL
 * =================================================================
 */

use educti_core_normalize::{now_utc_iso, DatePrecision};
use educti_domain_models::{make_incident_id, Incident, IncidentStatus, SourceConfidence};
use educti_infra_fetch::FetchClient;
use tracing::{debug, info, instrument};

use crate::rss::common::{
    has_education_category, is_newer_than_watermark, is_within_max_age, parse_feed_items,
    FeedItem, RssHarvest,
};
use crate::sink::IncidentSink;
use crate::AdapterError;

pub const SOURCE_NAME: &str = "databreaches_rss";
const FEED_URL: &str = "https://databreaches.net/feed/";

/**
 * Cosecha el feed y emite incidentes del sector educativo.
 *
 * Filtros: ventana de antigüedad, categoría educativa y (en modo
 * incremental) marca de agua estricta.
 */
#[instrument(skip(fetch_client, sink))]
pub async fn collect_databreaches_rss(
    fetch_client: &FetchClient,
    max_age_days: i64,
    last_pubdate: Option<&str>,
    incremental: bool,
    sink: &mut impl IncidentSink,
) -> Result<RssHarvest, AdapterError> {
    let payload = fetch_client.get_html(FEED_URL, false).await?;
    let items = parse_feed_items(&payload)?;
    info!("📡 [DATABREACHES_RSS]: {} items in feed.", items.len());

    let harvest = build_harvest(&items, max_age_days, last_pubdate, incremental, &now_utc_iso());

    if !harvest.incidents.is_empty() {
        sink.save_batch(&harvest.incidents).await?;
    }
    info!(
        "📡 [DATABREACHES_RSS]: {} education incidents collected.",
        harvest.incidents.len()
    );
    Ok(harvest)
}

/// Construcción pura de la cosecha desde ítems planos.
pub fn build_harvest(
    items: &[FeedItem],
    max_age_days: i64,
    last_pubdate: Option<&str>,
    incremental: bool,
    ingested_at: &str,
) -> RssHarvest {
    let mut harvest = RssHarvest::default();

    for item in items {
        harvest.observe_pubdate(item.published);

        if !is_within_max_age(item.published, max_age_days) {
            debug!("📡 [DATABREACHES_RSS]: '{}' too old, skipping.", item.title);
            continue;
        }
        if incremental && !is_newer_than_watermark(item.published, last_pubdate) {
            continue;
        }
        if !has_education_category(&item.categories) {
            debug!("📡 [DATABREACHES_RSS]: '{}' not education sector.", item.title);
            continue;
        }

        let (incident_date, date_precision) = match item.published {
            Some(published) => (
                Some(published.format("%Y-%m-%d").to_string()),
                DatePrecision::Day,
            ),
            None => (None, DatePrecision::Unknown),
        };

        let mut incident = Incident {
            incident_id: make_incident_id(SOURCE_NAME, &item.guid),
            source: SOURCE_NAME.to_string(),
            source_event_id: Some(item.guid.clone()),
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
            title: Some(item.title.clone()),
            subtitle: if item.description.is_empty() {
                None
            } else {
                Some(item.description.clone())
            },
            primary_url: None,
            all_urls: vec![item.link.clone()],
            leak_site_url: None,
            source_detail_url: None,
            screenshot_url: None,
            attack_type_hint: None,
            status: IncidentStatus::Suspected,
            source_confidence: SourceConfidence::Medium,
            notes: Some(format!(
                "rss_source={};categories={}",
                SOURCE_NAME,
                item.categories.join(",")
            )),
        };
        incident.set_incident_date(incident_date, date_precision);

        harvest.incidents.push(incident);
    }

    harvest
}
