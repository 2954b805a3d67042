// [libs/domain/sources/src/rss/common.rs]
/*!
 * =================================================================
 * APARATO: RSS COMMON STRATA (V4.2)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: PARSEO DE FEEDS Y SEMÁNTICA INCREMENTAL
 *
 * # Mathematical Proof (Incremental Window):
 * Un ítem entra a la cosecha si y solo si `edad ≤ max_age_days` y, en
 * modo incremental, `pubDate > last_pubdate`. Re-correr tras un
 * colapso solo re-observa ítems ya deduplicados aguas abajo.
 * =================================================================
 */

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use educti_domain_models::Incident;
use feed_rs::parser as feed_parser;
use tracing::warn;

use crate::common::strip_html_tags;
use crate::AdapterError;

/// Ítem de feed ya destilado a campos planos.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub guid: String,
    pub published: Option<DateTime<Utc>>,
    pub description: String,
    pub categories: Vec<String>,
    pub author: Option<String>,
}

/// Resultado de una cosecha RSS: incidentes + fecha más nueva vista.
#[derive(Debug, Default)]
pub struct RssHarvest {
    pub incidents: Vec<Incident>,
    pub newest_pubdate: Option<String>,
}

impl RssHarvest {
    pub fn observe_pubdate(&mut self, published: Option<DateTime<Utc>>) {
        if let Some(published) = published {
            let iso = published.format("%Y-%m-%d").to_string();
            match &self.newest_pubdate {
                Some(current) if *current >= iso => {}
                _ => self.newest_pubdate = Some(iso),
            }
        }
    }
}

/// Parsea el XML del feed hacia ítems planos.
pub fn parse_feed_items(xml: &str) -> Result<Vec<FeedItem>, AdapterError> {
    let feed = feed_parser::parse(xml.as_bytes())
        .map_err(|fault| AdapterError::PayloadShape(format!("feed parse: {}", fault)))?;

    let mut items = Vec::with_capacity(feed.entries.len());
    for entry in feed.entries {
        let title = entry
            .title
            .as_ref()
            .map(|text| text.content.trim().to_string())
            .unwrap_or_default();
        let link = entry
            .links
            .first()
            .map(|link| link.href.trim().to_string())
            .unwrap_or_default();

        if title.is_empty() || link.is_empty() {
            continue;
        }

        let guid = if entry.id.trim().is_empty() {
            link.clone()
        } else {
            entry.id.trim().to_string()
        };

        let description = entry
            .summary
            .as_ref()
            .map(|text| strip_html_tags(&text.content))
            .unwrap_or_default();

        let categories = entry
            .categories
            .iter()
            .map(|category| {
                category
                    .label
                    .clone()
                    .unwrap_or_else(|| category.term.clone())
            })
            .filter(|category| !category.trim().is_empty())
            .collect();

        let author = entry
            .authors
            .first()
            .map(|person| person.name.trim().to_string())
            .filter(|name| !name.is_empty());

        items.push(FeedItem {
            title,
            link,
            guid,
            published: entry.published.or(entry.updated),
            description,
            categories,
            author,
        });
    }

    Ok(items)
}

/// Ventana de antigüedad del ítem.
pub fn is_within_max_age(published: Option<DateTime<Utc>>, max_age_days: i64) -> bool {
    educti_core_normalize::dates::is_within_max_age(published, max_age_days)
}

/// Chequeo incremental: el ítem debe ser estrictamente más nuevo que la
/// marca de agua almacenada (`YYYY-MM-DD`).
pub fn is_newer_than_watermark(
    published: Option<DateTime<Utc>>,
    last_pubdate: Option<&str>,
) -> bool {
    let watermark = match last_pubdate {
        Some(raw) => raw,
        None => return true,
    };
    let published = match published {
        Some(published) => published,
        None => return true,
    };

    let watermark_prefix = watermark.get(..10).unwrap_or(watermark);
    match NaiveDate::parse_from_str(watermark_prefix, "%Y-%m-%d") {
        Ok(watermark_date) => {
            let threshold =
                Utc.from_utc_datetime(&watermark_date.and_hms_opt(0, 0, 0).expect("midnight"));
            published > threshold
        }
        Err(_) => {
            warn!("⚠️ [RSS]: Unreadable watermark '{}', treating item as new", watermark);
            true
        }
    }
}

/// ¿Las categorías del ítem identifican al sector educativo?
pub fn has_education_category(categories: &[String]) -> bool {
    const EDUCATION_CATEGORY_TOKENS: &[&str] = &[
        "education sector",
        "education",
        "university",
        "school",
        "college",
        "academic",
    ];

    categories.iter().any(|category| {
        let lowered = category.to_lowercase();
        EDUCATION_CATEGORY_TOKENS
            .iter()
            .any(|token| lowered.contains(token))
    })
}
