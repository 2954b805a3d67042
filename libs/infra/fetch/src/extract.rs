// [libs/infra/fetch/src/extract.rs]
/*!
 * =================================================================
 * APARATO: ARTICLE EXTRACTION ENGINE (V4.4 - READABILITY CHAIN)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: DESTILACIÓN DEL TEXTO PRINCIPAL DE HTML ARBITRARIO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STRATEGY CHAIN: pasada de legibilidad plana → render de navegador
 *    sigiloso → espejo de archivo; la primera que produzca texto
 *    suficiente gana.
 * 2. SELECTOR LADDER: sitios específicos → patrones CMS → HTML5
 *    semántico → agregación de párrafos.
 * 3. ISO DATES: toda fecha de publicación se normaliza a YYYY-MM-DD.
 * =================================================================
 */

use educti_core_normalize::dates::normalize_date_to_iso;
use educti_domain_models::ArticleContent;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};

use crate::archive::fetch_archived_html;
use crate::client::FetchClient;

/// Umbral mínimo de texto; los sitios de nicho publican notas breves.
fn minimum_content_length(url: &str) -> usize {
    if url.to_lowercase().contains("databreaches.net") {
        50
    } else {
        100
    }
}

/// Escalera de selectores de contenido, ordenada por especificidad.
const CONTENT_SELECTORS: &[&str] = &[
    // --- SITIOS ESPECÍFICOS DEL SECTOR ---
    ".ArticleBase-BodyContent",
    "[data-testid='article-base-body-content']",
    ".articleBody",
    ".article_section",
    ".story-content",
    ".story-body",
    // --- PATRONES CMS (WordPress, Drupal, Ghost) ---
    "article .entry-content",
    ".entry-content",
    ".post-content",
    ".single-post-content",
    ".field--name-body",
    ".node__content",
    ".post-full-content",
    ".article-content",
    ".article-body",
    ".content-body",
    // --- HTML5 SEMÁNTICO ---
    "[itemprop='articleBody']",
    "[role='article']",
    "article section",
    "main article",
    "main .content",
    // --- PATRONES GENÉRICOS ---
    "[class*='article-body']",
    "[class*='article-content']",
    "[class*='post-body']",
    "[class*='post-content']",
    "[class*='story-body']",
    "[class*='entry-content']",
    "#article-body",
    "#article-content",
    "#post-content",
    "#main-content",
    // --- RED DE RESCATE ---
    "article",
    "main",
];

/// Ancestros que invalidan un nodo de texto (navegación, pies, anuncios).
const EXCLUDED_ANCESTORS: &[&str] = &["nav", "aside", "footer", "header", "form"];

const TITLE_SELECTORS: &[&str] = &[
    "h1.entry-title",
    "h1.post-title",
    "h1.article-title",
    "h1[class*='title']",
    "article h1",
    "h1",
];

const AUTHOR_SELECTORS: &[&str] = &[
    "[rel='author']",
    "[itemprop='author']",
    ".author",
    "[class*='author']",
];

const DATE_SELECTORS: &[&str] = &[
    "time[datetime]",
    "[itemprop='datePublished']",
    "[class*='published']",
    "[class*='date']",
];

pub struct ArticleExtractor<'a> {
    fetch_client: &'a FetchClient,
}

impl<'a> ArticleExtractor<'a> {
    pub fn new(fetch_client: &'a FetchClient) -> Self {
        Self { fetch_client }
    }

    /**
     * Destila un artículo a través de la cadena completa de estrategias.
     *
     * Nunca retorna error: un fallo total produce un `ArticleContent`
     * con `fetch_successful = false` y el diagnóstico acumulado.
     */
    #[instrument(skip(self))]
    pub async fn fetch_article(&self, url: &str) -> ArticleContent {
        let mut diagnostics: Vec<String> = Vec::new();

        // ESTRATEGIA 1: pasada de legibilidad sobre el canal plano.
        match self.fetch_client.get_html(url, false).await {
            Ok(html) => {
                if let Some(article) = extract_article_from_html(url, &html) {
                    debug!("📰 [EXTRACT]: Plain readability pass succeeded for {}", url);
                    return article;
                }
                diagnostics.push("readability_pass_insufficient".into());
            }
            Err(fault) => diagnostics.push(format!("plain_fetch: {}", fault)),
        }

        // ESTRATEGIA 2: render de navegador sigiloso + misma destilación.
        match self.fetch_client.render_via_browser(url).await {
            Ok(rendered) => {
                if let Some(article) = extract_article_from_html(url, &rendered) {
                    info!("🕶️ [EXTRACT]: Browser render recovered {}", url);
                    return article;
                }
                diagnostics.push("browser_render_insufficient".into());
            }
            Err(fault) => diagnostics.push(format!("browser: {}", fault)),
        }

        // ESTRATEGIA 3: espejo de archivo histórico.
        match fetch_archived_html(self.fetch_client, url).await {
            Ok(Some(archived)) => {
                if let Some(mut article) = extract_article_from_html(url, &archived) {
                    article.url = url.to_string();
                    info!("🏛️ [EXTRACT]: Archive mirror recovered {}", url);
                    return article;
                }
                diagnostics.push("archive_snapshot_insufficient".into());
            }
            Ok(None) => diagnostics.push("archive_snapshot_missing".into()),
            Err(fault) => diagnostics.push(format!("archive: {}", fault)),
        }

        warn!("❌ [EXTRACT]: All strategies failed for {}", url);
        ArticleContent::failed(url, &diagnostics.join("; "))
    }

    /// Cosecha secuencial de múltiples URLs (la cortesía manda).
    pub async fn fetch_multiple(&self, urls: &[String]) -> Vec<ArticleContent> {
        let mut articles = Vec::with_capacity(urls.len());
        for url in urls {
            articles.push(self.fetch_article(url).await);
        }
        articles
    }
}

/**
 * Pasada de legibilidad pura sobre un documento HTML ya cosechado.
 *
 * Retorna `None` si el texto destilado no alcanza el umbral mínimo.
 */
pub fn extract_article_from_html(url: &str, html: &str) -> Option<ArticleContent> {
    let document = Html::parse_document(html);

    let content = extract_main_content(&document);
    let cleaned = collapse_whitespace(&content);

    if cleaned.len() < minimum_content_length(url) {
        return None;
    }

    let title = extract_title(&document);
    let author = extract_author(&document);
    let publish_date = extract_publish_date(&document);
    let content_length = cleaned.len();

    Some(ArticleContent {
        url: url.to_string(),
        title,
        content: cleaned,
        author,
        publish_date,
        fetch_successful: true,
        error_message: None,
        content_length,
    })
}

fn element_has_excluded_ancestor(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| EXCLUDED_ANCESTORS.contains(&ancestor.value().name()))
}

fn extract_main_content(document: &Html) -> String {
    let text_nodes = Selector::parse("p, li, blockquote, h2, h3, h4").expect("static selector");
    let mut content_parts: Vec<String> = Vec::new();

    for selector_source in CONTENT_SELECTORS {
        let selector = match Selector::parse(selector_source) {
            Ok(selector) => selector,
            Err(_) => continue,
        };

        for container in document.select(&selector) {
            for element in container.select(&text_nodes) {
                if element_has_excluded_ancestor(&element) {
                    continue;
                }
                let text = collapse_whitespace(&element.text().collect::<String>());
                if text.len() > 40 && !content_parts.contains(&text) {
                    content_parts.push(text);
                }
            }
            if content_parts.iter().map(String::len).sum::<usize>() > 500 {
                break;
            }
        }

        if content_parts.iter().map(String::len).sum::<usize>() > 300 {
            break;
        }
    }

    // Agregación de párrafos: red de rescate cuando ningún contenedor calzó.
    if content_parts.iter().map(String::len).sum::<usize>() < 200 {
        let paragraph = Selector::parse("p").expect("static selector");
        for element in document.select(&paragraph) {
            if element_has_excluded_ancestor(&element) {
                continue;
            }
            let text = collapse_whitespace(&element.text().collect::<String>());
            if text.len() > 40 && !content_parts.contains(&text) {
                content_parts.push(text);
            }
        }
    }

    content_parts.join(" ")
}

fn extract_title(document: &Html) -> String {
    for selector_source in TITLE_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_source) {
            if let Some(element) = document.select(&selector).next() {
                let title = collapse_whitespace(&element.text().collect::<String>());
                if title.len() > 10 {
                    return title;
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("meta[property='og:title']") {
        if let Some(element) = document.select(&selector).next() {
            if let Some(content) = element.value().attr("content") {
                let title = content.trim().to_string();
                if !title.is_empty() {
                    return title;
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("title") {
        if let Some(element) = document.select(&selector).next() {
            return collapse_whitespace(&element.text().collect::<String>());
        }
    }

    String::new()
}

fn extract_author(document: &Html) -> Option<String> {
    for selector_source in AUTHOR_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_source) {
            if let Some(element) = document.select(&selector).next() {
                let author = collapse_whitespace(&element.text().collect::<String>());
                if !author.is_empty() && author.len() < 120 {
                    return Some(author);
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("meta[name='author']") {
        if let Some(element) = document.select(&selector).next() {
            if let Some(content) = element.value().attr("content") {
                let author = content.trim();
                if !author.is_empty() {
                    return Some(author.to_string());
                }
            }
        }
    }

    None
}

fn extract_publish_date(document: &Html) -> Option<String> {
    let mut raw_date: Option<String> = None;

    for selector_source in DATE_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_source) {
            if let Some(element) = document.select(&selector).next() {
                let candidate = element
                    .value()
                    .attr("datetime")
                    .map(str::to_string)
                    .unwrap_or_else(|| collapse_whitespace(&element.text().collect::<String>()));
                if !candidate.is_empty() {
                    raw_date = Some(candidate);
                    break;
                }
            }
        }
    }

    if raw_date.is_none() {
        for meta_selector in [
            "meta[property='article:published_time']",
            "meta[name='date']",
            "meta[name='pubdate']",
        ] {
            if let Ok(selector) = Selector::parse(meta_selector) {
                if let Some(element) = document.select(&selector).next() {
                    if let Some(content) = element.value().attr("content") {
                        if !content.trim().is_empty() {
                            raw_date = Some(content.trim().to_string());
                            break;
                        }
                    }
                }
            }
        }
    }

    let raw = raw_date?;
    normalize_date_to_iso(&raw).or(Some(raw))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
