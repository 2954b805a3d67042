// [libs/core/normalize/src/pagination.rs]
/*!
 * =================================================================
 * APARATO: ARCHIVE PAGINATION PROBE (V4.0)
 * CLASIFICACIÓN: CORE UTILITY (ESTRATO L1)
 * RESPONSABILIDAD: DESCUBRIMIENTO DEL ÚLTIMO FOLIO EN ARCHIVOS WEB
 * =================================================================
 */

use scraper::{ElementRef, Selector};

/// Máximo folio numérico dentro de un bloque `ul.page-numbers` (WordPress).
///
/// Considera tanto el texto de cada nodo como el último segmento numérico
/// del `href`. Sin bloque de paginación, el archivo tiene una sola página.
pub fn extract_last_page_from_numbers(pagination_root: Option<ElementRef<'_>>) -> u32 {
    let root = match pagination_root {
        Some(root) => root,
        None => return 1,
    };

    let node_selector = Selector::parse(".page-numbers").expect("static selector");
    let mut max_page: u32 = 1;

    for node in root.select(&node_selector) {
        let text = node.text().collect::<String>();
        let trimmed = text.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(page) = trimmed.parse::<u32>() {
                max_page = max_page.max(page);
            }
            continue;
        }

        if let Some(href) = node.value().attr("href") {
            let last_segment = href.trim_end_matches('/').rsplit('/').next().unwrap_or("");
            if !last_segment.is_empty() && last_segment.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(page) = last_segment.parse::<u32>() {
                    max_page = max_page.max(page);
                }
            }
        }
    }

    max_page
}

/// Máximo folio para paginadores estilo Algolia: el número vive dentro de
/// un atributo (`aria-label="Page 50"` o similar).
pub fn extract_last_page_from_attr(pagination_root: Option<ElementRef<'_>>, attr_name: &str) -> u32 {
    let root = match pagination_root {
        Some(root) => root,
        None => return 1,
    };

    let labeled_selector = Selector::parse("[aria-label]").expect("static selector");
    let mut max_page: u32 = 1;

    for node in root.select(&labeled_selector) {
        let label = node.value().attr(attr_name).unwrap_or("");
        let numeric_tokens: Vec<u32> = label
            .split_whitespace()
            .filter_map(|token| {
                let cleaned = token.trim_matches(|c: char| !c.is_ascii_digit());
                if cleaned.is_empty() {
                    None
                } else {
                    cleaned.parse::<u32>().ok()
                }
            })
            .collect();
        if let Some(last) = numeric_tokens.last() {
            max_page = max_page.max(*last);
        }
    }

    max_page
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn wordpress_page_numbers_resolve_highest() {
        let html = Html::parse_fragment(
            r#"<ul class="page-numbers">
                <li><span class="page-numbers current">1</span></li>
                <li><a class="page-numbers" href="/category/education/page/2/">2</a></li>
                <li><a class="page-numbers" href="/category/education/page/57/">57</a></li>
                <li><a class="next page-numbers" href="/category/education/page/2/">Next</a></li>
            </ul>"#,
        );
        let selector = Selector::parse("ul.page-numbers").unwrap();
        let root = html.select(&selector).next();
        assert_eq!(extract_last_page_from_numbers(root), 57);
    }

    #[test]
    fn algolia_aria_labels_resolve_highest() {
        let html = Html::parse_fragment(
            r#"<ul class="ais-Pagination-list">
                <li><a aria-label="Page 1" href="?page=1">1</a></li>
                <li><a aria-label="Last Page, Page 50" href="?page=50">50</a></li>
            </ul>"#,
        );
        let selector = Selector::parse("ul.ais-Pagination-list").unwrap();
        let root = html.select(&selector).next();
        assert_eq!(extract_last_page_from_attr(root, "aria-label"), 50);
    }

    #[test]
    fn missing_pagination_defaults_to_single_page() {
        assert_eq!(extract_last_page_from_numbers(None), 1);
    }
}
