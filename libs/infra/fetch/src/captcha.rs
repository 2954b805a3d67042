// [libs/infra/fetch/src/captcha.rs]
/*!
 * =================================================================
 * APARATO: CAPTCHA SENTINEL (V4.1)
 * CLASIFICACIÓN: INFRASTRUCTURE CORE (ESTRATO L3)
 * RESPONSABILIDAD: CLASIFICACIÓN DE DESAFÍOS HUMANOS EN HTML
 * =================================================================
 */

use scraper::{Html, Selector};

/// Marcadores textuales de desafío humano.
const CAPTCHA_TEXT_MARKERS: &[&str] = &[
    "captcha",
    "are you a robot",
    "verify you are human",
    "unusual traffic",
    "security check",
    "prove you are not a robot",
];

/// Selectores de overlays de desafío conocidos.
const CAPTCHA_OVERLAY_SELECTORS: &[&str] = &[
    ".g-recaptcha",
    "#recaptcha",
    "iframe[src*='recaptcha']",
    ".h-captcha",
    "iframe[src*='hcaptcha']",
    "#challenge-form",
    "#cf-challenge-running",
    ".cf-turnstile",
];

/**
 * ¿La página presenta un desafío CAPTCHA?
 *
 * La detección positiva aborta la caminata completa de esa fuente: un
 * desafío no se resuelve con reintentos, solo quema reputación.
 */
pub fn detect_captcha(html: &str) -> bool {
    let lowered = html.to_lowercase();
    if CAPTCHA_TEXT_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        return true;
    }

    let document = Html::parse_document(html);
    CAPTCHA_OVERLAY_SELECTORS.iter().any(|selector_source| {
        Selector::parse(selector_source)
            .map(|selector| document.select(&selector).next().is_some())
            .unwrap_or(false)
    })
}
