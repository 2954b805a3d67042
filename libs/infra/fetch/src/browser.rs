// [libs/infra/fetch/src/browser.rs]
/*!
 * =================================================================
 * APARATO: STEALTH BROWSER CHANNEL (V4.3 - GHOST PROTOCOL)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: RENDERIZADO EVASIVO PARA MUROS DE BOTS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FINGERPRINT SCRAMBLE: viewport y agente aleatorios, banderas de
 *    automatización ocultas, propiedades de navigator sobreescritas.
 * 2. CONSENT SWEEP: barrido de banners de cookies y overlays de
 *    publicidad por lista de selectores conocidos.
 * 3. HUMAN ECHO: scrolls y pausas aleatorias que imitan lectura.
 * 4. ESCALATION: sigiloso → espera larga → navegador visible.
 * =================================================================
 */

use std::ffi::OsStr;
use std::thread;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::policy::{BOT_EVASION_USER_AGENTS, VIEWPORT_SIZES};

/// Marcadores textuales de páginas de bloqueo o desafío.
pub const BLOCK_INDICATORS: &[&str] = &[
    "access denied",
    "bot detected",
    "captcha",
    "please verify",
    "checking your browser",
    "just a moment",
    "ddos protection",
];

/// Selectores de botones de consentimiento de cookies, por especificidad.
const CONSENT_SELECTORS: &[&str] = &[
    "#onetrust-accept-btn-handler",
    ".onetrust-accept-btn-handler",
    "#CybotCookiebotDialogBodyLevelButtonLevelOptinAllowAll",
    "#CybotCookiebotDialogBodyButtonAccept",
    ".evidon-banner-acceptbutton",
    ".sp_choice_type_11",
    ".truste_accept_btn",
    "#truste-consent-button",
    ".qc-cmp2-summary-buttons button:first-child",
    ".cc-accept",
    ".cc-btn.cc-allow",
    "#accept-cookies",
    ".accept-cookies",
    "button[data-action='accept']",
    "[aria-label='Accept all']",
    "[aria-label*='Accept cookies']",
];

/// Selectores de cierre de popups y overlays publicitarios.
const OVERLAY_CLOSE_SELECTORS: &[&str] = &[
    ".pum-close",
    ".popmake-close",
    ".modal-close",
    ".popup-close",
    ".overlay-close",
    "[aria-label='Close']",
    ".newsletter-close",
    ".dismiss-button",
    ".ad-close",
];

/// Un intento individual del canal de navegador.
#[derive(Debug, Clone, Copy)]
pub struct BrowserAttempt {
    pub headless: bool,
    pub wait_seconds: u64,
}

/// Plan de escalada del canal completo.
#[derive(Debug, Clone)]
pub struct BrowserAttemptPlan {
    pub attempts: Vec<BrowserAttempt>,
}

impl BrowserAttemptPlan {
    /// Sigiloso → espera larga → visible (solo para dominios castigados).
    pub fn escalating(aggressive_target: bool) -> Self {
        let mut attempts = vec![
            BrowserAttempt { headless: true, wait_seconds: 15 },
            BrowserAttempt { headless: true, wait_seconds: 25 },
        ];
        if aggressive_target {
            attempts.push(BrowserAttempt { headless: false, wait_seconds: 30 });
        }
        Self { attempts }
    }
}

/// ¿El HTML renderizado corresponde a una página de bloqueo?
pub fn looks_blocked(rendered_html: &str) -> bool {
    let lowered = rendered_html.to_lowercase();
    BLOCK_INDICATORS
        .iter()
        .any(|indicator| lowered.contains(indicator))
}

/**
 * Renderiza una URL a través del plan de escalada del navegador.
 *
 * Función bloqueante: el llamador la ejecuta bajo `spawn_blocking`.
 * Retorna el HTML renderizado o el diagnóstico del último intento.
 */
pub fn render_with_stealth_browser(
    url: &str,
    plan: BrowserAttemptPlan,
) -> Result<String, String> {
    let mut last_fault = String::from("NO_ATTEMPTS_PLANNED");

    for (index, attempt) in plan.attempts.iter().enumerate() {
        info!(
            "🕶️ [GHOST]: Browser attempt {}/{} for {} (headless={}, wait={}s)",
            index + 1,
            plan.attempts.len(),
            url,
            attempt.headless,
            attempt.wait_seconds
        );

        match render_single_attempt(url, *attempt) {
            Ok(html) => {
                if looks_blocked(&html) {
                    warn!("🧱 [GHOST]: Block indicators present after render of {}", url);
                    last_fault = format!("BLOCK_INDICATORS_PRESENT: {}", url);
                    continue;
                }
                return Ok(html);
            }
            Err(detail) => {
                warn!("⚠️ [GHOST]: Attempt {} failed: {}", index + 1, detail);
                last_fault = detail;
            }
        }
    }

    Err(last_fault)
}

fn render_single_attempt(url: &str, attempt: BrowserAttempt) -> Result<String, String> {
    let (viewport_width, viewport_height) = {
        let mut rng = rand::thread_rng();
        *VIEWPORT_SIZES.choose(&mut rng).unwrap_or(&(1920, 1080))
    };
    let user_agent = {
        let mut rng = rand::thread_rng();
        BOT_EVASION_USER_AGENTS
            .choose(&mut rng)
            .copied()
            .unwrap_or(BOT_EVASION_USER_AGENTS[0])
    };

    let launch_arguments: Vec<&OsStr> = vec![
        OsStr::new("--disable-blink-features=AutomationControlled"),
        OsStr::new("--disable-infobars"),
        OsStr::new("--disable-popup-blocking"),
        OsStr::new("--disable-notifications"),
        OsStr::new("--lang=en-US,en"),
    ];

    let launch_options = LaunchOptions::default_builder()
        .headless(attempt.headless)
        .sandbox(false)
        .window_size(Some((viewport_width, viewport_height)))
        .args(launch_arguments)
        .idle_browser_timeout(Duration::from_secs(attempt.wait_seconds + 60))
        .build()
        .map_err(|fault| format!("LAUNCH_OPTIONS: {}", fault))?;

    let browser =
        Browser::new(launch_options).map_err(|fault| format!("BROWSER_IGNITION: {}", fault))?;
    let tab = browser
        .new_tab()
        .map_err(|fault| format!("TAB_SPAWN: {}", fault))?;

    tab.set_user_agent(user_agent, Some("en-US,en"), None)
        .map_err(|fault| format!("UA_OVERRIDE: {}", fault))?;

    // Ocultamos las huellas de automatización antes de navegar.
    let _ = tab.evaluate(
        "Object.defineProperty(navigator, 'webdriver', {get: () => undefined}); \
         Object.defineProperty(navigator, 'plugins', {get: () => [1, 2, 3, 4, 5]}); \
         Object.defineProperty(navigator, 'languages', {get: () => ['en-US', 'en']}); \
         window.chrome = { runtime: {} };",
        false,
    );

    tab.navigate_to(url)
        .map_err(|fault| format!("NAVIGATE: {}", fault))?;
    tab.wait_until_navigated()
        .map_err(|fault| format!("NAVIGATION_WAIT: {}", fault))?;

    tab.wait_for_element_with_custom_timeout("body", Duration::from_secs(attempt.wait_seconds))
        .map_err(|fault| format!("BODY_WAIT: {}", fault))?;

    human_pause(2.0, 4.0);
    sweep_consent_banners(&tab);
    human_pause(1.0, 2.0);
    sweep_overlays(&tab);
    simulate_reading(&tab);
    human_pause(1.0, 2.0);
    sweep_overlays(&tab);
    sweep_consent_banners(&tab);

    tab.get_content()
        .map_err(|fault| format!("CONTENT_CAPTURE: {}", fault))
}

fn sweep_consent_banners(tab: &headless_chrome::Tab) {
    for selector in CONSENT_SELECTORS {
        if let Ok(elements) = tab.find_elements(selector) {
            for element in elements {
                if element.click().is_ok() {
                    debug!("🍪 [GHOST]: Consent accepted via {}", selector);
                    thread::sleep(Duration::from_millis(500));
                    return;
                }
            }
        }
    }
}

fn sweep_overlays(tab: &headless_chrome::Tab) {
    let mut closed = 0u32;
    for selector in OVERLAY_CLOSE_SELECTORS {
        if let Ok(elements) = tab.find_elements(selector) {
            for element in elements {
                if element.click().is_ok() {
                    closed += 1;
                    thread::sleep(Duration::from_millis(300));
                }
            }
        }
    }
    if closed == 0 {
        // Escape cierra la mayoría de los modales restantes.
        let _ = tab.press_key("Escape");
    } else {
        debug!("🧹 [GHOST]: Closed {} overlay(s)", closed);
    }
}

/// Eco humano: scroll de lectura con retroceso parcial.
fn simulate_reading(tab: &headless_chrome::Tab) {
    let scroll_amount = {
        let mut rng = rand::thread_rng();
        rng.gen_range(100..500)
    };
    let _ = tab.evaluate(&format!("window.scrollBy(0, {});", scroll_amount), false);
    human_pause(0.5, 1.0);
    let _ = tab.evaluate(
        &format!("window.scrollBy(0, -{});", scroll_amount / 2),
        false,
    );
}

fn human_pause(min_seconds: f64, max_seconds: f64) {
    let hold = {
        let mut rng = rand::thread_rng();
        rng.gen_range(min_seconds..=max_seconds)
    };
    thread::sleep(Duration::from_secs_f64(hold));
}
