// [libs/infra/fetch/src/client.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN HARVEST CLIENT (V4.4 - WALL BREACHER)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: COSECHA HTTP CON EVASIÓN ESCALONADA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. POLITENESS: retardo aleatorio ∈ [min, max] antes de cada llamada
 *    plana; los objetivos no distinguen la cosecha de un lector humano.
 * 2. WALL ESCALATION: 403/429/503 marcan el dominio y escalan al canal
 *    de navegador sigiloso; dos fallos previos invierten el orden.
 * 3. LINEAR-MULT BACKOFF: espera base × intento para fallos
 *    transitorios, hasta `max_retries`.
 * =================================================================
 */

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONNECTION, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::browser::{render_with_stealth_browser, BrowserAttemptPlan};
use crate::errors::FetchError;
use crate::policy::{FetchPolicy, BLOCKED_STATUS_CODES, DOMAIN_FAILURE_THRESHOLD, HTTP_USER_AGENTS};

/// Respuesta plana del canal HTTP directo.
#[derive(Debug, Clone)]
pub struct HttpPayload {
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Opciones de una llamada GET individual.
#[derive(Debug, Clone, Default)]
pub struct GetOptions {
    /// Estados ≥ 400 tolerados sin reintento (p. ej. 429 para APIs).
    pub allow_status: Vec<u16>,
    /// Un 404 retorna `None` en lugar de error.
    pub allow_404: bool,
}

pub struct FetchClient {
    network_session_client: Client,
    politeness_policy: FetchPolicy,
    /// Contador de fallos por dominio para invertir el orden de canales.
    failed_domain_ledger: Mutex<HashMap<String, u32>>,
}

impl FetchClient {
    pub fn new(politeness_policy: FetchPolicy) -> Result<Self, FetchError> {
        let network_session_client = Client::builder()
            .timeout(Duration::from_secs(politeness_policy.request_timeout_seconds))
            .gzip(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|fault| FetchError::TransportError(fault.to_string()))?;

        Ok(Self {
            network_session_client,
            politeness_policy,
            failed_domain_ledger: Mutex::new(HashMap::new()),
        })
    }

    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(FetchPolicy::default())
    }

    /// Cabeceras de navegador con agente rotado aleatoriamente.
    fn random_headers(&self) -> HeaderMap {
        let user_agent = {
            let mut rng = rand::thread_rng();
            HTTP_USER_AGENTS
                .choose(&mut rng)
                .copied()
                .unwrap_or(HTTP_USER_AGENTS[0])
        };

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(user_agent));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
        headers
    }

    /// Retardo de cortesía con jitter uniforme.
    async fn politeness_hold(&self) {
        let jitter_seconds = {
            let mut rng = rand::thread_rng();
            rng.gen_range(
                self.politeness_policy.min_delay_seconds..=self.politeness_policy.max_delay_seconds,
            )
        };
        tokio::time::sleep(Duration::from_secs_f64(jitter_seconds)).await;
    }

    fn domain_of(url: &str) -> String {
        Url::parse(url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(|host| host.to_lowercase()))
            .unwrap_or_default()
    }

    fn mark_domain_failed(&self, url: &str) {
        let domain = Self::domain_of(url);
        if domain.is_empty() {
            return;
        }
        let mut ledger = self.failed_domain_ledger.lock().expect("ledger mutex");
        *ledger.entry(domain).or_insert(0) += 1;
    }

    /// ¿El dominio acumuló suficientes fallos para ir directo al navegador?
    pub fn should_use_browser_first(&self, url: &str) -> bool {
        let domain = Self::domain_of(url);
        if domain.is_empty() {
            return false;
        }
        let ledger = self.failed_domain_ledger.lock().expect("ledger mutex");
        ledger
            .get(&domain)
            .map(|count| *count >= DOMAIN_FAILURE_THRESHOLD)
            .unwrap_or(false)
    }

    /**
     * GET plano con reintentos y backoff lineal-multiplicado.
     *
     * Retorna `Ok(None)` solo cuando `allow_404` está activo y el
     * objetivo respondió 404.
     */
    #[instrument(skip(self, options))]
    pub async fn get(
        &self,
        url: &str,
        options: &GetOptions,
    ) -> Result<Option<HttpPayload>, FetchError> {
        let mut attempt: u32 = 0;

        loop {
            self.politeness_hold().await;

            let outcome = self
                .network_session_client
                .get(url)
                .headers(self.random_headers())
                .send()
                .await;

            let response = match outcome {
                Ok(response) => response,
                Err(fault) => {
                    attempt += 1;
                    if attempt > self.politeness_policy.max_retries {
                        return Err(FetchError::RetriesExhausted {
                            url: url.to_string(),
                            attempts: attempt,
                        });
                    }
                    let hold = self.politeness_policy.retry_hold_seconds(attempt);
                    warn!("⚠️ [HARVEST]: Transport fault on {} ({}). Holding {:.1}s...", url, fault, hold);
                    tokio::time::sleep(Duration::from_secs_f64(hold)).await;
                    continue;
                }
            };

            let status = response.status().as_u16();

            if options.allow_404 && status == 404 {
                return Ok(None);
            }

            if status >= 400 && !options.allow_status.contains(&status) {
                attempt += 1;
                if attempt > self.politeness_policy.max_retries {
                    return Err(FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                    });
                }
                let hold = self.politeness_policy.retry_hold_seconds(attempt);
                debug!("⚠️ [HARVEST]: HTTP {} on {}. Holding {:.1}s...", status, url, hold);
                tokio::time::sleep(Duration::from_secs_f64(hold)).await;
                continue;
            }

            let final_url = response.url().to_string();
            let body = response
                .text()
                .await
                .map_err(|fault| FetchError::TransportError(fault.to_string()))?;

            return Ok(Some(HttpPayload {
                url: final_url,
                status,
                body,
            }));
        }
    }

    /// GET de un endpoint JSON (APIs sectoriales); tolera 429 con reintento.
    #[instrument(skip(self))]
    pub async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let payload = self
            .get(
                url,
                &GetOptions {
                    allow_status: vec![429],
                    allow_404: false,
                },
            )
            .await?
            .ok_or_else(|| FetchError::TransportError(format!("EMPTY_PAYLOAD: {}", url)))?;

        if payload.status == 429 {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: 429,
            });
        }

        serde_json::from_str(&payload.body)
            .map_err(|fault| FetchError::DecodeError(format!("{} -> {}", url, fault)))
    }

    /**
     * Obtiene el HTML de una página con evasión escalonada.
     *
     * Estrategia: canal plano primero (salvo dominios castigados), y ante
     * estados de bloqueo o fallo de transporte, escalada al navegador
     * sigiloso en tres intentos (sigiloso, espera larga, visible).
     */
    #[instrument(skip(self))]
    pub async fn get_html(&self, url: &str, use_browser_fallback: bool) -> Result<String, FetchError> {
        let browser_allowed =
            use_browser_fallback && self.politeness_policy.browser_fallback_enabled;

        if browser_allowed && self.should_use_browser_first(url) {
            info!("🕶️ [HARVEST]: Punished domain; engaging stealth browser first for {}", url);
            return self.render_via_browser(url).await;
        }

        self.politeness_hold().await;
        let outcome = self
            .network_session_client
            .get(url)
            .headers(self.random_headers())
            .send()
            .await;

        match outcome {
            Ok(response) => {
                let status = response.status().as_u16();
                if BLOCKED_STATUS_CODES.contains(&status) {
                    self.mark_domain_failed(url);
                    if browser_allowed {
                        info!("🧱 [HARVEST]: Blocked ({}) on {}. Escalating to stealth browser...", status, url);
                        return self.render_via_browser(url).await;
                    }
                    return Err(FetchError::BotWallError {
                        url: url.to_string(),
                        status,
                    });
                }
                if status >= 400 {
                    return Err(FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                    });
                }
                response
                    .text()
                    .await
                    .map_err(|fault| FetchError::TransportError(fault.to_string()))
            }
            Err(fault) => {
                warn!("⚠️ [HARVEST]: Transport fault on {}: {}", url, fault);
                if browser_allowed {
                    self.render_via_browser(url).await
                } else {
                    Err(FetchError::TransportError(fault.to_string()))
                }
            }
        }
    }

    /**
     * Variante con validación semántica del contenido: si el predicado
     * rechaza el documento plano, se re-intenta por el canal de
     * navegador (el contenido era probablemente renderizado en cliente).
     */
    pub async fn get_html_checked<F>(
        &self,
        url: &str,
        use_browser_fallback: bool,
        content_check: F,
    ) -> Result<String, FetchError>
    where
        F: Fn(&str) -> bool,
    {
        let html = self.get_html(url, use_browser_fallback).await?;
        if content_check(&html) {
            return Ok(html);
        }

        if use_browser_fallback && self.politeness_policy.browser_fallback_enabled {
            info!("🔁 [HARVEST]: Content check failed for {}. Re-rendering via browser...", url);
            let rendered = self.render_via_browser(url).await?;
            if content_check(&rendered) {
                return Ok(rendered);
            }
            warn!("⚠️ [HARVEST]: Browser render also failed the content check for {}", url);
        }

        Err(FetchError::TransportError(format!(
            "CONTENT_CHECK_REJECTED: {}",
            url
        )))
    }

    /// Escalada completa del canal de navegador (tres intentos).
    pub async fn render_via_browser(&self, url: &str) -> Result<String, FetchError> {
        let aggressive = self.should_use_browser_first(url);
        let target = url.to_string();

        let rendered = tokio::task::spawn_blocking(move || {
            render_with_stealth_browser(&target, BrowserAttemptPlan::escalating(aggressive))
        })
        .await
        .map_err(|join_fault| FetchError::BrowserFault(join_fault.to_string()))?;

        match rendered {
            Ok(html) => Ok(html),
            Err(detail) => {
                self.mark_domain_failed(url);
                Err(FetchError::BrowserFault(detail))
            }
        }
    }
}
