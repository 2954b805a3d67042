// [libs/infra/llm/src/gateway.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN MODEL UPLINK (V4.3 - BACKOFF SEALED)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: NEGOCIACIÓN RESILIENTE CON EL ENDPOINT DE CHAT
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DETERMINISTIC OUTPUT: temperatura fija 0.1 para extracción
 *    estructurada reproducible.
 * 2. RATE SHIELD: backoff exponencial min(2^k, 300s) para k ≤ 5; el
 *    quinto fallo consecutivo sella RateLimitExhausted (fatal).
 * 3. LINEAR RETRY: fallos ordinarios reintentan linealmente (1s × k).
 * =================================================================
 */

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

use crate::errors::LlmError;
use crate::repair::{extract_envelope_content, is_rate_limit_signature};

/// Máximo de errores de límite de tasa consecutivos antes de abortar.
const MAX_RATE_LIMIT_RETRIES: u32 = 5;
/// Base del backoff exponencial en segundos.
const RATE_LIMIT_BACKOFF_BASE_SECONDS: f64 = 2.0;
/// Techo del backoff: cinco minutos.
const RATE_LIMIT_BACKOFF_CAP_SECONDS: f64 = 300.0;

/// Configuración del enlace con el endpoint del modelo.
#[derive(Debug, Clone)]
pub struct LlmEndpointConfig {
    pub api_key: String,
    pub host: String,
    pub model: String,
    /// Reintentos lineales para fallos que no son límite de tasa.
    pub max_retries: u32,
}

impl LlmEndpointConfig {
    pub fn new(api_key: &str, host: &str, model: &str) -> Result<Self, LlmError> {
        if api_key.trim().is_empty() {
            return Err(LlmError::ConfigurationError(
                "LLM_API_KEY_UNDEFINED".into(),
            ));
        }
        Ok(Self {
            api_key: api_key.to_string(),
            host: host.trim_end_matches('/').to_string(),
            model: model.to_string(),
            max_retries: 2,
        })
    }
}

/// Pasarela sin estado hacia un endpoint de chat estilo Ollama.
pub struct OllamaGateway {
    network_session_client: Client,
    endpoint_config: LlmEndpointConfig,
}

impl OllamaGateway {
    pub fn new(endpoint_config: LlmEndpointConfig) -> Result<Self, LlmError> {
        let network_session_client = Client::builder()
            .timeout(Duration::from_secs(300))
            .user_agent("EduCTI-Enricher/V4")
            .build()
            .map_err(|fault| LlmError::TransportError(fault.to_string()))?;

        Ok(Self {
            network_session_client,
            endpoint_config,
        })
    }

    /**
     * Emite una llamada de chat individual y retorna el contenido crudo.
     *
     * # Errors:
     * - `RateLimited` cuando el proveedor señala saturación.
     * - `TransportError` para el resto de fallos de red o HTTP.
     */
    async fn chat_once(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        format_schema: Option<&Value>,
    ) -> Result<String, LlmError> {
        let endpoint = format!("{}/api/chat", self.endpoint_config.host);

        let mut request_body = json!({
            "model": self.endpoint_config.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt}
            ],
            "stream": false,
            "options": {"temperature": 0.1}
        });
        if let Some(schema) = format_schema {
            request_body["format"] = schema.clone();
        }

        let response = self
            .network_session_client
            .post(&endpoint)
            .bearer_auth(&self.endpoint_config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|fault| classify_transport_fault(&fault.to_string()))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|fault| LlmError::TransportError(fault.to_string()))?;

        if !status.is_success() {
            let detail = format!("HTTP_{} -> {}", status.as_u16(), truncate(&body_text, 200));
            return Err(classify_transport_fault(&detail));
        }

        let envelope: Value = serde_json::from_str(&body_text)
            .map_err(|fault| LlmError::TransportError(format!("ENVELOPE_DECODE: {}", fault)))?;

        extract_envelope_content(&envelope)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }

    /**
     * Extracción JSON con escudo de límite de tasa y reintento lineal.
     *
     * El backoff exponencial `min(2^k, 300s)` absorbe hasta
     * `MAX_RATE_LIMIT_RETRIES` señales consecutivas de saturación; la
     * siguiente sella `RateLimitExhausted` y el llamador debe abortar
     * la pasada completa.
     */
    #[instrument(skip_all)]
    pub async fn extract_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        format_schema: Option<&Value>,
    ) -> Result<String, LlmError> {
        let mut rate_limit_strikes: u32 = 0;
        let mut linear_attempt: u32 = 0;

        loop {
            debug!(
                "🛰️ [MODEL_UPLINK]: Dispatching extraction call (linear {}, rate strikes {})",
                linear_attempt, rate_limit_strikes
            );

            match self.chat_once(system_prompt, user_prompt, format_schema).await {
                Ok(content) => {
                    info!(
                        "✅ [MODEL_UPLINK]: Extraction content received ({} chars).",
                        content.len()
                    );
                    return Ok(content);
                }
                Err(LlmError::RateLimited(detail)) => {
                    rate_limit_strikes += 1;
                    if rate_limit_strikes >= MAX_RATE_LIMIT_RETRIES {
                        warn!(
                            "🛑 [RATE_SHIELD]: Limit persisted after {} strikes. Sealing pass abort.",
                            rate_limit_strikes
                        );
                        return Err(LlmError::RateLimitExhausted {
                            attempts: rate_limit_strikes,
                            detail,
                        });
                    }
                    let backoff_seconds = rate_limit_backoff_seconds(rate_limit_strikes);
                    warn!(
                        "⏳ [RATE_SHIELD]: Rate limit strike {}/{}. Holding {:.1}s...",
                        rate_limit_strikes, MAX_RATE_LIMIT_RETRIES, backoff_seconds
                    );
                    tokio::time::sleep(Duration::from_secs_f64(backoff_seconds)).await;
                }
                Err(fault) => {
                    linear_attempt += 1;
                    if linear_attempt > self.endpoint_config.max_retries {
                        return Err(fault);
                    }
                    let hold = Duration::from_secs_f64(linear_attempt as f64);
                    warn!(
                        "⚠️ [MODEL_UPLINK]: Attempt {}/{} failed ({}). Holding {:?}...",
                        linear_attempt, self.endpoint_config.max_retries, fault, hold
                    );
                    tokio::time::sleep(hold).await;
                }
            }
        }
    }
}

/// Escalera de espera del escudo de tasa: 2s, 4s, 8s, 16s, 32s... ≤ 300s.
pub fn rate_limit_backoff_seconds(strike: u32) -> f64 {
    RATE_LIMIT_BACKOFF_BASE_SECONDS
        .powi(strike as i32)
        .min(RATE_LIMIT_BACKOFF_CAP_SECONDS)
}

fn classify_transport_fault(detail: &str) -> LlmError {
    if is_rate_limit_signature(detail) {
        LlmError::RateLimited(detail.to_string())
    } else {
        LlmError::TransportError(detail.to_string())
    }
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
