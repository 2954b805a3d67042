// [libs/infra/llm/src/errors.rs]
/*!
 * =================================================================
 * APARATO: LLM ERROR CATALOG (V4.1)
 * CLASIFICACIÓN: INFRASTRUCTURE CORE (ESTRATO L3)
 * RESPONSABILIDAD: SEMÁNTICA DE FALLOS DEL ENLACE CON EL MODELO
 * =================================================================
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    /// Fallo de transporte o respuesta HTTP no exitosa del endpoint.
    #[error("[L3_LLM_NET_FAULT]: MODEL_UPLINK_SEVERED -> {0}")]
    TransportError(String),

    /// Límite de tasa detectado en un intento individual (recuperable).
    #[error("[L3_LLM_RATE_FAULT]: RATE_LIMIT_SIGNALLED -> {0}")]
    RateLimited(String),

    /// Límite de tasa persistente tras agotar el backoff exponencial.
    /// Fatal para la pasada de enriquecimiento completa.
    #[error("[L3_LLM_RATE_FAULT]: RATE_LIMIT_EXHAUSTED_AFTER_{attempts} -> {detail}")]
    RateLimitExhausted { attempts: u32, detail: String },

    /// El sobre de respuesta no contenía contenido utilizable.
    #[error("[L3_LLM_ENVELOPE_FAULT]: EMPTY_MODEL_RESPONSE")]
    EmptyResponse,

    /// El contenido no pudo repararse hacia JSON válido.
    #[error("[L3_LLM_PARSE_FAULT]: JSON_RECOVERY_FAILED -> {0}")]
    ParseError(String),

    /// Configuración ausente (clave de API u host).
    #[error("[L3_LLM_CONFIG_FAULT]: STRATEGIC_ENV_VOID -> {0}")]
    ConfigurationError(String),
}

impl LlmError {
    /// ¿El fallo debe abortar la pasada de enriquecimiento completa?
    pub fn is_fatal_for_pass(&self) -> bool {
        matches!(self, LlmError::RateLimitExhausted { .. })
    }
}
