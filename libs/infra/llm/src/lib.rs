// [libs/infra/llm/src/lib.rs]
/*!
 * =================================================================
 * APARATO: LLM GATEWAY STRATUM (V4.1)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: ENLACE RESILIENTE CON EL MODELO DE LENGUAJE REMOTO
 * =================================================================
 */

pub mod errors;
pub mod gateway;
pub mod repair;

pub use errors::LlmError;
pub use gateway::{LlmEndpointConfig, OllamaGateway};
pub use repair::{is_rate_limit_signature, parse_json_lenient, recover_json_payload};
