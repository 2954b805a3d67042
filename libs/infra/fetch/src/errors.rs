// [libs/infra/fetch/src/errors.rs]
/*!
 * =================================================================
 * APARATO: FETCH ERROR CATALOG (V4.1)
 * CLASIFICACIÓN: INFRASTRUCTURE CORE (ESTRATO L3)
 * RESPONSABILIDAD: SEMÁNTICA DE FALLOS DE COSECHA Y EVASIÓN
 * =================================================================
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// Fallo de transporte transitorio (DNS, conexión, timeout).
    #[error("[L3_FETCH_NET_FAULT]: TRANSPORT_SEVERED -> {0}")]
    TransportError(String),

    /// El objetivo respondió con un estado de bloqueo (403/429/503)
    /// y la escalada a navegador también fue agotada.
    #[error("[L3_FETCH_WALL_FAULT]: BOT_WALL_UNBREACHED -> {url} (HTTP {status})")]
    BotWallError { url: String, status: u16 },

    /// Desafío CAPTCHA detectado: aborta la caminata de esa fuente.
    #[error("[L3_FETCH_WALL_FAULT]: CAPTCHA_ENCOUNTERED -> {0}")]
    CaptchaEncountered(String),

    /// Estado HTTP de error no contemplado por el llamador.
    #[error("[L3_FETCH_HTTP_FAULT]: STATUS_{status} -> {url}")]
    HttpStatus { url: String, status: u16 },

    /// Reintentos agotados sin respuesta utilizable.
    #[error("[L3_FETCH_NET_FAULT]: RETRIES_EXHAUSTED ({attempts}) -> {url}")]
    RetriesExhausted { url: String, attempts: u32 },

    /// El navegador sigiloso no pudo levantar o renderizar.
    #[error("[L3_FETCH_BROWSER_FAULT]: STEALTH_RENDER_FAILED -> {0}")]
    BrowserFault(String),

    /// El cuerpo recibido no pudo decodificarse como JSON.
    #[error("[L3_FETCH_DECODE_FAULT]: JSON_DECODE_FAILED -> {0}")]
    DecodeError(String),
}
