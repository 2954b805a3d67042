// [libs/infra/llm/src/repair.rs]
/*!
 * =================================================================
 * APARATO: JSON ENVELOPE SURGEON (V4.2)
 * CLASIFICACIÓN: INFRASTRUCTURE CORE (ESTRATO L3)
 * RESPONSABILIDAD: RECUPERACIÓN DETERMINISTA DEL PAYLOAD JSON
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FENCE STRIPPING: descarta cercas markdown ```json ... ```.
 * 2. BRACE SLICING: aísla el primer objeto balanceado del contenido.
 * 3. ESCAPE REPAIR: corrige `\'` y comillas doblemente escapadas que
 *    los modelos emiten con frecuencia.
 * =================================================================
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::errors::LlmError;

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*\})\s*```").expect("static regex")
});

/// Firmas textuales que clasifican un fallo como límite de tasa.
const RATE_LIMIT_SIGNATURES: &[&str] = &[
    "rate limit",
    "rate_limit",
    "too many requests",
    "429",
    "quota",
    "throttle",
    "limit exceeded",
    "request limit",
];

/// ¿El mensaje de error corresponde a un límite de tasa del proveedor?
pub fn is_rate_limit_signature(error_text: &str) -> bool {
    let lowered = error_text.to_lowercase();
    RATE_LIMIT_SIGNATURES
        .iter()
        .any(|signature| lowered.contains(signature))
}

/// Extrae el contenido textual del sobre `message.content` del endpoint.
pub fn extract_envelope_content(envelope: &Value) -> Option<String> {
    if let Some(content) = envelope
        .get("message")
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
    {
        return Some(content.to_string());
    }
    if let Some(content) = envelope.get("content").and_then(Value::as_str) {
        return Some(content.to_string());
    }
    if let Some(content) = envelope.get("response").and_then(Value::as_str) {
        return Some(content.to_string());
    }
    None
}

/// Aísla el bloque JSON dentro del contenido crudo del modelo.
pub fn recover_json_payload(raw_content: &str) -> String {
    let trimmed = raw_content.trim();

    if let Some(captured) = FENCED_BLOCK.captures(trimmed) {
        return captured[1].trim().to_string();
    }

    // Rebanado de llaves: primer '{' hasta su cierre balanceado.
    if let Some(start) = trimmed.find('{') {
        let mut depth = 0usize;
        let mut inside_string = false;
        let mut escaped = false;
        for (offset, ch) in trimmed[start..].char_indices() {
            if inside_string {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == '"' {
                    inside_string = false;
                }
                continue;
            }
            match ch {
                '"' => inside_string = true,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return trimmed[start..start + offset + ch.len_utf8()].to_string();
                    }
                }
                _ => {}
            }
        }
        return trimmed[start..].to_string();
    }

    trimmed.to_string()
}

/// Parseo permisivo con reparación de errores de escapado frecuentes.
///
/// Cadena de intentos: texto tal cual → `\'` reparado → comillas
/// doblemente escapadas colapsadas.
pub fn parse_json_lenient(raw_content: &str) -> Result<Value, LlmError> {
    let payload = recover_json_payload(raw_content);

    if let Ok(parsed) = serde_json::from_str::<Value>(&payload) {
        return Ok(parsed);
    }

    let fixed_single_quotes = payload.replace("\\'", "'");
    if let Ok(parsed) = serde_json::from_str::<Value>(&fixed_single_quotes) {
        return Ok(parsed);
    }

    let fixed_double_escapes = fixed_single_quotes.replace("\\\\\"", "\\\"");
    if let Ok(parsed) = serde_json::from_str::<Value>(&fixed_double_escapes) {
        return Ok(parsed);
    }

    let preview: String = payload.chars().take(240).collect();
    Err(LlmError::ParseError(preview))
}
