// [tests/mirror/libs/infra/llm/rate_limit_classification.test.rs]
/**
 * =================================================================
 * APARATO: RATE SHIELD CERTIFICATION (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-MIRROR
 * RESPONSABILIDAD: CLASIFICACIÓN Y ESCALERA DE BACKOFF DEL LÍMITE
 * =================================================================
 */

use educti_infra_llm::gateway::rate_limit_backoff_seconds;
use educti_infra_llm::{is_rate_limit_signature, LlmError};

#[test]
fn certify_rate_limit_signatures() {
    for signal in [
        "HTTP_429 -> too many requests",
        "Rate limit exceeded, retry later",
        "monthly quota exhausted",
        "request throttled by upstream",
        "request limit exceeded for tier",
    ] {
        assert!(is_rate_limit_signature(signal), "signal: {}", signal);
    }

    for benign in [
        "connection reset by peer",
        "HTTP_500 -> internal server error",
        "invalid model name",
        "timeout after 300s",
    ] {
        assert!(!is_rate_limit_signature(benign), "benign: {}", benign);
    }
}

#[test]
fn certify_backoff_ladder_is_exponential_and_capped() {
    // Escalera nominal: 2, 4, 8, 16, 32 segundos.
    assert_eq!(rate_limit_backoff_seconds(1), 2.0);
    assert_eq!(rate_limit_backoff_seconds(2), 4.0);
    assert_eq!(rate_limit_backoff_seconds(3), 8.0);
    assert_eq!(rate_limit_backoff_seconds(4), 16.0);
    assert_eq!(rate_limit_backoff_seconds(5), 32.0);

    // Techo duro de cinco minutos.
    assert_eq!(rate_limit_backoff_seconds(9), 300.0);
    assert_eq!(rate_limit_backoff_seconds(20), 300.0);
}

#[test]
fn certify_exhaustion_is_fatal_for_pass() {
    let exhausted = LlmError::RateLimitExhausted {
        attempts: 5,
        detail: "HTTP_429".into(),
    };
    assert!(exhausted.is_fatal_for_pass());

    assert!(!LlmError::RateLimited("HTTP_429".into()).is_fatal_for_pass());
    assert!(!LlmError::TransportError("reset".into()).is_fatal_for_pass());
    assert!(!LlmError::EmptyResponse.is_fatal_for_pass());
}
