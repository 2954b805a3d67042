// [tests/mirror/libs/infra/fetch/fetch_policy.test.rs]
/**
 * =================================================================
 * APARATO: FETCH POLICY CERTIFICATION (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-MIRROR
 * RESPONSABILIDAD: CORTESÍA, BACKOFF, MUROS Y SENTINELAS DE DESAFÍO
 * =================================================================
 */

use educti_infra_fetch::browser::BLOCK_INDICATORS;
use educti_infra_fetch::policy::{BLOCKED_STATUS_CODES, HTTP_USER_AGENTS, VIEWPORT_SIZES};
use educti_infra_fetch::{detect_captcha, looks_blocked, strip_wayback_toolbar, FetchClient, FetchPolicy};

#[test]
fn certify_retry_hold_is_linear_multiplied() {
    let policy = FetchPolicy::default();
    assert_eq!(policy.retry_hold_seconds(1), 1.5);
    assert_eq!(policy.retry_hold_seconds(2), 3.0);
    assert_eq!(policy.retry_hold_seconds(4), 6.0);
}

#[test]
fn certify_politeness_window_and_agent_pool() {
    let policy = FetchPolicy::default();
    assert!(policy.min_delay_seconds < policy.max_delay_seconds);
    assert_eq!(policy.request_timeout_seconds, 30);
    assert_eq!(policy.max_retries, 4);

    assert!(HTTP_USER_AGENTS.len() >= 4);
    assert!(HTTP_USER_AGENTS.iter().all(|agent| agent.starts_with("Mozilla/5.0")));
    assert!(!VIEWPORT_SIZES.is_empty());
}

#[test]
fn certify_blocked_status_catalogue() {
    for status in [403u16, 429, 503] {
        assert!(BLOCKED_STATUS_CODES.contains(&status));
    }
    assert!(!BLOCKED_STATUS_CODES.contains(&404));
    assert!(!BLOCKED_STATUS_CODES.contains(&500));
}

#[test]
fn certify_fresh_client_trusts_all_domains() {
    let client = FetchClient::with_defaults().expect("client builds");
    assert!(!client.should_use_browser_first("https://example.org/page"));
    assert!(!client.should_use_browser_first("not a url"));
}

#[test]
fn certify_block_indicator_scan() {
    assert!(looks_blocked("<html><body>Checking your browser before accessing…</body></html>"));
    assert!(looks_blocked("<html>Just a moment...</html>"));
    assert!(!looks_blocked("<html><article>University hit by ransomware</article></html>"));
    assert!(BLOCK_INDICATORS.contains(&"captcha"));
}

#[test]
fn certify_captcha_detection_by_text_and_overlay() {
    assert!(detect_captcha("<html>please verify you are human</html>"));
    assert!(detect_captcha(
        "<html><body><div class=\"g-recaptcha\" data-sitekey=\"x\"></div></body></html>"
    ));
    assert!(detect_captcha(
        "<html><body><iframe src=\"https://www.google.com/recaptcha/api2/anchor\"></iframe></body></html>"
    ));
    assert!(!detect_captcha(
        "<html><body><p>Routine security advisory for campus networks.</p></body></html>"
    ));
}

#[test]
fn certify_wayback_toolbar_strip() {
    let captured = format!(
        "<html><head></head><body>{}<div id=\"wm-ipp-base\">toolbar junk</div>{}<article>real content</article></body></html>",
        "<!-- BEGIN WAYBACK TOOLBAR INSERT -->", "<!-- END WAYBACK TOOLBAR INSERT -->"
    );
    let stripped = strip_wayback_toolbar(&captured);
    assert!(!stripped.contains("toolbar junk"));
    assert!(stripped.contains("real content"));

    // Sin marcadores, el documento queda intacto.
    let untouched = strip_wayback_toolbar("<html><body>plain</body></html>");
    assert_eq!(untouched, "<html><body>plain</body></html>");
}
