// [tests/mirror/libs/core/normalize/date_precision.test.rs]
/**
 * =================================================================
 * APARATO: TEMPORAL CANONICALIZER CERTIFICATION (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-MIRROR
 * RESPONSABILIDAD: PRECISIÓN DE FECHAS HUMANAS, RSS E ISO
 * =================================================================
 */

use educti_core_normalize::dates::{
    dates_within_window, normalize_date_to_iso, parse_rfc822_datetime, parse_stored_date,
};
use educti_core_normalize::{parse_date_with_precision, DatePrecision};

#[test]
fn certify_day_level_formats() {
    for (raw, expected) in [
        ("April 17, 2025", "2025-04-17"),
        ("Apr 17, 2025", "2025-04-17"),
        ("10 December 2021", "2021-12-10"),
        ("10 Dec 2021", "2021-12-10"),
        ("2025-08-11", "2025-08-11"),
    ] {
        let (date, precision) = parse_date_with_precision(raw);
        assert_eq!(date.as_deref(), Some(expected), "raw: {}", raw);
        assert_eq!(precision, DatePrecision::Day, "raw: {}", raw);
    }
}

#[test]
fn certify_month_and_year_degradation() {
    let (month_date, month_precision) = parse_date_with_precision("December 2021");
    assert_eq!(month_date.as_deref(), Some("2021-12-01"));
    assert_eq!(month_precision, DatePrecision::Month);

    let (year_date, year_precision) = parse_date_with_precision("2021");
    assert_eq!(year_date.as_deref(), Some("2021-01-01"));
    assert_eq!(year_precision, DatePrecision::Year);
}

#[test]
fn certify_unparseable_input_yields_unknown() {
    let (date, precision) = parse_date_with_precision("sometime last autumn");
    assert!(date.is_none());
    assert_eq!(precision, DatePrecision::Unknown);

    let (empty_date, empty_precision) = parse_date_with_precision("   ");
    assert!(empty_date.is_none());
    assert_eq!(empty_precision, DatePrecision::Unknown);
}

#[test]
fn certify_rss_pubdate_formats() {
    let rfc822 = parse_rfc822_datetime("Wed, 19 Nov 2025 16:23:06 +0000").expect("rfc822");
    assert_eq!(rfc822.format("%Y-%m-%d").to_string(), "2025-11-19");

    let gmt = parse_rfc822_datetime("Wed, 19 Nov 2025 16:23:06 GMT").expect("gmt literal");
    assert_eq!(gmt.format("%Y-%m-%d").to_string(), "2025-11-19");

    let iso = parse_rfc822_datetime("2025-11-19T16:23:06Z").expect("iso");
    assert_eq!(iso.format("%H:%M").to_string(), "16:23");

    assert!(parse_rfc822_datetime("not a date").is_none());
}

#[test]
fn certify_publish_date_normalization_chain() {
    assert_eq!(
        normalize_date_to_iso("2025-11-19T16:23:06+00:00").as_deref(),
        Some("2025-11-19")
    );
    assert_eq!(normalize_date_to_iso("11/19/2025").as_deref(), Some("2025-11-19"));
    assert_eq!(
        normalize_date_to_iso("April 17, 2025").as_deref(),
        Some("2025-04-17")
    );
    assert!(normalize_date_to_iso("tomorrow-ish").is_none());
}

#[test]
fn certify_date_window_comparison() {
    let anchor = parse_stored_date("2025-01-01");
    let near = parse_stored_date("2025-01-10");
    let far = parse_stored_date("2025-03-01");

    assert!(dates_within_window(anchor, near, 14));
    assert!(!dates_within_window(anchor, far, 14));
    assert!(!dates_within_window(anchor, None, 14));
}
