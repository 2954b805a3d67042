// [tests/mirror/apps/pipeline/scheduler_cadence.test.rs]
/**
 * =================================================================
 * APARATO: SCHEDULER CADENCE CERTIFICATION (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L4-MIRROR
 * RESPONSABILIDAD: VENCIMIENTO DE TRABAJOS RSS Y SEMANAL
 * =================================================================
 */

use chrono::{NaiveTime, TimeZone, Utc, Weekday};
use educti_pipeline::scheduler::{rss_job_due, weekly_job_due};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single().expect("valid timestamp")
}

#[test]
fn certify_rss_interval_cadence() {
    let last_run = at(2025, 1, 5, 10, 0);

    // Una hora después con intervalo de dos: aún no vence.
    assert!(!rss_job_due(at(2025, 1, 5, 11, 0), 2, Some(last_run)));
    // Exactamente dos horas: vence.
    assert!(rss_job_due(at(2025, 1, 5, 12, 0), 2, Some(last_run)));
    assert!(rss_job_due(at(2025, 1, 5, 15, 30), 2, Some(last_run)));
    // Sin ancla previa el llamador decide; la función reporta vencido.
    assert!(rss_job_due(at(2025, 1, 5, 11, 0), 2, None));
}

#[test]
fn certify_weekly_day_and_time_gate() {
    let two_am = NaiveTime::from_hms_opt(2, 0, 0).unwrap();

    // 2025-01-05 es domingo.
    let sunday_0130 = at(2025, 1, 5, 1, 30);
    let sunday_0200 = at(2025, 1, 5, 2, 0);
    let sunday_2300 = at(2025, 1, 5, 23, 0);
    let monday_0300 = at(2025, 1, 6, 3, 0);

    assert!(!weekly_job_due(sunday_0130, Weekday::Sun, two_am, None));
    assert!(weekly_job_due(sunday_0200, Weekday::Sun, two_am, None));
    assert!(weekly_job_due(sunday_2300, Weekday::Sun, two_am, None));
    assert!(!weekly_job_due(monday_0300, Weekday::Sun, two_am, None));
}

#[test]
fn certify_weekly_fires_once_per_day() {
    let two_am = NaiveTime::from_hms_opt(2, 0, 0).unwrap();
    let sunday_0205 = at(2025, 1, 5, 2, 5);
    let sunday_0400 = at(2025, 1, 5, 4, 0);
    let next_sunday_0205 = at(2025, 1, 12, 2, 5);

    // Ya corrió hoy: el tick de las 04:00 no re-dispara.
    assert!(!weekly_job_due(sunday_0400, Weekday::Sun, two_am, Some(sunday_0205)));
    // El domingo siguiente vuelve a vencer.
    assert!(weekly_job_due(next_sunday_0205, Weekday::Sun, two_am, Some(sunday_0205)));
}
