// [tests/mirror/libs/shared/argus/metrics_registry.test.rs]
/**
 * =================================================================
 * APARATO: METRICS REGISTRY CERTIFICATION (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L4-MIRROR
 * RESPONSABILIDAD: CONTADORES, ETIQUETAS Y CRONÓMETROS DEL PANÓPTICO
 * =================================================================
 */

use educti_shared_argus::MetricsRegistry;

#[test]
fn certify_labelled_counters_accumulate_independently() {
    let registry = MetricsRegistry::new();

    registry.increment("ingestion_incidents", 3, &[("source", "konbriefing"), ("group", "curated")]);
    registry.increment("ingestion_incidents", 2, &[("source", "konbriefing"), ("group", "curated")]);
    registry.increment("ingestion_incidents", 7, &[("source", "databreaches"), ("group", "curated")]);

    assert_eq!(
        registry.counter_value(
            "ingestion_incidents",
            &[("source", "konbriefing"), ("group", "curated")]
        ),
        5
    );
    assert_eq!(
        registry.counter_value(
            "ingestion_incidents",
            &[("source", "databreaches"), ("group", "curated")]
        ),
        7
    );
    // Etiquetas en otro orden resuelven a la misma llave nominal.
    assert_eq!(
        registry.counter_value(
            "ingestion_incidents",
            &[("group", "curated"), ("source", "konbriefing")]
        ),
        5
    );
}

#[test]
fn certify_timer_records_duration_observation() {
    let registry = MetricsRegistry::new();

    registry.start_timer("enrichment");
    std::thread::sleep(std::time::Duration::from_millis(10));
    let elapsed = registry.stop_timer("enrichment").expect("timer was armed");

    assert!(elapsed >= 0.01);
    assert_eq!(registry.histogram_count("enrichment_duration_seconds"), 1);

    // Un cronómetro nunca armado no produce observación.
    assert!(registry.stop_timer("enrichment").is_none());
}

#[test]
fn certify_gauges_and_reset() {
    let registry = MetricsRegistry::new();
    registry.set_gauge("unenriched_backlog", 42.0, &[]);
    assert_eq!(registry.gauge_value("unenriched_backlog", &[]), Some(42.0));

    registry.reset();
    assert_eq!(registry.gauge_value("unenriched_backlog", &[]), None);
    assert_eq!(registry.counter_value("anything", &[]), 0);
}
