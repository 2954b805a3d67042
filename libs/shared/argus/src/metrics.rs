// [libs/shared/argus/src/metrics.rs]
/*!
 * =================================================================
 * APARATO: PANOPTICON METRICS REGISTRY (V4.1)
 * CLASIFICACIÓN: SHARED UTILITY (ESTRATO L4)
 * RESPONSABILIDAD: CONTADORES, GAUGES E HISTOGRAMAS EN PROCESO
 *
 * # Mathematical Proof (Serialized Mutation):
 * Todas las mutaciones pasan por un único Mutex; la contención es
 * despreciable porque el pipeline es secuencial por diseño.
 * =================================================================
 */

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Instant;

use once_cell::sync::Lazy;
use tracing::info;

/// Registro de métricas estilo Prometheus para los trabajos del pipeline.
#[derive(Default)]
pub struct MetricsRegistry {
    inner: Mutex<RegistryState>,
}

#[derive(Default)]
struct RegistryState {
    counters: BTreeMap<String, i64>,
    gauges: BTreeMap<String, f64>,
    histograms: BTreeMap<String, Vec<f64>>,
    active_timers: BTreeMap<String, Instant>,
}

/// Etiquetas opcionales `{clave=valor}` serializadas en la llave nominal.
fn compose_metric_key(metric_name: &str, labels: &[(&str, &str)]) -> String {
    if labels.is_empty() {
        return metric_name.to_string();
    }
    let mut sorted_labels: Vec<(&str, &str)> = labels.to_vec();
    sorted_labels.sort();
    let rendered = sorted_labels
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(",");
    format!("{}{{{}}}", metric_name, rendered)
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self, metric_name: &str, value: i64, labels: &[(&str, &str)]) {
        let key = compose_metric_key(metric_name, labels);
        let mut state = self.inner.lock().expect("metrics mutex poisoned");
        let counter = state.counters.entry(key).or_insert(0);
        *counter += value;
        info!("📊 [METRIC]: {} += {} (total: {})", metric_name, value, counter);
    }

    pub fn set_gauge(&self, metric_name: &str, value: f64, labels: &[(&str, &str)]) {
        let key = compose_metric_key(metric_name, labels);
        let mut state = self.inner.lock().expect("metrics mutex poisoned");
        state.gauges.insert(key, value);
        info!("📊 [METRIC]: {} = {}", metric_name, value);
    }

    pub fn observe(&self, metric_name: &str, value: f64, labels: &[(&str, &str)]) {
        let key = compose_metric_key(metric_name, labels);
        let mut state = self.inner.lock().expect("metrics mutex poisoned");
        state.histograms.entry(key).or_default().push(value);
    }

    /// Arranca un cronómetro nominal; el cierre registra la duración como
    /// observación `<metric>_duration_seconds`.
    pub fn start_timer(&self, metric_name: &str) {
        let mut state = self.inner.lock().expect("metrics mutex poisoned");
        state.active_timers.insert(metric_name.to_string(), Instant::now());
    }

    pub fn stop_timer(&self, metric_name: &str) -> Option<f64> {
        let started_at = {
            let mut state = self.inner.lock().expect("metrics mutex poisoned");
            state.active_timers.remove(metric_name)
        }?;
        let elapsed_seconds = started_at.elapsed().as_secs_f64();
        self.observe(
            &format!("{}_duration_seconds", metric_name),
            elapsed_seconds,
            &[],
        );
        Some(elapsed_seconds)
    }

    pub fn counter_value(&self, metric_name: &str, labels: &[(&str, &str)]) -> i64 {
        let key = compose_metric_key(metric_name, labels);
        let state = self.inner.lock().expect("metrics mutex poisoned");
        state.counters.get(&key).copied().unwrap_or(0)
    }

    pub fn gauge_value(&self, metric_name: &str, labels: &[(&str, &str)]) -> Option<f64> {
        let key = compose_metric_key(metric_name, labels);
        let state = self.inner.lock().expect("metrics mutex poisoned");
        state.gauges.get(&key).copied()
    }

    pub fn histogram_count(&self, metric_name: &str) -> usize {
        let state = self.inner.lock().expect("metrics mutex poisoned");
        state
            .histograms
            .get(metric_name)
            .map(|values| values.len())
            .unwrap_or(0)
    }

    /// Vuelca un resumen legible de todo el registro al canal de trazas.
    pub fn log_summary(&self) {
        let state = self.inner.lock().expect("metrics mutex poisoned");

        info!("{}", "=".repeat(70));
        info!("📊 [PANOPTICON]: METRICS SUMMARY");
        info!("{}", "=".repeat(70));

        for (key, value) in &state.counters {
            info!("   counter  {}: {}", key, value);
        }
        for (key, value) in &state.gauges {
            info!("   gauge    {}: {}", key, value);
        }
        for (key, values) in &state.histograms {
            if values.is_empty() {
                continue;
            }
            let total: f64 = values.iter().sum();
            let minimum = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let maximum = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            info!(
                "   summary  {}: count={} avg={:.2} min={:.2} max={:.2}",
                key,
                values.len(),
                total / values.len() as f64,
                minimum,
                maximum
            );
        }

        info!("{}", "=".repeat(70));
    }

    pub fn reset(&self) {
        let mut state = self.inner.lock().expect("metrics mutex poisoned");
        state.counters.clear();
        state.gauges.clear();
        state.histograms.clear();
        state.active_timers.clear();
    }
}

static GLOBAL_REGISTRY: Lazy<MetricsRegistry> = Lazy::new(MetricsRegistry::new);

/// Acceso al registro de métricas de proceso (Single Source of Truth).
pub fn global_metrics() -> &'static MetricsRegistry {
    &GLOBAL_REGISTRY
}
