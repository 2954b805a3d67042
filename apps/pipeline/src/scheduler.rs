// [apps/pipeline/src/scheduler.rs]
/*!
 * =================================================================
 * APARATO: PIPELINE SCHEDULER (V4.4 - COOPERATIVE PACEMAKER)
 * CLASIFICACIÓN: APPLICATION SERVICE (ESTRATO L4)
 * RESPONSABILIDAD: TRABAJOS PERIÓDICOS SERIALIZADOS DEL PIPELINE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. OWNED OBJECT: sin singletons; el planificador es un objeto con
 *    arranque/parada explícitos y reloj inyectado para las pruebas.
 * 2. SERIALIZED JOBS: un tick cada 60 s; jamás dos trabajos en
 *    paralelo (la cortesía y el límite de tasa del modelo mandan).
 * 3. RATE ABORT: la propagación del límite de tasa aborta el trabajo
 *    de enriquecimiento y el bucle continúa en el siguiente tick.
 * =================================================================
 */

use std::time::Duration;

use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};
use educti_domain_enrichment::IncidentEnricher;
use educti_domain_sources::SourceGroup;
use educti_infra_db::StoreClient;
use educti_infra_fetch::FetchClient;
use educti_infra_llm::{LlmEndpointConfig, OllamaGateway};
use educti_shared_argus::global_metrics;
use tracing::{error, info, instrument, warn};

use crate::config::PipelineConfig;
use crate::enrich::{run_enrichment_pass, EnrichmentPassError, OllamaExtractionGateway};
use crate::ingest::{ingest_group, IngestOptions};

/// Cadencia del tick cooperativo del bucle.
const TICK_INTERVAL_SECONDS: u64 = 60;

/// Reloj inyectable del planificador.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Reloj del sistema (producción).
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Configuración de cadencias del planificador.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub rss_interval_hours: i64,
    pub weekly_day: Weekday,
    pub weekly_time: NaiveTime,
    pub enable_enrichment: bool,
    pub run_initial_rss: bool,
    pub run_initial_weekly: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            rss_interval_hours: 2,
            weekly_day: Weekday::Sun,
            weekly_time: NaiveTime::from_hms_opt(2, 0, 0).expect("static time"),
            enable_enrichment: true,
            run_initial_rss: false,
            run_initial_weekly: false,
        }
    }
}

/// ¿Toca la ingesta RSS? (intervalo desde la última corrida)
pub fn rss_job_due(
    now: DateTime<Utc>,
    interval_hours: i64,
    last_run: Option<DateTime<Utc>>,
) -> bool {
    match last_run {
        Some(last_run) => now - last_run >= chrono::Duration::hours(interval_hours),
        // Sin corrida previa el ancla es el arranque; el llamador la fija.
        None => true,
    }
}

/// ¿Toca la ingesta semanal? (día + hora configurados, una vez al día)
pub fn weekly_job_due(
    now: DateTime<Utc>,
    weekly_day: Weekday,
    weekly_time: NaiveTime,
    last_run: Option<DateTime<Utc>>,
) -> bool {
    if now.weekday() != weekly_day || now.time() < weekly_time {
        return false;
    }
    match last_run {
        Some(last_run) => last_run.date_naive() != now.date_naive(),
        None => true,
    }
}

/// Trabajos nominales que el disparo manual puede invocar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobName {
    Rss,
    Weekly,
    Enrichment,
}

pub struct PipelineScheduler {
    pipeline_config: PipelineConfig,
    scheduler_config: SchedulerConfig,
    store_client: StoreClient,
    fetch_client: FetchClient,
    clock: Box<dyn Clock>,
    last_rss_run: Option<DateTime<Utc>>,
    last_weekly_run: Option<DateTime<Utc>>,
    job_active: bool,
    running: bool,
}

impl PipelineScheduler {
    pub fn new(
        pipeline_config: PipelineConfig,
        scheduler_config: SchedulerConfig,
        store_client: StoreClient,
        fetch_client: FetchClient,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            pipeline_config,
            scheduler_config,
            store_client,
            fetch_client,
            clock,
            last_rss_run: None,
            last_weekly_run: None,
            job_active: false,
            running: false,
        }
    }

    /**
     * Bucle cooperativo principal; retorna al recibir Ctrl-C.
     */
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.running = true;
        let start_anchor = self.clock.now_utc();

        info!(
            "🗓️ [SCHEDULER]: Online. RSS every {}h, weekly {:?} at {}",
            self.scheduler_config.rss_interval_hours,
            self.scheduler_config.weekly_day,
            self.scheduler_config.weekly_time
        );

        if self.scheduler_config.run_initial_rss {
            if let Err(fault) = self.dispatch_job(JobName::Rss).await {
                error!("❌ [SCHEDULER]: Initial RSS job failed: {}", fault);
            }
        } else {
            self.last_rss_run = Some(start_anchor);
        }
        if self.scheduler_config.run_initial_weekly {
            if let Err(fault) = self.dispatch_job(JobName::Weekly).await {
                error!("❌ [SCHEDULER]: Initial weekly job failed: {}", fault);
            }
        }

        while self.running {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("🛑 [SCHEDULER]: Shutdown signal received.");
                    self.running = false;
                }
                _ = tokio::time::sleep(Duration::from_secs(TICK_INTERVAL_SECONDS)) => {
                    self.tick().await;
                }
            }
        }

        global_metrics().log_summary();
        info!("🗓️ [SCHEDULER]: Stopped.");
        Ok(())
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    async fn tick(&mut self) {
        if self.job_active {
            return;
        }
        let now = self.clock.now_utc();

        if rss_job_due(now, self.scheduler_config.rss_interval_hours, self.last_rss_run) {
            if let Err(fault) = self.dispatch_job(JobName::Rss).await {
                error!("❌ [SCHEDULER]: RSS job failed: {}", fault);
            }
        }

        let now = self.clock.now_utc();
        if weekly_job_due(
            now,
            self.scheduler_config.weekly_day,
            self.scheduler_config.weekly_time,
            self.last_weekly_run,
        ) {
            if let Err(fault) = self.dispatch_job(JobName::Weekly).await {
                error!("❌ [SCHEDULER]: Weekly job failed: {}", fault);
            }
        }
    }

    /// Disparo manual o programado de un trabajo nominal (serializado).
    #[instrument(skip(self))]
    pub async fn dispatch_job(&mut self, job: JobName) -> anyhow::Result<()> {
        if self.job_active {
            warn!("⏸️ [SCHEDULER]: Job already active; {:?} deferred to next tick.", job);
            return Ok(());
        }
        self.job_active = true;

        let outcome = match job {
            JobName::Rss => self.run_rss_job().await,
            JobName::Weekly => self.run_weekly_job().await,
            JobName::Enrichment => self.run_enrichment_job(None).await,
        };

        self.job_active = false;
        outcome
    }

    /// Ingesta RSS incremental + enriquecimiento del lote nuevo.
    async fn run_rss_job(&mut self) -> anyhow::Result<()> {
        let metrics = global_metrics();
        metrics.start_timer("rss_ingestion");
        info!("{}", "=".repeat(70));
        info!("🗓️ [SCHEDULER]: Starting RSS feed ingestion...");
        info!("{}", "=".repeat(70));

        let options = IngestOptions {
            max_age_days: 30,
            incremental: true,
            ..IngestOptions::default()
        };

        let outcome =
            ingest_group(&self.store_client, &self.fetch_client, SourceGroup::Rss, &options).await;
        self.last_rss_run = Some(self.clock.now_utc());

        let report = match outcome {
            Ok(report) => {
                metrics.stop_timer("rss_ingestion");
                metrics.increment("rss_ingestion_incidents", report.new_incidents as i64, &[]);
                metrics.increment("rss_ingestion_runs", 1, &[("status", "success")]);
                report
            }
            Err(fault) => {
                metrics.stop_timer("rss_ingestion");
                metrics.increment("rss_ingestion_runs", 1, &[("status", "error")]);
                return Err(fault);
            }
        };

        if self.scheduler_config.enable_enrichment && report.new_incidents > 0 {
            info!(
                "🗓️ [SCHEDULER]: Triggering enrichment for {} new incidents...",
                report.new_incidents
            );
            self.run_enrichment_job(Some(self.pipeline_config.enrichment_batch_size))
                .await?;
        }
        Ok(())
    }

    /// Ingesta semanal completa (curadas + prensa) + enriquecimiento.
    async fn run_weekly_job(&mut self) -> anyhow::Result<()> {
        let metrics = global_metrics();
        metrics.start_timer("weekly_ingestion");
        info!("{}", "=".repeat(70));
        info!("🗓️ [SCHEDULER]: Starting weekly full ingestion...");
        info!("{}", "=".repeat(70));

        let options = IngestOptions {
            incremental: true,
            max_pages: None,
            ..IngestOptions::default()
        };

        let mut total_new = 0usize;
        let mut failed = false;

        for group in [SourceGroup::Curated, SourceGroup::News] {
            match ingest_group(&self.store_client, &self.fetch_client, group, &options).await {
                Ok(report) => total_new += report.new_incidents,
                Err(fault) => {
                    error!("❌ [SCHEDULER]: Weekly group {} failed: {}", group.as_str(), fault);
                    failed = true;
                }
            }
        }

        self.last_weekly_run = Some(self.clock.now_utc());
        metrics.stop_timer("weekly_ingestion");
        metrics.increment("weekly_ingestion_incidents", total_new as i64, &[]);
        metrics.increment(
            "weekly_ingestion_runs",
            1,
            &[("status", if failed { "error" } else { "success" })],
        );

        if self.scheduler_config.enable_enrichment && total_new > 0 {
            info!("🗓️ [SCHEDULER]: Triggering enrichment for {} new incidents...", total_new);
            self.run_enrichment_job(Some(self.pipeline_config.enrichment_batch_size))
                .await?;
        }
        Ok(())
    }

    /**
     * Trabajo de enriquecimiento; el límite de tasa aborta sin avanzar.
     */
    async fn run_enrichment_job(&mut self, limit: Option<u32>) -> anyhow::Result<()> {
        let api_key = match &self.pipeline_config.llm_api_key {
            Some(api_key) => api_key.clone(),
            None => {
                warn!("⏸️ [SCHEDULER]: OLLAMA_API_KEY absent; enrichment job skipped.");
                return Ok(());
            }
        };

        let metrics = global_metrics();
        metrics.start_timer("enrichment");
        info!("🗓️ [SCHEDULER]: Running LLM enrichment...");

        let mut endpoint_config = LlmEndpointConfig::new(
            &api_key,
            &self.pipeline_config.llm_host,
            &self.pipeline_config.llm_model,
        )?;
        endpoint_config.max_retries = self.pipeline_config.enrichment_max_retries;

        let gateway = OllamaGateway::new(endpoint_config)?;
        let enricher = IncidentEnricher::new(OllamaExtractionGateway::new(gateway));

        let outcome = run_enrichment_pass(
            &self.store_client,
            &self.fetch_client,
            &enricher,
            limit,
            true,
            self.pipeline_config.enrichment_rate_limit_delay,
        )
        .await;

        metrics.stop_timer("enrichment");

        match outcome {
            Ok(report) => {
                info!(
                    "✅ [SCHEDULER]: Enrichment job complete ({} enriched).",
                    report.enriched
                );
                Ok(())
            }
            Err(EnrichmentPassError::RateLimitAbort(detail)) => {
                error!("🛑 [SCHEDULER]: Enrichment aborted by rate limit: {}", detail);
                Err(anyhow::anyhow!("enrichment aborted by rate limit: {}", detail))
            }
            Err(other) => Err(anyhow::anyhow!(other)),
        }
    }

    /**
     * Ingesta histórica completa de una sola vez (primer arranque).
     */
    #[instrument(skip(self))]
    pub async fn run_historical_once(&mut self) -> anyhow::Result<usize> {
        info!("{}", "=".repeat(70));
        info!("🏛️ [HISTORICAL]: One-time full historical ingestion (all pages).");
        info!("{}", "=".repeat(70));

        let mut total_new = 0usize;

        for group in [SourceGroup::Curated, SourceGroup::News, SourceGroup::Rss] {
            let options = IngestOptions {
                incremental: false,
                max_pages: None,
                max_age_days: if group == SourceGroup::Rss { 365 } else { 30 },
                sources: None,
            };
            let report =
                ingest_group(&self.store_client, &self.fetch_client, group, &options).await?;
            total_new += report.new_incidents;
        }

        info!("🏛️ [HISTORICAL]: Complete. {} incidents total.", total_new);
        Ok(total_new)
    }
}
