// [apps/pipeline/src/main.rs]
/*!
 * =================================================================
 * APARATO: PIPELINE COMMAND BINARY (V4.4 - TRIPLE SURFACE)
 * CLASIFICACIÓN: COMPOSITION ROOT (ESTRATO L0)
 * RESPONSABILIDAD: SUPERFICIE CLI DEL PIPELINE DE INTELIGENCIA
 *
 * Códigos de salida: 0 = corrida completada (incluye fallos por ítem),
 * 1 = aborto fatal (límite de tasa persistente, almacén corrupto),
 * 2 = error de argumentos (manejado por clap).
 * =================================================================
 */

use clap::{Parser, Subcommand};
use educti_domain_enrichment::IncidentEnricher;
use educti_domain_sources::SourceGroup;
use educti_infra_db::StoreClient;
use educti_infra_fetch::{FetchClient, FetchPolicy};
use educti_infra_llm::{LlmEndpointConfig, OllamaGateway};
use educti_pipeline::config::PipelineConfig;
use educti_pipeline::enrich::{
    run_dedup_pass, run_enrichment_pass, EnrichmentPassError, OllamaExtractionGateway,
};
use educti_pipeline::ingest::{ingest_group, IngestOptions};
use educti_pipeline::scheduler::{PipelineScheduler, SchedulerConfig, SystemClock};
use educti_shared_argus::global_metrics;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "educti-pipeline",
    about = "EduThreat CTI: cosecha y enriquecimiento de incidentes cibernéticos del sector educativo",
    version
)]
struct CommandSurface {
    #[command(subcommand)]
    command: PipelineCommand,
}

#[derive(Subcommand)]
enum PipelineCommand {
    /// Fase 1: corre la ingesta multi-fuente una vez.
    Phase1 {
        /// Cosecha histórica completa (todas las páginas, RSS a un año).
        #[arg(long)]
        full_historical: bool,
        /// Fuentes puntuales separadas por coma (default: todas).
        #[arg(long, value_delimiter = ',')]
        sources: Option<Vec<String>>,
        /// Tope de folios por fuente paginada.
        #[arg(long)]
        max_pages: Option<u32>,
    },
    /// Fase 2: corre una pasada de enriquecimiento LLM.
    Phase2 {
        /// Máximo de incidentes a procesar (default: todos).
        #[arg(long)]
        limit: Option<u32>,
        /// Salta incidentes fuera del sector educativo.
        #[arg(long)]
        skip_non_education: bool,
        /// Cortesía en segundos entre llamadas al modelo.
        #[arg(long)]
        rate_limit_delay: Option<f64>,
        /// Pasada de deduplicación post-enriquecimiento al final.
        #[arg(long)]
        dedup: bool,
    },
    /// Planificador continuo o ejecución puntual de un trabajo.
    Scheduler {
        #[arg(long, default_value = "scheduler")]
        mode: String,
        #[arg(long, default_value_t = 2)]
        rss_interval: i64,
        #[arg(long, default_value = "sunday")]
        weekly_day: String,
        #[arg(long, default_value = "02:00")]
        weekly_time: String,
        /// Deshabilita el enriquecimiento automático tras cada ingesta.
        #[arg(long)]
        no_enrichment: bool,
        #[arg(long)]
        run_initial_rss: bool,
        #[arg(long)]
        run_initial_weekly: bool,
    },
}

#[tokio::main]
async fn main() {
    educti_shared_argus::init_tracing("educti-pipeline");

    let surface = CommandSurface::parse();
    let exit_code = match execute(surface).await {
        Ok(()) => 0,
        Err(fault) => {
            error!("💀 [FATAL]: {:#}", fault);
            1
        }
    };

    global_metrics().log_summary();
    std::process::exit(exit_code);
}

async fn execute(surface: CommandSurface) -> anyhow::Result<()> {
    let pipeline_config = PipelineConfig::from_env();
    pipeline_config.ensure_dirs()?;

    let store_client = StoreClient::connect(&pipeline_config.db_path_str()).await?;
    let fetch_client = FetchClient::new(FetchPolicy::default())?;

    match surface.command {
        PipelineCommand::Phase1 {
            full_historical,
            sources,
            max_pages,
        } => {
            if full_historical {
                let scheduler_config = SchedulerConfig::default();
                let mut scheduler = PipelineScheduler::new(
                    pipeline_config,
                    scheduler_config,
                    store_client,
                    fetch_client,
                    Box::new(SystemClock),
                );
                scheduler.run_historical_once().await?;
                return Ok(());
            }

            let options = IngestOptions {
                sources,
                max_pages,
                incremental: true,
                ..IngestOptions::default()
            };

            let mut total_new = 0usize;
            for group in [SourceGroup::Curated, SourceGroup::News, SourceGroup::Rss] {
                let report = ingest_group(&store_client, &fetch_client, group, &options).await?;
                total_new += report.new_incidents;
            }
            info!("🏁 [PHASE1]: Run complete, {} new incidents.", total_new);
            Ok(())
        }

        PipelineCommand::Phase2 {
            limit,
            skip_non_education,
            rate_limit_delay,
            dedup,
        } => {
            let api_key = pipeline_config.llm_api_key.clone().ok_or_else(|| {
                anyhow::anyhow!("OLLAMA_API_KEY is required for the enrichment phase")
            })?;

            let mut endpoint_config = LlmEndpointConfig::new(
                &api_key,
                &pipeline_config.llm_host,
                &pipeline_config.llm_model,
            )?;
            endpoint_config.max_retries = pipeline_config.enrichment_max_retries;

            let gateway = OllamaGateway::new(endpoint_config)?;
            let enricher = IncidentEnricher::new(OllamaExtractionGateway::new(gateway));

            let delay = rate_limit_delay
                .unwrap_or(pipeline_config.enrichment_rate_limit_delay);

            let outcome = run_enrichment_pass(
                &store_client,
                &fetch_client,
                &enricher,
                limit,
                skip_non_education,
                delay,
            )
            .await;

            match outcome {
                Ok(report) => {
                    info!(
                        "🏁 [PHASE2]: Run complete. enriched={}, skipped={}, failed={}",
                        report.enriched,
                        report.skipped_not_education + report.skipped_no_articles,
                        report.failed
                    );
                }
                Err(EnrichmentPassError::RateLimitAbort(detail)) => {
                    anyhow::bail!("enrichment pass aborted by persistent rate limit: {}", detail);
                }
                Err(other) => return Err(other.into()),
            }

            if dedup {
                let removed = run_dedup_pass(
                    &store_client,
                    educti_domain_enrichment::DEFAULT_DEDUP_WINDOW_DAYS,
                )
                .await?;
                info!("🏁 [PHASE2]: Dedup pass removed {} duplicates.", removed);
            }
            Ok(())
        }

        PipelineCommand::Scheduler {
            mode,
            rss_interval,
            weekly_day,
            weekly_time,
            no_enrichment,
            run_initial_rss,
            run_initial_weekly,
        } => {
            let scheduler_config = SchedulerConfig {
                rss_interval_hours: rss_interval,
                weekly_day: weekly_day
                    .parse()
                    .map_err(|_| anyhow::anyhow!("unreadable weekly day: {}", weekly_day))?,
                weekly_time: chrono::NaiveTime::parse_from_str(&weekly_time, "%H:%M")
                    .map_err(|_| anyhow::anyhow!("unreadable weekly time: {}", weekly_time))?,
                enable_enrichment: !no_enrichment,
                run_initial_rss,
                run_initial_weekly,
            };

            let mut scheduler = PipelineScheduler::new(
                pipeline_config,
                scheduler_config,
                store_client,
                fetch_client,
                Box::new(SystemClock),
            );

            match mode.as_str() {
                "scheduler" => scheduler.run().await,
                "historical" => scheduler.run_historical_once().await.map(|_| ()),
                "rss-once" => {
                    scheduler
                        .dispatch_job(educti_pipeline::scheduler::JobName::Rss)
                        .await
                }
                "weekly-once" => {
                    scheduler
                        .dispatch_job(educti_pipeline::scheduler::JobName::Weekly)
                        .await
                }
                "enrich-once" => {
                    scheduler
                        .dispatch_job(educti_pipeline::scheduler::JobName::Enrichment)
                        .await
                }
                other => anyhow::bail!("unknown scheduler mode: {}", other),
            }
        }
    }
}
