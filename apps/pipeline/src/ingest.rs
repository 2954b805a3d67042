// [apps/pipeline/src/ingest.rs]
/*!
 * =================================================================
 * APARATO: INGESTION ORCHESTRATOR (V4.4 - GROUP DISPATCH)
 * CLASIFICACIÓN: APPLICATION SERVICE (ESTRATO L4)
 * RESPONSABILIDAD: COSECHA POR GRUPO, DEDUPLICACIÓN Y MARCA DE AGUA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SINGLE ENTRY: `ingest_group` es el único punto de entrada; los
 *    adaptadores emiten lotes a través del sumidero respaldado por el
 *    almacén, jamás escriben directamente.
 * 2. BATCH ATOMICITY: cada lote (folio o respuesta de API) se
 *    cristaliza dentro de una transacción.
 * 3. FAULT ISOLATION: el fallo de un adaptador se registra y la corrida
 *    continúa con las fuentes restantes.
 * =================================================================
 */

use educti_domain_models::Incident;
use educti_domain_sources::curated::{
    collect_databreaches_archive, collect_konbriefing_listing, collect_ransomware_live_victims,
};
use educti_domain_sources::news::collect_securityweek_search;
use educti_domain_sources::rss::{collect_bleepingcomputer_rss, collect_databreaches_rss};
use educti_domain_sources::sink::{IncidentSink, SinkFault};
use educti_domain_sources::{curated, news, rss, SourceGroup};
use educti_infra_db::{IncidentRepository, SourceEventRepository, SourceStateRepository, StoreClient};
use educti_infra_fetch::FetchClient;
use educti_shared_argus::global_metrics;
use tracing::{error, info, instrument, warn};

/// Opciones de una corrida de ingesta.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Filtro de fuentes por nombre (None = todas las del grupo).
    pub sources: Option<Vec<String>>,
    pub max_pages: Option<u32>,
    pub max_age_days: i64,
    pub incremental: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            sources: None,
            max_pages: None,
            max_age_days: 30,
            incremental: true,
        }
    }
}

/// Resumen agregado de una corrida de ingesta.
#[derive(Debug, Default, Clone, Copy)]
pub struct IngestReport {
    pub new_incidents: usize,
    pub skipped: usize,
    pub source_errors: usize,
}

/**
 * Sumidero respaldado por el almacén: deduplica por evento nativo,
 * cristaliza de forma idempotente y acumula la marca de agua.
 */
pub struct StoreSink {
    incident_repository: IncidentRepository,
    source_event_repository: SourceEventRepository,
    store_client: StoreClient,
    group_label: &'static str,
    pub inserted: usize,
    pub skipped: usize,
    pub max_observed_pubdate: Option<String>,
}

impl StoreSink {
    pub fn new(store_client: StoreClient, group: SourceGroup) -> Self {
        Self {
            incident_repository: IncidentRepository::new(store_client.clone()),
            source_event_repository: SourceEventRepository::new(store_client.clone()),
            store_client,
            group_label: group.as_str(),
            inserted: 0,
            skipped: 0,
            max_observed_pubdate: None,
        }
    }

    fn observe_pubdate(&mut self, incident: &Incident) {
        if let Some(pubdate) = &incident.source_published_date {
            match &self.max_observed_pubdate {
                Some(current) if current >= pubdate => {}
                _ => self.max_observed_pubdate = Some(pubdate.clone()),
            }
        }
    }
}

impl IncidentSink for StoreSink {
    async fn save_batch(&mut self, incidents: &[Incident]) -> Result<usize, SinkFault> {
        if incidents.is_empty() {
            return Ok(0);
        }

        let connection = self
            .store_client
            .get_connection()
            .map_err(|fault| SinkFault(fault.to_string()))?;
        let transaction = connection
            .transaction()
            .await
            .map_err(|fault| SinkFault(fault.to_string()))?;

        let mut batch_inserted = 0usize;

        for incident in incidents {
            self.observe_pubdate(incident);

            // Deduplicación barata por identificador nativo de la fuente.
            if let Some(source_event_id) = &incident.source_event_id {
                let already_seen = self
                    .source_event_repository
                    .source_event_exists_on(&transaction, &incident.source, source_event_id)
                    .await
                    .map_err(|fault| SinkFault(fault.to_string()))?;
                if already_seen {
                    self.skipped += 1;
                    continue;
                }
            }

            let created = self
                .incident_repository
                .insert_incident_on(&transaction, incident)
                .await
                .map_err(|fault| SinkFault(fault.to_string()))?;

            if let Some(source_event_id) = &incident.source_event_id {
                self.source_event_repository
                    .register_source_event_on(
                        &transaction,
                        &incident.source,
                        source_event_id,
                        &incident.incident_id,
                        &incident.ingested_at,
                    )
                    .await
                    .map_err(|fault| SinkFault(fault.to_string()))?;
            }

            if created {
                batch_inserted += 1;
                self.inserted += 1;
            } else {
                self.skipped += 1;
            }
        }

        transaction
            .commit()
            .await
            .map_err(|fault| SinkFault(fault.to_string()))?;

        Ok(batch_inserted)
    }
}

fn source_enabled(options: &IngestOptions, source_name: &str) -> bool {
    match &options.sources {
        Some(selected) => selected.iter().any(|name| name == source_name),
        None => true,
    }
}

/**
 * Punto de entrada único de la fase 1: cosecha un grupo completo.
 */
#[instrument(skip(store_client, fetch_client, options))]
pub async fn ingest_group(
    store_client: &StoreClient,
    fetch_client: &FetchClient,
    group: SourceGroup,
    options: &IngestOptions,
) -> anyhow::Result<IngestReport> {
    info!("{}", "=".repeat(70));
    info!("🚜 [INGEST]: Starting group '{}'", group.as_str());
    info!("{}", "=".repeat(70));

    let mut report = IngestReport::default();

    match group {
        SourceGroup::Curated => {
            run_curated_sources(store_client, fetch_client, options, &mut report).await;
        }
        SourceGroup::News => {
            run_news_sources(store_client, fetch_client, options, &mut report).await;
        }
        SourceGroup::Rss => {
            run_rss_sources(store_client, fetch_client, options, &mut report).await;
        }
    }

    info!(
        "🚜 [INGEST]: Group '{}' complete. New: {}, skipped: {}, source errors: {}",
        group.as_str(),
        report.new_incidents,
        report.skipped,
        report.source_errors
    );
    Ok(report)
}

async fn run_curated_sources(
    store_client: &StoreClient,
    fetch_client: &FetchClient,
    options: &IngestOptions,
    report: &mut IngestReport,
) {
    if source_enabled(options, curated::konbriefing::SOURCE_NAME) {
        let mut sink = StoreSink::new(store_client.clone(), SourceGroup::Curated);
        let outcome = collect_konbriefing_listing(fetch_client, &mut sink).await;
        settle_source(
            store_client,
            curated::konbriefing::SOURCE_NAME,
            SourceGroup::Curated,
            outcome.map(|_| ()),
            &sink,
            report,
        )
        .await;
    }

    if source_enabled(options, curated::ransomware_live::SOURCE_NAME) {
        let mut sink = StoreSink::new(store_client.clone(), SourceGroup::Curated);
        let outcome = collect_ransomware_live_victims(fetch_client, &mut sink).await;
        settle_source(
            store_client,
            curated::ransomware_live::SOURCE_NAME,
            SourceGroup::Curated,
            outcome.map(|_| ()),
            &sink,
            report,
        )
        .await;
    }

    if source_enabled(options, curated::databreaches::SOURCE_NAME) {
        let mut sink = StoreSink::new(store_client.clone(), SourceGroup::Curated);
        let outcome =
            collect_databreaches_archive(fetch_client, options.max_pages, &mut sink).await;
        settle_source(
            store_client,
            curated::databreaches::SOURCE_NAME,
            SourceGroup::Curated,
            outcome.map(|_| ()),
            &sink,
            report,
        )
        .await;
    }
}

async fn run_news_sources(
    store_client: &StoreClient,
    fetch_client: &FetchClient,
    options: &IngestOptions,
    report: &mut IngestReport,
) {
    if source_enabled(options, news::securityweek::SOURCE_NAME) {
        let mut sink = StoreSink::new(store_client.clone(), SourceGroup::News);
        let outcome =
            collect_securityweek_search(fetch_client, None, options.max_pages, &mut sink).await;
        settle_source(
            store_client,
            news::securityweek::SOURCE_NAME,
            SourceGroup::News,
            outcome.map(|_| ()),
            &sink,
            report,
        )
        .await;
    }
}

async fn run_rss_sources(
    store_client: &StoreClient,
    fetch_client: &FetchClient,
    options: &IngestOptions,
    report: &mut IngestReport,
) {
    let watermark_repository = SourceStateRepository::new(store_client.clone());

    if source_enabled(options, rss::databreaches_rss::SOURCE_NAME) {
        let last_pubdate = watermark_repository
            .get_last_pubdate(rss::databreaches_rss::SOURCE_NAME)
            .await
            .unwrap_or(None);
        let mut sink = StoreSink::new(store_client.clone(), SourceGroup::Rss);
        let outcome = collect_databreaches_rss(
            fetch_client,
            options.max_age_days,
            last_pubdate.as_deref(),
            options.incremental,
            &mut sink,
        )
        .await;

        match outcome {
            Ok(harvest) => {
                if let Some(newest) = &harvest.newest_pubdate {
                    sink.max_observed_pubdate = Some(newest.clone());
                }
                settle_source(
                    store_client,
                    rss::databreaches_rss::SOURCE_NAME,
                    SourceGroup::Rss,
                    Ok(()),
                    &sink,
                    report,
                )
                .await;
            }
            Err(fault) => {
                settle_source(
                    store_client,
                    rss::databreaches_rss::SOURCE_NAME,
                    SourceGroup::Rss,
                    Err(fault),
                    &sink,
                    report,
                )
                .await;
            }
        }
    }

    if source_enabled(options, rss::bleepingcomputer::SOURCE_NAME) {
        let last_pubdate = watermark_repository
            .get_last_pubdate(rss::bleepingcomputer::SOURCE_NAME)
            .await
            .unwrap_or(None);
        let mut sink = StoreSink::new(store_client.clone(), SourceGroup::Rss);
        let outcome = collect_bleepingcomputer_rss(
            fetch_client,
            options.max_age_days,
            last_pubdate.as_deref(),
            options.incremental,
            &mut sink,
        )
        .await;

        match outcome {
            Ok(harvest) => {
                if let Some(newest) = &harvest.newest_pubdate {
                    sink.max_observed_pubdate = Some(newest.clone());
                }
                settle_source(
                    store_client,
                    rss::bleepingcomputer::SOURCE_NAME,
                    SourceGroup::Rss,
                    Ok(()),
                    &sink,
                    report,
                )
                .await;
            }
            Err(fault) => {
                settle_source(
                    store_client,
                    rss::bleepingcomputer::SOURCE_NAME,
                    SourceGroup::Rss,
                    Err(fault),
                    &sink,
                    report,
                )
                .await;
            }
        }
    }
}

/**
 * Liquidación por fuente: métricas, marca de agua y aislamiento de fallos.
 *
 * La marca de agua avanza solo tras la inserción exitosa de los ítems
 * de la corrida (semántica at-least-once; la deduplicación absorbe las
 * re-observaciones posteriores a un colapso).
 */
async fn settle_source(
    store_client: &StoreClient,
    source_name: &str,
    group: SourceGroup,
    outcome: Result<(), educti_domain_sources::AdapterError>,
    sink: &StoreSink,
    report: &mut IngestReport,
) {
    let metrics = global_metrics();
    let labels = [("source", source_name), ("group", sink.group_label)];

    match outcome {
        Ok(()) => {
            metrics.increment("ingestion_incidents", sink.inserted as i64, &labels);
            metrics.increment("ingestion_skipped", sink.skipped as i64, &labels);

            if let Some(newest_pubdate) = &sink.max_observed_pubdate {
                let watermark_repository = SourceStateRepository::new(store_client.clone());
                if let Err(fault) = watermark_repository
                    .set_last_pubdate(source_name, newest_pubdate)
                    .await
                {
                    warn!("⚠️ [INGEST]: Watermark advance failed for {}: {}", source_name, fault);
                }
            }

            report.new_incidents += sink.inserted;
            report.skipped += sink.skipped;
            info!(
                "✅ [INGEST]: {} ({}) -> {} new, {} skipped",
                source_name,
                group.as_str(),
                sink.inserted,
                sink.skipped
            );
        }
        Err(fault) => {
            metrics.increment("ingestion_errors", 1, &[("source", source_name)]);
            // El progreso parcial ya emitido permanece cristalizado.
            report.new_incidents += sink.inserted;
            report.skipped += sink.skipped;
            report.source_errors += 1;
            error!("❌ [INGEST]: Source {} failed: {}", source_name, fault);
        }
    }
}
