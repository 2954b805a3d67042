// [libs/infra/db/src/repositories/incident.rs]
/*!
 * =================================================================
 * APARATO: INCIDENT REPOSITORY (V4.3 - URL LEDGER FUSION)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: CRISTALIZACIÓN IDEMPOTENTE DE INCIDENTES
 *
 * # Mathematical Proof (Idempotent Fusion):
 * Re-insertar un incidente existente nunca crea una fila nueva: fusiona
 * `all_urls` como unión de conjuntos preservando el orden de
 * descubrimiento y refresca `ingested_at`. El estado converge sin
 * importar cuántas corridas re-observen el mismo evento.
 * =================================================================
 */

use educti_core_normalize::DatePrecision;
use educti_domain_models::{Incident, IncidentStatus, SourceConfidence};
use libsql::{params, Connection, Row};
use tracing::{debug, info, instrument};

use crate::errors::DbError;
use crate::StoreClient;

/// Columnas canónicas usadas por todas las proyecciones de lectura.
const INCIDENT_COLUMNS: &str = "incident_id, source, source_event_id, university_name, \
     victim_raw_name, institution_type, country, region, city, incident_date, \
     date_precision, source_published_date, ingested_at, title, subtitle, primary_url, \
     all_urls, leak_site_url, source_detail_url, screenshot_url, attack_type_hint, \
     status, source_confidence, notes";

pub struct IncidentRepository {
    database_client: StoreClient,
}

impl IncidentRepository {
    pub fn new(database_client: StoreClient) -> Self {
        Self { database_client }
    }

    /**
     * Cristaliza un incidente de forma idempotente.
     *
     * Si la llave ya existe, fusiona las URLs nuevas dentro de
     * `all_urls` y refresca `ingested_at`; en ambos caminos registra la
     * observación en `incident_sources`.
     *
     * Retorna `true` si la fila fue creada, `false` si fue fusionada.
     */
    #[instrument(skip(self, incident), fields(incident_id = %incident.incident_id))]
    pub async fn insert_incident(&self, incident: &Incident) -> Result<bool, DbError> {
        let connection = self.database_client.get_connection()?;
        self.insert_incident_on(&connection, incident).await
    }

    /// Variante sobre una conexión existente (para lotes transaccionales).
    pub async fn insert_incident_on(
        &self,
        connection: &Connection,
        incident: &Incident,
    ) -> Result<bool, DbError> {
        let mut existing = connection
            .query(
                "SELECT all_urls FROM incidents WHERE incident_id = ?1",
                params![incident.incident_id.clone()],
            )
            .await?;

        let created = if let Some(row) = existing.next().await? {
            let stored_urls: Option<String> = row.get::<Option<String>>(0)?;
            let merged = merge_url_ledger(stored_urls.as_deref(), &incident.all_urls);

            connection
                .execute(
                    "UPDATE incidents SET all_urls = ?1, ingested_at = ?2, last_updated_at = ?2 \
                     WHERE incident_id = ?3",
                    params![
                        merged,
                        incident.ingested_at.clone(),
                        incident.incident_id.clone()
                    ],
                )
                .await?;
            debug!("♻️ [INCIDENT_REPO]: Fused URL ledger for {}", incident.incident_id);
            false
        } else {
            connection
                .execute(
                    "INSERT INTO incidents (incident_id, source, source_event_id, \
                     university_name, victim_raw_name, institution_type, country, region, \
                     city, incident_date, date_precision, source_published_date, ingested_at, \
                     title, subtitle, primary_url, all_urls, leak_site_url, source_detail_url, \
                     screenshot_url, attack_type_hint, status, source_confidence, notes, \
                     llm_enriched, last_updated_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, \
                     ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, 0, ?13)",
                    params![
                        incident.incident_id.clone(),
                        incident.source.clone(),
                        incident.source_event_id.clone(),
                        incident.university_name.clone(),
                        incident.victim_raw_name.clone(),
                        incident.institution_type.clone(),
                        incident.country.clone(),
                        incident.region.clone(),
                        incident.city.clone(),
                        incident.incident_date.clone(),
                        incident.date_precision.as_str(),
                        incident.source_published_date.clone(),
                        incident.ingested_at.clone(),
                        incident.title.clone(),
                        incident.subtitle.clone(),
                        incident.primary_url.clone(),
                        incident.all_urls.join(";"),
                        incident.leak_site_url.clone(),
                        incident.source_detail_url.clone(),
                        incident.screenshot_url.clone(),
                        incident.attack_type_hint.clone(),
                        incident.status.as_str(),
                        incident.source_confidence.as_str(),
                        incident.notes.clone()
                    ],
                )
                .await?;
            true
        };

        connection
            .execute(
                "INSERT INTO incident_sources (incident_id, source, first_seen_at) \
                 VALUES (?1, ?2, ?3) \
                 ON CONFLICT(incident_id, source) DO NOTHING",
                params![
                    incident.incident_id.clone(),
                    incident.source.clone(),
                    incident.ingested_at.clone()
                ],
            )
            .await?;

        Ok(created)
    }

    /**
     * Incidentes pendientes de enriquecimiento: `llm_enriched = 0` con
     * bóveda de URLs no vacía, los más recientes primero.
     */
    #[instrument(skip(self))]
    pub async fn get_unenriched_incidents(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<Incident>, DbError> {
        let connection = self.database_client.get_connection()?;

        let base_query = format!(
            "SELECT {} FROM incidents \
             WHERE llm_enriched = 0 AND all_urls IS NOT NULL AND all_urls != '' \
             ORDER BY ingested_at DESC",
            INCIDENT_COLUMNS
        );

        let mut rows = match limit {
            Some(limit) => {
                connection
                    .query(&format!("{} LIMIT ?1", base_query), params![limit as i64])
                    .await?
            }
            None => connection.query(&base_query, ()).await?,
        };

        let mut incidents = Vec::new();
        while let Some(row) = rows.next().await? {
            incidents.push(map_incident_row(&row)?);
        }

        info!("📦 [INCIDENT_REPO]: {} unenriched incidents staged.", incidents.len());
        Ok(incidents)
    }

    pub async fn fetch_incident(&self, incident_id: &str) -> Result<Option<Incident>, DbError> {
        let connection = self.database_client.get_connection()?;
        let mut rows = connection
            .query(
                &format!(
                    "SELECT {} FROM incidents WHERE incident_id = ?1 LIMIT 1",
                    INCIDENT_COLUMNS
                ),
                params![incident_id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(map_incident_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Incidentes enriquecidos con identidad nominal, para deduplicación.
    pub async fn list_enriched_identities(
        &self,
    ) -> Result<Vec<(String, String, Option<String>)>, DbError> {
        let connection = self.database_client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT incident_id, COALESCE(university_name, victim_raw_name, ''), incident_date \
                 FROM incidents \
                 WHERE llm_enriched = 1 \
                   AND (university_name != '' OR victim_raw_name != '') \
                 ORDER BY ingested_at DESC",
                (),
            )
            .await?;

        let mut identities = Vec::new();
        while let Some(row) = rows.next().await? {
            identities.push((
                row.get::<String>(0)?,
                row.get::<String>(1)?,
                row.get::<Option<String>>(2)?,
            ));
        }
        Ok(identities)
    }

    pub async fn count_incidents(&self) -> Result<i64, DbError> {
        let connection = self.database_client.get_connection()?;
        let mut rows = connection.query("SELECT COUNT(*) FROM incidents", ()).await?;
        match rows.next().await? {
            Some(row) => Ok(row.get::<i64>(0)?),
            None => Ok(0),
        }
    }

    /// Baja definitiva de un incidente (acción administrativa explícita).
    #[instrument(skip(self))]
    pub async fn delete_incident(&self, incident_id: &str) -> Result<(), DbError> {
        let connection = self.database_client.get_connection()?;
        connection
            .execute("DELETE FROM articles WHERE incident_id = ?1", params![incident_id])
            .await?;
        connection
            .execute(
                "DELETE FROM incident_enrichments WHERE incident_id = ?1",
                params![incident_id],
            )
            .await?;
        connection
            .execute(
                "DELETE FROM incident_enrichments_flat WHERE incident_id = ?1",
                params![incident_id],
            )
            .await?;
        connection
            .execute(
                "DELETE FROM incident_sources WHERE incident_id = ?1",
                params![incident_id],
            )
            .await?;
        connection
            .execute("DELETE FROM incidents WHERE incident_id = ?1", params![incident_id])
            .await?;
        info!("🗑️ [INCIDENT_REPO]: Incident {} purged from the ledger.", incident_id);
        Ok(())
    }
}

/// Unión de conjuntos de URLs preservando el orden de descubrimiento.
fn merge_url_ledger(stored: Option<&str>, incoming: &[String]) -> String {
    let mut merged: Vec<String> = Vec::new();

    if let Some(stored_urls) = stored {
        for url in stored_urls.split(';') {
            let trimmed = url.trim();
            if !trimmed.is_empty() && !merged.iter().any(|existing| existing == trimmed) {
                merged.push(trimmed.to_string());
            }
        }
    }
    for url in incoming {
        let trimmed = url.trim();
        if !trimmed.is_empty() && !merged.iter().any(|existing| existing == trimmed) {
            merged.push(trimmed.to_string());
        }
    }

    merged.join(";")
}

/// Transforma una fila SQL en la entidad de dominio.
fn map_incident_row(row: &Row) -> Result<Incident, DbError> {
    let all_urls_raw: Option<String> = row.get::<Option<String>>(16)?;
    let all_urls = all_urls_raw
        .unwrap_or_default()
        .split(';')
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect();

    let precision_raw: Option<String> = row.get::<Option<String>>(10)?;
    let status_raw: Option<String> = row.get::<Option<String>>(21)?;
    let confidence_raw: Option<String> = row.get::<Option<String>>(22)?;

    Ok(Incident {
        incident_id: row.get::<String>(0)?,
        source: row.get::<String>(1)?,
        source_event_id: row.get::<Option<String>>(2)?,
        university_name: row.get::<Option<String>>(3)?.unwrap_or_default(),
        victim_raw_name: row.get::<Option<String>>(4)?.unwrap_or_default(),
        institution_type: row.get::<Option<String>>(5)?,
        country: row.get::<Option<String>>(6)?,
        region: row.get::<Option<String>>(7)?,
        city: row.get::<Option<String>>(8)?,
        incident_date: row.get::<Option<String>>(9)?,
        date_precision: DatePrecision::parse(precision_raw.as_deref().unwrap_or("unknown")),
        source_published_date: row.get::<Option<String>>(11)?,
        ingested_at: row.get::<Option<String>>(12)?.unwrap_or_default(),
        title: row.get::<Option<String>>(13)?,
        subtitle: row.get::<Option<String>>(14)?,
        primary_url: row.get::<Option<String>>(15)?,
        all_urls,
        leak_site_url: row.get::<Option<String>>(17)?,
        source_detail_url: row.get::<Option<String>>(18)?,
        screenshot_url: row.get::<Option<String>>(19)?,
        attack_type_hint: row.get::<Option<String>>(20)?,
        status: IncidentStatus::parse(status_raw.as_deref().unwrap_or("suspected")),
        source_confidence: SourceConfidence::parse(confidence_raw.as_deref().unwrap_or("medium")),
        notes: row.get::<Option<String>>(23)?,
    })
}
