// [libs/infra/db/src/repositories/enrichment.rs]
/*!
 * =================================================================
 * APARATO: ENRICHMENT REPOSITORY (V4.4 - DUAL PROJECTION)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA TRANSACCIONAL DEL ENRIQUECIMIENTO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DUAL WRITE: registro pleno serializado + proyección plana de ~100
 *    columnas, en una única transacción con la mutación del incidente y
 *    el sellado del artículo primario.
 * 2. ALWAYS-OVERWRITE: el reemplazo es total; la fila plana se
 *    reconstruye desde cero en cada pasada.
 *
 * # Mathematical Proof (Transactional Atomicity):
 * O bien el incidente, la fila plena, la fila plana y el ciclo de
 * artículos mutan juntos, o ninguno lo hace. No existen estados
 * intermedios observables tras un colapso.
 * =================================================================
 */

use educti_domain_models::FlatEnrichment;
use libsql::{params, Connection, Row};
use tracing::{info, instrument};

use crate::errors::DbError;
use crate::StoreClient;

/// Mutación del incidente que acompaña a un enriquecimiento.
#[derive(Debug, Clone, Default)]
pub struct IncidentEnrichmentUpdate {
    pub primary_url: Option<String>,
    pub summary: String,
    pub timeline_json: Option<String>,
    pub mitre_json: Option<String>,
    pub attack_dynamics_json: Option<String>,
    /// País normalizado extraído por el modelo (corrige la fase 1).
    pub corrected_country: Option<String>,
    pub corrected_country_code: Option<String>,
    /// Fecha de incidente extraída por el modelo (más precisa que la
    /// fecha de publicación de la fuente).
    pub corrected_incident_date: Option<String>,
    pub corrected_date_precision: Option<String>,
}

/// Conteos agregados para los resúmenes del planificador.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrichmentStats {
    pub total_incidents: i64,
    pub enriched: i64,
    pub unenriched: i64,
    pub skipped: i64,
}

pub struct EnrichmentRepository {
    database_client: StoreClient,
}

impl EnrichmentRepository {
    pub fn new(database_client: StoreClient) -> Self {
        Self { database_client }
    }

    /**
     * Cristaliza un enriquecimiento completo en una sola transacción.
     *
     * Secuencia sellada: mutación del incidente → upsert del registro
     * pleno → reconstrucción de la fila plana → marcado del artículo
     * primario y descarte del resto.
     */
    #[instrument(skip(self, enrichment_json, flat, update), fields(incident_id = %incident_id))]
    pub async fn save_enrichment(
        &self,
        incident_id: &str,
        enrichment_json: &str,
        flat: &FlatEnrichment,
        update: &IncidentEnrichmentUpdate,
    ) -> Result<(), DbError> {
        let connection = self.database_client.get_connection()?;
        let transaction = connection
            .transaction()
            .await
            .map_err(|_| DbError::TransactionError)?;

        let now = educti_core_normalize::now_utc_iso();

        // 1. MUTACIÓN DEL INCIDENTE
        transaction
            .execute(
                "UPDATE incidents SET \
                   llm_enriched = 1, \
                   llm_enriched_at = ?1, \
                   primary_url = ?2, \
                   llm_summary = ?3, \
                   llm_timeline = ?4, \
                   llm_mitre_attack = ?5, \
                   llm_attack_dynamics = ?6, \
                   country = COALESCE(?7, country), \
                   country_code = COALESCE(?8, country_code), \
                   incident_date = COALESCE(?9, incident_date), \
                   date_precision = COALESCE(?10, date_precision), \
                   last_updated_at = ?1 \
                 WHERE incident_id = ?11",
                params![
                    now.clone(),
                    update.primary_url.clone(),
                    update.summary.clone(),
                    update.timeline_json.clone(),
                    update.mitre_json.clone(),
                    update.attack_dynamics_json.clone(),
                    update.corrected_country.clone(),
                    update.corrected_country_code.clone(),
                    update.corrected_incident_date.clone(),
                    update.corrected_date_precision.clone(),
                    incident_id
                ],
            )
            .await?;

        // 2. REGISTRO PLENO (preserva created_at en reemplazos)
        transaction
            .execute(
                "INSERT INTO incident_enrichments \
                 (incident_id, enrichment_data, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?3) \
                 ON CONFLICT(incident_id) DO UPDATE SET \
                   enrichment_data = excluded.enrichment_data, \
                   updated_at = excluded.updated_at",
                params![incident_id, enrichment_json, now.clone()],
            )
            .await?;

        // 3. PROYECCIÓN PLANA (reconstrucción total)
        transaction
            .execute(
                "DELETE FROM incident_enrichments_flat WHERE incident_id = ?1",
                params![incident_id],
            )
            .await?;
        insert_flat_row(&transaction, incident_id, flat, &now).await?;

        // 4. CICLO DE ARTÍCULOS
        if let Some(primary_url) = &update.primary_url {
            transaction
                .execute(
                    "UPDATE articles SET is_primary = 0 WHERE incident_id = ?1",
                    params![incident_id],
                )
                .await?;
            transaction
                .execute(
                    "UPDATE articles SET is_primary = 1 WHERE incident_id = ?1 AND url = ?2",
                    params![incident_id, primary_url.clone()],
                )
                .await?;
            transaction
                .execute(
                    "DELETE FROM articles WHERE incident_id = ?1 AND is_primary = 0",
                    params![incident_id],
                )
                .await?;
        }

        transaction
            .commit()
            .await
            .map_err(|_| DbError::TransactionError)?;

        info!("💾 [ENRICHMENT_REPO]: Dual projection sealed for {}", incident_id);
        Ok(())
    }

    /**
     * Marca un incidente como saltado (p. ej. fuera del sector educativo).
     * Evita reprocesarlo en corridas futuras; la razón queda en `notes`.
     */
    #[instrument(skip(self, reason))]
    pub async fn mark_incident_skipped(
        &self,
        incident_id: &str,
        reason: &str,
    ) -> Result<(), DbError> {
        let connection = self.database_client.get_connection()?;
        let now = educti_core_normalize::now_utc_iso();

        connection
            .execute(
                "UPDATE incidents SET \
                   llm_enriched = 1, \
                   llm_enriched_at = ?1, \
                   notes = COALESCE(notes || ' | ', '') || 'LLM_ENRICHMENT_SKIPPED: ' || ?2, \
                   last_updated_at = ?1 \
                 WHERE incident_id = ?3",
                params![now, reason, incident_id],
            )
            .await?;

        info!("⊘ [ENRICHMENT_REPO]: Incident {} marked skipped: {}", incident_id, reason);
        Ok(())
    }

    pub async fn get_enrichment_json(&self, incident_id: &str) -> Result<Option<String>, DbError> {
        let connection = self.database_client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT enrichment_data FROM incident_enrichments WHERE incident_id = ?1 LIMIT 1",
                params![incident_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }

    /// Lectura selectiva de la proyección plana para auditorías y pruebas.
    pub async fn get_flat_row(&self, incident_id: &str) -> Result<Option<FlatEnrichment>, DbError> {
        let connection = self.database_client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT incident_id, is_education_related, institution_name, institution_type, \
                 country, country_code, attack_category, attack_vector, ransomware_family, \
                 was_ransom_demanded, ransom_amount, ransom_paid, systems_affected_json, \
                 operational_impacts_json, timeline_json, timeline_events_count, \
                 mitre_techniques_json, mitre_techniques_count, enriched_summary \
                 FROM incident_enrichments_flat WHERE incident_id = ?1 LIMIT 1",
                params![incident_id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(map_flat_probe(&row)?)),
            None => Ok(None),
        }
    }

    /**
     * Revierte el enriquecimiento de un incidente: el incidente regresa
     * al estado `new`, artículos y proyecciones se eliminan en cascada.
     */
    #[instrument(skip(self))]
    pub async fn revert_enrichment(&self, incident_id: &str) -> Result<(), DbError> {
        let connection = self.database_client.get_connection()?;
        let transaction = connection
            .transaction()
            .await
            .map_err(|_| DbError::TransactionError)?;
        let now = educti_core_normalize::now_utc_iso();

        transaction
            .execute(
                "UPDATE incidents SET \
                   llm_enriched = 0, llm_enriched_at = NULL, llm_summary = NULL, \
                   llm_timeline = NULL, llm_mitre_attack = NULL, llm_attack_dynamics = NULL, \
                   primary_url = NULL, last_updated_at = ?1 \
                 WHERE incident_id = ?2",
                params![now, incident_id],
            )
            .await?;
        transaction
            .execute(
                "DELETE FROM incident_enrichments WHERE incident_id = ?1",
                params![incident_id],
            )
            .await?;
        transaction
            .execute(
                "DELETE FROM incident_enrichments_flat WHERE incident_id = ?1",
                params![incident_id],
            )
            .await?;
        transaction
            .execute("DELETE FROM articles WHERE incident_id = ?1", params![incident_id])
            .await?;

        transaction
            .commit()
            .await
            .map_err(|_| DbError::TransactionError)?;
        info!("↩️ [ENRICHMENT_REPO]: Enrichment reverted for {}", incident_id);
        Ok(())
    }

    /// Reversión administrativa total del estrato de enriquecimiento.
    #[instrument(skip(self))]
    pub async fn revert_all(&self) -> Result<i64, DbError> {
        let connection = self.database_client.get_connection()?;

        let mut rows = connection
            .query("SELECT COUNT(*) FROM incidents WHERE llm_enriched = 1", ())
            .await?;
        let reverted = match rows.next().await? {
            Some(row) => row.get::<i64>(0)?,
            None => 0,
        };

        let transaction = connection
            .transaction()
            .await
            .map_err(|_| DbError::TransactionError)?;
        let now = educti_core_normalize::now_utc_iso();

        transaction
            .execute(
                "UPDATE incidents SET \
                   llm_enriched = 0, llm_enriched_at = NULL, llm_summary = NULL, \
                   llm_timeline = NULL, llm_mitre_attack = NULL, llm_attack_dynamics = NULL, \
                   primary_url = NULL, last_updated_at = ?1 \
                 WHERE llm_enriched = 1",
                params![now],
            )
            .await?;
        transaction.execute("DELETE FROM incident_enrichments", ()).await?;
        transaction
            .execute("DELETE FROM incident_enrichments_flat", ())
            .await?;
        transaction.execute("DELETE FROM articles", ()).await?;

        transaction
            .commit()
            .await
            .map_err(|_| DbError::TransactionError)?;
        info!("↩️ [ENRICHMENT_REPO]: {} enrichments reverted.", reverted);
        Ok(reverted)
    }

    pub async fn get_enrichment_stats(&self) -> Result<EnrichmentStats, DbError> {
        let connection = self.database_client.get_connection()?;

        let mut stats = EnrichmentStats::default();
        let mut rows = connection
            .query(
                "SELECT \
                   COUNT(*), \
                   SUM(CASE WHEN llm_enriched = 1 THEN 1 ELSE 0 END), \
                   SUM(CASE WHEN llm_enriched = 0 THEN 1 ELSE 0 END), \
                   SUM(CASE WHEN notes LIKE '%LLM_ENRICHMENT_SKIPPED:%' THEN 1 ELSE 0 END) \
                 FROM incidents",
                (),
            )
            .await?;

        if let Some(row) = rows.next().await? {
            stats.total_incidents = row.get::<Option<i64>>(0)?.unwrap_or(0);
            stats.enriched = row.get::<Option<i64>>(1)?.unwrap_or(0);
            stats.unenriched = row.get::<Option<i64>>(2)?.unwrap_or(0);
            stats.skipped = row.get::<Option<i64>>(3)?.unwrap_or(0);
        }
        Ok(stats)
    }
}

fn flag(value: Option<bool>) -> Option<i64> {
    value.map(|inner| if inner { 1 } else { 0 })
}

async fn insert_flat_row(
    connection: &Connection,
    incident_id: &str,
    flat: &FlatEnrichment,
    now: &str,
) -> Result<(), DbError> {
    connection
        .execute(
            "INSERT INTO incident_enrichments_flat ( \
               incident_id, is_education_related, institution_name, institution_type, \
               country, country_code, region, city, \
               attack_category, attack_vector, initial_access_description, ransomware_family, \
               threat_actor_name, threat_actor_category, threat_actor_motivation, \
               threat_actor_claim_url, \
               was_ransom_demanded, ransom_amount, ransom_currency, ransom_cryptocurrency, \
               ransom_paid, ransom_paid_amount, ransom_negotiated, ransom_deadline_days, \
               decryptor_received, decryptor_worked, \
               data_breached, data_exfiltrated, data_encrypted, data_destroyed, \
               data_categories_json, records_affected_exact, records_affected_min, \
               records_affected_max, data_volume_gb, \
               systems_affected_json, critical_systems_affected, network_compromised, \
               domain_admin_compromised, backup_compromised, encryption_extent, \
               systems_encrypted_count, servers_affected_count, endpoints_affected_count, \
               operational_impacts_json, outage_duration_hours, downtime_days, \
               partial_service_days, \
               students_affected, staff_affected, faculty_affected, alumni_affected, \
               patients_affected, total_individuals_affected, \
               estimated_total_cost_usd, recovery_cost_usd, legal_cost_usd, \
               notification_cost_usd, lost_revenue_usd, insurance_claim, insurance_payout_usd, \
               business_impact_severity, \
               applicable_regulations_json, breach_notification_required, notification_sent, \
               investigation_opened, fine_imposed, fine_amount_usd, lawsuits_filed, \
               class_action_filed, settlement_amount_usd, \
               recovery_method, recovery_started_date, recovery_completed_date, \
               recovery_duration_days, mttd_hours, mttr_hours, security_improvements_json, \
               incident_response_firm, forensics_firm, law_enforcement_involved, \
               public_disclosure, public_disclosure_date, disclosure_delay_days, \
               disclosure_source, transparency_level, \
               attack_campaign_name, sector_targeting_pattern, \
               timeline_json, timeline_events_count, mitre_techniques_json, \
               mitre_techniques_count, enriched_summary, extraction_notes, \
               created_at, updated_at \
             ) VALUES ( \
               ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, \
               ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32, \
               ?33, ?34, ?35, ?36, ?37, ?38, ?39, ?40, ?41, ?42, ?43, ?44, ?45, ?46, ?47, \
               ?48, ?49, ?50, ?51, ?52, ?53, ?54, ?55, ?56, ?57, ?58, ?59, ?60, ?61, ?62, \
               ?63, ?64, ?65, ?66, ?67, ?68, ?69, ?70, ?71, ?72, ?73, ?74, ?75, ?76, ?77, \
               ?78, ?79, ?80, ?81, ?82, ?83, ?84, ?85, ?86, ?87, ?88, ?89, ?90, ?91, ?92, \
               ?93, ?94, ?95, ?95 \
             )",
            params![
                incident_id,
                flag(flat.is_education_related),
                flat.institution_name.clone(),
                flat.institution_type.clone(),
                flat.country.clone(),
                flat.country_code.clone(),
                flat.region.clone(),
                flat.city.clone(),
                flat.attack_category.clone(),
                flat.attack_vector.clone(),
                flat.initial_access_description.clone(),
                flat.ransomware_family.clone(),
                flat.threat_actor_name.clone(),
                flat.threat_actor_category.clone(),
                flat.threat_actor_motivation.clone(),
                flat.threat_actor_claim_url.clone(),
                flag(flat.was_ransom_demanded),
                flat.ransom_amount,
                flat.ransom_currency.clone(),
                flat.ransom_cryptocurrency.clone(),
                flag(flat.ransom_paid),
                flat.ransom_paid_amount,
                flag(flat.ransom_negotiated),
                flat.ransom_deadline_days,
                flag(flat.decryptor_received),
                flag(flat.decryptor_worked),
                flag(flat.data_breached),
                flag(flat.data_exfiltrated),
                flag(flat.data_encrypted),
                flag(flat.data_destroyed),
                flat.data_categories_json.clone(),
                flat.records_affected_exact,
                flat.records_affected_min,
                flat.records_affected_max,
                flat.data_volume_gb,
                flat.systems_affected_json.clone(),
                flag(flat.critical_systems_affected),
                flag(flat.network_compromised),
                flag(flat.domain_admin_compromised),
                flag(flat.backup_compromised),
                flat.encryption_extent.clone(),
                flat.systems_encrypted_count,
                flat.servers_affected_count,
                flat.endpoints_affected_count,
                flat.operational_impacts_json.clone(),
                flat.outage_duration_hours,
                flat.downtime_days,
                flat.partial_service_days,
                flat.students_affected,
                flat.staff_affected,
                flat.faculty_affected,
                flat.alumni_affected,
                flat.patients_affected,
                flat.total_individuals_affected,
                flat.estimated_total_cost_usd,
                flat.recovery_cost_usd,
                flat.legal_cost_usd,
                flat.notification_cost_usd,
                flat.lost_revenue_usd,
                flag(flat.insurance_claim),
                flat.insurance_payout_usd,
                flat.business_impact_severity.clone(),
                flat.applicable_regulations_json.clone(),
                flag(flat.breach_notification_required),
                flag(flat.notification_sent),
                flag(flat.investigation_opened),
                flag(flat.fine_imposed),
                flat.fine_amount_usd,
                flag(flat.lawsuits_filed),
                flag(flat.class_action_filed),
                flat.settlement_amount_usd,
                flat.recovery_method.clone(),
                flat.recovery_started_date.clone(),
                flat.recovery_completed_date.clone(),
                flat.recovery_duration_days,
                flat.mttd_hours,
                flat.mttr_hours,
                flat.security_improvements_json.clone(),
                flat.incident_response_firm.clone(),
                flat.forensics_firm.clone(),
                flag(flat.law_enforcement_involved),
                flag(flat.public_disclosure),
                flat.public_disclosure_date.clone(),
                flat.disclosure_delay_days,
                flat.disclosure_source.clone(),
                flat.transparency_level.clone(),
                flat.attack_campaign_name.clone(),
                flat.sector_targeting_pattern.clone(),
                flat.timeline_json.clone(),
                flat.timeline_events_count,
                flat.mitre_techniques_json.clone(),
                flat.mitre_techniques_count,
                flat.enriched_summary.clone(),
                flat.extraction_notes.clone(),
                now
            ],
        )
        .await?;
    Ok(())
}

/// Proyección parcial de la fila plana para sondas y certificaciones.
fn map_flat_probe(row: &Row) -> Result<FlatEnrichment, DbError> {
    let mut flat = FlatEnrichment::default();
    flat.incident_id = row.get::<String>(0)?;
    flat.is_education_related = row.get::<Option<i64>>(1)?.map(|v| v != 0);
    flat.institution_name = row.get::<Option<String>>(2)?;
    flat.institution_type = row.get::<Option<String>>(3)?;
    flat.country = row.get::<Option<String>>(4)?;
    flat.country_code = row.get::<Option<String>>(5)?;
    flat.attack_category = row.get::<Option<String>>(6)?;
    flat.attack_vector = row.get::<Option<String>>(7)?;
    flat.ransomware_family = row.get::<Option<String>>(8)?;
    flat.was_ransom_demanded = row.get::<Option<i64>>(9)?.map(|v| v != 0);
    flat.ransom_amount = row.get::<Option<f64>>(10)?;
    flat.ransom_paid = row.get::<Option<i64>>(11)?.map(|v| v != 0);
    flat.systems_affected_json = row.get::<Option<String>>(12)?;
    flat.operational_impacts_json = row.get::<Option<String>>(13)?;
    flat.timeline_json = row.get::<Option<String>>(14)?;
    flat.timeline_events_count = row.get::<Option<i64>>(15)?;
    flat.mitre_techniques_json = row.get::<Option<String>>(16)?;
    flat.mitre_techniques_count = row.get::<Option<i64>>(17)?;
    flat.enriched_summary = row.get::<Option<String>>(18)?;
    Ok(flat)
}
