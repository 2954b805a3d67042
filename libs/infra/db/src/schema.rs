// [libs/infra/db/src/schema.rs]
/**
 * =================================================================
 * APARATO: SOVEREIGN INTELLIGENCE SCHEMA (V4.3 - FLAT STRATA)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: GOBERNANZA ESTRUCTURAL E IDEMPOTENCIA TOTAL
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. INTEL STRATA: Tablas de incidentes, eventos de fuente, artículos y
 *    las dos representaciones del enriquecimiento (plena y plana).
 * 2. IDEMPOTENCIA: Re-ejecutable en caliente; mutaciones de columna
 *    toleradas cuando ya fueron aplicadas.
 * 3. PERFORMANCE: Índices de aceleración para las consultas analíticas.
 * =================================================================
 */

use anyhow::{Context, Result};
use libsql::Connection;
use tracing::{debug, info, instrument, warn};

/**
 * ESTRATO 1: SOLIDIFICACIÓN (Génesis de Tablas)
 * Define las entidades base del ecosistema de inteligencia educativa.
 */
const TACTICAL_TABLES: &[(&str, &str)] = &[
    ("TABLE_INCIDENTS", r#"
        CREATE TABLE IF NOT EXISTS incidents (
            incident_id TEXT PRIMARY KEY,
            source TEXT NOT NULL,
            source_event_id TEXT,
            university_name TEXT,
            victim_raw_name TEXT,
            institution_type TEXT,
            country TEXT,
            country_code TEXT,
            region TEXT,
            city TEXT,
            incident_date TEXT,
            date_precision TEXT DEFAULT 'unknown',
            source_published_date TEXT,
            ingested_at TEXT NOT NULL,
            title TEXT,
            subtitle TEXT,
            primary_url TEXT,
            all_urls TEXT,
            leak_site_url TEXT,
            source_detail_url TEXT,
            screenshot_url TEXT,
            attack_type_hint TEXT,
            status TEXT DEFAULT 'suspected',
            source_confidence TEXT DEFAULT 'medium',
            notes TEXT,
            llm_enriched INTEGER DEFAULT 0,
            llm_enriched_at TEXT,
            llm_summary TEXT,
            llm_timeline TEXT,
            llm_mitre_attack TEXT,
            llm_attack_dynamics TEXT,
            last_updated_at TEXT
        );
    "#),
    ("TABLE_INCIDENT_SOURCES", r#"
        CREATE TABLE IF NOT EXISTS incident_sources (
            incident_id TEXT NOT NULL,
            source TEXT NOT NULL,
            first_seen_at TEXT NOT NULL,
            PRIMARY KEY (incident_id, source),
            FOREIGN KEY (incident_id) REFERENCES incidents(incident_id) ON DELETE CASCADE
        );
    "#),
    ("TABLE_SOURCE_EVENTS", r#"
        CREATE TABLE IF NOT EXISTS source_events (
            source TEXT NOT NULL,
            source_event_id TEXT NOT NULL,
            incident_id TEXT NOT NULL,
            registered_at TEXT NOT NULL,
            PRIMARY KEY (source, source_event_id)
        );
    "#),
    ("TABLE_SOURCE_STATE", r#"
        CREATE TABLE IF NOT EXISTS source_state (
            source TEXT PRIMARY KEY,
            last_pubdate TEXT
        );
    "#),
    ("TABLE_ARTICLES", r#"
        CREATE TABLE IF NOT EXISTS articles (
            incident_id TEXT NOT NULL,
            url TEXT NOT NULL,
            title TEXT,
            author TEXT,
            publish_date TEXT,
            content TEXT,
            fetch_successful INTEGER DEFAULT 0,
            error_message TEXT,
            content_length INTEGER DEFAULT 0,
            is_primary INTEGER DEFAULT 0,
            PRIMARY KEY (incident_id, url),
            FOREIGN KEY (incident_id) REFERENCES incidents(incident_id) ON DELETE CASCADE
        );
    "#),
    ("TABLE_INCIDENT_ENRICHMENTS", r#"
        CREATE TABLE IF NOT EXISTS incident_enrichments (
            incident_id TEXT PRIMARY KEY,
            enrichment_data TEXT NOT NULL,
            enrichment_version TEXT DEFAULT '2.0',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (incident_id) REFERENCES incidents(incident_id) ON DELETE CASCADE
        );
    "#),
    ("TABLE_INCIDENT_ENRICHMENTS_FLAT", r#"
        CREATE TABLE IF NOT EXISTS incident_enrichments_flat (
            incident_id TEXT PRIMARY KEY,

            is_education_related INTEGER,
            institution_name TEXT,
            institution_type TEXT,
            country TEXT,
            country_code TEXT,
            region TEXT,
            city TEXT,

            attack_category TEXT,
            attack_vector TEXT,
            initial_access_description TEXT,
            ransomware_family TEXT,
            threat_actor_name TEXT,
            threat_actor_category TEXT,
            threat_actor_motivation TEXT,
            threat_actor_claim_url TEXT,

            was_ransom_demanded INTEGER,
            ransom_amount REAL,
            ransom_currency TEXT,
            ransom_cryptocurrency TEXT,
            ransom_paid INTEGER,
            ransom_paid_amount REAL,
            ransom_negotiated INTEGER,
            ransom_deadline_days REAL,
            decryptor_received INTEGER,
            decryptor_worked INTEGER,

            data_breached INTEGER,
            data_exfiltrated INTEGER,
            data_encrypted INTEGER,
            data_destroyed INTEGER,
            data_categories_json TEXT,
            records_affected_exact INTEGER,
            records_affected_min INTEGER,
            records_affected_max INTEGER,
            data_volume_gb REAL,

            systems_affected_json TEXT,
            critical_systems_affected INTEGER,
            network_compromised INTEGER,
            domain_admin_compromised INTEGER,
            backup_compromised INTEGER,
            encryption_extent TEXT,
            systems_encrypted_count INTEGER,
            servers_affected_count INTEGER,
            endpoints_affected_count INTEGER,

            operational_impacts_json TEXT,
            outage_duration_hours REAL,
            downtime_days REAL,
            partial_service_days REAL,

            students_affected INTEGER,
            staff_affected INTEGER,
            faculty_affected INTEGER,
            alumni_affected INTEGER,
            patients_affected INTEGER,
            total_individuals_affected INTEGER,

            estimated_total_cost_usd REAL,
            recovery_cost_usd REAL,
            legal_cost_usd REAL,
            notification_cost_usd REAL,
            lost_revenue_usd REAL,
            insurance_claim INTEGER,
            insurance_payout_usd REAL,
            business_impact_severity TEXT,

            applicable_regulations_json TEXT,
            breach_notification_required INTEGER,
            notification_sent INTEGER,
            investigation_opened INTEGER,
            fine_imposed INTEGER,
            fine_amount_usd REAL,
            lawsuits_filed INTEGER,
            class_action_filed INTEGER,
            settlement_amount_usd REAL,

            recovery_method TEXT,
            recovery_started_date TEXT,
            recovery_completed_date TEXT,
            recovery_duration_days REAL,
            mttd_hours REAL,
            mttr_hours REAL,
            security_improvements_json TEXT,
            incident_response_firm TEXT,
            forensics_firm TEXT,
            law_enforcement_involved INTEGER,

            public_disclosure INTEGER,
            public_disclosure_date TEXT,
            disclosure_delay_days REAL,
            disclosure_source TEXT,
            transparency_level TEXT,

            attack_campaign_name TEXT,
            sector_targeting_pattern TEXT,

            timeline_json TEXT,
            timeline_events_count INTEGER,
            mitre_techniques_json TEXT,
            mitre_techniques_count INTEGER,

            enriched_summary TEXT,
            extraction_notes TEXT,

            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,

            FOREIGN KEY (incident_id) REFERENCES incidents(incident_id) ON DELETE CASCADE
        );
    "#),
];

/**
 * ESTRATO 2: EVOLUCIÓN (Mutaciones de Columna)
 * Asegura que los almacenes previos se adapten a las nuevas capacidades.
 */
const EVOLUTIONARY_STRATA: &[(&str, &str)] = &[
    ("INCIDENT_COUNTRY_CODE", "ALTER TABLE incidents ADD COLUMN country_code TEXT"),
    ("INCIDENT_LAST_UPDATED", "ALTER TABLE incidents ADD COLUMN last_updated_at TEXT"),
    ("ARTICLE_IS_PRIMARY", "ALTER TABLE articles ADD COLUMN is_primary INTEGER DEFAULT 0"),
    ("FLAT_COUNTRY_CODE", "ALTER TABLE incident_enrichments_flat ADD COLUMN country_code TEXT"),
];

/**
 * ESTRATO 3: ENDURECIMIENTO (Índices de Aceleración)
 * Optimiza el acceso para las consultas del despacho analítico.
 */
const ACCELERATION_INDEXES: &[(&str, &str)] = &[
    ("IDX_INCIDENTS_ENRICHED", "CREATE INDEX IF NOT EXISTS idx_incidents_llm_enriched ON incidents(llm_enriched, ingested_at);"),
    ("IDX_INCIDENTS_SOURCE", "CREATE INDEX IF NOT EXISTS idx_incidents_source ON incidents(source);"),
    ("IDX_ARTICLES_INCIDENT", "CREATE INDEX IF NOT EXISTS idx_articles_incident ON articles(incident_id);"),
    ("IDX_FLAT_ATTACK_CATEGORY", "CREATE INDEX IF NOT EXISTS idx_enrichments_attack_category ON incident_enrichments_flat(attack_category);"),
    ("IDX_FLAT_COUNTRY", "CREATE INDEX IF NOT EXISTS idx_enrichments_country ON incident_enrichments_flat(country);"),
    ("IDX_FLAT_RANSOM", "CREATE INDEX IF NOT EXISTS idx_enrichments_ransom_demanded ON incident_enrichments_flat(was_ransom_demanded);"),
    ("IDX_FLAT_CREATED", "CREATE INDEX IF NOT EXISTS idx_enrichments_date ON incident_enrichments_flat(created_at);"),
];

/**
 * Ejecuta la secuencia maestra de sincronización del esquema estructural.
 *
 * # Errors:
 * Retorna error si alguna tabla base falla en solidificarse, indicando
 * un colapso en el enlace con el motor embebido.
 */
#[instrument(skip(database_connection))]
pub async fn apply_full_schema(database_connection: &Connection) -> Result<()> {
    info!("🏗️ [SCHEMA_ENGINE]: Initiating structural synchronization V4.3...");

    solidify_base_strata(database_connection).await?;
    execute_evolutionary_repair(database_connection).await?;
    harden_access_layer(database_connection).await?;

    info!("✅ [SCHEMA_ENGINE]: Intelligence Ledger V4.3 level and certified.");
    Ok(())
}

async fn solidify_base_strata(db: &Connection) -> Result<()> {
    for (identifier, sql) in TACTICAL_TABLES {
        debug!("  ↳ Solidifying: {}", identifier);
        db.execute(*sql, ()).await
            .with_context(|| format!("CRITICAL_SOLIDIFICATION_FAULT: {}", identifier))?;
    }
    Ok(())
}

async fn execute_evolutionary_repair(db: &Connection) -> Result<()> {
    for (identifier, sql) in EVOLUTIONARY_STRATA {
        match db.execute(*sql, ()).await {
            Ok(_) => debug!("  🟢 [REPAIR_OK]: Applied evolutionary stratum {}", identifier),
            Err(fault) => {
                let message = fault.to_string();
                if message.contains("duplicate column name") {
                    debug!("  ⚪ [REPAIR_SKIP]: {} already level.", identifier);
                } else {
                    warn!("  ⚠️ [REPAIR_BYPASS]: {} check incomplete: {}", identifier, message);
                }
            }
        }
    }
    Ok(())
}

async fn harden_access_layer(db: &Connection) -> Result<()> {
    for (identifier, sql) in ACCELERATION_INDEXES {
        debug!("  ↳ Hardening: {}", identifier);
        db.execute(*sql, ()).await
            .with_context(|| format!("CRITICAL_HARDENING_FAULT: {}", identifier))?;
    }
    Ok(())
}
