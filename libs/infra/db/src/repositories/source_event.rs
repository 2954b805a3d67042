// [libs/infra/db/src/repositories/source_event.rs]
/*!
 * =================================================================
 * APARATO: SOURCE EVENT REPOSITORY (V4.1)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: DETECCIÓN BARATA DE RE-INGESTA POR EVENTO NATIVO
 * =================================================================
 */

use libsql::{params, Connection};
use tracing::instrument;

use crate::errors::DbError;
use crate::StoreClient;

pub struct SourceEventRepository {
    database_client: StoreClient,
}

impl SourceEventRepository {
    pub fn new(database_client: StoreClient) -> Self {
        Self { database_client }
    }

    /// ¿La fuente ya reportó este identificador nativo?
    #[instrument(skip(self))]
    pub async fn source_event_exists(
        &self,
        source: &str,
        source_event_id: &str,
    ) -> Result<bool, DbError> {
        let connection = self.database_client.get_connection()?;
        self.source_event_exists_on(&connection, source, source_event_id)
            .await
    }

    pub async fn source_event_exists_on(
        &self,
        connection: &Connection,
        source: &str,
        source_event_id: &str,
    ) -> Result<bool, DbError> {
        let mut rows = connection
            .query(
                "SELECT 1 FROM source_events WHERE source = ?1 AND source_event_id = ?2 LIMIT 1",
                params![source, source_event_id],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// Registro idempotente del mapeo `(fuente, evento)` → incidente.
    #[instrument(skip(self))]
    pub async fn register_source_event(
        &self,
        source: &str,
        source_event_id: &str,
        incident_id: &str,
        registered_at: &str,
    ) -> Result<(), DbError> {
        let connection = self.database_client.get_connection()?;
        self.register_source_event_on(&connection, source, source_event_id, incident_id, registered_at)
            .await
    }

    pub async fn register_source_event_on(
        &self,
        connection: &Connection,
        source: &str,
        source_event_id: &str,
        incident_id: &str,
        registered_at: &str,
    ) -> Result<(), DbError> {
        connection
            .execute(
                "INSERT INTO source_events (source, source_event_id, incident_id, registered_at) \
                 VALUES (?1, ?2, ?3, ?4) \
                 ON CONFLICT(source, source_event_id) DO NOTHING",
                params![source, source_event_id, incident_id, registered_at],
            )
            .await?;
        Ok(())
    }
}
