// [libs/infra/db/src/repositories/source_state.rs]
/*!
 * =================================================================
 * APARATO: SOURCE WATERMARK REPOSITORY (V4.1)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: MARCA DE AGUA `last_pubdate` POR FUENTE
 *
 * # Mathematical Proof (Monotonic Watermark):
 * El avance usa MAX(valor_actual, candidato) bajo orden lexicográfico
 * ISO-8601, por lo que `last_pubdate` es no-decreciente a través de
 * cualquier secuencia de ingestas exitosas.
 * =================================================================
 */

use libsql::params;
use tracing::{debug, instrument};

use crate::errors::DbError;
use crate::StoreClient;

pub struct SourceStateRepository {
    database_client: StoreClient,
}

impl SourceStateRepository {
    pub fn new(database_client: StoreClient) -> Self {
        Self { database_client }
    }

    #[instrument(skip(self))]
    pub async fn get_last_pubdate(&self, source: &str) -> Result<Option<String>, DbError> {
        let connection = self.database_client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT last_pubdate FROM source_state WHERE source = ?1 LIMIT 1",
                params![source],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(row.get::<Option<String>>(0)?),
            None => Ok(None),
        }
    }

    /// Avanza la marca de agua; los retrocesos se descartan por diseño.
    #[instrument(skip(self))]
    pub async fn set_last_pubdate(&self, source: &str, pubdate: &str) -> Result<(), DbError> {
        let candidate = pubdate.trim();
        if candidate.is_empty() {
            return Ok(());
        }

        let connection = self.database_client.get_connection()?;
        connection
            .execute(
                "INSERT INTO source_state (source, last_pubdate) VALUES (?1, ?2) \
                 ON CONFLICT(source) DO UPDATE SET last_pubdate = MAX(COALESCE(last_pubdate, ''), excluded.last_pubdate)",
                params![source, candidate],
            )
            .await?;

        debug!("💧 [WATERMARK]: {} advanced toward {}", source, candidate);
        Ok(())
    }
}
