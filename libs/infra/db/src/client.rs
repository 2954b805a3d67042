// [libs/infra/db/src/client.rs]
/*!
 * =================================================================
 * APARATO: DATABASE CONNECTION CLIENT (V4.2 - MEMORY ANCHORED)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: GESTIÓN DE ENLACES AL ALMACÉN EMBEBIDO Y BOOTSTRAP
 *
 * # Mathematical Proof (In-Memory Consistency):
 * Para garantizar que el esquema sea visible entre tareas en modo RAM,
 * el cliente detecta URLs de memoria y aplica el ancla de persistencia
 * ANTES de la ejecución del bootstrap, asegurando que las tablas
 * residan en un segmento de memoria compartido.
 * =================================================================
 */

use std::sync::Arc;

use libsql::{Builder, Connection, Database};
use tracing::{error, info, instrument};

use crate::errors::DbError;
use crate::schema::apply_full_schema;

#[derive(Clone)]
pub struct StoreClient {
    internal_database_driver: Arc<Database>,
    /// Mantiene la base de datos viva en memoria evitando que SQLite la purgue.
    _memory_persistence_anchor: Option<Arc<Connection>>,
}

impl StoreClient {
    /// Abre (o crea) el almacén local y solidifica el esquema completo.
    #[instrument]
    pub async fn connect(database_path: &str) -> Result<Self, DbError> {
        if database_path.is_empty() {
            return Err(DbError::ConfigurationError(
                "CRITICAL_FAULT: DATABASE_PATH_UNDEFINED".into(),
            ));
        }

        info!("🔌 [DATABASE]: Initiating store link to [{}]", database_path);

        let is_memory =
            database_path.contains(":memory:") || database_path.contains("mode=memory");

        let database_driver = Builder::new_local(database_path)
            .build()
            .await
            .map_err(|fault| {
                DbError::ConnectionError(format!("DRIVER_IGNITION_FAILURE: {}", fault))
            })?;

        let shared_driver = Arc::new(database_driver);
        let mut anchor = None;

        if is_memory {
            let anchor_connection = shared_driver
                .connect()
                .map_err(|fault| DbError::ConnectionError(format!("ANCHOR_FAULT: {}", fault)))?;

            apply_full_schema(&anchor_connection).await.map_err(|fault| {
                DbError::ConnectionError(format!("SCHEMA_SYNC_FAULT: {}", fault))
            })?;

            anchor = Some(Arc::new(anchor_connection));
            info!("⚓ [DATABASE]: Memory strata solidified and anchored.");
        } else {
            let bootstrap_connection = shared_driver.connect().map_err(|fault| {
                DbError::ConnectionError(format!("BOOTSTRAP_LINK_FAULT: {}", fault))
            })?;
            apply_full_schema(&bootstrap_connection)
                .await
                .map_err(|fault| {
                    DbError::ConnectionError(format!("SCHEMA_SYNC_FAULT: {}", fault))
                })?;
        }

        Ok(Self {
            internal_database_driver: shared_driver,
            _memory_persistence_anchor: anchor,
        })
    }

    pub fn get_connection(&self) -> Result<Connection, DbError> {
        self.internal_database_driver.connect().map_err(|fault| {
            error!("⚠️ [POOL_FAULT]: Connection allocation failed: {}", fault);
            DbError::ConnectionError(fault.to_string())
        })
    }
}
