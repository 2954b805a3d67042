// [libs/domain/sources/src/sink.rs]
/*!
 * =================================================================
 * APARATO: INCIDENT SINK SEAM (V4.1)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: PERSISTENCIA INCREMENTAL DESACOPLADA
 *
 * # Mathematical Proof (Partial Progress):
 * Los adaptadores emiten un lote por página o por respuesta de API;
 * una corrida interrumpida conserva todo lote ya emitido. El sumidero
 * decide deduplicación y transaccionalidad, no el adaptador.
 * =================================================================
 */

use educti_domain_models::Incident;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("[L2_SINK_FAULT]: BATCH_PERSIST_REJECTED -> {0}")]
pub struct SinkFault(pub String);

/// Puerto de persistencia incremental de los adaptadores.
pub trait IncidentSink {
    /// Persiste un lote; retorna cuántos incidentes eran nuevos.
    fn save_batch(
        &mut self,
        incidents: &[Incident],
    ) -> impl std::future::Future<Output = Result<usize, SinkFault>> + Send;
}

/// Sumidero en memoria para los proving grounds de adaptadores.
#[derive(Default)]
pub struct MemorySink {
    pub batches: Vec<Vec<Incident>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all_incidents(&self) -> Vec<&Incident> {
        self.batches.iter().flatten().collect()
    }
}

impl IncidentSink for MemorySink {
    async fn save_batch(&mut self, incidents: &[Incident]) -> Result<usize, SinkFault> {
        self.batches.push(incidents.to_vec());
        Ok(incidents.len())
    }
}
