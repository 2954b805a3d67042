// [apps/pipeline/src/config.rs]
/*!
 * =================================================================
 * APARATO: PIPELINE CONFIGURATION RECORD (V4.2)
 * CLASIFICACIÓN: COMPOSITION ROOT (ESTRATO L0)
 * RESPONSABILIDAD: CONFIGURACIÓN EXPLÍCITA DESDE EL ENTORNO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NO GLOBALS: el registro se construye una sola vez en el punto de
 *    entrada y viaja explícitamente hacia los componentes.
 * 2. VOLUME AUTODETECT: contenedores con volumen persistente montado
 *    en /app/data se detectan sin configuración adicional.
 * =================================================================
 */

use std::env;
use std::path::{Path, PathBuf};

use tracing::info;

/// Volumen persistente estándar de los despliegues en contenedor.
const CONTAINER_VOLUME_PATH: &str = "/app/data";

/// Registro de configuración del proceso completo.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_level: String,

    // --- FASE 2: ENLACE CON EL MODELO ---
    pub llm_api_key: Option<String>,
    pub llm_host: String,
    pub llm_model: String,

    pub enrichment_batch_size: u32,
    pub enrichment_max_retries: u32,
    pub enrichment_rate_limit_delay: f64,
}

impl PipelineConfig {
    /**
     * Construye el registro desde variables de entorno (.env incluido).
     *
     * Prioridad del directorio de datos: `EDU_CTI_DATA_DIR` explícito →
     * volumen de contenedor escribible → `./data` local.
     */
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let data_dir = resolve_data_dir();
        let db_file = env::var("EDU_CTI_DB_PATH").unwrap_or_else(|_| "eduthreat.db".to_string());
        let db_path = data_dir.join(db_file);

        let config = Self {
            data_dir,
            db_path,
            log_level: env::var("EDU_CTI_LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string()),

            llm_api_key: env::var("OLLAMA_API_KEY").ok().filter(|key| !key.is_empty()),
            llm_host: env::var("OLLAMA_HOST")
                .unwrap_or_else(|_| "https://ollama.com".to_string()),
            llm_model: env::var("OLLAMA_MODEL")
                .unwrap_or_else(|_| "deepseek-v3.1:671b-cloud".to_string()),

            enrichment_batch_size: parse_env("ENRICHMENT_BATCH_SIZE", 10),
            enrichment_max_retries: parse_env("ENRICHMENT_MAX_RETRIES", 3),
            enrichment_rate_limit_delay: parse_env("ENRICHMENT_RATE_LIMIT_DELAY", 2.0),
        };

        info!(
            "⚙️ [CONFIG]: Data dir [{}], store [{}]",
            config.data_dir.display(),
            config.db_path.display()
        );
        config
    }

    /// Crea los directorios de trabajo si no existen.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }

    pub fn db_path_str(&self) -> String {
        self.db_path.to_string_lossy().to_string()
    }
}

fn resolve_data_dir() -> PathBuf {
    if let Ok(explicit) = env::var("EDU_CTI_DATA_DIR") {
        if !explicit.trim().is_empty() {
            return PathBuf::from(explicit);
        }
    }

    let container_volume = Path::new(CONTAINER_VOLUME_PATH);
    if container_volume.exists() && is_writable(container_volume) {
        info!("⚙️ [CONFIG]: Container volume detected, using persistent storage.");
        return container_volume.to_path_buf();
    }

    PathBuf::from("data")
}

fn is_writable(path: &Path) -> bool {
    let probe = path.join(".write_probe");
    match std::fs::write(&probe, b"probe") {
        Ok(_) => {
            let _ = std::fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}
