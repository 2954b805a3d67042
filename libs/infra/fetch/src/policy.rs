// [libs/infra/fetch/src/policy.rs]
/*!
 * =================================================================
 * APARATO: FETCH POLITENESS POLICY (V4.1)
 * CLASIFICACIÓN: INFRASTRUCTURE CORE (ESTRATO L3)
 * RESPONSABILIDAD: PARÁMETROS DE CORTESÍA, REINTENTO Y EVASIÓN
 * =================================================================
 */

/// Agentes de usuario de escritorio rotados en cada llamada plana.
pub const HTTP_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:130.0) Gecko/20100101 Firefox/130.0",
];

/// Agentes reservados para el canal de evasión (versiones más nuevas).
pub const BOT_EVASION_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
];

/// Tamaños de viewport plausibles para aleatorizar la huella.
pub const VIEWPORT_SIZES: &[(u32, u32)] = &[
    (1920, 1080),
    (1440, 900),
    (1366, 768),
    (1536, 864),
    (2560, 1440),
];

/// Estados HTTP que disparan la escalada a navegador.
pub const BLOCKED_STATUS_CODES: &[u16] = &[403, 429, 503];

/// Fallos por dominio antes de preferir el canal de navegador.
pub const DOMAIN_FAILURE_THRESHOLD: u32 = 2;

/// Política de cortesía y reintentos del cosechador.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    pub request_timeout_seconds: u64,
    pub max_retries: u32,
    /// Base del backoff lineal-multiplicado: espera = base × intento.
    pub backoff_base_seconds: f64,
    pub min_delay_seconds: f64,
    pub max_delay_seconds: f64,
    /// Permite deshabilitar el canal de navegador (entornos sin Chrome).
    pub browser_fallback_enabled: bool,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 30,
            max_retries: 4,
            backoff_base_seconds: 1.5,
            min_delay_seconds: 0.5,
            max_delay_seconds: 2.5,
            browser_fallback_enabled: true,
        }
    }
}

impl FetchPolicy {
    /// Espera del reintento `attempt` (1-indexado) del canal plano.
    pub fn retry_hold_seconds(&self, attempt: u32) -> f64 {
        self.backoff_base_seconds * attempt as f64
    }
}
