// [libs/domain/models/src/article.rs]
/*!
 * =================================================================
 * APARATO: ARTICLE CONTENT ENTITY (V4.0)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: CONTENEDOR DEL TEXTO PRIMARIO COSECHADO
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// Artículo cosechado asociado a un incidente durante el enriquecimiento.
///
/// Varios artículos conviven mientras se puntúa la cobertura; solo el
/// primario sobrevive a la transacción de enriquecimiento.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleContent {
    pub url: String,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub publish_date: Option<String>,
    pub fetch_successful: bool,
    pub error_message: Option<String>,
    pub content_length: usize,
}

impl ArticleContent {
    /// Artículo fallido con el diagnóstico del último intento.
    pub fn failed(url: &str, error_message: &str) -> Self {
        Self {
            url: url.to_string(),
            title: String::new(),
            content: String::new(),
            author: None,
            publish_date: None,
            fetch_successful: false,
            error_message: Some(error_message.to_string()),
            content_length: 0,
        }
    }

    /// Umbral mínimo de texto para considerarse utilizable en extracción.
    pub fn has_usable_text(&self) -> bool {
        self.fetch_successful && self.content.trim().len() > 50
    }
}
