// [libs/infra/db/src/repositories/article.rs]
/*!
 * =================================================================
 * APARATO: ARTICLE VAULT REPOSITORY (V4.2)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: BÓVEDA DE ARTÍCULOS Y CICLO PRIMARIO/DESCARTADO
 * =================================================================
 */

use educti_domain_models::ArticleContent;
use libsql::{params, Row};
use tracing::instrument;

use crate::errors::DbError;
use crate::StoreClient;

pub struct ArticleRepository {
    database_client: StoreClient,
}

impl ArticleRepository {
    pub fn new(database_client: StoreClient) -> Self {
        Self { database_client }
    }

    /// Cristaliza (o refresca) el contenido cosechado de una URL.
    #[instrument(skip(self, article), fields(url = %article.url))]
    pub async fn upsert_article(
        &self,
        incident_id: &str,
        article: &ArticleContent,
    ) -> Result<(), DbError> {
        let connection = self.database_client.get_connection()?;
        connection
            .execute(
                "INSERT INTO articles (incident_id, url, title, author, publish_date, content, \
                 fetch_successful, error_message, content_length, is_primary) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0) \
                 ON CONFLICT(incident_id, url) DO UPDATE SET \
                   title = excluded.title, \
                   author = excluded.author, \
                   publish_date = excluded.publish_date, \
                   content = excluded.content, \
                   fetch_successful = excluded.fetch_successful, \
                   error_message = excluded.error_message, \
                   content_length = excluded.content_length",
                params![
                    incident_id,
                    article.url.clone(),
                    article.title.clone(),
                    article.author.clone(),
                    article.publish_date.clone(),
                    article.content.clone(),
                    if article.fetch_successful { 1i64 } else { 0i64 },
                    article.error_message.clone(),
                    article.content_length as i64
                ],
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_articles_for_incident(
        &self,
        incident_id: &str,
    ) -> Result<Vec<ArticleContent>, DbError> {
        let connection = self.database_client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT url, title, author, publish_date, content, fetch_successful, \
                 error_message, content_length FROM articles WHERE incident_id = ?1",
                params![incident_id],
            )
            .await?;

        let mut articles = Vec::new();
        while let Some(row) = rows.next().await? {
            articles.push(map_article_row(&row)?);
        }
        Ok(articles)
    }

    /// ¿Cuántos artículos persisten para el incidente? (sonda de pruebas)
    pub async fn count_articles_for_incident(&self, incident_id: &str) -> Result<i64, DbError> {
        let connection = self.database_client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT COUNT(*) FROM articles WHERE incident_id = ?1",
                params![incident_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(row.get::<i64>(0)?),
            None => Ok(0),
        }
    }

    /// URL del artículo sellado como primario, si existe.
    pub async fn primary_article_url(&self, incident_id: &str) -> Result<Option<String>, DbError> {
        let connection = self.database_client.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT url FROM articles WHERE incident_id = ?1 AND is_primary = 1 LIMIT 1",
                params![incident_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }
}

fn map_article_row(row: &Row) -> Result<ArticleContent, DbError> {
    let fetch_successful: i64 = row.get::<i64>(5)?;
    let content_length: i64 = row.get::<Option<i64>>(7)?.unwrap_or(0);
    Ok(ArticleContent {
        url: row.get::<String>(0)?,
        title: row.get::<Option<String>>(1)?.unwrap_or_default(),
        author: row.get::<Option<String>>(2)?,
        publish_date: row.get::<Option<String>>(3)?,
        content: row.get::<Option<String>>(4)?.unwrap_or_default(),
        fetch_successful: fetch_successful != 0,
        error_message: row.get::<Option<String>>(6)?,
        content_length: content_length.max(0) as usize,
    })
}
