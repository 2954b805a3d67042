// [tests/mirror/libs/infra/db/article_lifecycle.test.rs]
/**
 * =================================================================
 * APARATO: ARTICLE VAULT CERTIFICATION (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-MIRROR
 * RESPONSABILIDAD: UPSERT DE ARTÍCULOS Y LECTURA POR INCIDENTE
 * =================================================================
 */

use educti_domain_models::ArticleContent;
use educti_infra_db::{ArticleRepository, StoreClient};

#[tokio::test]
async fn certify_article_upsert_refreshes_content() {
    let client = StoreClient::connect("file:mem_article_vault_a?mode=memory&cache=shared")
        .await
        .unwrap();
    let vault = ArticleRepository::new(client.clone());

    let first_pass = ArticleContent {
        url: "https://example.org/story".into(),
        title: "First pass".into(),
        content: "short body".into(),
        author: None,
        publish_date: None,
        fetch_successful: false,
        error_message: Some("timeout".into()),
        content_length: 10,
    };
    vault.upsert_article("incident_a", &first_pass).await.unwrap();

    let second_pass = ArticleContent {
        url: "https://example.org/story".into(),
        title: "Second pass".into(),
        content: "a much richer article body with details".into(),
        author: Some("Reporter".into()),
        publish_date: Some("2024-11-02".into()),
        fetch_successful: true,
        error_message: None,
        content_length: 39,
    };
    vault.upsert_article("incident_a", &second_pass).await.unwrap();

    let stored = vault.get_articles_for_incident("incident_a").await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Second pass");
    assert!(stored[0].fetch_successful);
    assert_eq!(stored[0].author.as_deref(), Some("Reporter"));
    assert!(stored[0].error_message.is_none());
}

#[tokio::test]
async fn certify_articles_scoped_per_incident() {
    let client = StoreClient::connect("file:mem_article_vault_b?mode=memory&cache=shared")
        .await
        .unwrap();
    let vault = ArticleRepository::new(client.clone());

    for (incident_id, url) in [
        ("incident_a", "https://example.org/one"),
        ("incident_a", "https://example.org/two"),
        ("incident_b", "https://example.org/three"),
    ] {
        let article = ArticleContent {
            url: url.into(),
            title: String::new(),
            content: "body text that is long enough to matter here".into(),
            author: None,
            publish_date: None,
            fetch_successful: true,
            error_message: None,
            content_length: 44,
        };
        vault.upsert_article(incident_id, &article).await.unwrap();
    }

    assert_eq!(vault.count_articles_for_incident("incident_a").await.unwrap(), 2);
    assert_eq!(vault.count_articles_for_incident("incident_b").await.unwrap(), 1);
    assert!(vault.primary_article_url("incident_a").await.unwrap().is_none());
}
