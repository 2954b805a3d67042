// [tests/mirror/libs/infra/fetch/article_extraction.test.rs]
/**
 * =================================================================
 * APARATO: ARTICLE EXTRACTION CERTIFICATION (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-MIRROR
 * RESPONSABILIDAD: DESTILACIÓN DE TEXTO PRINCIPAL Y METADATOS
 * =================================================================
 */

use educti_infra_fetch::extract_article_from_html;

const WORDPRESS_FIXTURE: &str = r#"<html>
<head>
  <title>University of Testing hit by ransomware | SecNews</title>
  <meta property="article:published_time" content="2024-11-02T08:30:00+00:00">
  <meta name="author" content="Jordan Writer">
</head>
<body>
  <header><nav><a href="/">Home</a><a href="/about">About</a></nav></header>
  <article>
    <h1 class="entry-title">University of Testing hit by ransomware attack</h1>
    <div class="entry-content">
      <p>The University of Testing confirmed on Friday that a ransomware attack encrypted parts of its administrative network, disrupting email and the student portal.</p>
      <p>Officials said the LockBit gang claimed responsibility on its leak site and demanded a payment of several million dollars to delete stolen records.</p>
      <p>Classes continued in person while IT staff restored systems from offline backups over the weekend.</p>
    </div>
  </article>
  <aside><p>Read next: ten unrelated headlines about consumer gadgets and cooking.</p></aside>
  <footer><p>Copyright SecNews. All rights reserved. Subscribe to our newsletter today.</p></footer>
</body>
</html>"#;

#[test]
fn certify_main_content_distillation() {
    let article = extract_article_from_html("https://secnews.example.org/story", WORDPRESS_FIXTURE)
        .expect("fixture yields an article");

    assert!(article.fetch_successful);
    assert!(article.content.contains("ransomware attack encrypted parts"));
    assert!(article.content.contains("restored systems from offline backups"));
    // Navegación, asides y pies quedan fuera del texto destilado.
    assert!(!article.content.contains("Subscribe to our newsletter"));
    assert!(!article.content.contains("consumer gadgets"));
    assert_eq!(article.content_length, article.content.len());
}

#[test]
fn certify_title_author_and_iso_date() {
    let article = extract_article_from_html("https://secnews.example.org/story", WORDPRESS_FIXTURE)
        .expect("fixture yields an article");

    assert_eq!(article.title, "University of Testing hit by ransomware attack");
    assert_eq!(article.author.as_deref(), Some("Jordan Writer"));
    assert_eq!(article.publish_date.as_deref(), Some("2024-11-02"));
}

#[test]
fn certify_short_content_is_rejected() {
    let thin = r#"<html><body><article><div class="entry-content">
        <p>Too short to be a usable article body for extraction purposes.</p>
    </div></article></body></html>"#;
    // 63 caracteres de texto útil < umbral general de 100.
    assert!(extract_article_from_html("https://general.example.org/x", thin).is_none());
}

#[test]
fn certify_niche_site_threshold_is_lower() {
    let short_note = r#"<html><body><article><div class="entry-content">
        <p>A district reported unauthorized access to a vendor portal this week.</p>
    </div></article></body></html>"#;
    let article = extract_article_from_html("https://www.databreaches.net/note", short_note)
        .expect("niche threshold admits short notes");
    assert!(article.content.len() >= 50);
}

#[test]
fn certify_paragraph_aggregation_fallback() {
    let no_known_container = r#"<html><body>
        <div class="totally-custom-layout">
            <p>First paragraph with enough length to clear the forty character filter easily.</p>
            <p>Second paragraph also long enough to be kept by the aggregation fallback pass.</p>
            <p>Third paragraph describing the incident response and recovery timeline in detail.</p>
        </div>
    </body></html>"#;
    let article = extract_article_from_html("https://odd.example.org/story", no_known_container)
        .expect("paragraph fallback recovers text");
    assert!(article.content.contains("Second paragraph"));
}
