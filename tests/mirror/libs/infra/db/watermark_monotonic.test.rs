// [tests/mirror/libs/infra/db/watermark_monotonic.test.rs]
/**
 * =================================================================
 * APARATO: WATERMARK MONOTONICITY CERTIFICATION (V4.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-MIRROR
 * RESPONSABILIDAD: `last_pubdate` NO-DECRECIENTE POR FUENTE
 * =================================================================
 */

use educti_infra_db::{SourceStateRepository, StoreClient};

#[tokio::test]
async fn certify_watermark_only_advances() {
    println!("\n💧 [PROVING_GROUNDS]: Auditing watermark strata...");

    let client = StoreClient::connect("file:mem_watermark_a?mode=memory&cache=shared")
        .await
        .unwrap();
    let watermarks = SourceStateRepository::new(client.clone());

    assert!(watermarks.get_last_pubdate("bleepingcomputer").await.unwrap().is_none());

    watermarks
        .set_last_pubdate("bleepingcomputer", "2025-01-01")
        .await
        .unwrap();
    assert_eq!(
        watermarks.get_last_pubdate("bleepingcomputer").await.unwrap().as_deref(),
        Some("2025-01-01")
    );

    // Avance legítimo.
    watermarks
        .set_last_pubdate("bleepingcomputer", "2025-01-03")
        .await
        .unwrap();
    assert_eq!(
        watermarks.get_last_pubdate("bleepingcomputer").await.unwrap().as_deref(),
        Some("2025-01-03")
    );

    // Un retroceso se descarta por diseño.
    watermarks
        .set_last_pubdate("bleepingcomputer", "2024-12-30")
        .await
        .unwrap();
    assert_eq!(
        watermarks.get_last_pubdate("bleepingcomputer").await.unwrap().as_deref(),
        Some("2025-01-03")
    );

    println!("   ✅ [SUCCESS]: Watermark is monotonically non-decreasing.");
}

#[tokio::test]
async fn certify_watermarks_are_per_source() {
    let client = StoreClient::connect("file:mem_watermark_b?mode=memory&cache=shared")
        .await
        .unwrap();
    let watermarks = SourceStateRepository::new(client.clone());

    watermarks.set_last_pubdate("alpha", "2025-02-01").await.unwrap();
    watermarks.set_last_pubdate("beta", "2024-06-15").await.unwrap();

    assert_eq!(
        watermarks.get_last_pubdate("alpha").await.unwrap().as_deref(),
        Some("2025-02-01")
    );
    assert_eq!(
        watermarks.get_last_pubdate("beta").await.unwrap().as_deref(),
        Some("2024-06-15")
    );

    // Cadenas vacías no tocan el estado.
    watermarks.set_last_pubdate("alpha", "   ").await.unwrap();
    assert_eq!(
        watermarks.get_last_pubdate("alpha").await.unwrap().as_deref(),
        Some("2025-02-01")
    );
}
