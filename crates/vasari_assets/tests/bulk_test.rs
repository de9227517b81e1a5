//! Tests for bulk ingestion.

mod common;

use common::{fixture, png_bytes};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use vasari_assets::{BulkIngestionCoordinator, IngestConfig};

fn coordinator(fx: &common::Fixture) -> BulkIngestionCoordinator {
    BulkIngestionCoordinator::new(Arc::clone(&fx.manager), IngestConfig::default())
}

#[tokio::test]
async fn test_bulk_create_separates_successes_from_failures() {
    let fx = fixture();
    let bulk = coordinator(&fx);
    let parent_id = Uuid::new_v4();

    // Indices 1 and 3 are invalid payloads.
    let payloads = vec![
        png_bytes(400, 400),
        b"not an image".to_vec(),
        png_bytes(500, 500),
        vec![0u8; 16],
        png_bytes(600, 600),
    ];
    let total = payloads.len();

    let report = bulk
        .bulk_create(parent_id, payloads, None, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.created.len(), 3);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.created.len() + report.failures.len(), total);

    let failed_indices: Vec<usize> = report.failures.iter().map(|f| f.index).collect();
    assert_eq!(failed_indices, vec![1, 3]);

    // Failed items left nothing behind: 3 originals + 6 renditions.
    assert_eq!(fx.store.len(), 9);
    assert_eq!(fx.repository.len(), 3);
}

#[tokio::test]
async fn test_bulk_create_rejects_oversized_batch_before_any_work() {
    let fx = fixture();
    let bulk = coordinator(&fx);

    let payloads: Vec<Vec<u8>> = (0..11).map(|_| png_bytes(300, 300)).collect();
    let err = bulk
        .bulk_create(Uuid::new_v4(), payloads, None, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        vasari_error::VasariErrorKind::Ingest(_)
    ));
    assert!(fx.store.is_empty(), "fail-fast must not touch storage");
    assert!(fx.repository.is_empty());
}

#[tokio::test]
async fn test_bulk_create_assigns_base_order_by_index() {
    let fx = fixture();
    let bulk = coordinator(&fx);
    let parent_id = Uuid::new_v4();

    let payloads = vec![
        png_bytes(300, 300),
        png_bytes(400, 400),
        png_bytes(500, 500),
    ];
    let report = bulk
        .bulk_create(parent_id, payloads, Some(10), &CancellationToken::new())
        .await
        .unwrap();

    assert!(report.failures.is_empty());
    let orders: Vec<u32> = report.created.iter().map(|asset| asset.order).collect();
    assert_eq!(orders, vec![10, 11, 12]);

    // Created assets come back in input order.
    let widths: Vec<u32> = report.created.iter().map(|asset| asset.width).collect();
    assert_eq!(widths, vec![300, 400, 500]);
}

#[tokio::test]
async fn test_bulk_create_honors_cancellation() {
    let fx = fixture();
    let bulk = coordinator(&fx);

    let token = CancellationToken::new();
    token.cancel();

    let payloads = vec![png_bytes(300, 300), png_bytes(400, 400)];
    let report = bulk
        .bulk_create(Uuid::new_v4(), payloads, None, &token)
        .await
        .unwrap();

    assert!(report.created.is_empty());
    assert_eq!(report.failures.len(), 2);
    for failure in &report.failures {
        assert!(matches!(
            failure.error.kind(),
            vasari_error::VasariErrorKind::Ingest(_)
        ));
    }
    assert!(
        fx.store.is_empty(),
        "unscheduled items must not write storage"
    );
}
