//! Bulk ingestion: many uploads, one logical operation.

use crate::{AssetManager, IngestConfig};
use futures::StreamExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use vasari_core::{Asset, AssetMetadata};
use vasari_error::{IngestError, IngestErrorKind, VasariError, VasariResult};

/// One input item that failed, addressable by its position in the batch.
#[derive(Debug)]
pub struct ItemFailure {
    /// Index of the payload in the submitted batch
    pub index: usize,
    /// Why this item failed
    pub error: VasariError,
}

/// Outcome of a bulk ingestion call.
///
/// `created.len() + failures.len()` always equals the number of submitted
/// payloads; a partial batch is reported, never disguised as full success.
#[derive(Debug, Default)]
pub struct BulkReport {
    /// Successfully created assets, in input order
    pub created: Vec<Asset>,
    /// Per-item failures, in input order
    pub failures: Vec<ItemFailure>,
}

/// Orchestrates multi-file uploads as one partially-tolerant operation.
///
/// Items run through [`AssetManager::create`] with bounded concurrency.
/// There is no transaction across items: each item commits or rolls back
/// on its own, and the report separates successes from failures.
pub struct BulkIngestionCoordinator {
    manager: Arc<AssetManager>,
    config: IngestConfig,
}

impl BulkIngestionCoordinator {
    /// Create a coordinator over a shared manager.
    pub fn new(manager: Arc<AssetManager>, config: IngestConfig) -> Self {
        Self { manager, config }
    }

    /// Ingest a batch of payloads for one parent.
    ///
    /// Fails fast with `BatchTooLarge` before touching any item when the
    /// batch exceeds the configured limit. Otherwise every item is
    /// attempted: one item's failure never aborts the rest.
    ///
    /// When `base_order` is given, item `i` is created with
    /// `order = base_order + i`; otherwise items append after the parent's
    /// existing assets.
    ///
    /// Cancelling `cancel` stops scheduling new items (they report as
    /// `Cancelled` failures) while in-flight items finish, so no storage
    /// write is left without matching metadata.
    #[tracing::instrument(
        skip(self, payloads, cancel),
        fields(parent_id = %parent_id, items = payloads.len())
    )]
    pub async fn bulk_create(
        &self,
        parent_id: Uuid,
        payloads: Vec<Vec<u8>>,
        base_order: Option<u32>,
        cancel: &CancellationToken,
    ) -> VasariResult<BulkReport> {
        let limit = *self.config.max_batch_size();
        if payloads.len() > limit {
            return Err(IngestError::new(IngestErrorKind::BatchTooLarge {
                size: payloads.len(),
                limit,
            })
            .into());
        }

        let total = payloads.len();
        let mut results: Vec<(usize, VasariResult<Asset>)> =
            futures::stream::iter(payloads.into_iter().enumerate().map(|(index, bytes)| {
                let manager = Arc::clone(&self.manager);
                let cancel = cancel.clone();
                async move {
                    // Checked at schedule time: in-flight items finish,
                    // unscheduled items are reported, not silently dropped.
                    if cancel.is_cancelled() {
                        return (
                            index,
                            Err(IngestError::new(IngestErrorKind::Cancelled).into()),
                        );
                    }
                    let metadata = AssetMetadata {
                        order: base_order.map(|base| base + index as u32),
                        ..AssetMetadata::default()
                    };
                    (index, manager.create(parent_id, bytes, metadata).await)
                }
            }))
            .buffer_unordered(*self.config.max_concurrency())
            .collect()
            .await;

        results.sort_by_key(|(index, _)| *index);

        let mut report = BulkReport::default();
        for (index, result) in results {
            match result {
                Ok(asset) => report.created.push(asset),
                Err(error) => report.failures.push(ItemFailure { index, error }),
            }
        }

        tracing::info!(
            parent_id = %parent_id,
            submitted = total,
            created = report.created.len(),
            failed = report.failures.len(),
            "Bulk ingestion finished"
        );
        Ok(report)
    }
}

impl std::fmt::Debug for BulkIngestionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkIngestionCoordinator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
