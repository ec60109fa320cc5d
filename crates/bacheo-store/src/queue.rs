//! Offline operation queue.
//!
//! Mutations captured while offline are appended here and replayed in FIFO
//! order once the store is reachable. Replay stops at the first failure so
//! later operations never overtake an earlier one. When opened with a path,
//! the queue is mirrored to a JSON file after every change.

use async_trait::async_trait;
use bacheo_core::error::{BacheoError, Result};
use bacheo_core::models::{BacheId, BacheStatus, EvidencePhase, GeoPoint, GeometryEdit, NewBache};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

/// A lifecycle mutation waiting to be applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PendingOperation {
    /// `id` is assigned on the device so later queued edits can refer to it
    Create { id: BacheId, bache: NewBache },
    EditGeometry { id: BacheId, edit: GeometryEdit },
    MoveAnchor { id: BacheId, coordenadas: GeoPoint },
    AdvanceStatus { id: BacheId, status: BacheStatus },
    Delete { id: BacheId },
    AttachEvidence { id: BacheId, phase: EvidencePhase, url: String },
}

impl PendingOperation {
    /// Record the operation targets
    pub fn target(&self) -> BacheId {
        match self {
            PendingOperation::Create { id, .. }
            | PendingOperation::EditGeometry { id, .. }
            | PendingOperation::MoveAnchor { id, .. }
            | PendingOperation::AdvanceStatus { id, .. }
            | PendingOperation::Delete { id }
            | PendingOperation::AttachEvidence { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PendingOperation::Create { .. } => "create",
            PendingOperation::EditGeometry { .. } => "editGeometry",
            PendingOperation::MoveAnchor { .. } => "moveAnchor",
            PendingOperation::AdvanceStatus { .. } => "advanceStatus",
            PendingOperation::Delete { .. } => "delete",
            PendingOperation::AttachEvidence { .. } => "attachEvidence",
        }
    }
}

/// A queue entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedOperation {
    pub id: Uuid,
    pub enqueued_at: DateTime<Utc>,
    pub operation: PendingOperation,
}

/// Port applying queued operations against the real store
#[async_trait]
pub trait QueueProcessor: Send + Sync {
    async fn apply(&self, operation: &PendingOperation) -> Result<()>;
}

/// FIFO of pending operations
#[derive(Debug, Default)]
pub struct OfflineQueue {
    items: Mutex<VecDeque<QueuedOperation>>,
    path: Option<PathBuf>,
}

impl OfflineQueue {
    /// A queue that lives only in memory
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a queue persisted at `path`, loading any entries already there
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let items = if tokio::fs::try_exists(&path).await? {
            let content = tokio::fs::read_to_string(&path).await?;
            if content.trim().is_empty() {
                VecDeque::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            VecDeque::new()
        };

        tracing::debug!(path = %path.display(), pending = items.len(), "Opened offline queue");
        Ok(Self { items: Mutex::new(items), path: Some(path) })
    }

    /// Append an operation and return its queue entry id
    pub async fn enqueue(&self, operation: PendingOperation) -> Result<Uuid> {
        let entry = QueuedOperation { id: Uuid::new_v4(), enqueued_at: Utc::now(), operation };
        let id = entry.id;

        let op = entry.operation.kind();
        let target = entry.operation.target();

        let mut items = self.items.lock().await;
        items.push_back(entry);
        if let Err(e) = self.persist(&items).await {
            // Not queued unless it reached the file
            items.pop_back();
            return Err(e);
        }

        tracing::info!(entry = %id, op, target = %target, "Queued offline operation");
        Ok(id)
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }

    /// Copy of the pending entries, head first
    pub async fn snapshot(&self) -> Vec<QueuedOperation> {
        self.items.lock().await.iter().cloned().collect()
    }

    /// Drop the head entry without applying it
    pub async fn discard_head(&self) -> Result<Option<QueuedOperation>> {
        let mut items = self.items.lock().await;
        let Some(head) = items.pop_front() else {
            return Ok(None);
        };
        if let Err(e) = self.persist(&items).await {
            items.push_front(head);
            return Err(e);
        }
        Ok(Some(head))
    }

    pub async fn clear(&self) -> Result<()> {
        let mut items = self.items.lock().await;
        self.persist(&VecDeque::new()).await?;
        items.clear();
        Ok(())
    }

    /// Replay entries from the head until the queue is empty or one fails.
    ///
    /// Each entry is removed only after it was applied. Returns whether at
    /// least one entry was applied.
    pub async fn process<P>(&self, processor: &P) -> Result<bool>
    where
        P: QueueProcessor + ?Sized,
    {
        let mut items = self.items.lock().await;
        let mut worked = false;

        while let Some(head) = items.front() {
            match processor.apply(&head.operation).await {
                Ok(()) => {
                    tracing::info!(entry = %head.id, op = head.operation.kind(), "Replayed offline operation");
                    items.pop_front();
                    self.persist(&items).await?;
                    worked = true;
                }
                Err(e) => {
                    tracing::warn!(
                        entry = %head.id,
                        op = head.operation.kind(),
                        error = %e,
                        "Offline replay stopped"
                    );
                    break;
                }
            }
        }

        Ok(worked)
    }

    async fn persist(&self, items: &VecDeque<QueuedOperation>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(items)?;
        tokio::fs::write(path, json).await.map_err(|e| BacheoError::Storage {
            reason: format!("Failed to write offline queue {}: {}", path.display(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bacheo_core::models::StreetMeta;
    use std::sync::Mutex as StdMutex;
    use tempfile::TempDir;

    /// Applies operations until `fail_at` is reached
    struct Recorder {
        applied: StdMutex<Vec<&'static str>>,
        fail_at: Option<usize>,
    }

    impl Recorder {
        fn new(fail_at: Option<usize>) -> Self {
            Self { applied: StdMutex::new(Vec::new()), fail_at }
        }

        fn applied(&self) -> Vec<&'static str> {
            self.applied.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QueueProcessor for Recorder {
        async fn apply(&self, operation: &PendingOperation) -> Result<()> {
            let mut applied = self.applied.lock().unwrap();
            if Some(applied.len()) == self.fail_at {
                return Err(BacheoError::Storage { reason: "offline".to_string() });
            }
            applied.push(operation.kind());
            Ok(())
        }
    }

    fn create_op() -> PendingOperation {
        PendingOperation::Create {
            id: BacheId::new(),
            bache: NewBache {
                medidas: "3\n2\n2".to_string(),
                coordenadas: Some(GeoPoint::new(19.43, -99.13)),
                street: StreetMeta::new("Juárez", vec![]),
                curb_side: None,
                residente_uid: None,
            },
        }
    }

    #[tokio::test]
    async fn test_process_in_order() {
        let queue = OfflineQueue::in_memory();
        let op = create_op();
        let id = op.target();
        queue.enqueue(op).await.unwrap();
        queue.enqueue(PendingOperation::AdvanceStatus { id, status: BacheStatus::Iniciado }).await.unwrap();
        queue.enqueue(PendingOperation::Delete { id }).await.unwrap();

        let recorder = Recorder::new(None);
        assert!(queue.process(&recorder).await.unwrap());
        assert_eq!(recorder.applied(), vec!["create", "advanceStatus", "delete"]);
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn test_process_stops_at_first_failure() {
        let queue = OfflineQueue::in_memory();
        let op = create_op();
        let id = op.target();
        queue.enqueue(op).await.unwrap();
        queue
            .enqueue(PendingOperation::MoveAnchor { id, coordenadas: GeoPoint::new(19.0, -99.0) })
            .await
            .unwrap();
        queue.enqueue(PendingOperation::Delete { id }).await.unwrap();

        let recorder = Recorder::new(Some(1));
        assert!(queue.process(&recorder).await.unwrap());
        assert_eq!(recorder.applied(), vec!["create"]);

        let remaining = queue.snapshot().await;
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].operation.kind(), "moveAnchor");
    }

    #[tokio::test]
    async fn test_nothing_applied_reports_no_work() {
        let queue = OfflineQueue::in_memory();
        queue.enqueue(create_op()).await.unwrap();

        let recorder = Recorder::new(Some(0));
        assert!(!queue.process(&recorder).await.unwrap());
        assert_eq!(queue.len().await, 1);

        assert!(queue.process(&Recorder::new(None)).await.unwrap());
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn test_persists_between_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("queue.json");

        {
            let queue = OfflineQueue::open(&path).await.unwrap();
            queue.enqueue(create_op()).await.unwrap();
            queue.enqueue(PendingOperation::Delete { id: BacheId::new() }).await.unwrap();
        }

        let reopened = OfflineQueue::open(&path).await.unwrap();
        let items = reopened.snapshot().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].operation.kind(), "create");

        reopened.discard_head().await.unwrap();
        let again = OfflineQueue::open(&path).await.unwrap();
        assert_eq!(again.len().await, 1);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_queue_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("queue.json");
        let queue = OfflineQueue::open(&path).await.unwrap();

        let err = queue.enqueue(create_op()).await.unwrap_err();
        assert!(matches!(err, BacheoError::Storage { .. }));
        assert!(queue.is_empty().await);

        // A retry after the directory appears queues exactly one entry
        std::fs::create_dir(dir.path().join("missing")).unwrap();
        queue.enqueue(create_op()).await.unwrap();
        assert_eq!(queue.len().await, 1);
        assert_eq!(OfflineQueue::open(&path).await.unwrap().len().await, 1);
    }

    #[test]
    fn test_operation_json_shape() {
        let id = BacheId::new();
        let op = PendingOperation::AdvanceStatus { id, status: BacheStatus::EnProceso };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["type"], "advanceStatus");
        assert_eq!(json["status"], "en-proceso");
    }
}
