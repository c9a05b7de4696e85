//! Report persistence
//!
//! Generated reports are kept so they can be downloaded again by id. Two
//! stores are provided: [`MemoryReportStore`], which keeps the most recent
//! reports of a single process, and [`FsReportStore`], which keeps each report
//! as `<id>.pdf` next to a `<id>.json` metadata sidecar.

use std::collections::{HashMap, VecDeque};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

pub type ReportId = Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt report metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

/// A report as held by a store
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReport {
    pub id: ReportId,
    pub filename: String,
    pub created_at: DateTime<Utc>,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Copy the file at `path` into the store under a fresh id
    async fn put_file(&self, path: &Path, filename: &str) -> Result<ReportId, StoreError>;

    async fn get(&self, id: ReportId) -> Result<Option<StoredReport>, StoreError>;
}

/// Number of reports the memory store keeps unless told otherwise
pub const DEFAULT_MEMORY_CAPACITY: usize = 100;

/// Holds up to `capacity` reports, evicting the oldest first
pub struct MemoryReportStore {
    capacity: usize,
    inner: RwLock<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    reports: HashMap<ReportId, StoredReport>,
    /// Insertion order, oldest at the front
    order: VecDeque<ReportId>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_CAPACITY)
    }

    /// A store holding at most `capacity` reports (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: RwLock::new(MemoryInner::default()),
        }
    }
}

impl Default for MemoryReportStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn put_file(&self, path: &Path, filename: &str) -> Result<ReportId, StoreError> {
        let bytes = tokio::fs::read(path).await?;
        let id = Uuid::new_v4();

        let report = StoredReport {
            id,
            filename: filename.to_string(),
            created_at: Utc::now(),
            bytes,
        };

        let mut inner = self.inner.write().await;
        while inner.order.len() >= self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.reports.remove(&oldest);
            tracing::debug!("Evicted report {} from memory store", oldest);
        }
        inner.reports.insert(id, report);
        inner.order.push_back(id);

        Ok(id)
    }

    async fn get(&self, id: ReportId) -> Result<Option<StoredReport>, StoreError> {
        Ok(self.inner.read().await.reports.get(&id).cloned())
    }
}

/// Sidecar metadata written next to each stored PDF
#[derive(Debug, Serialize, Deserialize)]
struct Metadata {
    filename: String,
    size: u64,
    created_at: DateTime<Utc>,
}

pub struct FsReportStore {
    dir: PathBuf,
}

impl FsReportStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        tracing::info!("Report store at {}", dir.display());
        Ok(Self { dir })
    }

    fn pdf_path(&self, id: ReportId) -> PathBuf {
        self.dir.join(format!("{}.pdf", id))
    }

    fn metadata_path(&self, id: ReportId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

#[async_trait]
impl ReportStore for FsReportStore {
    // Sidecar first, PDF last: a report is only visible once both exist, and
    // a failed copy removes whatever was written.
    async fn put_file(&self, path: &Path, filename: &str) -> Result<ReportId, StoreError> {
        let id = Uuid::new_v4();
        let metadata = Metadata {
            filename: filename.to_string(),
            size: tokio::fs::metadata(path).await?.len(),
            created_at: Utc::now(),
        };
        let metadata_path = self.metadata_path(id);
        tokio::fs::write(&metadata_path, serde_json::to_vec(&metadata)?).await?;

        let pdf_path = self.pdf_path(id);
        if let Err(e) = tokio::fs::copy(path, &pdf_path).await {
            remove_quietly(&pdf_path).await;
            remove_quietly(&metadata_path).await;
            return Err(e.into());
        }

        Ok(id)
    }

    async fn get(&self, id: ReportId) -> Result<Option<StoredReport>, StoreError> {
        let Some(raw_metadata) = read_if_exists(&self.metadata_path(id)).await? else {
            return Ok(None);
        };
        let Some(bytes) = read_if_exists(&self.pdf_path(id)).await? else {
            return Ok(None);
        };
        let metadata: Metadata = serde_json::from_slice(&raw_metadata)?;

        Ok(Some(StoredReport {
            id,
            filename: metadata.filename,
            created_at: metadata.created_at,
            bytes,
        }))
    }
}

async fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>, std::io::Error> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

async fn remove_quietly(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn write_source(dir: &TempDir, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join("source.pdf");
        tokio::fs::write(&path, bytes).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = write_source(&tmp, b"%PDF-1.7 memory").await;
        let store = MemoryReportStore::new();

        let id = store.put_file(&path, "plagiarism_report.pdf").await.unwrap();
        let report = store.get(id).await.unwrap().unwrap();

        assert_eq!(report.id, id);
        assert_eq!(report.filename, "plagiarism_report.pdf");
        assert_eq!(report.bytes, b"%PDF-1.7 memory");
    }

    #[tokio::test]
    async fn test_each_put_gets_a_new_id() {
        let tmp = TempDir::new().unwrap();
        let path = write_source(&tmp, b"%PDF").await;
        let store = MemoryReportStore::new();

        let first = store.put_file(&path, "a.pdf").await.unwrap();
        let second = store.put_file(&path, "a.pdf").await.unwrap();

        assert_ne!(first, second);
        assert!(store.get(first).await.unwrap().is_some());
        assert!(store.get(second).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_memory_store_evicts_oldest_beyond_capacity() {
        let tmp = TempDir::new().unwrap();
        let path = write_source(&tmp, &[0u8; 64 * 1024]).await;
        let store = MemoryReportStore::with_capacity(3);

        let mut ids = Vec::new();
        for _ in 0..50 {
            ids.push(store.put_file(&path, "report.pdf").await.unwrap());
        }

        let inner = store.inner.read().await;
        assert_eq!(inner.reports.len(), 3);
        assert_eq!(inner.order.len(), 3);
        drop(inner);

        assert!(store.get(ids[0]).await.unwrap().is_none());
        assert!(store.get(ids[46]).await.unwrap().is_none());
        for id in &ids[47..] {
            assert!(store.get(*id).await.unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn test_memory_store_capacity_is_at_least_one() {
        let tmp = TempDir::new().unwrap();
        let path = write_source(&tmp, b"%PDF").await;
        let store = MemoryReportStore::with_capacity(0);

        let id = store.put_file(&path, "report.pdf").await.unwrap();
        assert!(store.get(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_memory_store_unknown_id() {
        let store = MemoryReportStore::new();
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fs_store_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = write_source(&tmp, b"%PDF-1.7 on disk").await;
        let store = FsReportStore::open(tmp.path().join("reports")).unwrap();

        let id = store.put_file(&path, "plagiarism_report.pdf").await.unwrap();

        assert!(tmp.path().join("reports").join(format!("{}.pdf", id)).exists());
        assert!(tmp.path().join("reports").join(format!("{}.json", id)).exists());

        let report = store.get(id).await.unwrap().unwrap();
        assert_eq!(report.filename, "plagiarism_report.pdf");
        assert_eq!(report.bytes, b"%PDF-1.7 on disk");
    }

    #[tokio::test]
    async fn test_fs_store_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = write_source(&tmp, b"%PDF").await;
        let id = FsReportStore::open(tmp.path())
            .unwrap()
            .put_file(&path, "report.pdf")
            .await
            .unwrap();

        let reopened = FsReportStore::open(tmp.path()).unwrap();
        assert!(reopened.get(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_fs_store_unknown_id() {
        let tmp = TempDir::new().unwrap();
        let store = FsReportStore::open(tmp.path()).unwrap();
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fs_store_missing_sidecar_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let path = write_source(&tmp, b"%PDF").await;
        let store = FsReportStore::open(tmp.path().join("reports")).unwrap();

        let id = store.put_file(&path, "report.pdf").await.unwrap();
        std::fs::remove_file(tmp.path().join("reports").join(format!("{}.json", id))).unwrap();

        assert!(store.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fs_store_missing_pdf_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let path = write_source(&tmp, b"%PDF").await;
        let store = FsReportStore::open(tmp.path().join("reports")).unwrap();

        let id = store.put_file(&path, "report.pdf").await.unwrap();
        std::fs::remove_file(tmp.path().join("reports").join(format!("{}.pdf", id))).unwrap();

        assert!(store.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fs_store_failed_copy_leaves_nothing_behind() {
        let tmp = TempDir::new().unwrap();
        let not_a_file = tmp.path().join("not_a_file");
        std::fs::create_dir(&not_a_file).unwrap();
        let store = FsReportStore::open(tmp.path().join("reports")).unwrap();

        let result = store.put_file(&not_a_file, "report.pdf").await;

        assert!(matches!(result, Err(StoreError::Io(_))));
        let leftovers = std::fs::read_dir(tmp.path().join("reports")).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    #[tokio::test]
    async fn test_missing_source_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let store = FsReportStore::open(tmp.path()).unwrap();

        let result = store.put_file(&tmp.path().join("nope.pdf"), "x.pdf").await;
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
