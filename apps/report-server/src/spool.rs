//! Transient on-disk copies of rendered reports
//!
//! A [`SpooledFile`] owns its path and removes the file when dropped, so the
//! spool directory is cleaned on every exit path of a request.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

pub struct SpooledFile {
    path: PathBuf,
}

impl SpooledFile {
    /// Write `bytes` to a new, uniquely named file in `dir`
    pub async fn write(dir: &Path, bytes: &[u8]) -> std::io::Result<Self> {
        // Guard exists before the write so a partial file is removed too
        let file = Self {
            path: dir.join(format!("plagiarism_report-{}.pdf", Uuid::new_v4())),
        };
        tokio::fs::write(&file.path, bytes).await?;
        tracing::debug!("Spooled {} bytes to {}", bytes.len(), file.path.display());
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SpooledFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove {}: {}", self.path.display(), e),
        }
    }
}
