//! Downloads: fetch, materialize to a transient file, save-as, release.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::core::{Browser, Completion};
use crate::api::{Operation, RemoteApi};
use crate::error::{BrowseError, Result};
use crate::fs::Entry;

/// Destination of a save-as action.
pub trait SaveTarget: Send + Sync {
    /// Persist the content at `source` under (a variant of) `suggested_name`.
    ///
    /// `source` is only valid for the duration of the call.
    fn save_as(&self, suggested_name: &str, source: &Path) -> Result<PathBuf>;
}

/// Saves downloads into a local directory.
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SaveTarget for DirectoryTarget {
    fn save_as(&self, suggested_name: &str, source: &Path) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let dest = self.dir.join(safe_file_name(suggested_name));
        fs::copy(source, &dest)?;
        Ok(dest)
    }
}

/// Reduce a display name to a bare file name.
pub(crate) fn safe_file_name(name: &str) -> String {
    Path::new(name.trim())
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("download")
        .to_string()
}

/// Downloaded content held in a temporary file until released.
///
/// Dropping it removes the file, so every exit path releases it.
pub(crate) struct TransientFile {
    file: NamedTempFile,
}

impl TransientFile {
    pub(crate) fn materialize(data: &[u8]) -> Result<Self> {
        let mut file = NamedTempFile::new()?;
        file.write_all(data)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub(crate) fn path(&self) -> &Path {
        self.file.path()
    }

    pub(crate) fn release(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            warn!("failed to remove {}: {}", path.display(), e);
        }
    }
}

/// Materialize `data` and hand it to `target`, releasing it afterwards.
pub(crate) fn save_transient(target: &dyn SaveTarget, name: &str, data: &[u8]) -> Result<PathBuf> {
    let transient = TransientFile::materialize(data)?;
    let saved = target.save_as(name, transient.path());
    transient.release();
    saved
}

async fn fetch_and_save(
    api: Arc<dyn RemoteApi>,
    target: Arc<dyn SaveTarget>,
    id: String,
    name: String,
) -> Result<PathBuf> {
    let data = api.download(&id).await?;
    debug!("downloaded {} bytes for {}", data.len(), id);
    tokio::task::spawn_blocking(move || save_transient(target.as_ref(), &name, &data))
        .await
        .map_err(|e| BrowseError::Custom(format!("Save task failed: {}", e)))?
}

impl Browser {
    /// Download a file and save it through the save target.
    ///
    /// Folders are ignored. Location and listing are left alone.
    pub(crate) fn download(&mut self, entry: &Entry) {
        if entry.is_folder() {
            debug!("download ignored: {} is a folder", entry.id);
            return;
        }

        let api = self.api.clone();
        let target = self.target.clone();
        let id = entry.id.clone();
        let name = entry.name.clone();
        self.dispatch(async move {
            let result = fetch_and_save(api, target, id, name.clone()).await;
            Completion::Downloaded { name, result }
        });
    }

    pub(super) fn on_downloaded(&mut self, name: &str, result: Result<PathBuf>) {
        match result {
            Ok(path) => info!("saved {} to {}", name, path.display()),
            Err(err) => self.fail(Operation::Download, &err),
        }
    }
}
