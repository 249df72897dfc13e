//! Test doubles for driving the browser without a server.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::core::{Browser, Completion};
use super::download::SaveTarget;
use crate::api::{ErrorBody, RemoteApi};
use crate::config::BrowserConfig;
use crate::error::{BrowseError, Result};
use crate::fs::{BreadcrumbSegment, Entry, UploadFile};

pub(crate) fn entry(id: &str, name: &str, parent: Option<&str>) -> Entry {
    Entry {
        id: id.to_string(),
        parent_id: parent.map(str::to_string),
        name: name.to_string(),
        is_folder: false,
        created_at: None,
        updated_at: None,
        path: Some(format!("uploads/{}", name)),
        mime_type: Some("text/plain".to_string()),
        size: Some(3),
    }
}

pub(crate) fn folder(id: &str, name: &str, parent: Option<&str>) -> Entry {
    Entry {
        is_folder: true,
        path: None,
        mime_type: None,
        size: None,
        ..entry(id, name, parent)
    }
}

pub(crate) fn segment(id: &str, name: &str) -> BreadcrumbSegment {
    BreadcrumbSegment {
        id: id.to_string(),
        name: name.to_string(),
        folder: true,
    }
}

/// In-memory item service that records every call as `op:args`.
///
/// Unknown folders list as empty and resolve to an empty path.
#[derive(Default)]
pub(crate) struct FakeApi {
    listings: HashMap<String, Vec<Entry>>,
    paths: HashMap<String, Vec<BreadcrumbSegment>>,
    files: HashMap<String, Vec<u8>>,
    failures: HashMap<&'static str, Option<String>>,
    calls: Mutex<Vec<String>>,
}

fn key(parent_id: Option<&str>) -> String {
    parent_id.unwrap_or("root").to_string()
}

impl FakeApi {
    pub(crate) fn with_listing(mut self, parent_id: Option<&str>, entries: Vec<Entry>) -> Self {
        self.listings.insert(key(parent_id), entries);
        self
    }

    pub(crate) fn with_path(mut self, id: &str, segments: Vec<BreadcrumbSegment>) -> Self {
        self.paths.insert(id.to_string(), segments);
        self
    }

    pub(crate) fn with_file(mut self, id: &str, data: &[u8]) -> Self {
        self.files.insert(id.to_string(), data.to_vec());
        self
    }

    /// Make every call of `op` fail, optionally with a service description.
    pub(crate) fn failing(mut self, op: &'static str, desc: Option<&str>) -> Self {
        self.failures.insert(op, desc.map(str::to_string));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls starting with `prefix`.
    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, op: &'static str, args: String) -> Result<()> {
        self.calls.lock().unwrap().push(format!("{}:{}", op, args));
        match self.failures.get(op) {
            Some(desc) => Err(BrowseError::HttpError {
                status: 500,
                body: Some(ErrorBody {
                    desc: desc.clone(),
                    message: None,
                }),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteApi for FakeApi {
    async fn list_items(&self, parent_id: Option<&str>) -> Result<Vec<Entry>> {
        self.record("list", key(parent_id))?;
        Ok(self.listings.get(&key(parent_id)).cloned().unwrap_or_default())
    }

    async fn item_path(&self, id: &str) -> Result<Vec<BreadcrumbSegment>> {
        self.record("path", id.to_string())?;
        Ok(self.paths.get(id).cloned().unwrap_or_default())
    }

    async fn download(&self, id: &str) -> Result<Vec<u8>> {
        self.record("download", id.to_string())?;
        self.files
            .get(id)
            .cloned()
            .ok_or(BrowseError::HttpError { status: 404, body: None })
    }

    async fn upload(&self, file: UploadFile, parent_id: Option<&str>) -> Result<Entry> {
        self.record("upload", format!("{}:{}", file.file_name, key(parent_id)))?;
        let mut created = entry("new-file", &file.file_name, parent_id);
        created.size = Some(file.len() as u64);
        Ok(created)
    }

    async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<Entry> {
        self.record("create", format!("{}:{}", name, key(parent_id)))?;
        Ok(folder("new-folder", name, parent_id))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.record("delete", id.to_string())
    }
}

/// Save target that keeps saved content in memory.
#[derive(Default)]
pub(crate) struct MemoryTarget {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryTarget {
    pub(crate) fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }
}

impl SaveTarget for MemoryTarget {
    fn save_as(&self, suggested_name: &str, source: &Path) -> Result<PathBuf> {
        let data = fs::read(source)?;
        self.saved
            .lock()
            .unwrap()
            .push((suggested_name.to_string(), data));
        Ok(PathBuf::from(suggested_name))
    }
}

pub(crate) fn browser_parts(
    api: FakeApi,
    config: BrowserConfig,
) -> (
    Browser,
    mpsc::UnboundedReceiver<Completion>,
    Arc<FakeApi>,
    Arc<MemoryTarget>,
) {
    let api = Arc::new(api);
    let target = Arc::new(MemoryTarget::default());
    let (browser, rx) = Browser::new(api.clone(), target.clone(), config);
    (browser, rx, api, target)
}

pub(crate) fn browser_with(
    api: FakeApi,
    config: BrowserConfig,
) -> (Browser, mpsc::UnboundedReceiver<Completion>, Arc<FakeApi>) {
    let (browser, rx, api, _) = browser_parts(api, config);
    (browser, rx, api)
}

pub(crate) fn browser(api: FakeApi) -> (Browser, mpsc::UnboundedReceiver<Completion>, Arc<FakeApi>) {
    browser_with(api, BrowserConfig::default())
}

/// Apply completions until nothing is in flight.
pub(crate) async fn pump(browser: &mut Browser, rx: &mut mpsc::UnboundedReceiver<Completion>) {
    while !browser.snapshot().is_settled() {
        let completion = rx.recv().await.expect("completion channel closed");
        browser.apply(completion);
    }
}
