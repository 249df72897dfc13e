//! Item API client and types.

pub mod client;
pub mod error;

use async_trait::async_trait;

use crate::error::Result;
use crate::fs::{BreadcrumbSegment, Entry, UploadFile};

pub use client::ApiClient;
pub use error::{error_message, ErrorBody, Operation};

/// Operations the remote item service exposes.
///
/// `parent_id` of `None` addresses the root of the hierarchy.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// List the entries directly under `parent_id`.
    async fn list_items(&self, parent_id: Option<&str>) -> Result<Vec<Entry>>;

    /// Resolve the ancestor chain of a folder, root first.
    async fn item_path(&self, id: &str) -> Result<Vec<BreadcrumbSegment>>;

    /// Fetch the raw content of a file.
    async fn download(&self, id: &str) -> Result<Vec<u8>>;

    /// Upload a file under `parent_id`.
    async fn upload(&self, file: UploadFile, parent_id: Option<&str>) -> Result<Entry>;

    /// Create a folder under `parent_id`.
    async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<Entry>;

    /// Delete an entry.
    async fn delete(&self, id: &str) -> Result<()>;
}
