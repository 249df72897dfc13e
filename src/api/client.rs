//! REST client for the item service.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::RemoteApi;
use crate::config::ClientConfig;
use crate::error::{BrowseError, Result};
use crate::fs::{BreadcrumbSegment, Entry, UploadFile};
use crate::http::HttpClient;

/// Envelope around list and path responses.
#[derive(Debug, Deserialize)]
struct ItemsResponse<T> {
    items: Option<Vec<T>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateFolderRequest<'a> {
    name: &'a str,
    folder: bool,
    parent_id: Option<&'a str>,
}

/// Item service API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::new(base_url))
    }

    /// Create a client from full configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(BrowseError::InvalidConfig(format!(
                "Base URL must be http(s): {}",
                config.base_url
            )));
        }
        Ok(Self {
            http: HttpClient::from_config(&config)?,
            config,
        })
    }

    /// Create a client from `BROWSE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// URL of `items/{id}` plus any trailing segments, with the id escaped.
    fn item_url(&self, id: &str, rest: &[&str]) -> Result<String> {
        let mut url = Url::parse(&self.config.url("items")).map_err(|e| {
            BrowseError::InvalidConfig(format!("Invalid base URL {}: {}", self.config.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                BrowseError::InvalidConfig(format!(
                    "Base URL cannot hold a path: {}",
                    self.config.base_url
                ))
            })?
            .push(id)
            .extend(rest);
        Ok(url.to_string())
    }
}

#[async_trait]
impl RemoteApi for ApiClient {
    async fn list_items(&self, parent_id: Option<&str>) -> Result<Vec<Entry>> {
        let query: Vec<(&str, &str)> = parent_id.map(|id| ("parentId", id)).into_iter().collect();
        let response: ItemsResponse<Entry> = self
            .http
            .get_json(&self.config.url("items"), &query)
            .await?;
        Ok(response.items.unwrap_or_default())
    }

    async fn item_path(&self, id: &str) -> Result<Vec<BreadcrumbSegment>> {
        let url = self.item_url(id, &["path"])?;
        let response: ItemsResponse<BreadcrumbSegment> = self.http.get_json(&url, &[]).await?;
        Ok(response.items.unwrap_or_default())
    }

    async fn download(&self, id: &str) -> Result<Vec<u8>> {
        self.http.get_bytes(&self.item_url(id, &[])?).await
    }

    async fn upload(&self, file: UploadFile, parent_id: Option<&str>) -> Result<Entry> {
        let mut part = Part::bytes(file.data).file_name(file.file_name);
        if let Some(mime) = &file.mime_type {
            part = part
                .mime_str(mime)
                .map_err(|e| BrowseError::Custom(format!("Invalid media type {}: {}", mime, e)))?;
        }

        let mut form = Form::new().part("files", part);
        if let Some(parent) = parent_id {
            form = form.text("parentId", parent.to_string());
        }

        self.http.post_multipart(&self.config.url("items"), form).await
    }

    async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<Entry> {
        let body = CreateFolderRequest {
            name,
            folder: true,
            parent_id,
        };
        self.http.post_json(&self.config.url("items"), &body).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.http.delete(&self.item_url(id, &[])?).await
    }
}
