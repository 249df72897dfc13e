//! HTTP client wrapper for item API requests.

use std::future::Future;
use std::time::Duration;

use reqwest::{multipart, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::api::ErrorBody;
use crate::config::ClientConfig;
use crate::error::{BrowseError, Result};

/// HTTP client for making requests to the item service.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            timeout: crate::config::DEFAULT_TIMEOUT,
        }
    }

    /// Create a client from configuration, honoring proxy and timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        // Only an explicitly configured proxy is used; environment proxies are ignored.
        let mut builder = Client::builder().no_proxy();

        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| BrowseError::InvalidConfig(format!("Invalid proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| BrowseError::InvalidConfig(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// GET a URL with query parameters and decode the JSON response.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        debug!("GET {} {:?}", url, query);
        let response = self.send(self.client.get(url).query(query)).await?;
        self.json(response).await
    }

    /// GET a URL and return the raw response body.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {} (binary)", url);
        let response = self.send(self.client.get(url)).await?;
        let bytes = self.bounded(response.bytes()).await??;
        debug!("received {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("POST {} (json)", url);
        let response = self.send(self.client.post(url).json(body)).await?;
        self.json(response).await
    }

    /// POST a multipart form and decode the JSON response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: &str,
        form: multipart::Form,
    ) -> Result<T> {
        debug!("POST {} (multipart)", url);
        let response = self.send(self.client.post(url).multipart(form)).await?;
        self.json(response).await
    }

    /// DELETE a URL, ignoring any response body.
    pub async fn delete(&self, url: &str) -> Result<()> {
        debug!("DELETE {}", url);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.bounded(request.send()).await??;
        let status = response.status();

        if !status.is_success() {
            let text = self.bounded(response.text()).await?.unwrap_or_default();
            warn!("request failed with status {}", status.as_u16());
            return Err(BrowseError::HttpError {
                status: status.as_u16(),
                body: ErrorBody::parse(&text),
            });
        }

        Ok(response)
    }

    async fn json<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let text = self.bounded(response.text()).await??;
        Ok(serde_json::from_str(&text)?)
    }

    async fn bounded<F: Future>(&self, fut: F) -> Result<F::Output> {
        timeout(self.timeout, fut)
            .await
            .map_err(|_| BrowseError::Timeout)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
