//! Outbound HTTP abstraction.
//!
//! Platform clients talk to the network through [`HttpClient`] so that lookups can be
//! exercised in tests without real requests. The default implementation wraps reqwest.
//!
//! # Example Usage:
//! ``
//! use std::sync::Arc;
//! use crate::http::{HttpClient, DefaultHttpClient};
//!
//! let http: Arc<dyn HttpClient> = Arc::new(DefaultHttpClient::new());
//! let resp = http.get(url, headers).await?;
//! ``

use async_trait::async_trait;
use std::collections::HashMap;
use crate::Error;

/// Status and body of a completed request. Non-2xx statuses are not errors at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a GET request. Fails with [`Error::NoResponse`] when nothing came back.
    async fn get(&self, url: String, headers: HashMap<String, String>) -> Result<HttpResponse, Error>;
}

#[derive(Clone, Default)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl DefaultHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for DefaultHttpClient {
    async fn get(&self, url: String, headers: HashMap<String, String>) -> Result<HttpResponse, Error> {
        let mut request = self.client.get(&url);
        for (key, value) in headers {
            request = request.header(&key, value);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::NoResponse(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}
