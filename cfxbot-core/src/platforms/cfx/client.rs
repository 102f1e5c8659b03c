// File: cfxbot-core/src/platforms/cfx/client.rs

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use cfxbot_common::models::ServerRecord;

use crate::http::HttpClient;
use crate::Error;

pub const DEFAULT_API_BASE: &str = "https://servers-frontend.fivem.net/api/servers/single";

/// The directory sits behind a bot filter that rejects non-browser user agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36 Edg/126.0.0.0";

#[derive(Debug, Clone)]
pub struct CfxClientConfig {
    /// Prefix of the lookup URL; the server code is appended as the last path segment.
    pub api_base: String,
    pub user_agent: String,
}

impl Default for CfxClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Client for the cfx.re (FiveM) public server directory.
///
/// One call per lookup: no retries, no caching.
#[derive(Clone)]
pub struct CfxClient {
    http: Arc<dyn HttpClient>,
    config: CfxClientConfig,
}

impl CfxClient {
    pub fn new(http: Arc<dyn HttpClient>, config: CfxClientConfig) -> Self {
        Self { http, config }
    }

    /// Build the lookup URL for `code`. The code is not validated; a bad code
    /// surfaces as a remote error.
    pub fn server_url(&self, code: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_base.trim_end_matches('/'),
            urlencoding::encode(code)
        )
    }

    /// Fetch and decode a single server's directory entry.
    pub async fn fetch_server(&self, code: &str) -> Result<ServerRecord, Error> {
        let url = self.server_url(code);
        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), self.config.user_agent.clone());
        headers.insert("Accept".to_string(), "application/json".to_string());

        debug!("CfxClient: GET {url}");
        let resp = self.http.get(url, headers).await?;
        if !resp.is_success() {
            return Err(Error::HttpStatus(resp.status));
        }

        let envelope: serde_json::Value = serde_json::from_str(&resp.body)?;
        ServerRecord::from_envelope(&envelope)?.ok_or(Error::InvalidServerData)
    }
}
