// ================================================================
// File: cfxbot-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Transport-level failures talking to the cfx.re directory:
    #[error("No response received: {0}")]
    NoResponse(String),

    #[error("Server responded with status code: {0}")]
    HttpStatus(u16),

    #[error("Invalid server data.")]
    InvalidServerData,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Discord side:
    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Embed error: {0}")]
    Embed(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
