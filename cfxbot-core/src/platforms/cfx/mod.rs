pub mod client;

pub use client::{CfxClient, CfxClientConfig, DEFAULT_API_BASE, DEFAULT_USER_AGENT};
