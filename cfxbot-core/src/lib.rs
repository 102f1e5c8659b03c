// src/lib.rs

pub mod http;
pub mod platforms;
pub mod services;

pub use cfxbot_common::error::Error;
pub use http::{DefaultHttpClient, HttpClient, HttpResponse};
