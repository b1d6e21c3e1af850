//! HTTP module
//!
//! Transport abstraction over the remote service plus the reqwest-backed
//! client. No retry or rate limiting: the first failure is reported
//! as-is.

mod client;

pub use client::{
    build_request_url, decode_url, HttpClient, HttpClientConfig, HttpClientConfigBuilder,
    HttpResponse, Transport,
};
