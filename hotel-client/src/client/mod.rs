//! Transport layer
//!
//! [`HttpClient`] is the seam every service call goes through. The network
//! implementation talks to the real backend; the oneshot implementation
//! drives an in-process `axum::Router`, which the tests use as a fake backend.

mod common;
mod http;
mod http_oneshot;

pub use http::{HttpClient, NetworkHttpClient};
pub use http_oneshot::OneshotHttpClient;
