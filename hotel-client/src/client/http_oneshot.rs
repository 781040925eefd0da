//! Oneshot HTTP client - in-process calls into an `axum::Router`
//!
//! Uses tower's `oneshot` to drive the router directly with no socket in
//! between. Paths are routed as `/<path>`, so the router is mounted without
//! the API prefix.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::Request;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use super::common::decode_body;
use super::http::HttpClient;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    token: Option<String>,
}

impl OneshotHttpClient {
    /// `router` must already have its state applied
    pub fn new(router: Router) -> Self {
        Self {
            router,
            token: None,
        }
    }

    fn build_request(
        &self,
        method: http::Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<Request<Body>> {
        let uri = format!("/{}", path.trim_start_matches('/'));
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = &self.token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {}", token));
        }

        builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .map_err(|e| ClientError::InvalidState(format!("Failed to build request: {}", e)))
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        tracing::debug!(method = %request.method(), uri = %request.uri(), "Oneshot request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Network(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("Failed to read body: {}", e)))?;

        decode_body(status, &body)
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(http::Method::GET, path, None)?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        let request = self.build_request(http::Method::POST, path, Some(bytes))?;
        self.execute(request).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(http::Method::POST, path, None)?;
        self.execute(request).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        let request = self.build_request(http::Method::PUT, path, Some(bytes))?;
        self.execute(request).await
    }

    async fn patch<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        let request = self.build_request(http::Method::PATCH, path, Some(bytes))?;
        self.execute(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(http::Method::DELETE, path, None)?;
        self.execute(request).await
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::http::HeaderMap;
    use axum::routing::get;

    #[tokio::test]
    async fn test_bearer_token_is_forwarded() {
        let router = Router::new().route(
            "/whoami",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get(http::header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                Json(serde_json::json!({ "auth": auth }))
            }),
        );
        let mut client = OneshotHttpClient::new(router);
        client.set_token(Some("abc".into()));

        let body: serde_json::Value = client.get("whoami").await.unwrap();
        assert_eq!(body["auth"], "Bearer abc");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let client = OneshotHttpClient::new(Router::new());
        let err = client.get::<serde_json::Value>("/nope").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }
}
