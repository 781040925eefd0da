//! Response handling shared by both transports

use http::StatusCode;
use serde::de::DeserializeOwned;
use shared::response::ApiErrorBody;

use crate::{ClientError, ClientResult};

/// Turn a status and raw body into the caller's value or a [`ClientError`]
pub(crate) fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> ClientResult<T> {
    if !status.is_success() {
        let message = serde_json::from_slice::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.text().map(str::to_string))
            .or_else(|| {
                let text = String::from_utf8_lossy(body).trim().to_string();
                (!text.is_empty() && !text.starts_with('{')).then_some(text)
            });
        tracing::debug!(status = %status, message = ?message, "Request failed");
        return Err(ClientError::from_status(status, message));
    }

    serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}

/// Join a base URL and a relative path with exactly one slash
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://h/api/", "/rooms?page=1"),
            "http://h/api/rooms?page=1"
        );
        assert_eq!(join_url("http://h/api", "rooms"), "http://h/api/rooms");
    }

    #[test]
    fn test_error_body_message_extracted() {
        let err = decode_body::<serde_json::Value>(
            StatusCode::BAD_REQUEST,
            br#"{"success":false,"message":"Check-out must be after check-in"}"#,
        )
        .unwrap_err();
        match err {
            ClientError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Check-out must be after check-in");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_plain_text_error_body() {
        let err =
            decode_body::<serde_json::Value>(StatusCode::SERVICE_UNAVAILABLE, b"maintenance")
                .unwrap_err();
        assert!(matches!(err, ClientError::Server { status: 503, message } if message == "maintenance"));
    }

    #[test]
    fn test_unparseable_success_body() {
        let err = decode_body::<serde_json::Value>(StatusCode::OK, b"<html>").unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }
}
