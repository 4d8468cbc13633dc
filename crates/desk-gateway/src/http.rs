//! Shared request and response helpers.
//!
//! Centralizes status checks (non-success -> [`GatewayError::RequestFailed`],
//! 204 -> empty success) and JSON decoding so the endpoint modules only build
//! paths and bodies.

use reqwest::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

use crate::{HttpGateway, error::GatewayError};

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success; otherwise the status code and
/// raw body text become [`GatewayError::RequestFailed`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "backend request failed");
        return Err(GatewayError::RequestFailed {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp)
}

/// Decode a checked response. `None` means the backend sent 204.
pub async fn read_json<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<Option<T>, GatewayError> {
    if resp.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| GatewayError::Decode(e.to_string()))
}

/// An entity endpoint must not answer 204.
pub fn require_entity<T>(value: Option<T>) -> Result<T, GatewayError> {
    value.ok_or(GatewayError::EmptyResponse)
}

impl HttpGateway {
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, GatewayError> {
        tracing::debug!(method = "GET", path, "backend request");
        let resp = self.http.get(self.url(path)).send().await?;
        read_json(check_response(resp).await?).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(method = %method, path, "backend request");
        let resp = self
            .http
            .request(method, self.url(path))
            .json(body)
            .send()
            .await?;
        read_json(check_response(resp).await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_core::entities::TicketNote;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn check_response_keeps_raw_body() {
        let resp = mock_response(404, r#"{"error":"NOT_FOUND","message":"Ticket not found: 9"}"#);
        let err = check_response(resp).await.unwrap_err();
        match err {
            GatewayError::RequestFailed { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("Ticket not found: 9"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn check_response_success() {
        let resp = mock_response(201, "{}");
        assert!(check_response(resp).await.is_ok());
    }

    #[tokio::test]
    async fn no_content_reads_as_none() {
        let resp = mock_response(204, "");
        let value: Option<Vec<TicketNote>> = read_json(resp).await.unwrap();
        assert!(value.is_none());
        assert!(matches!(
            require_entity::<TicketNote>(None),
            Err(GatewayError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn malformed_json_is_decode_error() {
        let resp = mock_response(200, r#"{"id": "not-a-number"}"#);
        let err = read_json::<TicketNote>(resp).await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }
}
