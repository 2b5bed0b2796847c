//! HTTP transport for the remote API

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Error body returned by the remote API on non-2xx responses.
///
/// The API is not consistent about the field name, so all known variants are
/// modeled explicitly and resolved in a fixed priority order.
#[derive(Debug, Default, Deserialize)]
pub struct RemoteErrorBody {
    pub error: Option<String>,
    pub mensaje: Option<String>,
    pub detail: Option<String>,
}

impl RemoteErrorBody {
    /// Extract the user-facing message: `error`, then `mensaje`, then
    /// `detail`, falling back to a generic "Error {status}".
    pub fn message(&self, status: StatusCode) -> String {
        [&self.error, &self.mensaje, &self.detail]
            .into_iter()
            .flatten()
            .find(|m| !m.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Error {}", status.as_u16()))
    }
}

/// HTTP client for making network requests to the administration API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut request = self.client.post(&url).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut request = self.client.put(&url).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    ///
    /// Non-2xx bodies are parsed into [`RemoteErrorBody`]; a body that is not
    /// JSON at all still produces the generic "Error {status}" message.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body: RemoteErrorBody = response.json().await.unwrap_or_default();
            let message = body.message(status);
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(message)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                _ => Err(ClientError::Remote {
                    status: status.as_u16(),
                    message,
                }),
            };
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(error = %e, "Unexpected response shape from remote API");
            ClientError::InvalidResponse(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_priority() {
        let body = RemoteErrorBody {
            error: Some("primary".to_string()),
            mensaje: Some("secondary".to_string()),
            detail: None,
        };
        assert_eq!(body.message(StatusCode::BAD_REQUEST), "primary");

        let body = RemoteErrorBody {
            error: None,
            mensaje: Some("mensaje".to_string()),
            detail: Some("detail".to_string()),
        };
        assert_eq!(body.message(StatusCode::BAD_REQUEST), "mensaje");
    }

    #[test]
    fn test_error_message_fallback() {
        let body = RemoteErrorBody::default();
        assert_eq!(body.message(StatusCode::INTERNAL_SERVER_ERROR), "Error 500");

        // Empty strings do not count as a message
        let body = RemoteErrorBody {
            error: Some(String::new()),
            mensaje: None,
            detail: None,
        };
        assert_eq!(body.message(StatusCode::BAD_GATEWAY), "Error 502");
    }
}
