use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::repositories::client_storage::ClientStorage;
use crate::repositories::errors::api_errors::ApiError;

/// Shared HTTP plumbing for the server repositories: base URL joining, bearer
/// token attachment and status-to-error mapping.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    storage: Arc<dyn ClientStorage>,
}

impl ApiClient {
    pub fn new(client: Client, base_url: &str, storage: Arc<dyn ClientStorage>) -> Self {
        ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            storage,
        }
    }

    pub fn from_config(
        config: &ClientConfig,
        storage: Arc<dyn ClientStorage>,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(ApiClient::new(client, &config.base_url, storage))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds a URL from raw path segments, percent-encoding each one.
    pub fn url_from_segments(&self, segments: &[&str]) -> Result<String, ApiError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ApiError::Transport(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.to_string())
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_to(method, self.url(path))
    }

    pub(crate) fn request_to(&self, method: Method, url: String) -> RequestBuilder {
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match self.storage.auth_token() {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => builder,
            Err(e) => {
                warn!("Could not read auth token, sending without it: {}", e);
                builder
            }
        }
    }

    /// Sends the request and turns any non-2xx status into an `ApiError`.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body);
        debug!("Server answered {} with body {:?}", status, body);

        if status == StatusCode::NOT_FOUND {
            Err(ApiError::NotFound(message))
        } else {
            Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }

    pub(crate) async fn read_body(response: Response) -> Result<String, ApiError> {
        response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = Self::read_body(response).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Serialization(e.to_string()))
    }
}

/// Pulls `message` out of a JSON error body. Empty or missing messages count as
/// absent so callers fall back to their own wording.
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
