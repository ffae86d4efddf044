use blockseat_core::{AuthToken, CoreError, CoreResult};
use blockseat_shared::models::envelope::extract_error_message;
use blockseat_shared::ApiEnvelope;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::StoreError;

/// Thin JSON client for one backend base URL. Every request carries the
/// caller's bearer token and unwraps the `{ success, data, message }`
/// envelope.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: Client,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, token: &AuthToken, path: &str) -> CoreResult<T> {
        let request = self.request(Method::GET, path, token);
        self.send_enveloped(request, path).await
    }

    pub async fn send<B, T>(&self, method: Method, token: &AuthToken, path: &str, body: &B) -> CoreResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method, path, token).json(body);
        self.send_enveloped(request, path).await
    }

    /// For endpoints whose response body carries nothing we need.
    pub async fn send_unit<B>(&self, method: Method, token: &AuthToken, path: &str, body: Option<&B>) -> CoreResult<()>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.request(method, path, token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(StoreError::from)?;
        check_status(response, path).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str, token: &AuthToken) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "Backend request");
        self.http.request(method, url).bearer_auth(token.expose())
    }

    async fn send_enveloped<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> CoreResult<T> {
        let response = request.send().await.map_err(StoreError::from)?;
        let status = response.status().as_u16();
        let response = check_status(response, path).await?;

        let envelope: ApiEnvelope<T> = response.json().await.map_err(StoreError::from)?;
        if !envelope.success {
            let message = envelope
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback_message(status));
            warn!(path, %message, "Backend reported failure");
            return Err(CoreError::Backend { status, message });
        }
        envelope
            .data
            .ok_or_else(|| CoreError::Decode(format!("response from {} has no data", path)))
    }
}

async fn check_status(response: Response, path: &str) -> CoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = extract_error_message(&text).unwrap_or_else(|| fallback_message(status.as_u16()));
    warn!(path, status = status.as_u16(), %message, "Backend request failed");
    Err(CoreError::Backend {
        status: status.as_u16(),
        message,
    })
}

fn fallback_message(status: u16) -> String {
    format!("Request failed with status {}", status)
}
