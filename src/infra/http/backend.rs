use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::error;

use crate::error::BookingError;

/// Shared handle for the hosted backend: base URL, API key, one pooled client.
#[derive(Clone)]
pub struct RestBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestBackend {
    pub fn new(base_url: String, api_key: String) -> Self {
        RestBackend {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.authorized(self.client.get(self.url(path)))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.authorized(self.client.post(self.url(path)))
    }

    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.authorized(self.client.patch(self.url(path)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Maps backend status codes onto the error taxonomy: 404 is a missing
    /// resource, 409 a booking conflict, anything else non-success a
    /// retryable backend failure.
    pub async fn check(&self, response: Response) -> Result<Response, BookingError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        // The backend wraps messages as {"error": "..."}; fall back to the
        // raw body for anything else.
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);

        match status {
            StatusCode::NOT_FOUND => Err(BookingError::NotFound(message)),
            StatusCode::CONFLICT => Err(BookingError::AvailabilityConflict(message)),
            _ => {
                error!(%status, message, "backend request failed");
                Err(BookingError::BackendUnavailable(format!(
                    "backend returned {status}"
                )))
            }
        }
    }

    pub async fn json<T: DeserializeOwned>(&self, response: Response) -> Result<T, BookingError> {
        let response = self.check(response).await?;
        Ok(response.json::<T>().await?)
    }
}
