use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::ports::PostcodeService;
use crate::domain::services::postcode;
use crate::error::BookingError;

/// Postcode lookup against a postcodes.io-style API. Unauthenticated and
/// separate from the hosted backend.
pub struct HttpPostcodeService {
    client: Client,
    base_url: String,
}

impl HttpPostcodeService {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ValidateResponse {
    result: bool,
}

#[async_trait]
impl PostcodeService for HttpPostcodeService {
    async fn validate(&self, text: &str) -> Result<bool, BookingError> {
        let normalized = postcode::normalize(text);
        if normalized.is_empty() {
            return Ok(false);
        }

        let url = format!("{}/postcodes/{}/validate", self.base_url, normalized);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(BookingError::BackendUnavailable(format!(
                "postcode service returned {}",
                response.status()
            )));
        }
        let body: ValidateResponse = response.json().await?;
        Ok(body.result)
    }
}
