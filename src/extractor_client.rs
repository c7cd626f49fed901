use crate::errors::AppError;
use serde_json::json;
use std::time::Duration;

/// Client for the optional external structured-extraction provider.
///
/// The provider receives a prompt (schema description + transcript) and is
/// expected to answer with a flat JSON object. The response is treated as
/// untrusted: the caller runs it through the defensive merge in
/// [`crate::merge::merge_external`], and any transport failure becomes the
/// empty contribution.
#[derive(Clone)]
pub struct ExtractorClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ExtractorClient {
    /// Creates a new `ExtractorClient`.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - URL of the extraction provider.
    /// * `timeout_secs` - Request timeout in seconds.
    pub fn new(endpoint: String, timeout_secs: u64) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create extractor client: {}", e))
            })?;

        Ok(Self { client, endpoint })
    }

    /// Sends the extraction prompt and returns the raw response body.
    ///
    /// The body is expected to parse as a flat key-value JSON object, but that
    /// is not validated here; parsing is the merge layer's job.
    pub async fn extract_json(&self, prompt: &str) -> Result<String, AppError> {
        tracing::info!("Requesting external extraction: {}", self.endpoint);

        let body = json!({ "prompt": prompt });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Extractor request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "Extractor returned {}: {}",
                status, error_text
            )));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Failed to read extractor response: {}", e)))?;

        tracing::debug!("External extraction returned {} bytes", raw.len());
        Ok(raw)
    }
}
