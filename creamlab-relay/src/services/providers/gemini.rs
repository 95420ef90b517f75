//! Gemini-compatible REST provider.
//!
//! Calls `{base_url}/models/{model}:generateContent?key={api_key}` with a
//! single attempt and the HTTP client's default timeouts.

use super::{GenerateContentRequest, GenerateContentResponse, GenerationProvider, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use service_core::observability::TracedClientExt;

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://www.dmxapi.cn/v1beta";

pub struct GeminiProvider {
    client: Client,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Build the API URL for the given model.
    fn api_url(&self, model: &str, api_key: &Secret<String>) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            model,
            api_key.expose_secret()
        )
    }
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate_content(
        &self,
        api_key: &Secret<String>,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = self.api_url(model, api_key);

        tracing::debug!(model = %model, "Sending request to generation endpoint");

        // The URL carries the key, so it is stripped from transport errors
        let response = self
            .client
            .traced_post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| ProviderError::Decode(e.without_url().to_string()))
    }
}
