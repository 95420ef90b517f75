//! The recipe relay.
//!
//! One request in, one upstream text-generation call out. The upstream text is
//! sanitized, parsed into a [`RecipeDraft`] and stamped by the normalizer.
//! When an image model is configured a second, best-effort call fetches a
//! photo; its failure only drops the `imageUrl` field.

use super::metrics;
use super::normalizer;
use super::prompt::{self, SYSTEM_INSTRUCTION};
use super::providers::{
    Content, GenerateContentRequest, GenerationConfig, GenerationProvider, ProviderError,
};
use super::sanitize::strip_code_fences;
use crate::models::{Preference, Recipe, RecipeDraft};
use secrecy::{ExposeSecret, Secret};
use service_core::error::AppError;
use std::time::Instant;
use thiserror::Error;

/// Default MIME type for inline images without one.
const DEFAULT_IMAGE_MIME: &str = "image/png";

#[derive(Error, Debug)]
pub enum RelayError {
    /// No API key is configured; nothing was sent upstream.
    #[error("{0}")]
    Configuration(String),

    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Upstream unreachable: {0}")]
    Transport(String),

    /// The upstream succeeded but the expected text field is absent.
    #[error("Invalid response structure: {0}")]
    Structural(String),

    #[error("Failed to parse recipe JSON ({source}): {raw}")]
    Parse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RelayError {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Configuration(_) => "configuration",
            RelayError::Upstream { .. } => "upstream",
            RelayError::Transport(_) => "transport",
            RelayError::Structural(_) => "structural",
            RelayError::Parse { .. } => "parse",
        }
    }
}

impl From<ProviderError> for RelayError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Upstream { status, body } => RelayError::Upstream { status, body },
            ProviderError::Network(msg) | ProviderError::Decode(msg) => RelayError::Transport(msg),
        }
    }
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::Configuration(msg) => AppError::ConfigError(anyhow::anyhow!(msg)),
            other => AppError::BadGateway(other.to_string()),
        }
    }
}

/// Models used by the relay.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub text_model: String,
    /// Image model for the optional photo call. `None` disables it.
    pub image_model: Option<String>,
}

/// Generate a recipe for `preference`.
///
/// `api_key` is the server-held upstream secret. A missing or blank key fails
/// with [`RelayError::Configuration`] before any outbound call.
pub async fn generate_recipe(
    provider: &dyn GenerationProvider,
    api_key: Option<&Secret<String>>,
    settings: &RelaySettings,
    preference: &Preference,
) -> Result<Recipe, RelayError> {
    let result = run(provider, api_key, settings, preference).await;

    match &result {
        Ok(recipe) => {
            metrics::record_relay_outcome("success");
            tracing::info!(
                recipe_id = %recipe.id,
                recipe_name = %recipe.draft.recipe_name,
                has_image = recipe.image_url.is_some(),
                "Recipe generated"
            );
        }
        Err(e) => {
            metrics::record_relay_outcome(e.kind());
            tracing::error!(error = %e, kind = e.kind(), "Recipe generation failed");
        }
    }

    result
}

async fn run(
    provider: &dyn GenerationProvider,
    api_key: Option<&Secret<String>>,
    settings: &RelaySettings,
    preference: &Preference,
) -> Result<Recipe, RelayError> {
    let api_key = api_key
        .filter(|key| !key.expose_secret().trim().is_empty())
        .ok_or_else(|| RelayError::Configuration("DMX_API_KEY is not configured".to_string()))?;

    let draft = request_draft(provider, api_key, &settings.text_model, preference).await?;

    let image_url = match &settings.image_model {
        Some(model) => request_image(provider, api_key, model, &draft.recipe_name).await,
        None => None,
    };

    Ok(normalizer::normalize(draft, image_url))
}

/// Build the schema-constrained request for a preference.
pub fn recipe_request(preference: &Preference) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::text(Some("user"), prompt::build_prompt(preference))],
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(prompt::recipe_response_schema()),
        }),
        system_instruction: Some(Content::text(None, SYSTEM_INSTRUCTION)),
    }
}

async fn request_draft(
    provider: &dyn GenerationProvider,
    api_key: &Secret<String>,
    model: &str,
    preference: &Preference,
) -> Result<RecipeDraft, RelayError> {
    let request = recipe_request(preference);

    let start = Instant::now();
    let response = provider.generate_content(api_key, model, &request).await;
    metrics::record_upstream_latency(provider.name(), model, start.elapsed());
    let response = response?;

    if let Some(usage) = &response.usage_metadata {
        tracing::debug!(
            model = %model,
            input_tokens = usage.prompt_token_count.unwrap_or(0),
            output_tokens = usage.candidates_token_count.unwrap_or(0),
            "Upstream token usage"
        );
    }

    let text = response.first_text().ok_or_else(|| {
        RelayError::Structural("candidates[0].content.parts[0].text is missing".to_string())
    })?;

    parse_draft(text)
}

/// Parse upstream text into a draft, tolerating a Markdown code fence.
pub fn parse_draft(text: &str) -> Result<RecipeDraft, RelayError> {
    serde_json::from_str(strip_code_fences(text)).map_err(|source| RelayError::Parse {
        raw: text.to_string(),
        source,
    })
}

/// Best-effort photo generation. Failures are logged and yield `None`.
async fn request_image(
    provider: &dyn GenerationProvider,
    api_key: &Secret<String>,
    model: &str,
    recipe_name: &str,
) -> Option<String> {
    let request = GenerateContentRequest {
        contents: vec![Content::text(None, prompt::build_image_prompt(recipe_name))],
        generation_config: None,
        system_instruction: None,
    };

    let start = Instant::now();
    let response = provider.generate_content(api_key, model, &request).await;
    metrics::record_upstream_latency(provider.name(), model, start.elapsed());

    match response {
        Ok(response) => {
            let image = response.first_inline_data().map(|data| {
                format!(
                    "data:{};base64,{}",
                    data.mime_type.as_deref().unwrap_or(DEFAULT_IMAGE_MIME),
                    data.data
                )
            });
            if image.is_none() {
                tracing::warn!(model = %model, "Image response contained no inline data");
            }
            image
        }
        Err(e) => {
            tracing::warn!(model = %model, error = %e, "Image generation failed");
            None
        }
    }
}
