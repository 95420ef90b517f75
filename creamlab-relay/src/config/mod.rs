use crate::services::providers::gemini::DEFAULT_API_BASE;
use crate::services::RelaySettings;
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Environment variable holding the upstream API key.
pub const API_KEY_ENV: &str = "DMX_API_KEY";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: core_config::Config,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL up to and including the API version segment.
    pub base_url: String,
    /// Model for recipe text (e.g., gemini-2.5-flash)
    pub text_model: String,
    /// Model for the optional recipe photo
    pub image_model: String,
    pub image_enabled: bool,
    /// Missing keys are reported per request, not at startup.
    pub api_key: Option<Secret<String>>,
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Secret::new);

        if api_key.is_none() {
            tracing::warn!(
                "{} is not set; generation requests will fail until it is configured",
                API_KEY_ENV
            );
        }

        Ok(RelayConfig {
            common: common_config,
            upstream: UpstreamConfig {
                base_url: get_env("UPSTREAM_BASE_URL", Some(DEFAULT_API_BASE), is_prod)?,
                text_model: get_env("UPSTREAM_TEXT_MODEL", Some("gemini-2.5-flash"), is_prod)?,
                image_model: get_env(
                    "UPSTREAM_IMAGE_MODEL",
                    Some("gemini-2.5-flash-image"),
                    is_prod,
                )?,
                image_enabled: get_env("UPSTREAM_IMAGE_ENABLED", Some("false"), is_prod)?
                    .parse::<bool>()
                    .map_err(|e| {
                        AppError::ConfigError(anyhow::anyhow!(
                            "UPSTREAM_IMAGE_ENABLED must be true or false: {}",
                            e
                        ))
                    })?,
                api_key,
            },
        })
    }

    /// Model selection handed to the relay.
    pub fn relay_settings(&self) -> RelaySettings {
        RelaySettings {
            text_model: self.upstream.text_model.clone(),
            image_model: self
                .upstream
                .image_enabled
                .then(|| self.upstream.image_model.clone()),
        }
    }
}

/// Read `key`, falling back to `default` outside production.
fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
