//! Stamps parsed recipes with relay-generated metadata.

use crate::models::{Recipe, RecipeDraft};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Attach a fresh id and the current time to a parsed recipe.
pub fn normalize(draft: RecipeDraft, image_url: Option<String>) -> Recipe {
    normalize_at(draft, image_url, Utc::now())
}

/// Like [`normalize`] with an explicit creation instant.
pub fn normalize_at(draft: RecipeDraft, image_url: Option<String>, now: DateTime<Utc>) -> Recipe {
    Recipe {
        id: Uuid::new_v4().to_string(),
        timestamp: now.timestamp_millis(),
        draft,
        image_url,
    }
}
