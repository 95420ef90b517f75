use crate::models::{Preference, Recipe};
use crate::services::generate_recipe;
use crate::startup::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use service_core::error::AppError;
use validator::Validate;

/// `POST /api/generate`: turn preferences into a recipe.
pub async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<Preference>, JsonRejection>,
) -> Result<Json<Recipe>, AppError> {
    let Json(preference) = payload?;
    preference.validate()?;

    tracing::info!(
        ingredients_len = preference.ingredients.chars().count(),
        texture_len = preference.texture.chars().count(),
        "Generating recipe"
    );

    let recipe = generate_recipe(
        state.provider.as_ref(),
        state.api_key.as_ref(),
        &state.settings,
        &preference,
    )
    .await?;

    Ok(Json(recipe))
}
