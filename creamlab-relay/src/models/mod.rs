pub mod preference;
pub mod recipe;

pub use preference::{FlavorCategory, FlavorLevel, FlavorLevels, Preference};
pub use recipe::{FlavorProfile, IngredientEntry, Recipe, RecipeDraft};
