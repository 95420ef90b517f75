use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngredientEntry {
    pub item: String,
    pub amount: String,
}

/// Model-assigned scores, each nominally 0-100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlavorProfile {
    pub sweetness: f64,
    pub acidity: f64,
    pub complexity: f64,
    pub creaminess: f64,
    pub innovation: f64,
}

/// Recipe fields as produced by the upstream model.
///
/// Every field falls back to its empty default so a partially filled object
/// still parses; the upstream text only has to be a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeDraft {
    pub recipe_name: String,
    pub summary: String,
    pub ingredients: Vec<IngredientEntry>,
    pub steps: Vec<String>,
    pub texture_tips: String,
    pub pairing_suggestions: String,
    pub flavor_profile: FlavorProfile,
}

/// A recipe as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
    #[serde(flatten)]
    pub draft: RecipeDraft,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
