//! User preferences submitted by the client on each generation request.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::Validate;

/// The five flavor axes the client exposes as sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlavorCategory {
    Sweet,
    Sour,
    Bitter,
    Spicy,
    Salty,
}

impl FlavorCategory {
    pub const ALL: [FlavorCategory; 5] = [
        FlavorCategory::Sweet,
        FlavorCategory::Sour,
        FlavorCategory::Bitter,
        FlavorCategory::Spicy,
        FlavorCategory::Salty,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FlavorCategory::Sweet => "甜",
            FlavorCategory::Sour => "酸",
            FlavorCategory::Bitter => "苦",
            FlavorCategory::Spicy => "辣",
            FlavorCategory::Salty => "咸",
        }
    }
}

impl fmt::Display for FlavorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Intensity of a single flavor, always within `0..=100`.
///
/// Any JSON number is accepted and clamped; fractions are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct FlavorLevel(u8);

impl FlavorLevel {
    pub const MAX: u8 = 100;

    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, Self::MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    fn from_f64(raw: f64) -> Self {
        if raw.is_nan() {
            return Self(0);
        }
        Self(raw.round().clamp(0.0, Self::MAX as f64) as u8)
    }
}

impl<'de> Deserialize<'de> for FlavorLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        f64::deserialize(deserializer).map(FlavorLevel::from_f64)
    }
}

impl fmt::Display for FlavorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Intensity for every flavor category.
///
/// On the wire the keys are the Chinese labels the client uses; lowercase
/// English names are accepted as aliases. Each category is a required field,
/// so a payload missing any of the five keys is rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlavorLevels {
    #[serde(rename = "甜", alias = "sweet")]
    pub sweet: FlavorLevel,
    #[serde(rename = "酸", alias = "sour")]
    pub sour: FlavorLevel,
    #[serde(rename = "苦", alias = "bitter")]
    pub bitter: FlavorLevel,
    #[serde(rename = "辣", alias = "spicy")]
    pub spicy: FlavorLevel,
    #[serde(rename = "咸", alias = "salty")]
    pub salty: FlavorLevel,
}

impl FlavorLevels {
    pub fn get(&self, category: FlavorCategory) -> FlavorLevel {
        match category {
            FlavorCategory::Sweet => self.sweet,
            FlavorCategory::Sour => self.sour,
            FlavorCategory::Bitter => self.bitter,
            FlavorCategory::Spicy => self.spicy,
            FlavorCategory::Salty => self.salty,
        }
    }

    /// Categories with their levels, in the fixed display order.
    pub fn iter(&self) -> impl Iterator<Item = (FlavorCategory, FlavorLevel)> + '_ {
        FlavorCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Preference {
    #[validate(length(min = 1, message = "Ingredients cannot be empty"))]
    pub ingredients: String,
    pub flavor_levels: FlavorLevels,
    #[validate(length(min = 1, message = "Texture cannot be empty"))]
    pub texture: String,
}
