pub mod metrics;
pub mod normalizer;
pub mod prompt;
pub mod providers;
pub mod relay;
pub mod sanitize;

pub use relay::{RelayError, RelaySettings, generate_recipe};
