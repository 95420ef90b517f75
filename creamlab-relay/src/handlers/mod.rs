//! HTTP handlers for the relay service.

pub mod generate;
pub mod health;
pub mod metrics;
