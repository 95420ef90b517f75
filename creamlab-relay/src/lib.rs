//! creamlab-relay: server-side relay between the cream recipe lab client and
//! a Gemini-compatible generation endpoint.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
