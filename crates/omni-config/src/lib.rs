//! # Omni Config
//!
//! Typed configuration for the Omni service SDK components, loaded in layers
//! from TOML files and `OMNI__*` environment variables.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
