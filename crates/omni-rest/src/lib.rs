//! # Omni REST
//!
//! The `{data, meta}` envelope every Omni service answers with, and its axum
//! integration.

pub mod responses;

pub use responses::*;
