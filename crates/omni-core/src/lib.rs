//! # Omni Core
//!
//! Core types shared by every crate of the Omni service SDK: the technical and
//! business error envelopes, the error normalizer, common request/response
//! shapes, and the process bootstrap helpers (logging and `.env` loading).

pub mod domain;
pub mod env;
pub mod error;
pub mod exception;
pub mod result;
pub mod telemetry;

pub use domain::*;
pub use env::load_env;
pub use error::*;
pub use exception::exception;
pub use result::*;
pub use telemetry::{init_logging, LoggingConfig};
