//! # Omni SDK
//!
//! Single dependency for services built on the Omni toolkit. Re-exports every
//! component crate and offers [`OmniBuilder`] to wire configuration, logging
//! and store connections in one call.
//!
//! ```no_run
//! use omni_sdk::{storage::Cacher, OmniBuilder};
//! use std::time::Duration;
//!
//! # async fn run() -> omni_sdk::core::OmniResult<()> {
//! let omni = OmniBuilder::new().with_logging().with_cache().build().await?;
//! if let Some(cache) = omni.cacher() {
//!     cache.set("otp", "+6281234", "552011", Duration::from_secs(300)).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod app;

pub use app::{Omni, OmniBuilder};

pub use omni_adaptor as adaptor;
pub use omni_config as config;
pub use omni_core as core;
pub use omni_rest as rest;
pub use omni_security as security;
pub use omni_storage as storage;
