//! `.env` file loading.

use crate::{exception, TechResult};
use std::path::Path;
use tracing::{debug, info};

/// Loads `./.env` into the process environment when the file exists.
///
/// A missing file is not an error; a present but unreadable or malformed
/// file is.
pub fn load_env() -> TechResult<()> {
    load_env_from(".env")
}

/// Loads the given env file into the process environment when it exists.
pub fn load_env_from(path: impl AsRef<Path>) -> TechResult<()> {
    let path = path.as_ref();
    if !path.exists() {
        info!("no configuration from {}", path.display());
        return Ok(());
    }

    dotenvy::from_path(path)
        .map_err(|e| exception("failed to load configuration from .env file", &e))?;

    debug!("Loaded environment from {}", path.display());
    Ok(())
}
