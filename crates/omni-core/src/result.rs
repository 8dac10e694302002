//! Result type aliases for the Omni SDK.

use crate::{OmniError, TechnicalError};

/// A specialized `Result` type for SDK bootstrap operations.
pub type OmniResult<T> = Result<T, OmniError>;

/// Result of an operation that reports failures as a [`TechnicalError`].
pub type TechResult<T> = Result<T, TechnicalError>;
