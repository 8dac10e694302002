//! Error normalizer turning backend failures into [`TechnicalError`] records.

use crate::TechnicalError;
use chrono::Utc;
use std::fmt::Display;
use tracing::error;
use uuid::Uuid;

/// Captures `err` as a [`TechnicalError`] and logs it under `message`.
///
/// The record gets a fresh v4 ticket and the current unix time. The log event
/// is emitted inside whatever span the caller is running in, so components
/// that carry their own span get their context attached for free.
pub fn exception<E: Display + ?Sized>(message: &str, err: &E) -> TechnicalError {
    let record = TechnicalError {
        exception: err.to_string(),
        occurred: Utc::now().timestamp(),
        ticket: Uuid::new_v4().to_string(),
    };

    error!(
        exception = %record.exception,
        occurred_time = record.occurred,
        ticket = %record.ticket,
        "{}",
        message
    );

    record
}
