//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
    Json,
};
use omni_core::{BusinessError, TechnicalError};
use serde::{Deserialize, Serialize};

/// Meta code of a successful response.
pub const SUCCESS_CODE: &str = "00";

/// Meta code of a technical failure.
pub const GENERAL_ERROR: &str = "99";

/// Meta message of a technical failure. Details stay in the ticketed log entry.
pub const SOMETHING_WRONG: &str = "Something went wrong, please try again later";

/// Status line of the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub meta: Meta,
    #[serde(skip)]
    status: Option<StatusCode>,
}

impl<T> Response<T> {
    /// Creates a successful response.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self::new(SUCCESS_CODE, message, Some(data), StatusCode::OK)
    }

    /// Creates a response with a caller-chosen code. Answers 200 unless
    /// [`with_status`](Self::with_status) says otherwise.
    pub fn custom(code: impl Into<String>, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            data,
            meta: Meta {
                code: code.into(),
                message: message.into(),
            },
            status: None,
        }
    }

    /// Overrides the HTTP status.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// HTTP status this response is sent with.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    fn new(code: &str, message: impl Into<String>, data: Option<T>, status: StatusCode) -> Self {
        Self::custom(code, message, data).with_status(status)
    }
}

impl Response<()> {
    /// Creates a business error response; the error's code and message
    /// become the meta.
    pub fn business_error(err: &BusinessError) -> Self {
        Self::new(&err.code, err.message.clone(), None, StatusCode::BAD_REQUEST)
    }
}

impl Response<TechnicalError> {
    /// Creates a technical error response carrying the error record, so the
    /// caller can quote the ticket.
    pub fn technical_error(err: TechnicalError) -> Self {
        Self::new(GENERAL_ERROR, SOMETHING_WRONG, Some(err), StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> AxumResponse {
        (self.status(), Json(self)).into_response()
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub enum ApiError {
    Business(BusinessError),
    Technical(TechnicalError),
}

impl From<BusinessError> for ApiError {
    fn from(err: BusinessError) -> Self {
        Self::Business(err)
    }
}

impl From<TechnicalError> for ApiError {
    fn from(err: TechnicalError) -> Self {
        Self::Technical(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> AxumResponse {
        match self {
            Self::Business(err) => {
                tracing::debug!(code = %err.code, "business error response");
                Response::business_error(&err).into_response()
            }
            Self::Technical(err) => Response::technical_error(err).into_response(),
        }
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Response<T>, ApiError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> ApiResult<T> {
    Ok(Response::success(message, data))
}
