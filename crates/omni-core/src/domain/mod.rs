//! Request and response shapes shared across service layers.

mod base;
mod pagination;
mod request;

pub use base::BaseEntity;
pub use pagination::{PaginationResponse, ValidationResponse};
pub use request::{DeleteRequest, FindByIdRequest, SearchRequest, SessionRequest};
