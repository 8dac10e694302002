//! # Omni Adaptor
//!
//! Contract an identity provider client must satisfy to back the SDK's
//! authentication flows, plus the request shapes those flows exchange.

mod ciam;
mod request;

pub use ciam::*;
pub use request::*;
