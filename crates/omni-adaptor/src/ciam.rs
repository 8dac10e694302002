//! Identity provider capability.

use crate::{ChangePasswordRequest, ConfirmRegisterRequest, LoginRequest, RegisterRequest};
use async_trait::async_trait;
use omni_core::{SessionRequest, TechResult};
use serde_json::{Map, Value};

/// Operations an identity provider client must support.
///
/// Responses are passed through as provider JSON; failures come back as
/// logged technical errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CiamWatcher: Send + Sync {
    /// Returns the client secret hash for `username`.
    fn secret(&self, username: &str) -> String;

    async fn register(&self, req: &RegisterRequest) -> TechResult<Value>;

    async fn confirm_register(&self, req: &ConfirmRegisterRequest) -> TechResult<Value>;

    async fn login(&self, req: &LoginRequest) -> TechResult<Value>;

    async fn logout(&self, session: &SessionRequest) -> TechResult<Value>;

    /// Introspects an access token and returns its claims.
    async fn jwt_info(&self, token: &str) -> TechResult<Map<String, Value>>;

    async fn refresh_token(&self, session: &SessionRequest) -> TechResult<Value>;

    async fn change_password(&self, req: &ChangePasswordRequest) -> TechResult<Value>;
}
