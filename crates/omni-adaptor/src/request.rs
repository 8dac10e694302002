//! Authentication request shapes.

use omni_core::{BusinessError, SessionRequest};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Credential login.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Identifier is required"))]
    pub identifier: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Account registration.
///
/// Provider-specific attributes travel as two parallel lists; see
/// [`RegisterRequest::attributes`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Identifier is required"))]
    pub identifier: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, max = 20, message = "Phone number must be 6-20 characters"))]
    pub phone_no: String,

    #[validate(length(min = 1, max = 128))]
    pub fullname: String,

    #[serde(default)]
    pub additional_fields: Vec<String>,

    #[serde(default)]
    pub additional_values: Vec<String>,
}

impl RegisterRequest {
    /// Pairs each additional field with its value.
    pub fn attributes(&self) -> Result<Vec<(&str, &str)>, BusinessError> {
        if self.additional_fields.len() != self.additional_values.len() {
            return Err(BusinessError::new(
                "INVALID_ATTRIBUTES",
                format!(
                    "{} additional fields but {} values",
                    self.additional_fields.len(),
                    self.additional_values.len()
                ),
            ));
        }

        Ok(self
            .additional_fields
            .iter()
            .zip(&self.additional_values)
            .map(|(field, value)| (field.as_str(), value.as_str()))
            .collect())
    }
}

/// Password change for an authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Identifier is required"))]
    pub identifier: String,

    #[validate(length(min = 8, message = "New password must be at least 8 characters"))]
    pub new_password: String,

    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    #[serde(flatten)]
    pub session: SessionRequest,
}

/// Confirmation of a pending registration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmRegisterRequest {
    #[validate(length(min = 1, message = "User id is required"))]
    pub user_id: String,

    #[validate(length(min = 1, message = "Confirmation code is required"))]
    pub confirmation_code: String,

    pub phone_no: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            identifier: "ada".to_string(),
            password: "correct-horse".to_string(),
            email: "ada@example.com".to_string(),
            phone_no: "+6281234".to_string(),
            fullname: "Ada Lovelace".to_string(),
            additional_fields: vec!["custom:tier".to_string()],
            additional_values: vec!["gold".to_string()],
        }
    }

    #[test]
    fn test_valid_register_request() {
        assert!(register_request().validate().is_ok());
    }

    #[test]
    fn test_register_rejects_bad_email_and_short_password() {
        let req = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            ..register_request()
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_attributes_pair_up() {
        let req = register_request();
        assert_eq!(req.attributes().unwrap(), vec![("custom:tier", "gold")]);
    }

    #[test]
    fn test_attributes_reject_mismatch() {
        let req = RegisterRequest {
            additional_values: Vec::new(),
            ..register_request()
        };
        let err = req.attributes().unwrap_err();
        assert_eq!(err.code, "INVALID_ATTRIBUTES");
    }

    #[test]
    fn test_login_requires_fields() {
        let req = LoginRequest {
            identifier: String::new(),
            password: String::new(),
        };
        assert_eq!(req.validate().unwrap_err().field_errors().len(), 2);
    }

    #[test]
    fn test_change_password_flattens_session() {
        let json = r#"{
            "identifier": "ada",
            "new_password": "new-password-1",
            "old_password": "old",
            "access_token": "tok"
        }"#;
        let req: ChangePasswordRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.session.access_token, "tok");
        assert!(req.validate().is_ok());
    }
}
