//! Request and response models for the Authentication API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username to authenticate as.
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    /// Password for the user.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Signed bearer token for subsequent requests.
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_username_fails_validation() {
        let request = LoginRequest {
            username: String::new(),
            password: "secret".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_well_formed_request_passes_validation() {
        let request = LoginRequest {
            username: "admin".to_string(),
            password: "secret".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
