use serde::{Deserialize, Serialize};

use crate::crud::Validate;
use crate::error::{AppError, AppResult};
use crate::roles::Role;
use crate::users::{is_valid_email, PublicUser};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> AppResult<()> {
        if !is_valid_email(&self.email) {
            return Err(AppError::Validation("email", "Invalid email format".to_string()));
        }
        if self.password.len() < 6 {
            return Err(AppError::Validation(
                "password",
                "Password must be at least 6 characters".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub instagram: Option<String>,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> AppResult<()> {
        if !is_valid_email(&self.email) {
            return Err(AppError::Validation("email", "Invalid email format".to_string()));
        }
        if self.password.len() < 6 {
            return Err(AppError::Validation(
                "password",
                "Password must be at least 6 characters".to_string(),
            ));
        }
        if self.name.trim().chars().count() < 2 {
            return Err(AppError::Validation(
                "name",
                "Name must be at least 2 characters".to_string(),
            ));
        }
        if !Role::REGISTERABLE.contains(&self.role) {
            return Err(AppError::Validation(
                "role",
                "This role cannot be registered".to_string(),
            ));
        }
        Ok(())
    }
}

/// Profile handed over by a trusted OAuth callback.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthLoginRequest {
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl Validate for OAuthLoginRequest {
    fn validate(&self) -> AppResult<()> {
        if !is_valid_email(&self.email) {
            return Err(AppError::Validation("email", "Invalid email format".to_string()));
        }
        Ok(())
    }
}

/// Issued on login, register and OAuth login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: PublicUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_master() {
        let req = RegisterRequest {
            email: "boss@example.com".into(),
            password: "secret123".into(),
            name: "Boss".into(),
            role: Role::Master,
            phone: None,
            instagram: None,
        };
        assert!(matches!(req.validate(), Err(AppError::Validation("role", _))));
    }

    #[test]
    fn register_validates_in_field_order() {
        let req = RegisterRequest {
            email: "nope".into(),
            password: "123".into(),
            name: "".into(),
            role: Role::Customer,
            phone: None,
            instagram: None,
        };
        // First failing field wins.
        assert!(matches!(req.validate(), Err(AppError::Validation("email", _))));
    }

    #[test]
    fn auth_response_omits_is_new_unless_set() {
        let json = serde_json::to_value(AuthResponse {
            success: true,
            token: "tok".into(),
            user: sample_user(),
            is_new: None,
        })
        .expect("serialize");
        assert!(json.get("isNew").is_none());

        let json = serde_json::to_value(AuthResponse {
            success: true,
            token: "tok".into(),
            user: sample_user(),
            is_new: Some(true),
        })
        .expect("serialize");
        assert_eq!(json["isNew"], true);
    }

    fn sample_user() -> PublicUser {
        use time::macros::datetime;
        PublicUser {
            id: uuid::Uuid::nil(),
            email: "a@b.co".into(),
            name: "A".into(),
            role: Role::Customer,
            role_id: 1,
            phone: None,
            instagram: None,
            created_at: datetime!(2026-01-01 00:00:00 UTC),
            updated_at: None,
        }
    }
}
