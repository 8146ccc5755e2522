use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::crud::Validate;
use crate::error::{AppError, AppResult};
use crate::orm::Document;
use crate::roles::Role;

pub const COLLECTION: &str = "users";

pub(crate) const EMAIL_ERROR: &str = "Invalid email format";
pub(crate) const PASSWORD_ERROR: &str = "Password must be at least 6 characters";
pub(crate) const NAME_ERROR: &str = "Name must be at least 2 characters";

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Stored shape of a user document. The role is persisted as its
/// numeric id; `password` holds the hash and is absent for
/// OAuth-created accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub name: String,
    pub role_id: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// A user row as read back from storage.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub doc: UserDoc,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

impl UserRecord {
    pub fn from_document(document: Document) -> AppResult<Self> {
        let doc: UserDoc = document.parse().map_err(AppError::internal)?;
        Ok(Self {
            id: document.id,
            doc,
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }

    /// API shape: never carries the hash, always carries the role name
    /// computed from the stored id.
    pub fn into_public(self) -> AppResult<PublicUser> {
        let role = Role::from_id(self.doc.role_id).map_err(AppError::internal)?;
        Ok(PublicUser {
            id: self.id,
            email: self.doc.email,
            name: self.doc.name,
            role,
            role_id: role.id(),
            phone: self.doc.phone,
            instagram: self.doc.instagram,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub role_id: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

/// Admin create: the password is optional so staff can provision
/// OAuth-only accounts.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub password: Option<String>,
    pub name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub instagram: Option<String>,
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> AppResult<()> {
        if !is_valid_email(&self.email) {
            return Err(AppError::Validation("email", EMAIL_ERROR.to_string()));
        }
        if let Some(password) = &self.password {
            if password.len() < 6 {
                return Err(AppError::Validation("password", PASSWORD_ERROR.to_string()));
            }
        }
        if self.name.trim().chars().count() < 2 {
            return Err(AppError::Validation("name", NAME_ERROR.to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub role: Option<Role>,
}

impl UpdateUserRequest {
    /// Stored patch: the role name becomes a roleId, nothing else is
    /// renamed.
    pub fn into_patch(self) -> UserPatch {
        UserPatch {
            name: self.name,
            phone: self.phone,
            instagram: self.instagram,
            role_id: self.role.map(Role::id),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i16>,
}

impl Validate for UserPatch {
    fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            if name.trim().chars().count() < 2 {
                return Err(AppError::Validation("name", NAME_ERROR.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    fn record(role_id: i16) -> UserRecord {
        UserRecord {
            id: Uuid::nil(),
            doc: UserDoc {
                email: "ana@example.com".into(),
                password: Some("$argon2id$stub".into()),
                name: "Ana".into(),
                role_id,
                phone: None,
                instagram: None,
            },
            created_at: datetime!(2026-01-01 00:00:00 UTC),
            updated_at: None,
        }
    }

    #[test]
    fn public_user_carries_role_name_and_no_hash() {
        let public = record(2).into_public().expect("valid role");
        assert_eq!(public.role, Role::Trainer);
        assert_eq!(public.role_id, 2);
        let body = serde_json::to_value(&public).expect("serialize");
        assert_eq!(body["role"], "trainer");
        assert!(body.get("password").is_none());
        assert_eq!(body["createdAt"], "2026-01-01T00:00:00Z");
    }

    #[test]
    fn corrupt_role_id_is_an_internal_error() {
        assert!(record(9).into_public().is_err());
    }

    #[test]
    fn email_and_length_rules() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a @b.co"));

        let req = CreateUserRequest {
            email: "bad".into(),
            password: None,
            name: "Ana".into(),
            role: Role::Customer,
            phone: None,
            instagram: None,
        };
        assert!(matches!(req.validate(), Err(AppError::Validation("email", _))));

        let req = CreateUserRequest {
            email: "a@b.co".into(),
            password: Some("123".into()),
            name: "Ana".into(),
            role: Role::Customer,
            phone: None,
            instagram: None,
        };
        assert!(matches!(req.validate(), Err(AppError::Validation("password", _))));
    }

    #[test]
    fn update_patch_maps_role_to_role_id() {
        let req = UpdateUserRequest {
            name: None,
            phone: Some("555".into()),
            instagram: None,
            role: Some(Role::Admin),
        };
        let patch = req.into_patch();
        let body = serde_json::to_value(&patch).expect("serialize");
        assert_eq!(body, json!({ "phone": "555", "roleId": 3 }));
    }
}
