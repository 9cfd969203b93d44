//! User accounts and credentials.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A user row as returned by the API. The password hash never leaves the
/// database layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

/// A user plus the ids of the jobs they applied to.
#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    pub applications: Vec<i32>,
}

/// Payload for registering or creating a user.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(length(min = 1, max = 30))]
    pub username: String,
    #[validate(length(min = 5, max = 72))]
    pub password: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    /// Only honored on the admin-only create endpoint; public registration
    /// always produces a non-admin account.
    #[serde(default)]
    pub is_admin: bool,
}

/// Sparse field-update map for PATCH /users/{username}.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[validate(length(min = 5, max = 72))]
    pub password: Option<String>,
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.password.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
    }
}

/// Login payload for POST /auth/token.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_defaults_to_non_admin() {
        let new: NewUser = serde_json::from_str(
            r#"{"username":"u1","password":"password1","firstName":"U","lastName":"One","email":"u1@example.com"}"#,
        )
        .unwrap();
        assert!(!new.is_admin);
        assert!(new.validate().is_ok());
    }

    #[test]
    fn new_user_rejects_bad_email() {
        let new: NewUser = serde_json::from_str(
            r#"{"username":"u1","password":"password1","firstName":"U","lastName":"One","email":"not-an-email"}"#,
        )
        .unwrap();
        assert!(new.validate().is_err());
    }

    #[test]
    fn user_detail_flattens_user_fields() {
        let detail = UserDetail {
            user: User {
                username: "u1".to_string(),
                first_name: "U".to_string(),
                last_name: "One".to_string(),
                email: "u1@example.com".to_string(),
                is_admin: false,
            },
            applications: vec![3, 9],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["firstName"], "U");
        assert_eq!(json["applications"], serde_json::json!([3, 9]));
    }
}
