use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::{FieldErrors, field_messages};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex compiles")
});

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,

    #[serde(skip_serializing, default)] // never send password hash in API responses
    pub encrypted_password: String,

    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// The authenticated identity behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl Actor {
    /// Owner-or-admin gate used by bookings and user management.
    pub fn can_access(&self, owner_id: Uuid) -> bool {
        self.is_admin || self.user_id == owner_id
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Actor {
            user_id: user.id,
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserParams {
    #[validate(length(
        min = 2,
        message = "firstName length should be at least 2 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 2,
        message = "lastName length should be at least 2 characters"
    ))]
    pub last_name: String,

    #[validate(custom(function = "validate_email"))]
    pub email: String,

    #[validate(length(
        min = 7,
        message = "password length should be at least 7 characters"
    ))]
    pub password: String,
}

impl CreateUserParams {
    /// Every violated rule at once, empty when the params are valid.
    pub fn field_errors(&self) -> FieldErrors {
        match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => field_messages(&errors),
        }
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_REGEX.is_match(email) {
        return Ok(());
    }

    let mut error = ValidationError::new("email");
    error.message = Some("email is not valid".into());
    Err(error)
}

/// Only the name fields can change after registration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserParams {
    #[validate(length(
        min = 2,
        message = "firstName length should be at least 2 characters"
    ))]
    pub first_name: Option<String>,

    #[validate(length(
        min = 2,
        message = "lastName length should be at least 2 characters"
    ))]
    pub last_name: Option<String>,
}

impl UpdateUserParams {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }

    pub fn field_errors(&self) -> FieldErrors {
        match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => field_messages(&errors),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn params(first: &str, last: &str, email: &str, password: &str) -> CreateUserParams {
        CreateUserParams {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn valid_params_have_no_errors() {
        let errors = params("James", "Foo", "james@foo.com", "supersecure").field_errors();
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn all_violations_are_reported_together() {
        let errors = params("J", "F", "not-an-email", "short").field_errors();

        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors["firstName"],
            "firstName length should be at least 2 characters"
        );
        assert_eq!(
            errors["lastName"],
            "lastName length should be at least 2 characters"
        );
        assert_eq!(
            errors["password"],
            "password length should be at least 7 characters"
        );
        assert_eq!(errors["email"], "email is not valid");
    }

    #[test]
    fn email_pattern() {
        assert!(validate_email("a.b-c+d@example.co.uk").is_ok());
        assert!(validate_email("user@localhost").is_err());
        assert!(validate_email("user@example.c").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn boundary_lengths_pass() {
        let errors = params("Jo", "Li", "jo@li.io", "1234567").field_errors();
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn update_params_only_check_present_fields() {
        let update = UpdateUserParams {
            first_name: Some("Ann".to_string()),
            last_name: None,
        };
        assert!(update.field_errors().is_empty());
        assert!(!update.is_empty());

        let update = UpdateUserParams {
            first_name: None,
            last_name: Some("X".to_string()),
        };
        assert!(update.field_errors().contains_key("lastName"));

        assert!(UpdateUserParams::default().is_empty());
    }

    #[test]
    fn actor_gate() {
        let owner = Uuid::new_v4();
        let other = Actor {
            user_id: Uuid::new_v4(),
            is_admin: false,
        };
        let admin = Actor {
            user_id: Uuid::new_v4(),
            is_admin: true,
        };

        assert!(!other.can_access(owner));
        assert!(admin.can_access(owner));
        assert!(
            Actor {
                user_id: owner,
                is_admin: false
            }
            .can_access(owner)
        );
    }

    #[test]
    fn password_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            first_name: "James".into(),
            last_name: "Foo".into(),
            email: "james@foo.com".into(),
            encrypted_password: "$2b$12$secret".into(),
            is_admin: false,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("encryptedPassword").is_none());
        assert_eq!(json["firstName"], "James");
        assert_eq!(json["isAdmin"], false);
    }
}
