use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;
use validator::Validate;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,16}$").expect("valid username regex"));

static PASSWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{8,30}$").expect("valid password regex"));

/// User entity - matches SQL schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, server-assigned at creation
    pub id: Uuid,
    /// Username (unique at creation time, case-sensitive)
    pub username: String,
    /// Argon2 password hash (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Free-form postal address
    pub address: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user (password must already be hashed by the caller)
    pub fn new(username: String, password_hash: String, address: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            username,
            password_hash,
            address,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the mutable fields from an update request.
    ///
    /// The password hash is replaced unconditionally: callers that do not
    /// want to rotate the password must resend the current one.
    pub fn apply_update(&mut self, username: String, password_hash: String, address: String) {
        self.username = username;
        self.password_hash = password_hash;
        self.address = address;
        self.updated_at = Utc::now();
    }
}

/// External projection of a [`User`] - everything except the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizedUser {
    pub id: Uuid,
    pub username: String,
    pub address: String,
}

impl From<User> for SanitizedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            address: user.address,
        }
    }
}

/// DTO for creating a new user.
///
/// `username` and `password` are optional at the deserialization layer so
/// that an absent field reaches schema validation (and the aggregated
/// error message) instead of being rejected by the JSON extractor.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(
        required(message = "username is required"),
        regex(
            path = *USERNAME_RE,
            message = "username must be 6-16 alphanumeric characters"
        )
    )]
    pub username: Option<String>,
    #[validate(
        required(message = "password is required"),
        regex(
            path = *PASSWORD_RE,
            message = "password must be 8-30 characters of letters, digits or underscore"
        )
    )]
    pub password: Option<String>,
    #[serde(default)]
    pub address: String,
}

/// DTO for updating an existing user.
///
/// All three fields are overwritten; there is no partial update. The same
/// required-then-pattern rules as [`CreateUser`] apply.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(
        required(message = "username is required"),
        regex(
            path = *USERNAME_RE,
            message = "username must be 6-16 alphanumeric characters"
        )
    )]
    pub username: Option<String>,
    #[validate(
        required(message = "password is required"),
        regex(
            path = *PASSWORD_RE,
            message = "password must be 8-30 characters of letters, digits or underscore"
        )
    )]
    pub password: Option<String>,
    #[serde(default)]
    pub address: String,
}

/// DTO for the password-check operation (not schema-validated)
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordCheck {
    pub username: String,
    pub password: String,
}
