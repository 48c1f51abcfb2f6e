//! User accounts and the auth request schemas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::role::Role;
use crate::validation::{non_blank, ValidationError, ValidationResult};

/// A registered account as exposed to clients.
///
/// The password hash never leaves the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated account fields for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub location: Option<String>,
}

/// Body of `POST /api/auth/signup`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl SignupRequest {
    /// Validate the request, splitting off the plaintext password so it can
    /// be hashed before anything is stored.
    pub fn validate(self) -> ValidationResult<(NewUser, String)> {
        let (Some(name), Some(email), Some(password), Some(role)) = (
            non_blank(self.name),
            non_blank(self.email),
            non_blank(self.password),
            non_blank(self.role),
        ) else {
            return Err(ValidationError::MissingFields);
        };

        let role = role.parse::<Role>()?;

        Ok((
            NewUser {
                name,
                email,
                role,
                phone: non_blank(self.phone),
                location: non_blank(self.location),
            },
            password,
        ))
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Validate the request, returning `(email, password)`.
    pub fn validate(self) -> ValidationResult<(String, String)> {
        match (non_blank(self.email), non_blank(self.password)) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(ValidationError::MissingCredentials),
        }
    }
}
