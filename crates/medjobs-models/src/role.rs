//! Account roles.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// The closed set of account kinds.
///
/// The role is chosen at signup and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Employer account; posts jobs and reviews applications.
    Hospital,
    /// Applicant account; applies to and saves jobs.
    Jobseeker,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hospital => "hospital",
            Role::Jobseeker => "jobseeker",
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hospital" => Ok(Role::Hospital),
            "jobseeker" => Ok(Role::Jobseeker),
            other => Err(ValidationError::InvalidRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
