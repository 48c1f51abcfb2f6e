//! Job postings.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{JobId, UserId};
use crate::validation::{non_blank, ValidationError, ValidationResult};

/// Posting status. Only active postings are listed publicly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Active,
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Closed => "closed",
        }
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(JobStatus::Active),
            "closed" => Ok(JobStatus::Closed),
            other => Err(format!("unknown job status '{}'", other)),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Contract kind of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    #[default]
    FullTime,
    PartTime,
    Contract,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full_time",
            EmploymentType::PartTime => "part_time",
            EmploymentType::Contract => "contract",
        }
    }
}

impl FromStr for EmploymentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full_time" => Ok(EmploymentType::FullTime),
            "part_time" => Ok(EmploymentType::PartTime),
            "contract" => Ok(EmploymentType::Contract),
            other => Err(ValidationError::InvalidEmploymentType(other.to_string())),
        }
    }
}

/// A job posting row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub hospital_id: UserId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub employment_type: EmploymentType,
    pub experience_level: Option<String>,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

/// A posting in the public listing, with the posting hospital's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(flatten)]
    pub job: Job,
    pub hospital_name: String,
}

/// A single posting with the hospital's contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: Job,
    pub hospital_name: String,
    pub hospital_email: String,
    pub hospital_location: Option<String>,
}

/// Query string of `GET /api/jobs`.
///
/// Both filters are case-insensitive substring matches; blank means
/// unfiltered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl JobFilter {
    /// Free-text filter over title and description, if any.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Location filter, if any.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Validated posting fields for insertion. The owner comes from the
/// authenticated identity, never from the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub employment_type: EmploymentType,
    pub experience_level: Option<String>,
}

/// Body of `POST /api/jobs`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateJobRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
}

impl CreateJobRequest {
    /// Validate the request.
    pub fn validate(self) -> ValidationResult<NewJob> {
        let (Some(title), Some(description), Some(location)) = (
            non_blank(self.title),
            non_blank(self.description),
            non_blank(self.location),
        ) else {
            return Err(ValidationError::MissingFields);
        };

        let employment_type = match non_blank(self.employment_type) {
            Some(raw) => raw.parse()?,
            None => EmploymentType::default(),
        };

        Ok(NewJob {
            title,
            description,
            location,
            salary: non_blank(self.salary),
            requirements: non_blank(self.requirements),
            benefits: non_blank(self.benefits),
            employment_type,
            experience_level: non_blank(self.experience_level),
        })
    }
}
