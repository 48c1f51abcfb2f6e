//! Shared data models for the MedJobs backend.
//!
//! This crate provides Serde-serializable types for:
//! - Accounts and their closed set of roles
//! - Job postings and their listing/detail projections
//! - Applications and the review status they move through
//! - Saved jobs
//! - Request schemas with boundary validation

pub mod application;
pub mod ids;
pub mod job;
pub mod role;
pub mod saved_job;
pub mod user;
pub mod validation;

// Re-export common types
pub use application::{
    Application, ApplicationStatus, ApplicationWithApplicant, ApplicationWithJob,
    ApplyRequest, NewApplication, UpdateApplicationStatusRequest,
};
pub use ids::{ApplicationId, JobId, SavedJobId, UserId};
pub use job::{
    CreateJobRequest, EmploymentType, Job, JobDetail, JobFilter, JobListing, JobStatus, NewJob,
};
pub use role::Role;
pub use saved_job::{SaveJobRequest, SavedJob, SavedJobListing};
pub use user::{LoginRequest, NewUser, SignupRequest, User};
pub use validation::{ValidationError, ValidationResult};
