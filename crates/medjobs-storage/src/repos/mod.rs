//! Repositories over the job board tables.
//!
//! Every method issues exactly one SQL statement. Ownership checks are part
//! of that statement's predicate, so there is no gap between checking and
//! acting.

mod applications;
mod jobs;
mod saved_jobs;
mod users;

pub use applications::ApplicationRepository;
pub use jobs::JobRepository;
pub use saved_jobs::SavedJobRepository;
pub use users::{UserCredentials, UserRepository};

/// Build a `LIKE` pattern matching `needle` anywhere, with `\` as the escape
/// character so `%` and `_` in user input match literally.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
