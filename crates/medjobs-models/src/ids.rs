//! Typed row identifiers.
//!
//! Every table uses an auto-incrementing integer key. Wrapping them keeps a
//! job id from being passed where an application id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Get the raw integer key.
            pub fn get(self) -> i64 {
                self.0
            }

            /// Parse an id taken from a URL path segment.
            ///
            /// Returns `None` for anything that is not a positive integer.
            pub fn parse(raw: &str) -> Option<Self> {
                raw.parse::<i64>().ok().filter(|id| *id > 0).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

row_id!(
    /// Primary key of a `users` row.
    UserId
);
row_id!(
    /// Primary key of a `jobs` row.
    JobId
);
row_id!(
    /// Primary key of an `applications` row.
    ApplicationId
);
row_id!(
    /// Primary key of a `saved_jobs` row.
    SavedJobId
);
