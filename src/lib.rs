//! # nbcollect
//!
//! Collects notebook homework submissions, as downloaded from a course
//! platform, into the `<submitted>/<student>/<assignment>/` layout nbgrader
//! expects, and drives autograding and feedback over the result.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Reading zip and 7z containers
pub mod archive;
/// Recursive collection of inputs into submission directories
pub mod collect;
/// Per-run configuration
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Errors raised while collecting
pub mod error;
/// Autograding and feedback through an external grading tool
pub mod grading;
/// Submitter identities encoded in filenames
pub mod identity;
/// For all parsers used
pub mod parsers;
/// Placement of notebook and data files
pub mod place;
/// Subprocess helpers
pub mod process;
/// Utility functions for convenience
pub mod util;

pub use collect::{Collection, InputKind, Submission, collect};
pub use config::{Config, DuplicatePolicy};
pub use error::CollectError;
pub use identity::{Identity, IdentityKind, classify};
