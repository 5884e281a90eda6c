#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The grading side: a gateway to the tool that executes and scores
//! notebooks, and the per-student loop driving it.

/// Gateway backed by the `nbgrader` command line
pub mod nbgrader;
/// Autograde, review, and feedback loop
pub mod run;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use nbgrader::Nbgrader;

/// Failures surfaced by a grading gateway for one student.
#[derive(Error, Debug)]
pub enum GradingError {
    /// The grading tool ran but reported failure.
    #[error("`{command}` failed for {student} of {assignment}:\n{stderr}")]
    Failed {
        /// Subcommand that failed.
        command:    String,
        /// Assignment being graded.
        assignment: String,
        /// Student being graded.
        student:    String,
        /// What the tool printed on stderr.
        stderr:     String,
    },

    /// Listing students from the course directory failed.
    #[error("Could not list students in {}: {source}", path.display())]
    Listing {
        /// Directory being listed.
        path:   PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The grading tool could not be run at all.
    #[error(transparent)]
    Process(#[from] anyhow::Error),
}

impl GradingError {
    /// Wraps a listing failure on `path`.
    pub fn listing(path: &Path, source: std::io::Error) -> Self {
        GradingError::Listing {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Operations of the external grading engine, per assignment and student.
#[allow(async_fn_in_trait)]
pub trait GradingGateway {
    /// Students with a submission for `assignment`.
    async fn list_submitted_students(&self, assignment: &str) -> Result<Vec<String>, GradingError>;

    /// Executes and scores one student's submission.
    async fn autograde(
        &self,
        assignment: &str,
        student: &str,
        force: bool,
    ) -> Result<(), GradingError>;

    /// Students whose submission for `assignment` has been autograded.
    async fn list_autograded_students(&self, assignment: &str)
    -> Result<Vec<String>, GradingError>;

    /// Renders the feedback report of one student.
    async fn generate_feedback(
        &self,
        assignment: &str,
        student: &str,
        force: bool,
    ) -> Result<(), GradingError>;

    /// Makes the rendered feedback of one student available.
    async fn release_feedback(&self, assignment: &str, student: &str) -> Result<(), GradingError>;
}
