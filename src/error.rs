#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Errors raised while collecting and placing submissions.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong with a single input or submission.
#[derive(Error, Debug)]
pub enum CollectError {
    /// The input has an extension the pipeline cannot handle.
    #[error("Unsupported file format: {}", path.display())]
    UnsupportedFormat {
        /// Offending input.
        path: PathBuf,
    },

    /// The archive could not be opened or read.
    #[error("Could not read archive {}: {message}", path.display())]
    CorruptArchive {
        /// Offending archive.
        path:    PathBuf,
        /// Error reported by the archive reader.
        message: String,
    },

    /// A notebook whose name does not identify a submitter.
    #[error("Unmatched notebook found in {}", path.display())]
    UnmatchedNotebook {
        /// Offending notebook.
        path: PathBuf,
    },

    /// A file that is neither a submission nor an archive to look into.
    #[error("Don't know what to do with file: {}", path.display())]
    UnrecognizedFile {
        /// Offending file.
        path: PathBuf,
    },

    /// More than one notebook inside one submission.
    #[error("Multiple notebooks found in submission, ignoring {}", extra.display())]
    MultipleNotebooks {
        /// The notebook that was not used.
        extra: PathBuf,
    },

    /// No notebook inside a submission.
    #[error("No notebook found in submission {}", target.display())]
    NoNotebookFound {
        /// Directory of the submission without a notebook.
        target: PathBuf,
    },

    /// Filesystem error while extracting or copying.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being worked on.
        path:   PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

impl CollectError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CollectError::Io {
            path: path.into(),
            source,
        }
    }

    /// Builds a `CorruptArchive` error from any reader error.
    pub fn corrupt(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        CollectError::CorruptArchive {
            path:    path.into(),
            message: err.to_string(),
        }
    }

    /// True for the violations of the one-notebook rule.
    pub fn is_placement_issue(&self) -> bool {
        matches!(
            self,
            CollectError::MultipleNotebooks { .. } | CollectError::NoNotebookFound { .. }
        )
    }
}
