#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Extension (without the dot) marking a Jupyter notebook.
pub const NOTEBOOK_EXT: &str = "ipynb";

/// Extension (without the dot) of zip containers.
pub const ZIP_EXT: &str = "zip";

/// Extension (without the dot) of 7z containers.
pub const SEVENZ_EXT: &str = "7z";

/// Prefix of the resource-fork folder macOS adds to archives.
pub const MACOS_RESOURCE_PREFIX: &str = "__MACOSX/";

/// Leading character of hidden files and folders.
pub const HIDDEN_MARKER: char = '.';

/// Name of the auxiliary data folder merged into a submission.
pub const DATA_DIR: &str = "data";

/// Folder (inside the course directory) holding rendered feedback.
pub const FEEDBACK_DIR: &str = "feedback";

/// Folder (inside the course directory) holding reference notebooks.
pub const SOURCE_DIR: &str = "source";

/// Folder (inside the course directory) holding autograded submissions.
pub const AUTOGRADED_DIR: &str = "autograded";

/// Default submission root, relative to the course directory.
pub const DEFAULT_SUBMISSION_DIR: &str = "submitted";

/// Default root of the flat feedback output.
pub const DEFAULT_OUTPUT_DIR: &str = "upload";

/// Default name of the grading executable.
pub const NBGRADER_BIN: &str = "nbgrader";
