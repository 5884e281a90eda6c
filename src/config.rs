#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Per-run configuration of the collection pipeline.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result, bail};
use bon::Builder;
use itertools::Itertools;
use serde::Serialize;

use crate::{
    constants::{DEFAULT_SUBMISSION_DIR, NOTEBOOK_EXT, SOURCE_DIR},
    util::find_files,
};

/// What happens to a submission that contains more than one notebook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep the first notebook in listing order and grade it.
    #[default]
    KeepFirst,
    /// Remove the copied notebook so the submission is not graded.
    Exclude,
}

impl FromStr for DuplicatePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep-first" | "keep_first" | "first" => Ok(DuplicatePolicy::KeepFirst),
            "exclude" => Ok(DuplicatePolicy::Exclude),
            other => bail!("Unknown duplicate notebook policy `{other}`"),
        }
    }
}

impl DuplicatePolicy {
    /// Reads `NBCOLLECT_DUPLICATES`, defaulting to `KeepFirst` when unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var("NBCOLLECT_DUPLICATES") {
            Ok(value) if !value.trim().is_empty() => value
                .parse()
                .context("NBCOLLECT_DUPLICATES must be `keep-first` or `exclude`"),
            _ => Ok(DuplicatePolicy::KeepFirst),
        }
    }
}

/// Everything `collect` needs to know about the current run.
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into), on(PathBuf, into))]
pub struct Config {
    /// Root under which `<identity>/<assignment>` directories are created.
    #[builder(default = PathBuf::from(DEFAULT_SUBMISSION_DIR))]
    submission_dir: PathBuf,
    /// Assignment being collected.
    assignment:     String,
    /// File name every submission notebook is copied to.
    notebook_name:  String,
    /// Handling of submissions with several notebooks.
    #[builder(default)]
    duplicates:     DuplicatePolicy,
}

impl Config {
    /// Root of the submission tree.
    pub fn submission_dir(&self) -> &Path {
        &self.submission_dir
    }

    /// Name of the assignment.
    pub fn assignment(&self) -> &str {
        &self.assignment
    }

    /// Canonical notebook file name.
    pub fn notebook_name(&self) -> &str {
        &self.notebook_name
    }

    /// Duplicate notebook policy.
    pub fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Directory a submitter's files for this assignment end up in.
    pub fn target_dir(&self, identity_key: &str) -> PathBuf {
        self.submission_dir.join(identity_key).join(&self.assignment)
    }
}

/// Derives the canonical notebook name from the assignment's reference
/// notebooks in `<course_dir>/source/<assignment>`. The first one in sorted
/// order wins. Fails if the assignment has no reference notebook.
pub fn notebook_name(course_dir: &Path, assignment: &str) -> Result<String> {
    let source = course_dir.join(SOURCE_DIR).join(assignment);
    let first = find_files(NOTEBOOK_EXT, 0, &source)?
        .into_iter()
        .sorted()
        .next()
        .with_context(|| {
            format!("No source notebooks found for assignment {assignment} in {}", source.display())
        })?;

    let stem = first
        .file_stem()
        .with_context(|| format!("Invalid notebook path {}", first.display()))?
        .to_string_lossy();

    Ok(format!("{stem}.{NOTEBOOK_EXT}"))
}
