#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Recursive collection of raw inputs into submission directories.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    archive::{self, ArchiveFormat},
    config::Config,
    error::CollectError,
    identity::{Identity, classify},
    place::place,
    util::{basename, is_notebook},
};

/// How a raw input is treated, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A bare notebook.
    Notebook,
    /// A container to extract.
    Archive(ArchiveFormat),
    /// Anything else.
    Unrecognized,
}

impl InputKind {
    /// Sniffs the kind of `path` from its extension.
    pub fn of(path: &Path) -> Self {
        if is_notebook(path) {
            InputKind::Notebook
        } else if let Some(format) = ArchiveFormat::from_path(path) {
            InputKind::Archive(format)
        } else {
            InputKind::Unrecognized
        }
    }
}

/// One submitter's deliverable for the assignment, placed on disk.
#[derive(Debug, Serialize)]
pub struct Submission {
    /// Who submitted it.
    identity:   Identity,
    /// Directory the files were placed in.
    target_dir: PathBuf,
    /// Input the submission was recognised in.
    source:     PathBuf,
    /// Violations of the one-notebook rule.
    #[serde(serialize_with = "serialize_issues")]
    issues:     Vec<CollectError>,
}

/// Serializes issues by their message.
fn serialize_issues<S>(issues: &[CollectError], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(issues.iter().map(ToString::to_string))
}

impl Submission {
    /// Who submitted it.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Directory the files were placed in.
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Input the submission was recognised in.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Violations of the one-notebook rule.
    pub fn issues(&self) -> &[CollectError] {
        &self.issues
    }

    /// True if the submission has no placement issues.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Result of collecting one input.
#[derive(Debug, Default)]
pub struct Collection {
    /// Submissions found, in discovery order.
    pub submissions: Vec<Submission>,
    /// Archive members that could not be collected.
    pub skipped:     Vec<(PathBuf, CollectError)>,
}

impl Collection {
    /// Appends everything collected in `other`.
    fn extend(&mut self, other: Collection) {
        self.submissions.extend(other.submissions);
        self.skipped.extend(other.skipped);
    }

    /// Identity keys of the collected submissions, in discovery order.
    pub fn keys(&self) -> Vec<&str> {
        self.submissions
            .iter()
            .map(|s| s.identity().key())
            .collect()
    }
}

/// Collects `input` (a notebook or an archive, possibly nested) into the
/// submission tree described by `config`.
///
/// Errors about `input` itself are returned. Errors about members of an
/// unrecognised archive are logged and listed in `Collection::skipped` so the
/// remaining members are still collected.
pub fn collect(input: &Path, config: &Config) -> Result<Collection, CollectError> {
    let name = basename(input);

    if let Some(identity) = classify(&name) {
        let submission = collect_submission(input, identity, config)?;
        return Ok(Collection {
            submissions: vec![submission],
            skipped:     Vec::new(),
        });
    }

    match InputKind::of(input) {
        InputKind::Archive(_) => collect_batch(input, config),
        InputKind::Notebook => Err(CollectError::UnmatchedNotebook {
            path: input.to_path_buf(),
        }),
        InputKind::Unrecognized => Err(CollectError::UnrecognizedFile {
            path: input.to_path_buf(),
        }),
    }
}

/// Creates the target directory of a recognised submission and places its
/// files there.
fn collect_submission(
    input: &Path,
    identity: Identity,
    config: &Config,
) -> Result<Submission, CollectError> {
    let target_dir = config.target_dir(identity.key());
    fs::create_dir_all(&target_dir).map_err(|e| CollectError::io(&target_dir, e))?;

    tracing::info!("{} submission found: {}", identity.kind(), basename(input));
    tracing::debug!("identity {} with remainder {}", identity.key(), identity.rest());

    let issues = match InputKind::of(input) {
        InputKind::Notebook => place(
            &[input.to_path_buf()],
            &target_dir,
            config.notebook_name(),
            config.duplicates(),
        )?,
        InputKind::Archive(_) => {
            let scratch = scratch_dir()?;
            let files = archive::extract(input, scratch.path())?;
            place(&files, &target_dir, config.notebook_name(), config.duplicates())?
        }
        InputKind::Unrecognized => {
            return Err(CollectError::UnsupportedFormat {
                path: input.to_path_buf(),
            });
        }
    };

    Ok(Submission {
        identity,
        target_dir,
        source: input.to_path_buf(),
        issues,
    })
}

/// Extracts an archive whose name identifies nobody and collects every member
/// as an independent input.
fn collect_batch(input: &Path, config: &Config) -> Result<Collection, CollectError> {
    let scratch = scratch_dir()?;
    tracing::info!("Extracting {} to {}", input.display(), scratch.path().display());

    let mut collection = Collection::default();
    for member in archive::extract(input, scratch.path())? {
        if member.is_dir() {
            continue;
        }

        match collect(&member, config) {
            Ok(found) => collection.extend(found),
            Err(e) => {
                tracing::error!("{e}");
                collection.skipped.push((member, e));
            }
        }
    }

    Ok(collection)
}

/// Creates a scratch directory that is removed when dropped.
fn scratch_dir() -> Result<tempfile::TempDir, CollectError> {
    tempfile::Builder::new()
        .prefix("nbcollect-")
        .tempdir()
        .map_err(|e| CollectError::io(std::env::temp_dir(), e))
}
