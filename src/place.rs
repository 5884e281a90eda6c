#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Moves the interesting files of one submission into its target directory.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::DuplicatePolicy,
    constants::DATA_DIR,
    error::CollectError,
    util::{is_notebook, merge_tree},
};

/// True if `path` is a directory named like the data folder.
fn is_data_dir(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == DATA_DIR) && path.is_dir()
}

/// Returns the data folder `path` lives in directly, if any.
fn parent_data_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|parent| is_data_dir(parent))
}

/// Places the files of a submission below `target_dir`.
///
/// The first notebook in `files` is copied to `target_dir/notebook_name`,
/// every `data` directory is merged into `target_dir/data`, and anything else
/// is ignored. Returns the placement issues found; errors that prevent
/// copying abort with `Err`.
pub fn place(
    files: &[PathBuf],
    target_dir: &Path,
    notebook_name: &str,
    duplicates: DuplicatePolicy,
) -> Result<Vec<CollectError>, CollectError> {
    let mut issues = Vec::new();
    let mut notebook: Option<&Path> = None;
    let mut merged: HashSet<&Path> = HashSet::new();
    let notebook_target = target_dir.join(notebook_name);
    let data_target = target_dir.join(DATA_DIR);

    for file in files {
        tracing::debug!("> {}", file.display());

        if is_notebook(file) && !file.is_dir() {
            tracing::debug!("notebook found: {}", file.display());
            if notebook.is_none() {
                notebook = Some(file.as_path());
                fs::copy(file, &notebook_target)
                    .map_err(|e| CollectError::io(&notebook_target, e))?;
            } else {
                let issue = CollectError::MultipleNotebooks {
                    extra: file.clone(),
                };
                tracing::error!("{issue}");
                issues.push(issue);
            }
            continue;
        }

        // archives without explicit directory entries only list the files
        // inside the data folder
        let data_dir = if is_data_dir(file) {
            Some(file.as_path())
        } else {
            parent_data_dir(file)
        };

        if let Some(dir) = data_dir
            && merged.insert(dir)
        {
            tracing::debug!("Data dir found: {}", dir.display());
            merge_tree(dir, &data_target).map_err(|e| CollectError::io(&data_target, e))?;
        }
    }

    match notebook {
        None => {
            let issue = CollectError::NoNotebookFound {
                target: target_dir.to_path_buf(),
            };
            tracing::error!("{issue}");
            issues.push(issue);
        }
        Some(_) if duplicates == DuplicatePolicy::Exclude && !issues.is_empty() => {
            tracing::warn!(
                "Excluding {} from grading because it has several notebooks",
                target_dir.display()
            );
            fs::remove_file(&notebook_target).map_err(|e| CollectError::io(&notebook_target, e))?;
        }
        Some(_) => {}
    }

    Ok(issues)
}
