#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::glob;
use walkdir::WalkDir;
use which::which;

use crate::constants::NOTEBOOK_EXT;

/// Finds and returns the path to a grading executable
pub fn grader_path(program: &str) -> Result<OsString> {
    which(program)
        .map(PathBuf::into_os_string)
        .with_context(|| format!("Cannot find the grading tool on path ({program})"))
}

/// A glob utility function to find paths to files with certain extension
///
/// * `extension`: the file extension to find paths for
/// * `search_depth`: how many folders deep to search for
/// * `root_dir`: the root directory where search starts
pub fn find_files(extension: &str, search_depth: i8, root_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pattern = root_dir.to_path_buf();

    for _ in 0..search_depth {
        pattern.push("**");
    }

    pattern.push(format!("*.{extension}"));
    let pattern = pattern
        .to_str()
        .context("Could not convert root_dir to string")?
        .to_string();

    Ok(glob(&pattern)
        .context("Could not create glob")?
        .filter_map(Result::ok)
        .collect())
}

/// True if `path` carries the notebook extension
pub fn is_notebook(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(NOTEBOOK_EXT)
}

/// Base name of `path` as a string, empty if it has none
pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Recursively copies `src` into `dest`. Existing files in `dest` are
/// overwritten when `src` has a file of the same name, everything else in
/// `dest` is left alone.
pub fn merge_tree(src: &Path, dest: &Path) -> std::io::Result<()> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(std::io::Error::other)?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_tree_overwrites_and_keeps_unrelated() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();

        fs::create_dir_all(src.path().join("nested")).unwrap();
        fs::write(src.path().join("a.csv"), "new").unwrap();
        fs::write(src.path().join("nested/b.csv"), "b").unwrap();
        fs::write(dest.path().join("a.csv"), "old").unwrap();
        fs::write(dest.path().join("keep.csv"), "keep").unwrap();

        merge_tree(src.path(), dest.path()).unwrap();

        assert_eq!(fs::read_to_string(dest.path().join("a.csv")).unwrap(), "new");
        assert_eq!(fs::read_to_string(dest.path().join("nested/b.csv")).unwrap(), "b");
        assert_eq!(fs::read_to_string(dest.path().join("keep.csv")).unwrap(), "keep");
    }

    #[test]
    fn notebook_detection_uses_extension() {
        assert!(is_notebook(Path::new("x/h1_a_b_c.ipynb")));
        assert!(!is_notebook(Path::new("x/ipynb")));
        assert!(!is_notebook(Path::new("x/a.ipynb.zip")));
    }
}
