#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Uniform read access to the container formats students upload.

use std::{
    collections::{HashMap, HashSet},
    fs::{self, File},
    io,
    path::{Component, Path, PathBuf},
};

use sevenz_rust::{Password, SevenZReader};

use crate::{
    constants::{HIDDEN_MARKER, MACOS_RESOURCE_PREFIX, SEVENZ_EXT, ZIP_EXT},
    error::CollectError,
};

/// Supported container formats, told apart by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// `.zip`
    Zip,
    /// `.7z`
    SevenZ,
}

impl ArchiveFormat {
    /// Detects the format from the extension of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            ZIP_EXT => Some(ArchiveFormat::Zip),
            SEVENZ_EXT => Some(ArchiveFormat::SevenZ),
            _ => None,
        }
    }
}

/// A read-only container of named members.
pub trait Archive {
    /// Member names in listing order, unfiltered.
    fn members(&mut self) -> Result<Vec<String>, CollectError>;

    /// Writes the listed members below `dest`, keeping their relative paths,
    /// and returns the written paths in listing order.
    fn extract(&mut self, members: &[String], dest: &Path) -> Result<Vec<PathBuf>, CollectError>;
}

/// True unless the member is macOS metadata or hidden somewhere along its path.
pub fn keep_member(name: &str) -> bool {
    !name.starts_with(MACOS_RESOURCE_PREFIX)
        && !name
            .split(['/', '\\'])
            .any(|segment| segment.starts_with(HIDDEN_MARKER))
}

/// Drops the members `keep_member` rejects, preserving order.
pub fn filter_members<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    names.into_iter().filter(|n| keep_member(n)).collect()
}

/// Opens `path` with the reader matching its extension.
pub fn open(path: &Path) -> Result<Box<dyn Archive>, CollectError> {
    match ArchiveFormat::from_path(path) {
        Some(ArchiveFormat::Zip) => Ok(Box::new(ZipContainer::open(path)?)),
        Some(ArchiveFormat::SevenZ) => Ok(Box::new(SevenZContainer::open(path)?)),
        None => Err(CollectError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Extracts every kept member of `archive_path` into `scratch_dir`.
pub fn extract(archive_path: &Path, scratch_dir: &Path) -> Result<Vec<PathBuf>, CollectError> {
    let mut archive = open(archive_path)?;
    let members = filter_members(archive.members()?);
    tracing::debug!(
        "Extracting {} members of {} to {}",
        members.len(),
        archive_path.display(),
        scratch_dir.display()
    );
    archive.extract(&members, scratch_dir)
}

/// Resolves a member name below `dest`, refusing names that would escape it
/// and names that resolve to `dest` itself.
fn enclosed_path(dest: &Path, name: &str) -> Option<PathBuf> {
    let relative = Path::new(name);
    let components: Vec<Component<'_>> = relative.components().collect();
    if components
        .iter()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && components.iter().any(|c| matches!(c, Component::Normal(_)))
    {
        Some(dest.join(relative))
    } else {
        None
    }
}

/// Creates the parent directory of `path` if needed.
fn ensure_parent(path: &Path) -> Result<(), CollectError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CollectError::io(parent, e))?;
    }
    Ok(())
}

/// A zip file on disk.
pub struct ZipContainer {
    /// Location of the archive, for error messages.
    path:  PathBuf,
    /// Open reader.
    inner: zip::ZipArchive<File>,
}

impl ZipContainer {
    /// Opens and indexes the zip file at `path`.
    pub fn open(path: &Path) -> Result<Self, CollectError> {
        let file = File::open(path).map_err(|e| CollectError::io(path, e))?;
        let inner = zip::ZipArchive::new(file).map_err(|e| CollectError::corrupt(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            inner,
        })
    }
}

impl Archive for ZipContainer {
    fn members(&mut self) -> Result<Vec<String>, CollectError> {
        (0..self.inner.len())
            .map(|i| {
                self.inner
                    .by_index_raw(i)
                    .map(|entry| entry.name().to_string())
                    .map_err(|e| CollectError::corrupt(&self.path, e))
            })
            .collect()
    }

    fn extract(&mut self, members: &[String], dest: &Path) -> Result<Vec<PathBuf>, CollectError> {
        let wanted: HashSet<&str> = members.iter().map(String::as_str).collect();
        let mut written = Vec::with_capacity(members.len());

        for i in 0..self.inner.len() {
            let mut entry = self
                .inner
                .by_index(i)
                .map_err(|e| CollectError::corrupt(&self.path, e))?;
            if !wanted.contains(entry.name()) {
                continue;
            }

            let Some(relative) = entry.enclosed_name() else {
                tracing::warn!("Skipping unsafe member {} in {}", entry.name(), self.path.display());
                continue;
            };
            let out = dest.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&out).map_err(|e| CollectError::io(&out, e))?;
            } else {
                ensure_parent(&out)?;
                let mut file = File::create(&out).map_err(|e| CollectError::io(&out, e))?;
                io::copy(&mut entry, &mut file).map_err(|e| CollectError::corrupt(&self.path, e))?;
            }
            written.push(out);
        }

        Ok(written)
    }
}

/// A 7z file on disk. The file is reopened per operation since the reader
/// consumes its streams while decoding.
pub struct SevenZContainer {
    /// Location of the archive.
    path: PathBuf,
}

impl SevenZContainer {
    /// Checks that `path` is a readable 7z archive.
    pub fn open(path: &Path) -> Result<Self, CollectError> {
        let container = Self {
            path: path.to_path_buf(),
        };
        container.reader()?;
        Ok(container)
    }

    /// Opens a fresh reader on the archive.
    fn reader(&self) -> Result<SevenZReader<File>, CollectError> {
        if !self.path.is_file() {
            return Err(CollectError::io(
                &self.path,
                io::Error::new(io::ErrorKind::NotFound, "archive does not exist"),
            ));
        }
        SevenZReader::open(&self.path, Password::empty())
            .map_err(|e| CollectError::corrupt(&self.path, e))
    }
}

impl Archive for SevenZContainer {
    fn members(&mut self) -> Result<Vec<String>, CollectError> {
        let reader = self.reader()?;
        Ok(reader
            .archive()
            .files
            .iter()
            .map(|entry| entry.name().to_string())
            .collect())
    }

    fn extract(&mut self, members: &[String], dest: &Path) -> Result<Vec<PathBuf>, CollectError> {
        let wanted: HashSet<&str> = members.iter().map(String::as_str).collect();
        let mut reader = self.reader()?;

        // entries are decoded folder by folder, not in listing order
        let mut position: HashMap<String, usize> = HashMap::new();
        for (i, entry) in reader.archive().files.iter().enumerate() {
            if wanted.contains(entry.name()) {
                position.entry(entry.name().to_string()).or_insert(i);
            }
        }
        let mut written: Vec<(usize, PathBuf)> = Vec::with_capacity(members.len());

        reader
            .for_each_entries(|entry, data| {
                let target = position
                    .get(entry.name())
                    .and_then(|&i| enclosed_path(dest, entry.name()).map(|out| (i, out)));

                let Some((index, out)) = target else {
                    io::copy(data, &mut io::sink())?;
                    return Ok(true);
                };

                if entry.is_directory() {
                    fs::create_dir_all(&out)?;
                } else {
                    if let Some(parent) = out.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    let mut file = File::create(&out)?;
                    io::copy(data, &mut file)?;
                }
                written.push((index, out));
                Ok(true)
            })
            .map_err(|e| CollectError::corrupt(&self.path, e))?;

        written.sort_by_key(|(index, _)| *index);
        Ok(written.into_iter().map(|(_, out)| out).collect())
    }
}
