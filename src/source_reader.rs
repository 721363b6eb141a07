use crate::photo_filter::PhotoFilter;
use anyhow::{bail, Result};
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Trait for enumerating the files of one run
pub trait SourceReader {
    fn read_entries(&self) -> Result<Vec<PathBuf>>;
}

/// Concrete implementation that walks a directory tree recursively
pub struct DirectorySourceReader<'a> {
    root: PathBuf,
    filter: &'a dyn PhotoFilter,
}

impl<'a> DirectorySourceReader<'a> {
    pub fn new(root: impl Into<PathBuf>, filter: &'a dyn PhotoFilter) -> Self {
        Self {
            root: root.into(),
            filter,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceReader for DirectorySourceReader<'_> {
    /// Files in walk order; entries of each directory sorted by name.
    fn read_entries(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            bail!("Source is not a directory: {}", self.root.display());
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            // Symlinks to files count, symlinks to directories do not
            if entry.path().is_file() && self.filter.should_include(entry.path()) {
                entries.push(entry.into_path());
            }
        }

        Ok(entries)
    }
}
