use crate::file_system::FileSystem;
use anyhow::Result;
use log::debug;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// When to probe for an existing file at the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionCheck {
    /// Freshly created directories are assumed empty
    #[default]
    SkipForNewDirectories,
    Always,
}

/// Turns a candidate destination into one that no existing file occupies
pub struct CollisionResolver<'a> {
    file_system: &'a dyn FileSystem,
    check: CollisionCheck,
}

impl<'a> CollisionResolver<'a> {
    pub fn new(file_system: &'a dyn FileSystem, check: CollisionCheck) -> Self {
        Self { file_system, check }
    }

    /// Creates the destination directory when needed and returns a free path.
    ///
    /// A parent that is missing or a symbolic link is (re)created. When the
    /// parent did not exist before and `CollisionCheck::Always` is not set, the
    /// candidate is returned as is. Otherwise `stem-0000.ext`, `stem-0001.ext`,
    /// ... are probed in order.
    pub fn ensure_unique(&self, candidate: &Path) -> Result<PathBuf> {
        if let Some(parent) = candidate.parent().filter(|p| !p.as_os_str().is_empty()) {
            let existed = self.file_system.is_dir(parent);
            if !existed || self.file_system.is_symlink(parent) {
                self.file_system.create_directory(parent)?;
            }
            // A linked directory may already hold files
            if !existed && self.check == CollisionCheck::SkipForNewDirectories {
                return Ok(candidate.to_path_buf());
            }
        }

        Ok(self.first_free(candidate))
    }

    fn first_free(&self, candidate: &Path) -> PathBuf {
        if !self.file_system.is_file(candidate) {
            return candidate.to_path_buf();
        }

        let stem = candidate.file_stem().unwrap_or_default();
        let extension = candidate.extension();
        let mut counter: u64 = 0;
        loop {
            let mut name = OsString::from(stem);
            name.push(format!("-{:04}", counter));
            if let Some(ext) = extension {
                name.push(".");
                name.push(ext);
            }

            let probe = candidate.with_file_name(name);
            if !self.file_system.is_file(&probe) {
                debug!("{} taken, using {}", candidate.display(), probe.display());
                return probe;
            }
            counter += 1;
        }
    }
}
