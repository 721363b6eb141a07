use crate::timestamp::ResolvedTimestamp;
use anyhow::{bail, Context, Result};
use log::debug;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Trait for the filesystem queries and transfers the organizer relies on
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    fn is_dir(&self, path: &Path) -> bool;
    /// True when `path` itself is a symbolic link, whatever it points to.
    fn is_symlink(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    fn create_directory(&self, path: &Path) -> Result<()>;
    /// Last status change of `path`, truncated to whole seconds.
    fn status_changed_at(&self, path: &Path) -> Option<ResolvedTimestamp>;
    fn copy_file(&self, from: &Path, to: &Path) -> Result<()>;
    fn move_file(&self, from: &Path, to: &Path) -> Result<()>;
}

/// Concrete implementation backed by the actual filesystem
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        fs::symlink_metadata(path)
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_directory(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))
    }

    fn status_changed_at(&self, path: &Path) -> Option<ResolvedTimestamp> {
        let meta = fs::metadata(path).ok()?;
        status_change(&meta)
    }

    /// Copies into a new file; an existing destination is never replaced.
    fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        let mut source = File::open(from)
            .with_context(|| format!("Failed to open {}", from.display()))?;
        let mut target = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(to)
            .with_context(|| format!("Failed to create {}", to.display()))?;
        io::copy(&mut source, &mut target).with_context(|| {
            format!("Failed to copy {} to {}", from.display(), to.display())
        })?;
        Ok(())
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<()> {
        // rename(2) replaces an existing target silently
        if fs::symlink_metadata(to).is_ok() {
            bail!("Destination already exists: {}", to.display());
        }

        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) if crosses_devices(&e) => {
                debug!("{} is on another device, copying instead", from.display());
                self.copy_file(from, to)?;
                fs::remove_file(from)
                    .with_context(|| format!("Failed to remove moved file: {}", from.display()))
            }
            Err(e) => Err(e).with_context(|| {
                format!("Failed to move {} to {}", from.display(), to.display())
            }),
        }
    }
}

#[cfg(unix)]
const CROSS_DEVICE_ERROR: i32 = 18; // EXDEV
#[cfg(windows)]
const CROSS_DEVICE_ERROR: i32 = 17; // ERROR_NOT_SAME_DEVICE

#[cfg(any(unix, windows))]
fn crosses_devices(error: &io::Error) -> bool {
    error.raw_os_error() == Some(CROSS_DEVICE_ERROR)
}

#[cfg(not(any(unix, windows)))]
fn crosses_devices(_error: &io::Error) -> bool {
    false
}

#[cfg(unix)]
fn status_change(meta: &fs::Metadata) -> Option<ResolvedTimestamp> {
    use chrono::{Local, TimeZone};
    use std::os::unix::fs::MetadataExt;

    let changed = Local.timestamp_opt(meta.ctime(), 0).single()?;
    Some(ResolvedTimestamp::from_naive(changed.naive_local()))
}

#[cfg(not(unix))]
fn status_change(meta: &fs::Metadata) -> Option<ResolvedTimestamp> {
    use chrono::{DateTime, Local};

    let changed = meta.created().or_else(|_| meta.modified()).ok()?;
    Some(ResolvedTimestamp::from_naive(
        DateTime::<Local>::from(changed).naive_local(),
    ))
}
