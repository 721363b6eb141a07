use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;

/// Trait for deciding which source files take part in a run
pub trait PhotoFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// Filter that accepts files named `*.jpg` or `*.jpeg`, in any letter case
pub struct JpegFilter {
    pattern: Regex,
}

impl JpegFilter {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(r"(?i)\.jpe?g$").context("Invalid JPEG name pattern")?;
        Ok(Self { pattern })
    }
}

impl PhotoFilter for JpegFilter {
    fn should_include(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| self.pattern.is_match(&name.to_string_lossy()))
            .unwrap_or(false)
    }
}
