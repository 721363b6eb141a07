use crate::error::OrganizeError;
use crate::timestamp::ResolvedTimestamp;
use std::path::{Path, PathBuf};

/// Generates destination paths based on capture timestamps
/// Single Responsibility: Only concerned with path generation logic
pub struct PathGenerator;

impl PathGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates path in format: root/YYYY/MM/DD/filename
    ///
    /// Only the base name of `source` is kept; its directories are dropped.
    pub fn generate_path(
        &self,
        root: &Path,
        source: &Path,
        timestamp: &ResolvedTimestamp,
    ) -> Result<PathBuf, OrganizeError> {
        let filename = source
            .file_name()
            .ok_or_else(|| OrganizeError::MissingFileName {
                path: source.to_path_buf(),
            })?;

        Ok(root
            .join(format!("{:04}", timestamp.year()))
            .join(format!("{:02}", timestamp.month()))
            .join(format!("{:02}", timestamp.day()))
            .join(filename))
    }
}

impl Default for PathGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp(year: i32, month: u32, day: u32) -> ResolvedTimestamp {
        ResolvedTimestamp::from_naive(
            NaiveDate::from_ymd_opt(year, month, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_generate_path_correct_format() {
        // Arrange
        let generator = PathGenerator::new();
        let ts = timestamp(2021, 5, 1);

        // Act
        let path = generator
            .generate_path(Path::new("/out"), Path::new("/a/b/IMG_01.JPG"), &ts)
            .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/out/2021/05/01/IMG_01.JPG"));
    }

    #[test]
    fn test_generate_path_different_year() {
        // Arrange
        let generator = PathGenerator::new();
        let ts = timestamp(2025, 10, 24);

        // Act
        let path = generator
            .generate_path(Path::new("/photos"), Path::new("photo.jpeg"), &ts)
            .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/photos/2025/10/24/photo.jpeg"));
    }

    #[test]
    fn test_generate_path_pads_year_month_and_day() {
        // Arrange
        let generator = PathGenerator::new();
        let ts = timestamp(987, 3, 7);

        // Act
        let path = generator
            .generate_path(Path::new("out"), Path::new("deep/nested/dir/test.jpg"), &ts)
            .unwrap();

        // Assert
        // Should use zero-padding: 0987/03/07
        assert_eq!(path, PathBuf::from("out/0987/03/07/test.jpg"));
    }

    #[test]
    fn test_generate_path_without_file_name_is_error() {
        let generator = PathGenerator::new();

        let result = generator.generate_path(Path::new("/out"), Path::new("/"), &timestamp(2021, 1, 1));

        assert!(matches!(result, Err(OrganizeError::MissingFileName { .. })));
    }
}
