use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced while organizing photos
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// A 25-character field that is not ISO-8601 with an offset
    #[error("malformed timestamp in {field}: {value:?}")]
    FatalParse {
        field: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("no timestamp for [{}]", .path.display())]
    NoTimestamp { path: PathBuf },

    #[error("{} is no existing directory", .path.display())]
    Directory { path: PathBuf },

    #[error("failed to read metadata of {}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to prepare destination {}", .path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("{} has no file name", .path.display())]
    MissingFileName { path: PathBuf },

    #[error("failed to transfer {} -> {}", .from.display(), .to.display())]
    Transfer {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}
