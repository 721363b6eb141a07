use crate::collision::CollisionResolver;
use crate::config::{OrganizerConfig, TransferMode};
use crate::error::OrganizeError;
use crate::exif::MetadataReader;
use crate::exif::ExifMetadataReader;
use crate::file_system::{FileSystem, RealFileSystem};
use crate::path_generator::PathGenerator;
use crate::photo_filter::JpegFilter;
use crate::resolver::{TimestampResolver, TimestampSource};
use crate::source_reader::{DirectorySourceReader, SourceReader};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Main orchestrator service that files each photo under its capture date
pub struct PhotoOrganizer<'a> {
    metadata_reader: &'a dyn MetadataReader,
    resolver: &'a TimestampResolver,
    path_generator: &'a PathGenerator,
    file_system: &'a dyn FileSystem,
    config: &'a OrganizerConfig,
}

/// A file that was copied or moved
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub timestamp_source: TimestampSource,
}

impl<'a> PhotoOrganizer<'a> {
    pub fn new(
        metadata_reader: &'a dyn MetadataReader,
        resolver: &'a TimestampResolver,
        path_generator: &'a PathGenerator,
        file_system: &'a dyn FileSystem,
        config: &'a OrganizerConfig,
    ) -> Self {
        Self {
            metadata_reader,
            resolver,
            path_generator,
            file_system,
            config,
        }
    }

    /// Organize every entry in order; a failing file never stops the run
    pub fn organize(&self, entries: &[PathBuf]) -> OrganizeResult {
        let started = Instant::now();
        let total_files = entries.len();
        let mut organized_files = 0;
        let mut skipped_files = 0;
        let mut errors = Vec::new();

        println!("... {} to process ...", total_files);

        for entry in entries {
            match self.dispatch(entry) {
                Ok(_) => organized_files += 1,
                Err(e) => {
                    skipped_files += 1;
                    let message = if matches!(e, OrganizeError::NoTimestamp { .. }) {
                        e.to_string()
                    } else {
                        format!("{}: {:#}", entry.display(), anyhow::Error::new(e))
                    };
                    println!("ERROR {}", message);
                    debug!("{}", message);
                    errors.push(message);
                }
            }
        }

        OrganizeResult {
            total_files,
            organized_files,
            skipped_files,
            errors,
            elapsed: started.elapsed(),
        }
    }

    /// Resolve, place and transfer a single file.
    pub fn dispatch(&self, source: &Path) -> Result<Dispatched, OrganizeError> {
        let bag = self
            .metadata_reader
            .read_metadata(source)
            .map_err(|e| OrganizeError::Metadata {
                path: source.to_path_buf(),
                source: e,
            })?;
        let fallback = self.file_system.status_changed_at(source);

        let resolution =
            self.resolver
                .resolve(&bag, fallback)?
                .ok_or_else(|| OrganizeError::NoTimestamp {
                    path: source.to_path_buf(),
                })?;
        debug!(
            "{}: {} ({})",
            source.display(),
            resolution.timestamp,
            resolution.source
        );

        let candidate = self.path_generator.generate_path(
            &self.config.destination,
            source,
            &resolution.timestamp,
        )?;
        let destination = CollisionResolver::new(self.file_system, self.config.collision_check)
            .ensure_unique(&candidate)
            .map_err(|e| OrganizeError::Destination {
                path: candidate.clone(),
                source: e,
            })?;

        println!(
            "{} {} -> {}",
            self.config.mode.verb(),
            source.display(),
            destination.display()
        );
        let transferred = match self.config.mode {
            TransferMode::Copy => self.file_system.copy_file(source, &destination),
            TransferMode::Move => self.file_system.move_file(source, &destination),
        };
        transferred.map_err(|e| OrganizeError::Transfer {
            from: source.to_path_buf(),
            to: destination.clone(),
            source: e,
        })?;

        Ok(Dispatched {
            source: source.to_path_buf(),
            destination,
            timestamp_source: resolution.source,
        })
    }
}

/// Organizes the whole source tree of `config` with the real collaborators.
pub fn organize_tree(config: &OrganizerConfig) -> Result<OrganizeResult> {
    // Create components
    let filter = JpegFilter::new()?;
    let source_reader = DirectorySourceReader::new(&config.source, &filter);
    let metadata_reader = ExifMetadataReader::new();
    let resolver = TimestampResolver::new(config.fallback_policy);
    let path_generator = PathGenerator::new();
    let file_system = RealFileSystem::new();

    let entries = source_reader
        .read_entries()
        .context("Failed to collect source files")?;
    info!(
        "{} candidate files under {}",
        entries.len(),
        source_reader.root().display()
    );

    let organizer = PhotoOrganizer::new(
        &metadata_reader,
        &resolver,
        &path_generator,
        &file_system,
        config,
    );
    Ok(organizer.organize(&entries))
}

/// Result of organization operation
#[derive(Debug, PartialEq)]
pub struct OrganizeResult {
    pub total_files: usize,
    pub organized_files: usize,
    pub skipped_files: usize,
    pub errors: Vec<String>,
    pub elapsed: Duration,
}
