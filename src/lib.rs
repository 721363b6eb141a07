// Library exports for integration tests and external use

pub mod collision;
pub mod config;
pub mod error;
pub mod exif;
pub mod file_system;
pub mod metadata;
pub mod organizer;
pub mod path_generator;
pub mod photo_filter;
pub mod resolver;
pub mod source_reader;
pub mod timestamp;
