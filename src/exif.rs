use crate::metadata::{
    FieldValue, MetadataBag, DATE_TIME_DIGITIZED, DATE_TIME_ORIGINAL, GPS_DATE, GPS_TIME_STAMP,
    IMAGE_DATE_TIME,
};
use anyhow::{Context, Result};
use exif::{Exif, In, Rational, Tag, Value};
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Textual EXIF tags copied into the bag, under the names the resolver reads
const TEXT_TAGS: [(Tag, &str); 4] = [
    (Tag::DateTimeOriginal, DATE_TIME_ORIGINAL),
    (Tag::DateTimeDigitized, DATE_TIME_DIGITIZED),
    (Tag::GPSDateStamp, GPS_DATE),
    (Tag::DateTime, IMAGE_DATE_TIME),
];

/// Trait for reading the metadata fields of an image file
/// The file must never be modified by an implementation
#[cfg_attr(test, mockall::automock)]
pub trait MetadataReader {
    fn read_metadata(&self, path: &Path) -> Result<MetadataBag>;
}

/// Concrete implementation that reads the EXIF container of a file
pub struct ExifMetadataReader;

impl ExifMetadataReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExifMetadataReader {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataReader for ExifMetadataReader {
    fn read_metadata(&self, path: &Path) -> Result<MetadataBag> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open image: {}", path.display()))?;
        let mut reader = BufReader::new(file);

        match exif::Reader::new().read_from_container(&mut reader) {
            Ok(exif_data) => Ok(bag_from_exif(&exif_data)),
            Err(exif::Error::Io(e)) => {
                Err(e).with_context(|| format!("Failed to read image: {}", path.display()))
            }
            Err(e) => {
                // No usable container means no metadata, not a failure
                debug!("{}: no EXIF metadata ({})", path.display(), e);
                Ok(MetadataBag::new())
            }
        }
    }
}

/// Copies the timestamp-related fields of a parsed EXIF block into a bag.
pub fn bag_from_exif(exif_data: &Exif) -> MetadataBag {
    let mut bag = MetadataBag::new();

    for (tag, name) in TEXT_TAGS {
        if let Some(text) = exif_data
            .get_field(tag, In::PRIMARY)
            .and_then(|field| ascii_text(&field.value))
        {
            bag.insert(name, FieldValue::Text(text));
        }
    }

    if let Some((h, m, s)) = exif_data
        .get_field(Tag::GPSTimeStamp, In::PRIMARY)
        .and_then(|field| clock_components(&field.value))
    {
        bag.insert(GPS_TIME_STAMP, FieldValue::Clock(h, m, s));
    }

    bag
}

fn ascii_text(value: &Value) -> Option<String> {
    match value {
        Value::Ascii(parts) => {
            let raw = parts.first()?;
            let text = String::from_utf8_lossy(raw);
            Some(text.trim_end_matches('\0').to_string())
        }
        _ => None,
    }
}

fn clock_components(value: &Value) -> Option<(u32, u32, u32)> {
    match value {
        Value::Rational(parts) if parts.len() >= 3 => Some((
            whole(&parts[0])?,
            whole(&parts[1])?,
            whole(&parts[2])?,
        )),
        _ => None,
    }
}

// Fractional seconds are truncated
fn whole(value: &Rational) -> Option<u32> {
    if value.denom == 0 {
        return None;
    }
    Some(value.num / value.denom)
}
