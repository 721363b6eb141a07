use std::collections::BTreeMap;

pub const DATE_TIME_ORIGINAL: &str = "EXIF DateTimeOriginal";
pub const DATE_TIME_DIGITIZED: &str = "EXIF DateTimeDigitized";
pub const GPS_DATE: &str = "GPS GPSDate";
pub const GPS_TIME_STAMP: &str = "GPS GPSTimeStamp";
pub const IMAGE_DATE_TIME: &str = "Image DateTime";

/// Value of a single metadata field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Hour, minute, second as stored in a GPS time stamp
    Clock(u32, u32, u32),
}

/// Named metadata fields read from one file's container
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataBag {
    fields: BTreeMap<String, FieldValue>,
}

impl MetadataBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, FieldValue::Text(value.into()));
        self
    }

    pub fn with_clock(mut self, name: &str, hour: u32, minute: u32, second: u32) -> Self {
        self.insert(name, FieldValue::Clock(hour, minute, second));
        self
    }

    pub fn insert(&mut self, name: &str, value: FieldValue) {
        self.fields.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Text of a field; `None` when absent or not textual.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name)? {
            FieldValue::Text(text) => Some(text),
            FieldValue::Clock(..) => None,
        }
    }

    pub fn clock(&self, name: &str) -> Option<(u32, u32, u32)> {
        match self.fields.get(name)? {
            FieldValue::Clock(h, m, s) => Some((*h, *m, *s)),
            FieldValue::Text(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}
