use crate::error::OrganizeError;
use crate::metadata::{
    MetadataBag, DATE_TIME_DIGITIZED, DATE_TIME_ORIGINAL, GPS_DATE, GPS_TIME_STAMP,
    IMAGE_DATE_TIME,
};
use crate::timestamp::{parse_timestamp, ParseOutcome, ResolvedTimestamp};
use log::{debug, warn};
use std::fmt;

/// What to do with a field that is present but malformed beyond recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Abort resolution for the file
    #[default]
    StopOnFatal,
    /// Treat it like any unparseable field and keep going
    FallbackOnAny,
}

/// Where a resolved timestamp came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSource {
    DateTimeOriginal,
    DateTimeDigitized,
    GpsComposite,
    ImageDateTime,
    FileStatusChange,
}

impl TimestampSource {
    pub fn field_name(&self) -> &'static str {
        match self {
            TimestampSource::DateTimeOriginal => DATE_TIME_ORIGINAL,
            TimestampSource::DateTimeDigitized => DATE_TIME_DIGITIZED,
            TimestampSource::GpsComposite => "GPS GPSDate + GPS GPSTimeStamp",
            TimestampSource::ImageDateTime => IMAGE_DATE_TIME,
            TimestampSource::FileStatusChange => "filesystem ctime",
        }
    }
}

impl fmt::Display for TimestampSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Result of looking up one step of the fallback chain
#[derive(Debug, Clone, PartialEq)]
pub enum FieldLookup {
    Absent,
    Present { value: String, outcome: ParseOutcome },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub timestamp: ResolvedTimestamp,
    pub source: TimestampSource,
}

type Extractor = fn(&MetadataBag) -> FieldLookup;

/// Metadata steps in priority order; the filesystem time comes after them.
const FALLBACK_CHAIN: [(TimestampSource, Extractor); 4] = [
    (TimestampSource::DateTimeOriginal, date_time_original),
    (TimestampSource::DateTimeDigitized, date_time_digitized),
    (TimestampSource::GpsComposite, gps_composite),
    (TimestampSource::ImageDateTime, image_date_time),
];

/// Picks the capture moment of a file from its metadata fields
pub struct TimestampResolver {
    policy: FallbackPolicy,
}

impl TimestampResolver {
    pub fn new(policy: FallbackPolicy) -> Self {
        Self { policy }
    }

    /// Walks the fallback chain and returns the first timestamp found.
    ///
    /// `fallback` is the file's status-change time; it is used only when no
    /// metadata step yields a timestamp. `Ok(None)` means even that was
    /// unavailable.
    pub fn resolve(
        &self,
        bag: &MetadataBag,
        fallback: Option<ResolvedTimestamp>,
    ) -> Result<Option<Resolution>, OrganizeError> {
        for (source, extract) in FALLBACK_CHAIN {
            let (value, outcome) = match extract(bag) {
                FieldLookup::Absent => continue,
                FieldLookup::Present { value, outcome } => (value, outcome),
            };

            match outcome {
                ParseOutcome::Parsed(timestamp) => {
                    debug!("timestamp {} from {}", timestamp, source);
                    return Ok(Some(Resolution { timestamp, source }));
                }
                ParseOutcome::Unrecognized => {
                    debug!("{} unusable: {:?}", source, value);
                }
                ParseOutcome::Malformed(e) => match self.policy {
                    FallbackPolicy::StopOnFatal => {
                        return Err(OrganizeError::FatalParse {
                            field: source.field_name().to_string(),
                            value,
                            source: e,
                        });
                    }
                    FallbackPolicy::FallbackOnAny => {
                        warn!("{} malformed, falling back: {:?} ({})", source, value, e);
                    }
                },
            }
        }

        Ok(fallback.map(|timestamp| Resolution {
            timestamp,
            source: TimestampSource::FileStatusChange,
        }))
    }
}

impl Default for TimestampResolver {
    fn default() -> Self {
        Self::new(FallbackPolicy::default())
    }
}

fn lookup_text(bag: &MetadataBag, name: &str) -> FieldLookup {
    match bag.text(name) {
        Some(value) => FieldLookup::Present {
            value: value.to_string(),
            outcome: parse_timestamp(value),
        },
        None => FieldLookup::Absent,
    }
}

fn date_time_original(bag: &MetadataBag) -> FieldLookup {
    lookup_text(bag, DATE_TIME_ORIGINAL)
}

fn date_time_digitized(bag: &MetadataBag) -> FieldLookup {
    lookup_text(bag, DATE_TIME_DIGITIZED)
}

fn image_date_time(bag: &MetadataBag) -> FieldLookup {
    lookup_text(bag, IMAGE_DATE_TIME)
}

/// GPS date and time are stored apart; both halves are required.
fn gps_composite(bag: &MetadataBag) -> FieldLookup {
    let (Some(date), Some((hour, minute, second))) =
        (bag.text(GPS_DATE), bag.clock(GPS_TIME_STAMP))
    else {
        return FieldLookup::Absent;
    };

    let value = format!(
        "{} {:02}:{:02}:{:02}",
        date.replacen(':', "-", 2),
        hour,
        minute,
        second
    );
    let outcome = parse_timestamp(&value);
    FieldLookup::Present { value, outcome }
}
