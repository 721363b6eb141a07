use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Timelike};
use std::fmt;

/// EXIF layout: `YYYY:MM:DD HH:MM:SS`
const EXIF_LAYOUT: &str = "%Y:%m:%d %H:%M:%S";
/// Dashed layout: `YYYY-MM-DD HH:MM:SS`
const DASHED_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";
/// ISO-8601 with a colon offset: `YYYY-MM-DDTHH:MM:SS±HH:MM`
const ISO_OFFSET_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%:z";

const SHORT_LENGTH: usize = 19;
const OFFSET_LENGTH: usize = 25;

/// Capture moment of one file.
///
/// Holds the wall-clock fields exactly as recorded plus the offset when the
/// source carried one. Sub-second precision is dropped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimestamp {
    local: NaiveDateTime,
    offset: Option<FixedOffset>,
}

impl ResolvedTimestamp {
    pub fn from_naive(local: NaiveDateTime) -> Self {
        Self {
            local: whole_seconds(local),
            offset: None,
        }
    }

    pub fn from_fixed(moment: DateTime<FixedOffset>) -> Self {
        Self {
            local: whole_seconds(moment.naive_local()),
            offset: Some(*moment.offset()),
        }
    }

    pub fn year(&self) -> i32 {
        self.local.year()
    }

    pub fn month(&self) -> u32 {
        self.local.month()
    }

    pub fn day(&self) -> u32 {
        self.local.day()
    }

    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    pub fn minute(&self) -> u32 {
        self.local.minute()
    }

    pub fn second(&self) -> u32 {
        self.local.second()
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    pub fn naive_local(&self) -> NaiveDateTime {
        self.local
    }
}

impl fmt::Display for ResolvedTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local.format(DASHED_LAYOUT))?;
        if let Some(offset) = self.offset {
            write!(f, "{}", offset)?;
        }
        Ok(())
    }
}

fn whole_seconds(moment: NaiveDateTime) -> NaiveDateTime {
    moment.with_nanosecond(0).unwrap_or(moment)
}

/// Result of parsing one metadata string
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Parsed(ResolvedTimestamp),
    /// Unknown length, or a 19-character string in neither layout.
    Unrecognized,
    /// A 25-character string that is not ISO-8601 with an offset.
    Malformed(chrono::ParseError),
}

/// Parses a metadata timestamp string, choosing the layout by its length.
pub fn parse_timestamp(text: &str) -> ParseOutcome {
    match text.chars().count() {
        SHORT_LENGTH => parse_short(text),
        OFFSET_LENGTH => parse_with_offset(text),
        _ => ParseOutcome::Unrecognized,
    }
}

fn parse_short(text: &str) -> ParseOutcome {
    [EXIF_LAYOUT, DASHED_LAYOUT]
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .map(|local| ParseOutcome::Parsed(ResolvedTimestamp::from_naive(local)))
        .unwrap_or(ParseOutcome::Unrecognized)
}

fn parse_with_offset(text: &str) -> ParseOutcome {
    match DateTime::parse_from_str(text, ISO_OFFSET_LAYOUT) {
        Ok(moment) => ParseOutcome::Parsed(ResolvedTimestamp::from_fixed(moment)),
        Err(e) => ParseOutcome::Malformed(e),
    }
}
