// changelog data structures

use chrono::NaiveDate;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// a release heading line, `<version>_ |--| <date>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseHeading {
    pub version: String,
    pub date: String,
    pub line_number: usize,
}

impl ReleaseHeading {
    pub fn new(version: impl Into<String>, date: impl Into<String>, line_number: usize) -> Self {
        Self {
            version: version.into(),
            date: date.into(),
            line_number,
        }
    }

    /// calendar date of the release, `None` for dates like 2024-13-45 that
    /// still match the heading pattern
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    pub fn semver(&self) -> Option<Version> {
        Version::parse(&self.version).ok()
    }
}

impl fmt::Display for ReleaseHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_ |--| {}", self.version, self.date)
    }
}
