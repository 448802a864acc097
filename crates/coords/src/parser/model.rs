use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateFormat {
    /// Nothing matched (a valid outcome, not an error)
    Unknown,
    /// Signed decimal degrees: "19.856, 99.817"
    Decimal,
    /// Degrees-minutes-seconds: 19°51'22"N 99°49'0"E
    Dms,
    /// Military Grid Reference System: "47QQA1234567890"
    Mgrs,
    /// Universal Transverse Mercator: "47N 500000 2200000"
    Utm,
}

impl CoordinateFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinateFormat::Unknown => "unknown",
            CoordinateFormat::Decimal => "decimal",
            CoordinateFormat::Dms => "dms",
            CoordinateFormat::Mgrs => "mgrs",
            CoordinateFormat::Utm => "utm",
        }
    }
}

impl fmt::Display for CoordinateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A WGS84 position in decimal degrees.
///
/// Only constructible through [`Location::new`], so every value in
/// circulation is finite and inside the geographic ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordError> {
        check_range("latitude", latitude, MIN_LATITUDE, MAX_LATITUDE)?;
        check_range("longitude", longitude, MIN_LONGITUDE, MAX_LONGITUDE)?;
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Reject (never clamp) a value outside `[min, max]`. NaN and infinities fail too.
pub(crate) fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), CoordError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CoordError::Range { field, value, min, max })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    pub location: Location,
    pub format: CoordinateFormat,
    /// Input exactly as the caller passed it (untrimmed)
    pub original: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    #[error("Empty input")]
    EmptyInput,

    #[error("Not a recognized coordinate: {input:?}")]
    NotRecognized { input: String },

    #[error("Malformed {field}: {reason}")]
    MalformedField { field: &'static str, reason: String },

    #[error("{field} {value} out of range [{min}, {max}]")]
    Range { field: &'static str, value: f64, min: f64, max: f64 },

    #[error("Conversion failed: {0}")]
    Conversion(String),
}

/// Stable error classification for callers that map failures onto their
/// own protocol codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyInput,
    NotRecognized,
    MalformedField,
    Range,
    Conversion,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "empty_input",
            ErrorKind::NotRecognized => "not_recognized",
            ErrorKind::MalformedField => "malformed_field",
            ErrorKind::Range => "range",
            ErrorKind::Conversion => "conversion",
        }
    }
}

impl CoordError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoordError::EmptyInput => ErrorKind::EmptyInput,
            CoordError::NotRecognized { .. } => ErrorKind::NotRecognized,
            CoordError::MalformedField { .. } => ErrorKind::MalformedField,
            CoordError::Range { .. } => ErrorKind::Range,
            CoordError::Conversion(_) => ErrorKind::Conversion,
        }
    }

    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        CoordError::MalformedField { field, reason: reason.into() }
    }

    pub(crate) fn not_recognized(input: &str) -> Self {
        CoordError::NotRecognized { input: input.to_string() }
    }
}
