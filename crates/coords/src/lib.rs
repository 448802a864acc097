//! Coordinate detection, parsing and MGRS serialization.
//!
//! Recognizes free-form coordinate text in four notations (decimal degrees,
//! degrees-minutes-seconds, UTM and MGRS), validates it into a WGS84
//! [`Location`], and formats locations back into MGRS references.
//!
//! ```
//! let result = coords::parse("19.856, 99.817").unwrap();
//! assert_eq!(result.format, coords::CoordinateFormat::Decimal);
//!
//! let reference = coords::to_mgrs(19.856, 99.817, 5).unwrap();
//! assert!(reference.starts_with("47Q"));
//! ```

pub mod geodesy;
pub mod parser;
pub mod serialize;

use once_cell::sync::Lazy;

use parser::{FormatDetectorOrchestrator, ParseOrchestrator};

pub use geodesy::{location_to_utm, utm_to_location, UtmCoordinate};
pub use parser::{CoordError, CoordinateFormat, ErrorKind, Location, ParseResult};
pub use serialize::to_mgrs;

static DETECTOR: Lazy<FormatDetectorOrchestrator> = Lazy::new(FormatDetectorOrchestrator::new);
static ORCHESTRATOR: Lazy<ParseOrchestrator> = Lazy::new(ParseOrchestrator::new);

/// Parse coordinate text in any supported notation.
pub fn parse(input: &str) -> Result<ParseResult, CoordError> {
    ORCHESTRATOR.parse(input)
}

/// Parse as one specific notation, keeping that parser's own error.
pub fn parse_as(format: CoordinateFormat, input: &str) -> Result<ParseResult, CoordError> {
    ORCHESTRATOR.parse_as(format, input)
}

/// Which notation the text looks like. Never fails; see [`CoordinateFormat::Unknown`].
pub fn detect_format(input: &str) -> CoordinateFormat {
    DETECTOR.detect(input)
}

/// Whether the text is shaped like a coordinate.
///
/// This is a grammar check only: `"91, 0"` is coordinate-shaped even though
/// [`parse`] rejects it.
pub fn is_coordinate(input: &str) -> bool {
    detect_format(input) != CoordinateFormat::Unknown
}
