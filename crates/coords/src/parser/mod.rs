/// Coordinate detection and parsing module
///
/// Turns free-form text into a validated [`Location`] plus the notation it
/// was written in.
///
/// # Architecture
///
/// - `traits.rs`: Core traits for detectors and parsers
/// - `detector.rs`: Format detection orchestrator (priority ordered)
/// - `orchestrator.rs`: Detection + parsing pipeline
/// - `formats/`: Individual format parser implementations
/// - `patterns.rs`: Shared compiled grammars
/// - `model.rs`: Location, result and error types
///
/// # Priority
///
/// Grammars overlap, so formats are always tried most specific first:
/// MGRS, UTM, DMS, decimal. A string rejected by one parser falls through
/// to the next; only when every candidate fails does parsing report
/// `NotRecognized`.

pub mod traits;
pub mod detector;
pub mod orchestrator;
pub mod formats;
pub mod model;
pub mod patterns;

// Re-export commonly used types
pub use traits::{CoordinateParser, FormatDetector};
pub use detector::FormatDetectorOrchestrator;
pub use orchestrator::ParseOrchestrator;
pub use model::{CoordError, CoordinateFormat, ErrorKind, Location, ParseResult};
