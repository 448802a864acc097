pub use super::model::{CoordError, CoordinateFormat, Location};

pub trait FormatDetector: Send + Sync {
    /// Whether the trimmed input fits this format's grammar
    fn detect(&self, input: &str) -> bool;
    fn format(&self) -> CoordinateFormat;
}

pub trait CoordinateParser: Send + Sync {
    /// parse trimmed input into a validated location
    fn parse(&self, input: &str) -> Result<Location, CoordError>;
    fn format(&self) -> CoordinateFormat;
}
