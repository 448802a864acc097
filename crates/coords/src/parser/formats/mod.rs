/// Individual coordinate format detectors and parsers

pub mod decimal;
pub mod dms;
pub mod mgrs;
pub mod utm;

// Re-export parser implementations
pub use decimal::{DecimalDetector, DecimalParser};
pub use dms::{DmsDetector, DmsParser};
pub use mgrs::{MgrsDetector, MgrsParser};
pub use utm::{UtmDetector, UtmParser};
