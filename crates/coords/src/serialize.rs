//! Location to MGRS string serialization.

use tracing::debug;

use crate::geodesy::mgrs::{self, MAX_PRECISION, MIN_PRECISION};
use crate::parser::model::{CoordError, Location};

/// Format a latitude/longitude pair as an MGRS reference.
///
/// `precision` is the number of digits per axis: 1 → 10 km, 2 → 1 km,
/// 3 → 100 m, 4 → 10 m, 5 → 1 m. Anything else silently becomes 5.
///
/// The location is range-checked first (`Range`); latitudes outside the
/// UTM band range [-80, 84] fail with `Conversion`.
pub fn to_mgrs(latitude: f64, longitude: f64, precision: i32) -> Result<String, CoordError> {
    let location = Location::new(latitude, longitude)?;
    let precision = u8::try_from(precision)
        .ok()
        .filter(|p| (MIN_PRECISION..=MAX_PRECISION).contains(p))
        .unwrap_or(MAX_PRECISION);

    let reference = mgrs::encode(&location, precision)?;
    debug!(%location, precision, %reference, "serialized to MGRS");
    Ok(reference)
}
