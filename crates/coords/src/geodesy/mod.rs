//! WGS84 geodetic conversions: UTM projection and MGRS grid references.

pub mod ellipsoid;
pub mod mgrs;
pub mod utm;

pub use ellipsoid::Ellipsoid;
pub use utm::{location_to_utm, utm_to_location, UtmCoordinate};
