//! UTM projection on the WGS84 ellipsoid.
//!
//! Closed-form series (Snyder, "Map Projections: A Working Manual", USGS
//! 1987, pp. 61-64). The inverse computes the footpoint latitude from the
//! rectifying latitude μ, then applies the latitude and longitude
//! corrections in powers of `d = x / (N₁·k0)`.
//!
//! # Example
//!
//! ```
//! use coords::geodesy::utm::utm_to_location;
//!
//! let loc = utm_to_location(47, true, 500_000.0, 2_200_000.0).unwrap();
//! assert!((loc.longitude() - 99.0).abs() < 1e-9);
//! ```

use tracing::trace;

use super::ellipsoid::Ellipsoid;
use crate::parser::model::{CoordError, Location};

/// UTM central scale factor
pub const UTM_K0: f64 = 0.9996;

pub const FALSE_EASTING: f64 = 500_000.0;

/// Added to southern-hemisphere northings
pub const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Latitude bands, 8° each from 80°S (X is stretched to 84°N)
pub const LATITUDE_BANDS: &str = "CDEFGHJKLMNPQRSTUVWX";

/// Southern edge of band C / northern edge of band X
pub const MIN_BAND_LATITUDE: f64 = -80.0;
pub const MAX_BAND_LATITUDE: f64 = 84.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmCoordinate {
    pub zone: u8,
    pub band: char,
    pub easting: f64,
    /// Includes the southern false northing where applicable
    pub northing: f64,
}

impl UtmCoordinate {
    pub fn is_northern(&self) -> bool {
        is_northern_band(self.band)
    }
}

/// Central meridian of a zone, in degrees.
pub fn central_meridian(zone: u8) -> f64 {
    (f64::from(zone) - 1.0) * 6.0 - 180.0 + 3.0
}

/// Zone containing a position, honouring the Norway (32V) and Svalbard
/// (31X, 33X, 35X, 37X) exceptions.
pub fn zone_for(latitude: f64, longitude: f64) -> u8 {
    if (56.0..64.0).contains(&latitude) && (3.0..12.0).contains(&longitude) {
        return 32;
    }
    if (72.0..84.0).contains(&latitude) {
        match longitude {
            l if (0.0..9.0).contains(&l) => return 31,
            l if (9.0..21.0).contains(&l) => return 33,
            l if (21.0..33.0).contains(&l) => return 35,
            l if (33.0..42.0).contains(&l) => return 37,
            _ => {}
        }
    }

    let zone = ((longitude + 180.0) / 6.0).floor() as i32 + 1;
    zone.clamp(1, 60) as u8
}

/// Latitude band letter, or `None` outside [-80, 84].
pub fn latitude_band(latitude: f64) -> Option<char> {
    if !(MIN_BAND_LATITUDE..=MAX_BAND_LATITUDE).contains(&latitude) {
        return None;
    }
    let index = ((latitude - MIN_BAND_LATITUDE) / 8.0).floor() as usize;
    LATITUDE_BANDS.chars().nth(index.min(LATITUDE_BANDS.len() - 1))
}

/// Letters from 'N' onward are northern. For true latitude bands this is
/// exact; for free-form UTM input it also decides the hemisphere, so an "S"
/// band reads as northern (band S spans 32°N-40°N).
pub fn is_northern_band(band: char) -> bool {
    band.to_ascii_uppercase() >= 'N'
}

/// Inverse projection: zone + hemisphere + easting/northing → location.
///
/// Fails with `Conversion` when the series lands outside the geographic
/// ranges (e.g. a northing past the pole or an easting far outside the zone).
pub fn utm_to_location(zone: u8, north: bool, easting: f64, northing: f64) -> Result<Location, CoordError> {
    if !(1..=60).contains(&zone) {
        return Err(CoordError::Conversion(format!("UTM zone {zone} out of range (1-60)")));
    }

    let ell = Ellipsoid::WGS84;
    let e2 = ell.e2();
    let ep2 = ell.ep2();
    let e1 = ell.e1();

    let x = easting - FALSE_EASTING;
    let y = if north { northing } else { northing - FALSE_NORTHING_SOUTH };

    // Footpoint latitude
    let arc = y / UTM_K0;
    let mu = arc / (ell.a * (1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2.powi(3) / 256.0));
    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let (sin_phi1, cos_phi1) = phi1.sin_cos();
    let tan_phi1 = sin_phi1 / cos_phi1;
    let n1 = ell.prime_vertical_radius(sin_phi1);
    let r1 = ell.meridional_radius(sin_phi1);
    let t1 = tan_phi1 * tan_phi1;
    let c1 = ep2 * cos_phi1 * cos_phi1;
    let d = x / (n1 * UTM_K0);

    let d2 = d * d;
    let d3 = d2 * d;
    let d4 = d3 * d;
    let d5 = d4 * d;
    let d6 = d5 * d;

    let lat = phi1
        - (n1 * tan_phi1 / r1)
            * (d2 / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d4 / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1) * d6 / 720.0);

    let dlon = (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
        + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1) * d5 / 120.0)
        / cos_phi1;

    let latitude = lat.to_degrees();
    let longitude = central_meridian(zone) + dlon.to_degrees();
    trace!(zone, north, easting, northing, latitude, longitude, "UTM inverse");

    Location::new(latitude, longitude).map_err(|e| {
        CoordError::Conversion(format!("UTM {zone} {easting} {northing} does not map to a valid location: {e}"))
    })
}

/// Forward projection into the zone that contains the location.
///
/// Fails with `Conversion` outside the UTM latitude bands [-80, 84].
pub fn location_to_utm(location: &Location) -> Result<UtmCoordinate, CoordError> {
    let latitude = location.latitude();
    let longitude = location.longitude();

    let band = latitude_band(latitude).ok_or_else(|| {
        CoordError::Conversion(format!(
            "latitude {latitude} outside UTM bands [{MIN_BAND_LATITUDE}, {MAX_BAND_LATITUDE}]"
        ))
    })?;
    let zone = zone_for(latitude, longitude);

    let ell = Ellipsoid::WGS84;
    let ep2 = ell.ep2();

    let phi = latitude.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let tan_phi = sin_phi / cos_phi;
    let n = ell.prime_vertical_radius(sin_phi);
    let t = tan_phi * tan_phi;
    let c = ep2 * cos_phi * cos_phi;
    let a = cos_phi * (longitude - central_meridian(zone)).to_radians();
    let m = ell.meridian_arc(phi);

    let a2 = a * a;
    let a3 = a2 * a;
    let a4 = a3 * a;
    let a5 = a4 * a;
    let a6 = a5 * a;

    let easting = UTM_K0
        * n
        * (a + (1.0 - t + c) * a3 / 6.0 + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0)
        + FALSE_EASTING;

    let mut northing = UTM_K0
        * (m + n
            * tan_phi
            * (a2 / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0));
    if latitude < 0.0 {
        northing += FALSE_NORTHING_SOUTH;
    }

    Ok(UtmCoordinate { zone, band, easting, northing })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(lat: f64, lon: f64) -> Location {
        Location::new(lat, lon).unwrap()
    }

    #[test]
    fn test_central_meridian() {
        assert_eq!(central_meridian(1), -177.0);
        assert_eq!(central_meridian(31), 3.0);
        assert_eq!(central_meridian(47), 99.0);
        assert_eq!(central_meridian(60), 177.0);
    }

    #[test]
    fn test_zone_for() {
        assert_eq!(zone_for(40.0, 116.0), 50);
        assert_eq!(zone_for(37.0, -122.0), 10);
        assert_eq!(zone_for(0.0, 0.0), 31);
        assert_eq!(zone_for(0.0, -180.0), 1);
        assert_eq!(zone_for(0.0, 180.0), 60);
    }

    #[test]
    fn test_zone_exceptions() {
        // Bergen sits in 32V, not 31V
        assert_eq!(zone_for(60.39, 5.32), 32);
        // Svalbard
        assert_eq!(zone_for(78.22, 15.65), 33);
        assert_eq!(zone_for(78.0, 8.0), 31);
        assert_eq!(zone_for(80.0, 25.0), 35);
        assert_eq!(zone_for(80.0, 40.0), 37);
    }

    #[test]
    fn test_latitude_band() {
        assert_eq!(latitude_band(19.856), Some('Q'));
        assert_eq!(latitude_band(0.0), Some('N'));
        assert_eq!(latitude_band(-0.1), Some('M'));
        assert_eq!(latitude_band(-80.0), Some('C'));
        assert_eq!(latitude_band(83.9), Some('X'));
        assert_eq!(latitude_band(84.0), Some('X'));
        assert_eq!(latitude_band(84.1), None);
        assert_eq!(latitude_band(-80.1), None);
    }

    #[test]
    fn test_northern_band_heuristic() {
        assert!(is_northern_band('N'));
        assert!(is_northern_band('q'));
        assert!(is_northern_band('S'));
        assert!(!is_northern_band('M'));
        assert!(!is_northern_band('C'));
    }

    #[test]
    fn test_forward_matches_reference_zone51n() {
        // Reference values from PROJ (EPSG:32651)
        const CASES: &[(f64, f64, f64, f64)] = &[
            (121.880356, 29.887703, 391888.0637264130, 3306868.4563851040),
            (121.430427, 28.637151, 346582.4108433011, 3168793.409367069),
            (122.625275, 30.246954, 463948.3333072607, 3346209.757229396),
        ];

        for (lon, lat, x, y) in CASES {
            let utm = location_to_utm(&loc(*lat, *lon)).unwrap();
            assert_eq!(utm.zone, 51);
            assert!((utm.easting - x).abs() < 0.05, "easting {} vs {}", utm.easting, x);
            assert!((utm.northing - y).abs() < 0.05, "northing {} vs {}", utm.northing, y);
        }
    }

    #[test]
    fn test_inverse_matches_reference_zone51n() {
        let location = utm_to_location(51, true, 391888.0637264130, 3306868.4563851040).unwrap();
        assert!((location.latitude() - 29.887703).abs() < 1e-6);
        assert!((location.longitude() - 121.880356).abs() < 1e-6);
    }

    #[test]
    fn test_inverse_on_central_meridian() {
        let location = utm_to_location(47, true, 500_000.0, 2_200_000.0).unwrap();
        assert!((location.longitude() - 99.0).abs() < 1e-9);
        assert!(location.latitude() > 19.0 && location.latitude() < 21.0);
    }

    #[test]
    fn test_round_trip_southern_hemisphere() {
        let sydney = loc(-33.9, 151.0);
        let utm = location_to_utm(&sydney).unwrap();
        assert_eq!(utm.zone, 56);
        assert!(!utm.is_northern());
        assert!(utm.northing > 6_000_000.0, "northing should carry the false northing");

        let back = utm_to_location(utm.zone, false, utm.easting, utm.northing).unwrap();
        assert!((back.latitude() - sydney.latitude()).abs() < 1e-6);
        assert!((back.longitude() - sydney.longitude()).abs() < 1e-6);
    }

    #[test]
    fn test_forward_rejects_polar_latitudes() {
        assert!(matches!(location_to_utm(&loc(85.0, 0.0)), Err(CoordError::Conversion(_))));
        assert!(matches!(location_to_utm(&loc(-81.0, 0.0)), Err(CoordError::Conversion(_))));
    }

    #[test]
    fn test_inverse_rejects_impossible_northing() {
        let result = utm_to_location(31, true, 500_000.0, 30_000_000.0);
        assert!(matches!(result, Err(CoordError::Conversion(_))));
    }

    #[test]
    fn test_inverse_rejects_bad_zone() {
        assert!(utm_to_location(0, true, 500_000.0, 0.0).is_err());
        assert!(utm_to_location(61, true, 500_000.0, 0.0).is_err());
    }
}
