use crate::geodesy::utm::{is_northern_band, utm_to_location};
use crate::parser::patterns::UTM;
use crate::parser::traits::*;

pub struct UtmDetector;

impl FormatDetector for UtmDetector {
    fn detect(&self, input: &str) -> bool {
        UTM.is_match(input)
    }

    fn format(&self) -> CoordinateFormat {
        CoordinateFormat::Utm
    }
}

/// Parser for `<zone><band> <easting> <northing>` (e.g. "47N 500000 2200000").
///
/// The hemisphere comes from the band letter alone: 'N' and later are
/// northern, everything before is southern.
pub struct UtmParser;

impl CoordinateParser for UtmParser {
    fn parse(&self, input: &str) -> Result<Location, CoordError> {
        let caps = UTM
            .captures(input)
            .ok_or_else(|| CoordError::not_recognized(input))?;

        let zone: u8 = caps[1]
            .parse()
            .map_err(|e| CoordError::malformed("zone", format!("{:?}: {e}", &caps[1])))?;
        if !(1..=60).contains(&zone) {
            return Err(CoordError::malformed("zone", format!("{zone} outside 1-60")));
        }

        let band = caps[2]
            .chars()
            .next()
            .ok_or_else(|| CoordError::malformed("band", "missing band letter"))?;
        let easting = metres("easting", &caps[3])?;
        let northing = metres("northing", &caps[4])?;

        utm_to_location(zone, is_northern_band(band), easting, northing)
    }

    fn format(&self) -> CoordinateFormat {
        CoordinateFormat::Utm
    }
}

fn metres(field: &'static str, raw: &str) -> Result<f64, CoordError> {
    raw.parse::<u64>()
        .map(|v| v as f64)
        .map_err(|e| CoordError::malformed(field, format!("{raw:?}: {e}")))
}
