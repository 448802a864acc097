use crate::parser::patterns::{DECIMAL, LETTERS};
use crate::parser::traits::*;

/// Two signed numbers, latitude first. Any letter disqualifies the input.
pub struct DecimalDetector;

impl FormatDetector for DecimalDetector {
    fn detect(&self, input: &str) -> bool {
        !LETTERS.is_match(input) && DECIMAL.is_match(input)
    }

    fn format(&self) -> CoordinateFormat {
        CoordinateFormat::Decimal
    }
}

pub struct DecimalParser;

impl CoordinateParser for DecimalParser {
    fn parse(&self, input: &str) -> Result<Location, CoordError> {
        if LETTERS.is_match(input) {
            return Err(CoordError::not_recognized(input));
        }
        let caps = DECIMAL
            .captures(input)
            .ok_or_else(|| CoordError::not_recognized(input))?;

        let latitude = parse_number("latitude", &caps[1])?;
        let longitude = parse_number("longitude", &caps[2])?;

        // Values pass through unrounded; Location rejects anything out of range
        Location::new(latitude, longitude)
    }

    fn format(&self) -> CoordinateFormat {
        CoordinateFormat::Decimal
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, CoordError> {
    raw.parse::<f64>()
        .map_err(|e| CoordError::malformed(field, format!("{raw:?}: {e}")))
}
