use crate::geodesy::mgrs::decode;
use crate::parser::patterns::mgrs_reference;
use crate::parser::traits::*;

/// MGRS references, either run together or spaced at the group boundaries.
pub struct MgrsDetector;

impl FormatDetector for MgrsDetector {
    fn detect(&self, input: &str) -> bool {
        mgrs_reference(input).is_some()
    }

    fn format(&self) -> CoordinateFormat {
        CoordinateFormat::Mgrs
    }
}

/// Parser for MGRS references ("47QNB8554295753", "18S UJ 23487 06483").
///
/// Resolves to the centre of the referenced grid cell.
pub struct MgrsParser;

impl CoordinateParser for MgrsParser {
    fn parse(&self, input: &str) -> Result<Location, CoordError> {
        let reference = mgrs_reference(input).ok_or_else(|| CoordError::not_recognized(input))?;

        let zone: u8 = reference
            .zone
            .parse()
            .map_err(|e| CoordError::Conversion(format!("MGRS zone {:?}: {e}", reference.zone)))?;
        let band = first_char(reference.band)?;
        let mut square = reference.square.chars();
        let (Some(column), Some(row)) = (square.next(), square.next()) else {
            return Err(CoordError::Conversion(format!(
                "MGRS square {:?} needs two letters",
                reference.square
            )));
        };

        decode(zone, band, [column, row], &reference.digits)
    }

    fn format(&self) -> CoordinateFormat {
        CoordinateFormat::Mgrs
    }
}

fn first_char(s: &str) -> Result<char, CoordError> {
    s.chars()
        .next()
        .ok_or_else(|| CoordError::Conversion("missing MGRS latitude band".to_string()))
}
