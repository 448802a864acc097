//! MGRS grid references on top of the UTM projection.
//!
//! A reference is `<zone><band><column><row><easting digits><northing digits>`.
//! Column letters repeat every three zones, row letters every two, and row
//! letters cycle every 2 000 km of northing; the latitude band picks the
//! right cycle on decode (NGA.SIG.0012, "Universal Grids").

use tracing::trace;

use super::utm;
use crate::parser::model::{CoordError, Location};

/// 100 km column letters by zone set ((zone - 1) % 3)
const COLUMN_LETTERS: [&str; 3] = ["ABCDEFGH", "JKLMNPQR", "STUVWXYZ"];

/// 100 km row letters by zone parity ((zone - 1) % 2); even zones start at F
const ROW_LETTERS: [&str; 2] = ["ABCDEFGHJKLMNPQRSTUV", "FGHJKLMNPQRSTUVABCDE"];

const SQUARE_SIZE: f64 = 100_000.0;
const ROW_CYCLE: f64 = 2_000_000.0;

pub const MIN_PRECISION: u8 = 1;
pub const MAX_PRECISION: u8 = 5;

/// Lowest northing (rounded down to 100 km) reached inside each latitude
/// band, including the southern false northing.
fn band_min_northing(band: char) -> Option<f64> {
    let northing = match band {
        'C' => 1_100_000.0,
        'D' => 2_000_000.0,
        'E' => 2_800_000.0,
        'F' => 3_700_000.0,
        'G' => 4_600_000.0,
        'H' => 5_500_000.0,
        'J' => 6_400_000.0,
        'K' => 7_300_000.0,
        'L' => 8_200_000.0,
        'M' => 9_100_000.0,
        'N' => 0.0,
        'P' => 800_000.0,
        'Q' => 1_700_000.0,
        'R' => 2_600_000.0,
        'S' => 3_500_000.0,
        'T' => 4_400_000.0,
        'U' => 5_300_000.0,
        'V' => 6_200_000.0,
        'W' => 7_000_000.0,
        'X' => 7_900_000.0,
        _ => return None,
    };
    Some(northing)
}

/// Grid cell edge in metres for a digit precision (1 → 10 km, 5 → 1 m).
pub fn resolution(precision: u8) -> f64 {
    10f64.powi(5 - i32::from(precision))
}

/// Encode a location at `precision` digits per axis. Precisions outside
/// 1..=5 fall back to 5.
///
/// Digits are truncated toward the south-west corner of the cell.
pub fn encode(location: &Location, precision: u8) -> Result<String, CoordError> {
    let precision = if (MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
        precision
    } else {
        MAX_PRECISION
    };
    let utm = utm::location_to_utm(location)?;
    let set = usize::from(utm.zone - 1);

    let column = (utm.easting / SQUARE_SIZE).floor() as usize;
    let column_letter = column
        .checked_sub(1)
        .and_then(|i| COLUMN_LETTERS[set % 3].chars().nth(i))
        .ok_or_else(|| {
            CoordError::Conversion(format!("easting {:.0} outside the zone {} grid", utm.easting, utm.zone))
        })?;

    let row = (utm.northing / SQUARE_SIZE).floor() as usize % 20;
    let row_letter = ROW_LETTERS[set % 2]
        .chars()
        .nth(row)
        .ok_or_else(|| CoordError::Conversion(format!("northing {:.0} outside the grid", utm.northing)))?;

    let cell = resolution(precision);
    let width = usize::from(precision);
    let easting = ((utm.easting % SQUARE_SIZE) / cell).floor() as u64;
    let northing = ((utm.northing % SQUARE_SIZE) / cell).floor() as u64;

    let reference = format!(
        "{}{}{}{}{:0width$}{:0width$}",
        utm.zone, utm.band, column_letter, row_letter, easting, northing,
    );
    trace!(%location, precision, %reference, "MGRS encode");
    Ok(reference)
}

/// Decode reference components into the centre of the cell they describe.
///
/// `digits` holds the easting digits followed by the northing digits and
/// must have even length (0..=10).
pub fn decode(zone: u8, band: char, square: [char; 2], digits: &str) -> Result<Location, CoordError> {
    if !(1..=60).contains(&zone) {
        return Err(CoordError::Conversion(format!("MGRS zone {zone} out of range (1-60)")));
    }
    if digits.len() % 2 != 0 || digits.len() > 2 * usize::from(MAX_PRECISION) {
        return Err(CoordError::Conversion(format!("MGRS digits {digits:?} must be an even count up to 10")));
    }

    let band = band.to_ascii_uppercase();
    let min_northing = band_min_northing(band)
        .ok_or_else(|| CoordError::Conversion(format!("invalid MGRS latitude band {band:?}")))?;

    let set = usize::from(zone - 1);
    let column_letter = square[0].to_ascii_uppercase();
    let row_letter = square[1].to_ascii_uppercase();

    let column = COLUMN_LETTERS[set % 3].find(column_letter).ok_or_else(|| {
        CoordError::Conversion(format!("column letter {column_letter:?} not used in zone {zone}"))
    })?;
    let row = ROW_LETTERS[set % 2].find(row_letter).ok_or_else(|| {
        CoordError::Conversion(format!("row letter {row_letter:?} not used in zone {zone}"))
    })?;

    let mut square_northing = row as f64 * SQUARE_SIZE;
    while square_northing < min_northing {
        square_northing += ROW_CYCLE;
    }
    let square_easting = (column + 1) as f64 * SQUARE_SIZE;

    let (easting_digits, northing_digits) = digits.split_at(digits.len() / 2);
    let precision = easting_digits.len() as u8;
    let cell = if precision == 0 { SQUARE_SIZE } else { resolution(precision) };

    let easting = square_easting + scaled(easting_digits, cell)? + cell / 2.0;
    let northing = square_northing + scaled(northing_digits, cell)? + cell / 2.0;
    trace!(zone, %band, easting, northing, "MGRS decode");

    utm::utm_to_location(zone, utm::is_northern_band(band), easting, northing)
}

fn scaled(digits: &str, cell: f64) -> Result<f64, CoordError> {
    if digits.is_empty() {
        return Ok(0.0);
    }
    digits
        .parse::<u32>()
        .map(|v| f64::from(v) * cell)
        .map_err(|e| CoordError::Conversion(format!("MGRS digits {digits:?}: {e}")))
}
