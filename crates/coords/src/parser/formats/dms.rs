use regex::Captures;
use tracing::trace;

use crate::parser::model::check_range;
use crate::parser::patterns::dms_captures;
use crate::parser::traits::*;

pub struct DmsDetector;

impl FormatDetector for DmsDetector {
    fn detect(&self, input: &str) -> bool {
        dms_captures(input).is_some()
    }

    fn format(&self) -> CoordinateFormat {
        CoordinateFormat::Dms
    }
}

/// Parser for degrees-minutes-seconds pairs such as `19°51'22"N 99°49'0"E`.
///
/// The direction letter carries the sign. A degree field with an explicit
/// minus is rejected rather than guessed at (`-19°51'22"S` could mean
/// either hemisphere).
pub struct DmsParser;

struct Axis {
    /// Capture group prefix in the DMS grammar
    group: &'static str,
    degrees: &'static str,
    minutes: &'static str,
    seconds: &'static str,
    max_degrees: f64,
    negative: char,
}

const LATITUDE: Axis = Axis {
    group: "lat",
    degrees: "latitude degrees",
    minutes: "latitude minutes",
    seconds: "latitude seconds",
    max_degrees: 90.0,
    negative: 'S',
};

const LONGITUDE: Axis = Axis {
    group: "lon",
    degrees: "longitude degrees",
    minutes: "longitude minutes",
    seconds: "longitude seconds",
    max_degrees: 180.0,
    negative: 'W',
};

impl CoordinateParser for DmsParser {
    fn parse(&self, input: &str) -> Result<Location, CoordError> {
        let caps = dms_captures(input).ok_or_else(|| CoordError::not_recognized(input))?;

        let latitude = component(&caps, &LATITUDE)?;
        let longitude = component(&caps, &LONGITUDE)?;
        trace!(latitude, longitude, "DMS components");

        // 90°30'0"N passes the per-field checks but not the location range
        Location::new(latitude, longitude)
    }

    fn format(&self) -> CoordinateFormat {
        CoordinateFormat::Dms
    }
}

/// Fold one axis's deg, min, sec and direction groups into signed decimal
/// degrees.
fn component(caps: &Captures<'_>, axis: &Axis) -> Result<f64, CoordError> {
    let raw_degrees = group(caps, axis, "deg")?;
    if raw_degrees.starts_with('-') {
        return Err(CoordError::malformed(
            axis.degrees,
            format!("{raw_degrees:?} is signed; use the direction letter for the hemisphere"),
        ));
    }

    let degrees = number(axis.degrees, raw_degrees.trim_start_matches('+'))?;
    let minutes = number(axis.minutes, group(caps, axis, "min")?)?;
    let seconds = number(axis.seconds, group(caps, axis, "sec")?)?;

    check_range(axis.degrees, degrees, 0.0, axis.max_degrees)?;
    below_sixty(axis.minutes, minutes)?;
    below_sixty(axis.seconds, seconds)?;

    let value = degrees + minutes / 60.0 + seconds / 3600.0;
    let direction = group(caps, axis, "dir")?.chars().next().map(|c| c.to_ascii_uppercase());

    Ok(if direction == Some(axis.negative) { -value } else { value })
}

fn group<'h>(caps: &Captures<'h>, axis: &Axis, name: &str) -> Result<&'h str, CoordError> {
    caps.name(&format!("{}_{name}", axis.group))
        .map(|m| m.as_str())
        .ok_or_else(|| CoordError::malformed(axis.degrees, format!("missing {name} group")))
}

fn number(field: &'static str, raw: &str) -> Result<f64, CoordError> {
    raw.parse::<f64>()
        .map_err(|e| CoordError::malformed(field, format!("{raw:?}: {e}")))
}

/// Minutes and seconds live in [0, 60).
fn below_sixty(field: &'static str, value: f64) -> Result<(), CoordError> {
    if (0.0..60.0).contains(&value) {
        Ok(())
    } else {
        Err(CoordError::Range { field, value, min: 0.0, max: 60.0 })
    }
}
