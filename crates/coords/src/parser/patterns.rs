//! Compiled grammars shared by the detectors and the parsers.
//!
//! A detector and its parser always match against the same static, so a
//! string the detector accepts is never re-rejected by a different rule.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// MGRS: "47QNB8554295753", "18S UJ 23487 06483"
///
/// zone+band (no gap) | 100 km square id (no I/O) | digits, either one run
/// of 2-10 or two space-separated runs of 1-5. Whitespace is only allowed at
/// those group boundaries; [`mgrs_reference`] enforces equal-length runs.
pub static MGRS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^(\d{1,2})([C-HJ-NP-X])\s*([A-HJ-NP-Z]{2})\s*",
        r"(?:(\d{1,5})\s+(\d{1,5})|((?:\d{2}){1,5}))$",
    ))
    .expect("Invalid MGRS regex")
});

/// UTM: "47N 500000 2200000"
pub static UTM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d{1,2})([C-HJ-NP-X])\s+(\d+)\s+(\d+)$").expect("Invalid UTM regex")
});

/// DMS: 19°51'22"N 99°49'0"E, 19d51m22sN, 19 51' 22.5" s, 99° 49' 0" w
///
/// Named groups per axis (`lat_*`, `lon_*`): deg, min, min_mark, sec,
/// sec_mark, dir. Use [`dms_captures`] rather than matching directly.
pub static DMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"(?i)^"#,
        r#"(?P<lat_deg>[-+]?\d{1,3})\s*[°d]\s*(?P<lat_min>\d{1,2})\s*(?P<lat_min_mark>['′’m])\s*"#,
        r#"(?P<lat_sec>\d{1,2}(?:\.\d+)?)\s*(?P<lat_sec_mark>["″”s])?\s*(?P<lat_dir>[NS])"#,
        r#"[\s,]+"#,
        r#"(?P<lon_deg>[-+]?\d{1,3})\s*[°d]\s*(?P<lon_min>\d{1,2})\s*(?P<lon_min_mark>['′’m])\s*"#,
        r#"(?P<lon_sec>\d{1,2}(?:\.\d+)?)\s*(?P<lon_sec_mark>["″”s])?\s*(?P<lon_dir>[EW])"#,
        r#"$"#,
    ))
    .expect("Invalid DMS regex")
});

/// Decimal: two signed numbers separated by a comma and/or whitespace
pub static DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([-+]?(?:\d+(?:\.\d*)?|\.\d+))\s*(?:,|\s)\s*([-+]?(?:\d+(?:\.\d*)?|\.\d+))$")
        .expect("Invalid decimal regex")
});

/// Any letter in any script. Decimal input must contain none; this is what
/// keeps prose and addresses out of the numeric grammar.
pub static LETTERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\p{L}").expect("Invalid letter regex")
});

/// Match a DMS pair, rejecting a hemisphere letter that is really the
/// seconds mark.
///
/// With letter units (`19d51m22s`) the seconds mark is `s`, so a bare `s`
/// after the seconds digits cannot also be read as "south": the regex would
/// otherwise backtrack and accept `19d51m22s 99d49m0sE` as a southern
/// latitude with no hemisphere given.
pub fn dms_captures(input: &str) -> Option<Captures<'_>> {
    let caps = DMS.captures(input)?;
    for axis in ["lat", "lon"] {
        if seconds_mark_taken_as_direction(&caps, axis) {
            return None;
        }
    }
    Some(caps)
}

fn seconds_mark_taken_as_direction(caps: &Captures<'_>, axis: &str) -> bool {
    let group = |name: &str| caps.name(&format!("{axis}_{name}")).map(|m| m.as_str());

    let letter_units = group("min_mark").is_some_and(|mark| mark.eq_ignore_ascii_case("m"));
    let no_seconds_mark = group("sec_mark").is_none();
    let south = group("dir").is_some_and(|dir| dir.eq_ignore_ascii_case("s"));

    letter_units && no_seconds_mark && south
}

/// The groups of an MGRS reference, with the easting and northing digits
/// joined into one run.
#[derive(Debug, Clone, PartialEq)]
pub struct MgrsReference<'a> {
    pub zone: &'a str,
    pub band: &'a str,
    pub square: &'a str,
    pub digits: String,
}

/// Split an MGRS reference into its groups, or `None` if it does not fit
/// the grammar. Spaced digit runs must be the same length.
pub fn mgrs_reference(input: &str) -> Option<MgrsReference<'_>> {
    let caps = MGRS.captures(input)?;
    let digits = match (caps.get(4), caps.get(5), caps.get(6)) {
        (Some(easting), Some(northing), _) if easting.len() == northing.len() => {
            format!("{}{}", easting.as_str(), northing.as_str())
        }
        (_, _, Some(run)) => run.as_str().to_string(),
        _ => return None,
    };

    Some(MgrsReference {
        zone: caps.get(1)?.as_str(),
        band: caps.get(2)?.as_str(),
        square: caps.get(3)?.as_str(),
        digits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mgrs_requires_even_digits() {
        assert!(MGRS.is_match("47QQA1234567890"));
        assert!(MGRS.is_match("47qqa12"));
        assert!(!MGRS.is_match("47QQA123"));
        assert!(!MGRS.is_match("47QQA123456789012"));
        assert!(!MGRS.is_match("47QQA"));
    }

    #[test]
    fn test_mgrs_rejects_i_and_o() {
        assert!(!MGRS.is_match("47IQA1234"));
        assert!(!MGRS.is_match("47OQA1234"));
        assert!(!MGRS.is_match("47QIA1234"));
        assert!(!MGRS.is_match("47QAO1234"));
    }

    #[test]
    fn test_utm_pattern() {
        assert!(UTM.is_match("47N 500000 2200000"));
        assert!(UTM.is_match("4q   123  456"));
        assert!(!UTM.is_match("47N 500000"));
        assert!(!UTM.is_match("47N 500000.5 2200000"));
    }

    #[test]
    fn test_dms_variants() {
        assert!(DMS.is_match(r#"19°51'22"N 99°49'0"E"#));
        assert!(DMS.is_match(r#"19°51'22.5"N, 99°49'0.25"E"#));
        assert!(DMS.is_match("19d51m22sN 99d49m0sE"));
        assert!(DMS.is_match("19° 51′ 22″ s 99° 49′ 0″ w"));
        assert!(DMS.is_match("19°51'22N 99°49'0E"));
        assert!(!DMS.is_match("19°51'22\"N"));
        assert!(!DMS.is_match("19°51'22\"E 99°49'0\"N"));
    }

    #[test]
    fn test_dms_captures_named_groups() {
        let caps = dms_captures("19d51m22sN 99d49m0.5sE").unwrap();
        assert_eq!(&caps["lat_deg"], "19");
        assert_eq!(&caps["lat_sec"], "22");
        assert_eq!(&caps["lat_dir"], "N");
        assert_eq!(&caps["lon_sec"], "0.5");
        assert_eq!(&caps["lon_dir"], "E");
    }

    #[test]
    fn test_dms_seconds_mark_is_not_a_hemisphere() {
        // Missing latitude hemisphere; the trailing 's' is the seconds mark
        assert!(dms_captures("19d51m22s 99d49m0sE").is_none());
        assert!(dms_captures("19d51m22S 99d49m0sE").is_none());
        // Explicit mark followed by a real hemisphere
        assert!(dms_captures("19d51m22sS 99d49m0sE").is_some());
        assert!(dms_captures("19d51m22s S 99d49m0sE").is_some());
        // Symbol units have no 's' mark, so 'S' is the hemisphere
        assert!(dms_captures("19°51'22S 99°49'0E").is_some());
    }

    #[test]
    fn test_decimal_pattern() {
        assert!(DECIMAL.is_match("19.856, 99.817"));
        assert!(DECIMAL.is_match("-33.8688 151.2093"));
        assert!(DECIMAL.is_match("+1,-2"));
        assert!(DECIMAL.is_match(".5 , 10."));
        assert!(!DECIMAL.is_match("19.856"));
        assert!(!DECIMAL.is_match("1, 2, 3"));
        assert!(!DECIMAL.is_match("1e5, 2"));
    }

    #[test]
    fn test_letters() {
        assert!(LETTERS.is_match("New York"));
        assert!(LETTERS.is_match("เชียงราย"));
        assert!(!LETTERS.is_match("19.856, -99.817"));
    }

    #[test]
    fn test_mgrs_reference_groups() {
        let reference = mgrs_reference("18S UJ 23487 06483").unwrap();
        assert_eq!(reference.zone, "18");
        assert_eq!(reference.band, "S");
        assert_eq!(reference.square, "UJ");
        assert_eq!(reference.digits, "2348706483");

        let joined = mgrs_reference("18SUJ2348706483").unwrap();
        assert_eq!(joined.digits, reference.digits);
    }

    #[test]
    fn test_mgrs_reference_rejects_uneven_runs() {
        assert!(mgrs_reference("18SUJ 234 0648").is_none());
        assert!(mgrs_reference("18SUJ 2348 06483").is_none());
        assert!(mgrs_reference("18SUJ 23 06").is_some());
    }

    #[test]
    fn test_mgrs_whitespace_only_at_group_boundaries() {
        // Zone and band are one group
        assert!(!MGRS.is_match("18 SUJ2348706483"));
        // Square letters are one group
        assert!(!MGRS.is_match("18SU J2348706483"));
        // Digits split inside a run
        assert!(!MGRS.is_match("18SUJ23 48706483"));
        assert!(!MGRS.is_match("18SUJ 234 870 6483"));
    }

    #[test]
    fn test_mgrs_rejects_addresses() {
        for address in ["12 W St 34", "5 N Rd 10", "1 E Dr 22", "4 N Elm 12"] {
            assert!(mgrs_reference(address).is_none(), "{address:?}");
        }
    }
}
