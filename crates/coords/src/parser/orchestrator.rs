use tracing::debug;

use super::formats::*;
use super::model::ParseResult;
use super::traits::*;

struct Stage {
    detector: Box<dyn FormatDetector>,
    parser: Box<dyn CoordinateParser>,
}

impl Stage {
    fn new(detector: impl FormatDetector + 'static, parser: impl CoordinateParser + 'static) -> Self {
        Self {
            detector: Box::new(detector),
            parser: Box::new(parser),
        }
    }
}

/// Detection + parsing in one pass.
///
/// Each stage is tried in priority order (MGRS, UTM, DMS, decimal); the
/// first stage whose pattern matches and whose parser validates wins.
/// Per-stage failures are only logged: the caller sees a single
/// `NotRecognized` when nothing succeeds.
pub struct ParseOrchestrator {
    stages: Vec<Stage>,
}

impl ParseOrchestrator {
    pub fn new() -> Self {
        let stages = vec![
            Stage::new(MgrsDetector, MgrsParser),
            Stage::new(UtmDetector, UtmParser),
            Stage::new(DmsDetector, DmsParser),
            Stage::new(DecimalDetector, DecimalParser),
        ];

        Self { stages }
    }

    pub fn parse(&self, input: &str) -> Result<ParseResult, CoordError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CoordError::EmptyInput);
        }

        for stage in &self.stages {
            if !stage.detector.detect(trimmed) {
                continue;
            }

            let format = stage.parser.format();
            match stage.parser.parse(trimmed) {
                Ok(location) => {
                    debug!(%format, %location, "coordinate parsed");
                    return Ok(ParseResult {
                        location,
                        format,
                        original: input.to_string(),
                    });
                }
                Err(e) => {
                    debug!(%format, error = %e, "pattern matched but parse failed");
                }
            }
        }

        Err(CoordError::not_recognized(input))
    }

    /// Run exactly one format's parser and surface its own error.
    ///
    /// Unlike [`parse`](Self::parse), a failure here keeps its specific kind
    /// (`MalformedField`, `Range`, `Conversion`), which is useful when the
    /// caller already knows what notation it was given.
    pub fn parse_as(&self, format: CoordinateFormat, input: &str) -> Result<ParseResult, CoordError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CoordError::EmptyInput);
        }

        let stage = self
            .stages
            .iter()
            .find(|stage| stage.parser.format() == format)
            .ok_or_else(|| CoordError::not_recognized(input))?;

        if !stage.detector.detect(trimmed) {
            return Err(CoordError::not_recognized(input));
        }

        let location = stage.parser.parse(trimmed)?;
        Ok(ParseResult {
            location,
            format,
            original: input.to_string(),
        })
    }

    /// Formats in the order they are tried.
    #[cfg(test)]
    pub(crate) fn formats(&self) -> Vec<CoordinateFormat> {
        self.stages.iter().map(|s| s.parser.format()).collect()
    }
}

impl Default for ParseOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::detector::FormatDetectorOrchestrator;

    #[test]
    fn test_order_matches_detector() {
        let orchestrator = ParseOrchestrator::new();
        let detector = FormatDetectorOrchestrator::new();
        assert_eq!(orchestrator.formats(), detector.formats());
    }

    #[test]
    fn test_parse_decimal() {
        let orchestrator = ParseOrchestrator::new();
        let result = orchestrator.parse("19.856, 99.817").unwrap();
        assert_eq!(result.format, CoordinateFormat::Decimal);
        assert!((result.location.latitude() - 19.856).abs() < 1e-12);
        assert!((result.location.longitude() - 99.817).abs() < 1e-12);
        assert_eq!(result.original, "19.856, 99.817");
    }

    #[test]
    fn test_parse_keeps_untrimmed_original() {
        let orchestrator = ParseOrchestrator::new();
        let result = orchestrator.parse("  19.856, 99.817 ").unwrap();
        assert_eq!(result.original, "  19.856, 99.817 ");
    }

    #[test]
    fn test_parse_utm() {
        let orchestrator = ParseOrchestrator::new();
        let result = orchestrator.parse("47N 500000 2200000").unwrap();
        assert_eq!(result.format, CoordinateFormat::Utm);
        assert!((5.0..=21.0).contains(&result.location.latitude()));
        assert!((97.0..=106.0).contains(&result.location.longitude()));
    }

    #[test]
    fn test_parse_dms() {
        let orchestrator = ParseOrchestrator::new();
        let result = orchestrator.parse(r#"19°51'22"N 99°49'0"E"#).unwrap();
        assert_eq!(result.format, CoordinateFormat::Dms);
        assert!((result.location.latitude() - 19.8561).abs() < 0.001);
        assert!((result.location.longitude() - 99.8167).abs() < 0.001);
    }

    #[test]
    fn test_parse_mgrs() {
        let orchestrator = ParseOrchestrator::new();
        let result = orchestrator.parse("18S UJ 23487 06483").unwrap();
        assert_eq!(result.format, CoordinateFormat::Mgrs);
    }

    #[test]
    fn test_parse_empty() {
        let orchestrator = ParseOrchestrator::new();
        assert_eq!(orchestrator.parse(""), Err(CoordError::EmptyInput));
        assert_eq!(orchestrator.parse("  \n"), Err(CoordError::EmptyInput));
    }

    #[test]
    fn test_failures_collapse_to_not_recognized() {
        let orchestrator = ParseOrchestrator::new();
        for input in ["61ABC1234567890", "91, 0", "61N 500000 2200000", "Big Ben London"] {
            let err = orchestrator.parse(input).unwrap_err();
            assert_eq!(err, CoordError::NotRecognized { input: input.to_string() }, "{input}");
        }
    }

    #[test]
    fn test_parse_as_surfaces_specific_error() {
        let orchestrator = ParseOrchestrator::new();

        let err = orchestrator.parse_as(CoordinateFormat::Decimal, "91, 0").unwrap_err();
        assert!(matches!(err, CoordError::Range { field: "latitude", .. }));

        let err = orchestrator.parse_as(CoordinateFormat::Utm, "61N 500000 2200000").unwrap_err();
        assert!(matches!(err, CoordError::MalformedField { field: "zone", .. }));

        let err = orchestrator.parse_as(CoordinateFormat::Mgrs, "61QNB8554295753").unwrap_err();
        assert!(matches!(err, CoordError::Conversion(_)));
    }

    #[test]
    fn test_parse_as_wrong_format() {
        let orchestrator = ParseOrchestrator::new();
        let err = orchestrator.parse_as(CoordinateFormat::Utm, "19.856, 99.817").unwrap_err();
        assert!(matches!(err, CoordError::NotRecognized { .. }));

        let err = orchestrator.parse_as(CoordinateFormat::Unknown, "19.856, 99.817").unwrap_err();
        assert!(matches!(err, CoordError::NotRecognized { .. }));
    }

    #[test]
    fn test_parse_as_success() {
        let orchestrator = ParseOrchestrator::new();
        let result = orchestrator.parse_as(CoordinateFormat::Decimal, "1, 2").unwrap();
        assert_eq!(result.format, CoordinateFormat::Decimal);
        assert_eq!(result.location.latitude(), 1.0);
    }
}
