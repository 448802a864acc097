use super::traits::*;
use super::formats::*;

/// Format detector orchestrator.
///
/// Runs the detectors in a fixed priority order and reports the first that
/// matches. The order is what resolves grammar overlap: a looser grammar
/// (decimal) must never get a chance at input a stricter one (UTM, MGRS)
/// already claims.
pub struct FormatDetectorOrchestrator {
    detectors: Vec<Box<dyn FormatDetector>>,
}

impl FormatDetectorOrchestrator {
    pub fn new() -> Self {
        let detectors: Vec<Box<dyn FormatDetector>> = vec![
            // Order matters! More specific detectors first
            Box::new(MgrsDetector),
            Box::new(UtmDetector),
            Box::new(DmsDetector),
            Box::new(DecimalDetector),
        ];

        Self { detectors }
    }

    /// Total: every input maps to exactly one format, `Unknown` included.
    pub fn detect(&self, input: &str) -> CoordinateFormat {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return CoordinateFormat::Unknown;
        }

        self.detectors
            .iter()
            .find(|detector| detector.detect(trimmed))
            .map(|detector| detector.format())
            .unwrap_or(CoordinateFormat::Unknown)
    }

    /// Formats in the order they are tried.
    #[cfg(test)]
    pub(crate) fn formats(&self) -> Vec<CoordinateFormat> {
        self.detectors.iter().map(|d| d.format()).collect()
    }
}

impl Default for FormatDetectorOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let orchestrator = FormatDetectorOrchestrator::new();
        assert_eq!(
            orchestrator.formats(),
            vec![
                CoordinateFormat::Mgrs,
                CoordinateFormat::Utm,
                CoordinateFormat::Dms,
                CoordinateFormat::Decimal,
            ]
        );
    }

    #[test]
    fn test_detect_each_format() {
        let orchestrator = FormatDetectorOrchestrator::new();
        assert_eq!(orchestrator.detect("47QNB8554295753"), CoordinateFormat::Mgrs);
        assert_eq!(orchestrator.detect("47N 500000 2200000"), CoordinateFormat::Utm);
        assert_eq!(orchestrator.detect(r#"19°51'22"N 99°49'0"E"#), CoordinateFormat::Dms);
        assert_eq!(orchestrator.detect("19.856, 99.817"), CoordinateFormat::Decimal);
    }

    #[test]
    fn test_detect_trims_whitespace() {
        let orchestrator = FormatDetectorOrchestrator::new();
        assert_eq!(orchestrator.detect("  19.856, 99.817\n"), CoordinateFormat::Decimal);
        assert_eq!(orchestrator.detect("\t47N 500000 2200000 "), CoordinateFormat::Utm);
    }

    #[test]
    fn test_detect_empty_is_unknown() {
        let orchestrator = FormatDetectorOrchestrator::new();
        assert_eq!(orchestrator.detect(""), CoordinateFormat::Unknown);
        assert_eq!(orchestrator.detect("   \t\n"), CoordinateFormat::Unknown);
    }

    #[test]
    fn test_detect_place_names_unknown() {
        let orchestrator = FormatDetectorOrchestrator::new();
        let samples = [
            "Chiang Rai, Thailand",
            "123 Main Street, New York",
            "Big Ben London",
            "Route 66",
            "Apartment 4B, 221B Baker Street",
            "N 5th Ave 1200",
            "12 W St 34",
            "5 N Rd 10",
            "1 E Dr 22",
        ];
        for sample in samples {
            assert_eq!(orchestrator.detect(sample), CoordinateFormat::Unknown, "{sample:?}");
        }
    }

    #[test]
    fn test_detect_stays_with_stricter_format_when_invalid() {
        // Zone 61 is impossible, but the string is still UTM-shaped
        let orchestrator = FormatDetectorOrchestrator::new();
        assert_eq!(orchestrator.detect("61N 500000 2200000"), CoordinateFormat::Utm);
        assert_eq!(orchestrator.detect("91, 0"), CoordinateFormat::Decimal);
    }
}
