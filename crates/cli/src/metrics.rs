use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;

use coords::{CoordinateFormat, ErrorKind};

/// Successful parses by detected format
#[derive(Debug, Default)]
pub struct FormatMetrics {
    pub decimal: AtomicU64,
    pub dms: AtomicU64,
    pub utm: AtomicU64,
    pub mgrs: AtomicU64,
}

/// Failed parses by error kind
#[derive(Debug, Default)]
pub struct ErrorMetrics {
    pub empty_input: AtomicU64,
    pub not_recognized: AtomicU64,
    pub malformed_field: AtomicU64,
    pub range: AtomicU64,
    pub conversion: AtomicU64,
}

/// Aggregate timing and counts
#[derive(Debug, Default)]
pub struct TotalMetrics {
    pub attempts: AtomicU64,
    pub time_nanos: AtomicU64,
}

/// Counters for the parse and batch commands.
///
/// All operations use `Ordering::Relaxed`; `snapshot()` reads each counter
/// independently, so a snapshot taken mid-batch may be slightly torn.
#[derive(Debug, Default)]
pub struct ParseMetrics {
    pub formats: FormatMetrics,
    pub errors: ErrorMetrics,
    pub totals: TotalMetrics,
}

impl ParseMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful parse
    ///
    /// A result without a concrete format is counted as not recognized, so
    /// every attempt lands in exactly one bucket.
    #[inline]
    pub fn record_parse(&self, format: CoordinateFormat, time_nanos: u64) {
        let counter = match format {
            CoordinateFormat::Decimal => &self.formats.decimal,
            CoordinateFormat::Dms => &self.formats.dms,
            CoordinateFormat::Utm => &self.formats.utm,
            CoordinateFormat::Mgrs => &self.formats.mgrs,
            CoordinateFormat::Unknown => return self.record_error(ErrorKind::NotRecognized, time_nanos),
        };

        self.totals.attempts.fetch_add(1, Ordering::Relaxed);
        self.totals.time_nanos.fetch_add(time_nanos, Ordering::Relaxed);
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed parse
    #[inline]
    pub fn record_error(&self, kind: ErrorKind, time_nanos: u64) {
        self.totals.attempts.fetch_add(1, Ordering::Relaxed);
        self.totals.time_nanos.fetch_add(time_nanos, Ordering::Relaxed);

        let counter = match kind {
            ErrorKind::EmptyInput => &self.errors.empty_input,
            ErrorKind::NotRecognized => &self.errors.not_recognized,
            ErrorKind::MalformedField => &self.errors.malformed_field,
            ErrorKind::Range => &self.errors.range,
            ErrorKind::Conversion => &self.errors.conversion,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let decimal_parsed = self.formats.decimal.load(Ordering::Relaxed);
        let dms_parsed = self.formats.dms.load(Ordering::Relaxed);
        let utm_parsed = self.formats.utm.load(Ordering::Relaxed);
        let mgrs_parsed = self.formats.mgrs.load(Ordering::Relaxed);
        let total_parsed = decimal_parsed + dms_parsed + utm_parsed + mgrs_parsed;

        let attempts = self.totals.attempts.load(Ordering::Relaxed);
        let time_nanos = self.totals.time_nanos.load(Ordering::Relaxed);

        MetricsSnapshot {
            attempts,
            decimal_parsed,
            dms_parsed,
            utm_parsed,
            mgrs_parsed,
            total_parsed,
            empty_input: self.errors.empty_input.load(Ordering::Relaxed),
            not_recognized: self.errors.not_recognized.load(Ordering::Relaxed),
            malformed_field: self.errors.malformed_field.load(Ordering::Relaxed),
            range_errors: self.errors.range.load(Ordering::Relaxed),
            conversion_errors: self.errors.conversion.load(Ordering::Relaxed),
            avg_parse_time_us: if attempts > 0 {
                (time_nanos as f64 / attempts as f64) / 1000.0
            } else {
                0.0
            },
            success_rate: if attempts > 0 {
                total_parsed as f64 / attempts as f64
            } else {
                1.0
            },
        }
    }

    /// Log the current counters at info level
    pub fn log_summary(&self) {
        let snap = self.snapshot();
        tracing::info!(
            attempts = snap.attempts,
            parsed = snap.total_parsed,
            decimal = snap.decimal_parsed,
            dms = snap.dms_parsed,
            utm = snap.utm_parsed,
            mgrs = snap.mgrs_parsed,
            failed = snap.total_failed(),
            success_rate = format!("{:.3}", snap.success_rate),
            avg_parse_time_us = format!("{:.2}", snap.avg_parse_time_us),
            "Parse summary"
        );
    }
}

/// A read-only snapshot of parse metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub attempts: u64,

    // Format counts
    pub decimal_parsed: u64,
    pub dms_parsed: u64,
    pub utm_parsed: u64,
    pub mgrs_parsed: u64,
    pub total_parsed: u64,

    // Errors
    pub empty_input: u64,
    pub not_recognized: u64,
    pub malformed_field: u64,
    pub range_errors: u64,
    pub conversion_errors: u64,

    // Performance
    pub avg_parse_time_us: f64,
    pub success_rate: f64,
}

impl MetricsSnapshot {
    pub fn total_failed(&self) -> u64 {
        self.empty_input
            + self.not_recognized
            + self.malformed_field
            + self.range_errors
            + self.conversion_errors
    }
}
