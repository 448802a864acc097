use anyhow::{Context, Result};
use serde_json::json;
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::OutputFormat;
use crate::error::CliError;
use crate::metrics::ParseMetrics;

/// Parse each text and write one line per input. Returns the failure count.
pub fn parse_all<W: Write>(
    texts: &[String],
    output: OutputFormat,
    metrics: &ParseMetrics,
    out: &mut W,
) -> Result<usize> {
    let mut failed = 0;
    for text in texts {
        if !parse_one(text, output, metrics, out)? {
            failed += 1;
        }
    }
    Ok(failed)
}

/// Parse stdin-style input line by line; blank lines are skipped.
///
/// A bad line is reported and counted, never fatal. Only I/O errors abort.
pub fn batch<R: BufRead, W: Write>(
    input: R,
    output: OutputFormat,
    metrics: &ParseMetrics,
    out: &mut W,
) -> Result<usize> {
    let mut failed = 0;
    for (index, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read input line {}", index + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        if !parse_one(&line, output, metrics, out)? {
            failed += 1;
        }
    }
    metrics.log_summary();
    Ok(failed)
}

fn parse_one<W: Write>(text: &str, output: OutputFormat, metrics: &ParseMetrics, out: &mut W) -> Result<bool> {
    let start = Instant::now();
    let result = coords::parse(text);
    let elapsed = start.elapsed().as_nanos() as u64;

    match result {
        Ok(parsed) => {
            metrics.record_parse(parsed.format, elapsed);
            debug!(format = %parsed.format, location = %parsed.location, "parsed");
            match output {
                OutputFormat::Text => writeln!(out, "{}\t{}", parsed.format, parsed.location)?,
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&parsed)?)?,
            }
            Ok(true)
        }
        Err(e) => {
            metrics.record_error(e.kind(), elapsed);
            let err = CliError::coordinate(text, e);
            warn!(code = err.code(), "{}", err);
            write_error(&err, text, output, out)?;
            Ok(false)
        }
    }
}

/// Write the detected format name for each text.
pub fn detect_all<W: Write>(texts: &[String], output: OutputFormat, out: &mut W) -> Result<()> {
    for text in texts {
        let format = coords::detect_format(text);
        match output {
            OutputFormat::Text => writeln!(out, "{format}")?,
            OutputFormat::Json => writeln!(out, "{}", json!({ "input": text, "format": format }))?,
        }
    }
    Ok(())
}

/// Write one MGRS reference. Returns false when the location cannot be encoded.
pub fn mgrs<W: Write>(latitude: f64, longitude: f64, precision: i32, output: OutputFormat, out: &mut W) -> Result<bool> {
    match coords::to_mgrs(latitude, longitude, precision) {
        Ok(reference) => {
            match output {
                OutputFormat::Text => writeln!(out, "{reference}")?,
                OutputFormat::Json => writeln!(
                    out,
                    "{}",
                    json!({
                        "latitude": latitude,
                        "longitude": longitude,
                        "precision": precision,
                        "mgrs": reference,
                    })
                )?,
            }
            Ok(true)
        }
        Err(e) => {
            let input = format!("{latitude}, {longitude}");
            let err = CliError::coordinate(&input, e);
            warn!(code = err.code(), "{}", err);
            write_error(&err, &input, output, out)?;
            Ok(false)
        }
    }
}

fn write_error<W: Write>(err: &CliError, input: &str, output: OutputFormat, out: &mut W) -> Result<()> {
    let message = match err {
        CliError::Coordinate { source, .. } => source.to_string(),
        other => other.to_string(),
    };
    match output {
        OutputFormat::Text => writeln!(out, "error\t{}\t{}", err.code(), message)?,
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({
                "input": input,
                "error": { "code": err.code(), "message": message },
            })
        )?,
    }
    Ok(())
}
