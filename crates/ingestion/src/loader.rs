//! Sample set loader
//!
//! Decodes `offset,value` tables. The first row is a header and is
//! discarded; `#` comment lines and rows with fewer than two fields are
//! skipped. Rows keep their file order.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use contracts::{Sample, SampleSequence, StreamKind};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, instrument};

use crate::error::{Column, LoadError, Result};

const COMMENT_MARKER: u8 = b'#';

/// Load a sample sequence from a file
///
/// The file handle lives only for the duration of this call.
#[instrument(name = "load_samples", skip_all, fields(path = %path.display(), stream = %stream))]
pub fn load_samples(path: &Path, stream: StreamKind) -> Result<SampleSequence> {
    let origin = path.display().to_string();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: origin.clone(),
        source,
    })?;

    load_from_reader(file, &origin, stream)
}

/// Load a sample sequence from any byte source
///
/// `origin` names the source in errors and logs.
pub fn load_from_reader<R: Read>(
    source: R,
    origin: &str,
    stream: StreamKind,
) -> Result<SampleSequence> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .comment(Some(COMMENT_MARKER))
        .flexible(true)
        .from_reader(source);

    let header = reader.headers().map_err(|source| LoadError::Header {
        path: origin.to_string(),
        source,
    })?;
    if header.is_empty() {
        return Err(LoadError::MissingHeader {
            path: origin.to_string(),
        });
    }

    let mut samples = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result.map_err(|source| LoadError::Record {
            path: origin.to_string(),
            source,
        })?;

        if record.len() < 2 {
            skipped += 1;
            continue;
        }

        samples.push(parse_row(&record, origin)?);
    }

    if skipped > 0 {
        debug!(origin, skipped, "Skipped rows with fewer than 2 fields");
    }

    info!(
        origin,
        stream = %stream,
        samples = samples.len(),
        "Loaded sample set"
    );

    Ok(SampleSequence::new(stream, samples))
}

fn parse_row(record: &StringRecord, origin: &str) -> Result<Sample> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);

    let offset = parse_field(record, 0, Column::Offset, origin, line)?;
    if !offset.is_finite() {
        return Err(LoadError::InvalidField {
            path: origin.to_string(),
            line,
            column: Column::Offset,
            raw: record[0].to_string(),
            reason: "offset must be a finite number of seconds".to_string(),
        });
    }

    let value = parse_field(record, 1, Column::Value, origin, line)?;

    Ok(Sample::new(offset, value))
}

fn parse_field(
    record: &StringRecord,
    index: usize,
    column: Column,
    origin: &str,
    line: u64,
) -> Result<f64> {
    let raw = &record[index];
    raw.trim()
        .parse::<f64>()
        .map_err(|e| LoadError::InvalidField {
            path: origin.to_string(),
            line,
            column,
            raw: raw.to_string(),
            reason: e.to_string(),
        })
}
