// Snapshot CSV log directory: one file per collection run, filename encodes
// the capture instant as YYYYMMDD_HHMMSS. Lexicographic filename order is
// chronological order for this fixed-width format, so files are read in
// name-sorted order and never re-sorted downstream.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Trim, WriterBuilder};

use crate::models::{PortRecord, Sample};

const FILENAME_TIME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes one snapshot in the collector's CSV format: the device's column
/// labels as the header, one row per port.
pub fn write_csv<W: Write>(records: &[PortRecord], out: W) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().from_writer(out);
    for record in records {
        w.serialize(record).context("writing CSV record")?;
    }
    w.flush().context("flushing CSV output")?;
    Ok(())
}

/// Reads every `.csv` snapshot in `dir` into one combined table, each row
/// tagged with its file's capture timestamp.
///
/// Row order is file-name order, then within-file row order. A `.csv` file
/// whose stem is not a YYYYMMDD_HHMMSS timestamp fails the whole run: a
/// silently skipped or mis-timestamped file would corrupt every derived rate
/// downstream, so malformed input is a hard error, not a warning.
pub fn read_logs(dir: &Path) -> anyhow::Result<Vec<Sample>> {
    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading log dir {dir:?}"))? {
        let entry = entry.with_context(|| format!("reading log dir {dir:?}"))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".csv") {
            files.push((name, entry.path()));
        }
    }
    files.sort();

    let mut samples: Vec<Sample> = Vec::new();
    for (name, path) in &files {
        let timestamp = parse_filename_timestamp(name)
            .with_context(|| format!("snapshot filename {name:?}"))?;
        read_snapshot(path, timestamp, &mut samples)
            .with_context(|| format!("snapshot file {name:?}"))?;
    }
    tracing::debug!(
        operation = "read_logs",
        files = files.len(),
        rows = samples.len(),
        "log directory read"
    );
    Ok(samples)
}

/// Strictly parses a snapshot filename's stem as its capture instant.
pub fn parse_filename_timestamp(name: &str) -> anyhow::Result<NaiveDateTime> {
    let stem = name.strip_suffix(".csv").unwrap_or(name);
    NaiveDateTime::parse_from_str(stem, FILENAME_TIME_FORMAT)
        .with_context(|| format!("stem {stem:?} is not {FILENAME_TIME_FORMAT}"))
}

fn read_snapshot(
    path: &Path,
    timestamp: NaiveDateTime,
    samples: &mut Vec<Sample>,
) -> anyhow::Result<()> {
    // The collector joins fields with ", "; trim so both plain and
    // space-padded CSV parse identically.
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .context("opening snapshot")?;
    for row in reader.deserialize::<PortRecord>() {
        let record = row.context("parsing snapshot row")?;
        samples.push(Sample { timestamp, record });
    }
    Ok(())
}
