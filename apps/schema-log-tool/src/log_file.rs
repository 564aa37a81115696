//! Sequential access to schema-change log files.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use schema_change_core::config::PersistConfig;
use schema_change_core::persistence::{text, SchemaChangeRecord, Writable};

use crate::cli::Format;

/// Reads the next raw payload, or `None` at a clean end of file.
fn next_payload<R: BufRead>(input: &mut R, config: &PersistConfig) -> Result<Option<String>> {
    if input.fill_buf()?.is_empty() {
        return Ok(None);
    }
    let payload = text::read_string_bounded(input, config.max_record_bytes)?;
    Ok(Some(payload))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Writes every record of the log to `out`, one per line.
pub fn dump<W: Write>(path: &Path, config: &PersistConfig, format: Format, out: &mut W) -> Result<usize> {
    let mut input = open(path)?;
    let mut count = 0;
    loop {
        if input.fill_buf()?.is_empty() {
            break;
        }
        let record = SchemaChangeRecord::read_with_config(&mut input, config)
            .with_context(|| format!("record #{} in {}", count, path.display()))?;
        match format {
            Format::Debug => writeln!(out, "#{} {}", count, record)?,
            Format::Json => writeln!(out, "{}", record.to_json()?)?,
        }
        count += 1;
    }
    Ok(count)
}

/// Decodes every record and checks that re-encoding preserves all fields.
pub fn verify(path: &Path, config: &PersistConfig) -> Result<usize> {
    let mut input = open(path)?;
    let mut count = 0;
    while let Some(payload) = next_payload(&mut input, config)
        .with_context(|| format!("record #{} in {}", count, path.display()))?
    {
        let record = SchemaChangeRecord::from_json(&payload)
            .with_context(|| format!("record #{} in {}", count, path.display()))?;
        let canonical = record.to_json()?;
        if canonical != payload {
            tracing::warn!("Record #{} is not in canonical JSON form", count);
        }
        let reparsed = SchemaChangeRecord::from_json(&canonical)?;
        if !reparsed.is_identical(&record) {
            bail!("record #{} in {} does not survive re-encoding", count, path.display());
        }
        count += 1;
    }
    Ok(count)
}

/// Appends each JSON line of `input` to the log at `output`.
pub fn encode(input: &Path, output: &Path) -> Result<usize> {
    let reader = open(input)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output)
        .with_context(|| format!("failed to open {}", output.display()))?;
    let mut out = BufWriter::new(file);

    let mut count = 0;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = SchemaChangeRecord::from_json(&line)
            .with_context(|| format!("line {} of {}", line_no + 1, input.display()))?;
        record.write(&mut out)?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}
