// tsv.rs - Loader for BLAST tabular (-outfmt 6) result files

use crate::data::hit::AlignmentHit;
use crate::error::{ArgScanError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// What to do with a row that has the wrong column count or a non-numeric field.
/// One policy applies to every row of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRowPolicy {
    /// Abort the whole parse at the first malformed row
    #[default]
    Strict,
    /// Drop the row, log a warning and keep going
    Skip,
}

impl FromStr for MalformedRowPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" | "fail" => Ok(MalformedRowPolicy::Strict),
            "skip" | "skip-and-warn" => Ok(MalformedRowPolicy::Skip),
            _ => Err(format!(
                "Invalid malformed-row policy: {}. Use: strict, skip",
                s
            )),
        }
    }
}

impl MalformedRowPolicy {
    pub fn description(&self) -> &str {
        match self {
            MalformedRowPolicy::Strict => "fail on first malformed row",
            MalformedRowPolicy::Skip => "skip malformed rows with a warning",
        }
    }
}

/// Hits in file order plus the rows dropped under `MalformedRowPolicy::Skip`
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub hits: Vec<AlignmentHit>,
    pub skipped_rows: Vec<SkippedRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: String,
}

/// Parse a results file from disk
pub fn parse_path(path: &Path, policy: MalformedRowPolicy) -> Result<ParseOutcome> {
    if !path.exists() {
        return Err(ArgScanError::not_found(path));
    }
    let file = File::open(path)
        .map_err(|e| ArgScanError::from_io_at(path, "opening results file", e))?;

    log::debug!("Parsing BLAST tabular results from {}", path.display());
    parse_reader(BufReader::new(file), &path.display().to_string(), policy)
}

/// Parse results from any reader; `source_name` only labels error messages
pub fn parse_reader<R: Read>(
    mut reader: R,
    source_name: &str,
    policy: MalformedRowPolicy,
) -> Result<ParseOutcome> {
    let mut raw = Vec::new();
    reader
        .read_to_end(&mut raw)
        .map_err(|e| ArgScanError::io(format!("reading {}", source_name), e))?;
    parse_bytes(&raw, source_name, policy)
}

/// Parse results held in memory
pub fn parse_bytes(raw: &[u8], source_name: &str, policy: MalformedRowPolicy) -> Result<ParseOutcome> {
    let text = std::str::from_utf8(raw).map_err(|e| {
        let line = raw[..e.valid_up_to()].iter().filter(|&&b| b == b'\n').count() + 1;
        ArgScanError::parse(
            source_name.to_string(),
            line,
            format!("input is not valid UTF-8 text ({})", e),
        )
    })?;

    let mut outcome = ParseOutcome::default();

    for (line_idx, line) in text.lines().enumerate() {
        let line_num = line_idx + 1;
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        match AlignmentHit::from_tabular_line(line) {
            Ok(hit) => outcome.hits.push(hit),
            Err(reason) => match policy {
                MalformedRowPolicy::Strict => {
                    return Err(ArgScanError::parse(source_name.to_string(), line_num, reason));
                }
                MalformedRowPolicy::Skip => {
                    log::warn!("Skipping line {} of {}: {}", line_num, source_name, reason);
                    outcome.skipped_rows.push(SkippedRow {
                        line: line_num,
                        reason,
                    });
                }
            },
        }
    }

    log::debug!(
        "Parsed {} hits from {} ({} rows skipped)",
        outcome.hits.len(),
        source_name,
        outcome.skipped_rows.len()
    );
    Ok(outcome)
}
