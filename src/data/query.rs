// query.rs - Query sequences submitted for BLAST searches

use crate::error::{ArgScanError, Result};
use bio::io::fasta;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use std::str::FromStr;

/// Minimum fraction of unambiguous nucleotides for a sequence to count as DNA/RNA
const NUCLEOTIDE_FRACTION: f64 = 0.9;

/// Molecule type of a query or reference database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoleculeType {
    Nucleotide,
    Protein,
}

impl FromStr for MoleculeType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nucl" | "nucleotide" | "dna" => Ok(MoleculeType::Nucleotide),
            "prot" | "protein" => Ok(MoleculeType::Protein),
            _ => Err(format!("Invalid molecule type: {}. Use: nucl, prot", s)),
        }
    }
}

impl MoleculeType {
    /// Guess the molecule type from residues.
    ///
    /// Nucleotide when every residue is a nucleotide or IUPAC ambiguity code and
    /// at least 90% are plain ACGTUN; anything else is protein.
    pub fn detect(sequence: &[u8]) -> Self {
        let mut plain = 0usize;
        let mut counted = 0usize;

        for &b in sequence {
            let upper = b.to_ascii_uppercase();
            match upper {
                b'-' | b'*' => continue,
                b'A' | b'C' | b'G' | b'T' | b'U' | b'N' => plain += 1,
                b'R' | b'Y' | b'K' | b'M' | b'S' | b'W' | b'B' | b'D' | b'H' | b'V' => {}
                _ => return MoleculeType::Protein,
            }
            counted += 1;
        }

        if counted > 0 && plain as f64 / counted as f64 >= NUCLEOTIDE_FRACTION {
            MoleculeType::Nucleotide
        } else {
            MoleculeType::Protein
        }
    }

    pub fn description(&self) -> &str {
        match self {
            MoleculeType::Nucleotide => "nucleotide",
            MoleculeType::Protein => "protein",
        }
    }
}

/// One or more FASTA records to search with
#[derive(Debug, Clone)]
pub struct QuerySequence {
    pub records: Vec<fasta::Record>,
}

impl QuerySequence {
    /// Read and validate a FASTA file
    pub fn from_fasta_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ArgScanError::not_found(path));
        }
        let file = File::open(path)
            .map_err(|e| ArgScanError::from_io_at(path, "opening query FASTA", e))?;
        Self::from_fasta_reader(BufReader::new(file), &path.display().to_string())
    }

    fn from_fasta_reader<R: Read>(reader: R, source_name: &str) -> Result<Self> {
        let reader = fasta::Reader::new(reader);
        let mut records = Vec::new();

        for (idx, record_result) in reader.records().enumerate() {
            let record = record_result.map_err(|e| {
                ArgScanError::parse(
                    source_name.to_string(),
                    idx + 1,
                    format!("invalid FASTA record: {}", e),
                )
            })?;
            if record.seq().is_empty() {
                return Err(ArgScanError::parse(
                    source_name.to_string(),
                    idx + 1,
                    format!("FASTA record '{}' has an empty sequence", record.id()),
                ));
            }
            records.push(record);
        }

        if records.is_empty() {
            return Err(ArgScanError::parse(
                source_name,
                1,
                "no FASTA records found",
            ));
        }

        log::debug!("Loaded {} query record(s) from {}", records.len(), source_name);
        Ok(Self { records })
    }

    /// Accept pasted text: FASTA as-is, or a bare sequence wrapped under `>default_id`
    pub fn from_raw_text(text: &str, default_id: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.starts_with('>') {
            return Self::from_fasta_reader(trimmed.as_bytes(), "pasted sequence");
        }

        let sequence: Vec<u8> = trimmed
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();

        if sequence.is_empty() {
            return Err(ArgScanError::parse("pasted sequence", 1, "sequence is empty"));
        }
        if let Some(bad) = sequence
            .iter()
            .find(|b| !(b.is_ascii_alphabetic() || **b == b'-' || **b == b'*'))
        {
            return Err(ArgScanError::parse(
                "pasted sequence".to_string(),
                1,
                format!("unexpected character '{}' in sequence", *bad as char),
            ));
        }

        Ok(Self {
            records: vec![fasta::Record::with_attrs(default_id, None, &sequence)],
        })
    }

    /// Molecule type of the first record
    pub fn molecule_type(&self) -> MoleculeType {
        self.records
            .first()
            .map(|r| MoleculeType::detect(r.seq()))
            .unwrap_or(MoleculeType::Nucleotide)
    }

    pub fn total_length(&self) -> usize {
        self.records.iter().map(|r| r.seq().len()).sum()
    }
}

/// Write the records as FASTA for the external tool
pub fn write_fasta_to<W: Write>(query: &QuerySequence, out: W) -> std::io::Result<()> {
    let mut writer = fasta::Writer::new(out);
    for record in &query.records {
        writer.write_record(record)?;
    }
    writer.flush()
}
