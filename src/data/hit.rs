// hit.rs - Alignment hit records and subject identifier fields

use serde::{Deserialize, Serialize};

/// Number of columns in a BLAST `-outfmt 6` row
pub const TABULAR_COLUMNS: usize = 12;

/// Column names of the tabular format, in file order
pub const TABULAR_HEADER: [&str; TABULAR_COLUMNS] = [
    "query_id",
    "subject_id",
    "identity",
    "alignment_length",
    "mismatches",
    "gap_opens",
    "q_start",
    "q_end",
    "s_start",
    "s_end",
    "evalue",
    "bit_score",
];

/// Zero-based position of the gene name among `|`-separated subject tokens
pub const GENE_TOKEN_INDEX: usize = 4;

/// Zero-based position of the resistance family among `|`-separated subject tokens
pub const FAMILY_TOKEN_INDEX: usize = 5;

/// One reported match between a query and a reference database entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentHit {
    pub query_id: String,
    pub subject_id: String,
    pub identity: f64,
    pub alignment_length: u64,
    pub mismatches: u64,
    pub gap_opens: u64,
    pub q_start: u64,
    pub q_end: u64,
    pub s_start: u64,
    pub s_end: u64,
    pub evalue: f64,
    pub bit_score: f64,
}

impl AlignmentHit {
    /// Parse one tab-separated row.
    ///
    /// The error string names the offending column; callers attach the line number.
    pub fn from_tabular_line(line: &str) -> Result<Self, String> {
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != TABULAR_COLUMNS {
            return Err(format!(
                "expected {} columns, found {}",
                TABULAR_COLUMNS,
                parts.len()
            ));
        }

        Ok(Self {
            query_id: parts[0].to_string(),
            subject_id: parts[1].to_string(),
            identity: parse_field(parts[2], 2)?,
            alignment_length: parse_field(parts[3], 3)?,
            mismatches: parse_field(parts[4], 4)?,
            gap_opens: parse_field(parts[5], 5)?,
            q_start: parse_field(parts[6], 6)?,
            q_end: parse_field(parts[7], 7)?,
            s_start: parse_field(parts[8], 8)?,
            s_end: parse_field(parts[9], 9)?,
            evalue: parse_field(parts[10], 10)?,
            bit_score: parse_field(parts[11], 11)?,
        })
    }

    /// Values of the 12 tabular columns as strings, in file order
    pub fn to_record(&self) -> [String; TABULAR_COLUMNS] {
        [
            self.query_id.clone(),
            self.subject_id.clone(),
            self.identity.to_string(),
            self.alignment_length.to_string(),
            self.mismatches.to_string(),
            self.gap_opens.to_string(),
            self.q_start.to_string(),
            self.q_end.to_string(),
            self.s_start.to_string(),
            self.s_end.to_string(),
            format_evalue(self.evalue),
            self.bit_score.to_string(),
        ]
    }
}

fn parse_field<T: std::str::FromStr>(raw: &str, column: usize) -> Result<T, String> {
    let cleaned = raw.trim();
    cleaned.parse::<T>().map_err(|_| {
        format!(
            "column '{}' has non-numeric value '{}'",
            TABULAR_HEADER[column], cleaned
        )
    })
}

/// Format an e-value in scientific notation (`1e-10`), round-trippable through `f64::from_str`
pub fn format_evalue(evalue: f64) -> String {
    format!("{:e}", evalue)
}

/// Gene and family tokens extracted from a subject identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectFields {
    pub gene: Option<String>,
    pub family: Option<String>,
}

impl SubjectFields {
    /// Split `subject_id` on `|` and take the gene and family tokens when present
    pub fn from_subject_id(subject_id: &str) -> Self {
        let tokens: Vec<&str> = subject_id.split('|').collect();
        Self {
            gene: tokens.get(GENE_TOKEN_INDEX).map(|s| s.to_string()),
            family: tokens.get(FAMILY_TOKEN_INDEX).map(|s| s.to_string()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.gene.is_some() && self.family.is_some()
    }
}

/// An alignment hit together with its derived gene and family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedHit {
    pub hit: AlignmentHit,
    pub fields: SubjectFields,
}

impl AnnotatedHit {
    pub fn new(hit: AlignmentHit) -> Self {
        let fields = SubjectFields::from_subject_id(&hit.subject_id);
        Self { hit, fields }
    }

    /// Gene name, empty when the subject identifier has no gene token
    pub fn gene(&self) -> &str {
        self.fields.gene.as_deref().unwrap_or("")
    }

    /// Resistance family, empty when the subject identifier has no family token
    pub fn family(&self) -> &str {
        self.fields.family.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = "q1\tARG|db|xyz|123|blaTEM|beta-lactamase\t85.5\t300\t2\t1\t1\t300\t1\t300\t1e-10\t550.0";

    #[test]
    fn test_parse_tabular_line() {
        let hit = AlignmentHit::from_tabular_line(ROW).unwrap();
        assert_eq!(hit.query_id, "q1");
        assert_eq!(hit.subject_id, "ARG|db|xyz|123|blaTEM|beta-lactamase");
        assert_eq!(hit.identity, 85.5);
        assert_eq!(hit.alignment_length, 300);
        assert_eq!(hit.mismatches, 2);
        assert_eq!(hit.gap_opens, 1);
        assert_eq!(hit.q_end, 300);
        assert_eq!(hit.evalue, 1e-10);
        assert_eq!(hit.bit_score, 550.0);
    }

    #[test]
    fn test_parse_rejects_bad_rows() {
        let err = AlignmentHit::from_tabular_line("q1\tsubject\t99.0").unwrap_err();
        assert!(err.contains("expected 12 columns, found 3"));

        let bad = ROW.replace("85.5", "high");
        let err = AlignmentHit::from_tabular_line(&bad).unwrap_err();
        assert!(err.contains("identity"));
        assert!(err.contains("high"));
    }

    #[test]
    fn test_subject_fields() {
        let fields = SubjectFields::from_subject_id("ARG|db|xyz|123|blaTEM|beta-lactamase");
        assert_eq!(fields.gene.as_deref(), Some("blaTEM"));
        assert_eq!(fields.family.as_deref(), Some("beta-lactamase"));
        assert!(fields.is_complete());

        let fields = SubjectFields::from_subject_id("a|b|c");
        assert_eq!(fields, SubjectFields::default());

        // Five tokens: gene present, family missing
        let fields = SubjectFields::from_subject_id("a|b|c|d|tetM");
        assert_eq!(fields.gene.as_deref(), Some("tetM"));
        assert!(fields.family.is_none());
    }

    #[test]
    fn test_record_round_trip() {
        let hit = AlignmentHit::from_tabular_line(ROW).unwrap();
        let line = hit.to_record().join("\t");
        assert_eq!(AlignmentHit::from_tabular_line(&line).unwrap(), hit);
        assert_eq!(format_evalue(1e-10), "1e-10");
    }
}
