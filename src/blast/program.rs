// program.rs - BLAST+ program selection

use crate::data::MoleculeType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// BLAST+ search programs usable for ARG screening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlastProgram {
    Blastn,
    Blastp,
    Blastx,
    Tblastn,
}

impl FromStr for BlastProgram {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blastn" => Ok(BlastProgram::Blastn),
            "blastp" => Ok(BlastProgram::Blastp),
            "blastx" => Ok(BlastProgram::Blastx),
            "tblastn" => Ok(BlastProgram::Tblastn),
            _ => Err(format!(
                "Invalid BLAST program: {}. Use: blastn, blastp, blastx, tblastn",
                s
            )),
        }
    }
}

impl BlastProgram {
    /// Executable name
    pub fn binary_name(&self) -> &'static str {
        match self {
            BlastProgram::Blastn => "blastn",
            BlastProgram::Blastp => "blastp",
            BlastProgram::Blastx => "blastx",
            BlastProgram::Tblastn => "tblastn",
        }
    }

    pub fn query_type(&self) -> MoleculeType {
        match self {
            BlastProgram::Blastn | BlastProgram::Blastx => MoleculeType::Nucleotide,
            BlastProgram::Blastp | BlastProgram::Tblastn => MoleculeType::Protein,
        }
    }

    pub fn database_type(&self) -> MoleculeType {
        match self {
            BlastProgram::Blastn | BlastProgram::Tblastn => MoleculeType::Nucleotide,
            BlastProgram::Blastp | BlastProgram::Blastx => MoleculeType::Protein,
        }
    }

    /// Program matching a query and database molecule type
    pub fn for_query(query: MoleculeType, database: MoleculeType) -> Self {
        match (query, database) {
            (MoleculeType::Nucleotide, MoleculeType::Nucleotide) => BlastProgram::Blastn,
            (MoleculeType::Nucleotide, MoleculeType::Protein) => BlastProgram::Blastx,
            (MoleculeType::Protein, MoleculeType::Protein) => BlastProgram::Blastp,
            (MoleculeType::Protein, MoleculeType::Nucleotide) => BlastProgram::Tblastn,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            BlastProgram::Blastn => "nucleotide query vs nucleotide database",
            BlastProgram::Blastp => "protein query vs protein database",
            BlastProgram::Blastx => "translated nucleotide query vs protein database",
            BlastProgram::Tblastn => "protein query vs translated nucleotide database",
        }
    }
}

const NUCLEOTIDE_DB_EXTENSIONS: [&str; 5] = ["nal", "nin", "nsq", "nhr", "ndb"];
const PROTEIN_DB_EXTENSIONS: [&str; 5] = ["pal", "pin", "psq", "phr", "pdb"];

/// Infer the molecule type of a `makeblastdb` database from the files next to its prefix
pub fn detect_database_type(db_prefix: &Path) -> Option<MoleculeType> {
    let has_any = |extensions: &[&str]| {
        extensions.iter().any(|ext| {
            let mut name = db_prefix.as_os_str().to_os_string();
            name.push(".");
            name.push(ext);
            Path::new(&name).exists()
        })
    };

    if has_any(&PROTEIN_DB_EXTENSIONS) {
        Some(MoleculeType::Protein)
    } else if has_any(&NUCLEOTIDE_DB_EXTENSIONS) {
        Some(MoleculeType::Nucleotide)
    } else {
        None
    }
}
