// filter.rs - Identity / e-value threshold filtering

use crate::data::{AlignmentHit, AnnotatedHit};
use crate::error::{ArgScanError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default minimum percent identity
pub const DEFAULT_MIN_IDENTITY: f64 = 70.0;

/// Default maximum e-value
pub const DEFAULT_MAX_EVALUE: f64 = 1e-5;

/// Whether hits sitting exactly on a threshold are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdMode {
    /// identity >= min and evalue <= max
    #[default]
    Inclusive,
    /// identity > min and evalue < max
    Strict,
}

impl FromStr for ThresholdMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inclusive" | ">=" => Ok(ThresholdMode::Inclusive),
            "strict" | "exclusive" | ">" => Ok(ThresholdMode::Strict),
            _ => Err(format!("Invalid threshold mode: {}. Use: inclusive, strict", s)),
        }
    }
}

impl ThresholdMode {
    pub fn description(&self) -> &str {
        match self {
            ThresholdMode::Inclusive => "inclusive (identity >= min, evalue <= max)",
            ThresholdMode::Strict => "strict (identity > min, evalue < max)",
        }
    }
}

/// Validated identity and e-value cutoffs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    min_identity: f64,
    max_evalue: f64,
    mode: ThresholdMode,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_identity: DEFAULT_MIN_IDENTITY,
            max_evalue: DEFAULT_MAX_EVALUE,
            mode: ThresholdMode::Inclusive,
        }
    }
}

impl Thresholds {
    /// Build thresholds, rejecting identity outside [0, 100] and non-positive e-values
    pub fn new(min_identity: f64, max_evalue: f64, mode: ThresholdMode) -> Result<Self> {
        if !min_identity.is_finite() || !(0.0..=100.0).contains(&min_identity) {
            return Err(ArgScanError::invalid_threshold(format!(
                "minimum identity must be between 0 and 100, got {}",
                min_identity
            )));
        }
        if !max_evalue.is_finite() || max_evalue <= 0.0 {
            return Err(ArgScanError::invalid_threshold(format!(
                "maximum e-value must be a positive number, got {}",
                max_evalue
            )));
        }
        Ok(Self {
            min_identity,
            max_evalue,
            mode,
        })
    }

    /// Build thresholds from user-supplied text, e.g. `"1e-5"`
    pub fn parse(min_identity: &str, max_evalue: &str, mode: ThresholdMode) -> Result<Self> {
        let identity = min_identity.trim().parse::<f64>().map_err(|_| {
            ArgScanError::invalid_threshold(format!(
                "minimum identity '{}' is not a number",
                min_identity
            ))
        })?;
        let evalue = max_evalue.trim().parse::<f64>().map_err(|_| {
            ArgScanError::invalid_threshold(format!(
                "maximum e-value '{}' is not a number",
                max_evalue
            ))
        })?;
        Self::new(identity, evalue, mode)
    }

    pub fn min_identity(&self) -> f64 {
        self.min_identity
    }

    pub fn max_evalue(&self) -> f64 {
        self.max_evalue
    }

    pub fn mode(&self) -> ThresholdMode {
        self.mode
    }

    /// Whether a single hit passes both cutoffs
    pub fn accepts(&self, hit: &AlignmentHit) -> bool {
        match self.mode {
            ThresholdMode::Inclusive => {
                hit.identity >= self.min_identity && hit.evalue <= self.max_evalue
            }
            ThresholdMode::Strict => hit.identity > self.min_identity && hit.evalue < self.max_evalue,
        }
    }
}

/// Keep hits passing both thresholds, in input order
pub fn filter(hits: &[AlignmentHit], thresholds: &Thresholds) -> Vec<AlignmentHit> {
    hits.iter()
        .filter(|hit| thresholds.accepts(hit))
        .cloned()
        .collect()
}

/// Optional include/exclude patterns on gene and family names
#[derive(Debug, Clone, Default)]
pub struct HitSelection {
    pub gene_include: Option<Regex>,
    pub gene_exclude: Option<Regex>,
    pub family_include: Option<Regex>,
    pub family_exclude: Option<Regex>,
}

impl HitSelection {
    pub fn is_empty(&self) -> bool {
        self.gene_include.is_none()
            && self.gene_exclude.is_none()
            && self.family_include.is_none()
            && self.family_exclude.is_none()
    }

    pub fn matches(&self, hit: &AnnotatedHit) -> bool {
        let gene = hit.gene();
        let family = hit.family();

        if let Some(regex) = &self.gene_include {
            if !regex.is_match(gene) {
                return false;
            }
        }
        if let Some(regex) = &self.gene_exclude {
            if regex.is_match(gene) {
                return false;
            }
        }
        if let Some(regex) = &self.family_include {
            if !regex.is_match(family) {
                return false;
            }
        }
        if let Some(regex) = &self.family_exclude {
            if regex.is_match(family) {
                return false;
            }
        }

        true
    }

    /// Retain matching hits in place, returning how many were removed
    pub fn apply(&self, hits: &mut Vec<AnnotatedHit>) -> usize {
        if self.is_empty() {
            return 0;
        }
        let before = hits.len();
        hits.retain(|hit| self.matches(hit));
        before - hits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(query_id: &str, identity: f64, evalue: f64) -> AlignmentHit {
        AlignmentHit {
            query_id: query_id.to_string(),
            subject_id: "ARG|db|xyz|123|blaTEM|beta-lactamase".to_string(),
            identity,
            alignment_length: 300,
            mismatches: 2,
            gap_opens: 1,
            q_start: 1,
            q_end: 300,
            s_start: 1,
            s_end: 300,
            evalue,
            bit_score: 550.0,
        }
    }

    fn sample_hits() -> Vec<AlignmentHit> {
        vec![
            hit("a", 99.0, 1e-50),
            hit("b", 65.0, 1e-30),
            hit("c", 85.5, 1e-10),
            hit("d", 90.0, 1e-3),
            hit("e", 70.0, 1e-5),
            hit("f", 100.0, 0.0),
            hit("g", 75.0, 2e-6),
        ]
    }

    fn ids(hits: &[AlignmentHit]) -> Vec<&str> {
        hits.iter().map(|h| h.query_id.as_str()).collect()
    }

    #[test]
    fn test_concrete_scenario() {
        let hits = vec![hit("q1", 85.5, 1e-10)];

        let kept = filter(&hits, &Thresholds::new(70.0, 1e-5, ThresholdMode::Inclusive).unwrap());
        assert_eq!(kept.len(), 1);

        let kept = filter(&hits, &Thresholds::new(90.0, 1e-5, ThresholdMode::Inclusive).unwrap());
        assert!(kept.is_empty());
    }

    #[test]
    fn test_boundary_inclusivity() {
        let hits = sample_hits();
        let inclusive = Thresholds::new(70.0, 1e-5, ThresholdMode::Inclusive).unwrap();
        let strict = Thresholds::new(70.0, 1e-5, ThresholdMode::Strict).unwrap();

        // "e" sits exactly on both cutoffs
        assert_eq!(ids(&filter(&hits, &inclusive)), vec!["a", "c", "e", "f", "g"]);
        assert_eq!(ids(&filter(&hits, &strict)), vec!["a", "c", "f", "g"]);
    }

    #[test]
    fn test_filter_preserves_order() {
        let hits = sample_hits();
        let kept = filter(&hits, &Thresholds::new(0.0, 1.0, ThresholdMode::Inclusive).unwrap());
        assert_eq!(ids(&kept), ids(&hits));
    }

    #[test]
    fn test_identity_monotonicity() {
        let hits = sample_hits();
        let levels = [0.0, 50.0, 70.0, 75.0, 85.5, 90.0, 99.0, 100.0];
        for mode in [ThresholdMode::Inclusive, ThresholdMode::Strict] {
            for pair in levels.windows(2) {
                let looser = filter(&hits, &Thresholds::new(pair[0], 1e-5, mode).unwrap());
                let tighter = filter(&hits, &Thresholds::new(pair[1], 1e-5, mode).unwrap());
                assert!(tighter.iter().all(|h| looser.contains(h)));
            }
        }
    }

    #[test]
    fn test_evalue_monotonicity() {
        let hits = sample_hits();
        let levels = [1e-60, 1e-30, 1e-10, 1e-5, 1e-3, 1.0, 10.0];
        for mode in [ThresholdMode::Inclusive, ThresholdMode::Strict] {
            for pair in levels.windows(2) {
                let smaller = filter(&hits, &Thresholds::new(60.0, pair[0], mode).unwrap());
                let larger = filter(&hits, &Thresholds::new(60.0, pair[1], mode).unwrap());
                assert!(smaller.iter().all(|h| larger.contains(h)));
                assert!(smaller.len() <= larger.len());
            }
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(filter(&[], &Thresholds::default()).is_empty());
    }

    #[test]
    fn test_threshold_validation() {
        assert!(Thresholds::new(-0.1, 1e-5, ThresholdMode::Inclusive).is_err());
        assert!(Thresholds::new(100.1, 1e-5, ThresholdMode::Inclusive).is_err());
        assert!(Thresholds::new(f64::NAN, 1e-5, ThresholdMode::Inclusive).is_err());
        assert!(Thresholds::new(70.0, 0.0, ThresholdMode::Inclusive).is_err());
        assert!(Thresholds::new(70.0, -1e-5, ThresholdMode::Inclusive).is_err());
        assert!(Thresholds::new(70.0, f64::INFINITY, ThresholdMode::Inclusive).is_err());
        assert!(Thresholds::new(0.0, 1e-300, ThresholdMode::Inclusive).is_ok());
        assert!(Thresholds::new(100.0, 10.0, ThresholdMode::Strict).is_ok());

        let err = Thresholds::parse("70", "tiny", ThresholdMode::Inclusive).unwrap_err();
        assert!(matches!(err, ArgScanError::InvalidThreshold { .. }));
        let parsed = Thresholds::parse(" 80 ", "1e-10", ThresholdMode::Strict).unwrap();
        assert_eq!(parsed.min_identity(), 80.0);
        assert_eq!(parsed.max_evalue(), 1e-10);
        assert_eq!(parsed.mode(), ThresholdMode::Strict);
    }

    #[test]
    fn test_hit_selection() {
        let mut annotated: Vec<AnnotatedHit> = vec![
            AnnotatedHit::new(AlignmentHit {
                subject_id: "a|b|c|d|blaTEM-1|beta-lactamase".to_string(),
                ..hit("q1", 99.0, 1e-50)
            }),
            AnnotatedHit::new(AlignmentHit {
                subject_id: "a|b|c|d|tetM|tetracycline".to_string(),
                ..hit("q2", 99.0, 1e-50)
            }),
            AnnotatedHit::new(AlignmentHit {
                subject_id: "a|b|c".to_string(),
                ..hit("q3", 99.0, 1e-50)
            }),
        ];

        let selection = HitSelection {
            family_exclude: Some(Regex::new("^tetra").unwrap()),
            ..Default::default()
        };
        assert_eq!(selection.apply(&mut annotated), 1);
        assert_eq!(annotated.len(), 2);
        assert_eq!(annotated[0].gene(), "blaTEM-1");
        assert_eq!(annotated[1].gene(), "");

        let selection = HitSelection {
            gene_include: Some(Regex::new("^bla").unwrap()),
            ..Default::default()
        };
        assert_eq!(selection.apply(&mut annotated), 1);
        assert_eq!(annotated[0].hit.query_id, "q1");

        assert_eq!(HitSelection::default().apply(&mut annotated), 0);
    }
}
