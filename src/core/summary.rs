// summary.rs - Per-family counts and best-hit ranking for display

use crate::data::AnnotatedHit;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Label used for hits without a family token
pub const UNKNOWN_FAMILY: &str = "(unknown)";

/// Hit counts for one resistance family
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilySummary {
    pub family: String,
    pub hits: usize,
    pub genes: Vec<String>,
    pub best_identity: f64,
}

/// Group hits by family; families sorted by hit count, then name
pub fn summarize_families(hits: &[AnnotatedHit]) -> Vec<FamilySummary> {
    let mut groups: BTreeMap<String, FamilySummary> = BTreeMap::new();

    for hit in hits {
        let family = match hit.family() {
            "" => UNKNOWN_FAMILY,
            name => name,
        };
        let entry = groups
            .entry(family.to_string())
            .or_insert_with(|| FamilySummary {
                family: family.to_string(),
                hits: 0,
                genes: Vec::new(),
                best_identity: hit.hit.identity,
            });
        entry.hits += 1;
        if hit.hit.identity > entry.best_identity {
            entry.best_identity = hit.hit.identity;
        }
        let gene = hit.gene();
        if !gene.is_empty() && !entry.genes.iter().any(|g| g == gene) {
            entry.genes.push(gene.to_string());
        }
    }

    let mut summaries: Vec<FamilySummary> = groups.into_values().collect();
    summaries.sort_by(|a, b| b.hits.cmp(&a.hits).then_with(|| a.family.cmp(&b.family)));
    for summary in &mut summaries {
        summary.genes.sort();
    }
    summaries
}

/// Best hits first: lowest e-value, then highest identity, then highest bit score.
/// Stable, so ties keep input order.
pub fn rank_hits(hits: &[AnnotatedHit]) -> Vec<&AnnotatedHit> {
    let mut ranked: Vec<&AnnotatedHit> = hits.iter().collect();
    ranked.sort_by(|a, b| {
        a.hit
            .evalue
            .partial_cmp(&b.hit.evalue)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.hit
                    .identity
                    .partial_cmp(&a.hit.identity)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| {
                b.hit
                    .bit_score
                    .partial_cmp(&a.hit.bit_score)
                    .unwrap_or(Ordering::Equal)
            })
    });
    ranked
}
