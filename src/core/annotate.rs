// annotate.rs - Derive gene and family from subject identifiers

use crate::data::{AlignmentHit, AnnotatedHit};

/// Attach gene and family to each hit, in input order. Never fails.
pub fn annotate(hits: &[AlignmentHit]) -> Vec<AnnotatedHit> {
    hits.iter().cloned().map(AnnotatedHit::new).collect()
}

/// Owned variant of [`annotate`] for pipelines that no longer need the raw hits
pub fn annotate_owned(hits: Vec<AlignmentHit>) -> Vec<AnnotatedHit> {
    hits.into_iter().map(AnnotatedHit::new).collect()
}

/// Number of hits whose subject identifier lacked a gene or family token
pub fn count_incomplete(hits: &[AnnotatedHit]) -> usize {
    hits.iter().filter(|h| !h.fields.is_complete()).count()
}
