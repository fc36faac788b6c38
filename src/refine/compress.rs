//! Label compression.
//!
//! Maps raw signatures to dense labels `0..U-1`. Distinct signatures are
//! numbered in ascending `Ord` order, so for a fixed set of signatures the
//! resulting labels are reproducible.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Entity, Label, Labeling};
use super::error::RefinementError;

/// Result of compressing one generation's signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compression {
    /// New label of every entity.
    pub labels: Labeling,
    /// Number of distinct signatures (and therefore labels).
    pub distinct: usize,
}

/// Compress `signatures` into dense labels.
///
/// Every entity's label is the rank of its signature among the distinct
/// signatures. Fails if there are more distinct signatures than `Label`
/// values.
pub fn compress<S: Ord>(signatures: &BTreeMap<Entity, S>) -> Result<Compression, RefinementError> {
    let distinct: BTreeSet<&S> = signatures.values().collect();
    let ranks: BTreeMap<&S, Label> = distinct
        .iter()
        .enumerate()
        .map(|(rank, sig)| label_for_rank(rank).map(|label| (*sig, label)))
        .collect::<Result<_, RefinementError>>()?;

    let labels = signatures
        .iter()
        .filter_map(|(entity, sig)| ranks.get(sig).map(|label| (*entity, *label)))
        .collect();

    Ok(Compression {
        labels,
        distinct: ranks.len(),
    })
}

fn label_for_rank(rank: usize) -> Result<Label, RefinementError> {
    u32::try_from(rank)
        .map(Label::new)
        .map_err(|_| RefinementError::LabelOverflow(rank))
}
