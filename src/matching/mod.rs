//! Descriptor matching capability and its brute-force implementation.
//!
//! Matching compares *query* features (from the template) against *train*
//! features (from the scene). Indices in a [`DescriptorMatch`] refer to
//! positions in those two feature lists.

mod filter;
mod topk;

pub use filter::{select_matches, MatchPolicy, DEFAULT_RATIO};

use crate::features::Feature;
use crate::util::math::{l1_distance, l2_distance};
use crate::util::{FrameError, FrameResult};
use topk::NearestK;

/// Correspondence between a query feature and a train feature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DescriptorMatch {
    /// Index into the query feature list.
    pub query_idx: usize,
    /// Index into the train feature list.
    pub train_idx: usize,
    /// Descriptor distance of this pair.
    pub distance: f32,
    /// Distance of the second-nearest train feature, when known.
    pub second_distance: Option<f32>,
}

/// Descriptor matching capability.
pub trait DescriptorMatcher {
    /// Best train match for every query feature.
    ///
    /// Returns one match per query unless `train` is empty.
    fn match_best(&self, query: &[Feature], train: &[Feature]) -> FrameResult<Vec<DescriptorMatch>>;

    /// Up to `k` nearest train matches per query, sorted by ascending distance.
    ///
    /// The outer vector has one entry per query feature.
    fn knn_match(
        &self,
        query: &[Feature],
        train: &[Feature],
        k: usize,
    ) -> FrameResult<Vec<Vec<DescriptorMatch>>>;
}

/// Distance used to compare descriptors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Norm {
    /// Sum of absolute differences.
    L1,
    /// Euclidean distance.
    #[default]
    L2,
}

/// Exhaustive matcher comparing every query against every train descriptor.
///
/// Cost is `O(|query| * |train| * dim)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BruteForceMatcher {
    norm: Norm,
}

impl BruteForceMatcher {
    pub fn new(norm: Norm) -> Self {
        Self { norm }
    }

    pub fn norm(&self) -> Norm {
        self.norm
    }

    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self.norm {
            Norm::L1 => l1_distance(a, b),
            Norm::L2 => l2_distance(a, b),
        }
    }
}

impl DescriptorMatcher for BruteForceMatcher {
    fn match_best(&self, query: &[Feature], train: &[Feature]) -> FrameResult<Vec<DescriptorMatch>> {
        Ok(self
            .knn_match(query, train, 1)?
            .into_iter()
            .filter_map(|nearest| nearest.into_iter().next())
            .collect())
    }

    fn knn_match(
        &self,
        query: &[Feature],
        train: &[Feature],
        k: usize,
    ) -> FrameResult<Vec<Vec<DescriptorMatch>>> {
        check_dims(query, train)?;
        let mut out = Vec::with_capacity(query.len());
        for (query_idx, q) in query.iter().enumerate() {
            let mut nearest = NearestK::new(k);
            for (train_idx, t) in train.iter().enumerate() {
                nearest.push(DescriptorMatch {
                    query_idx,
                    train_idx,
                    distance: self.distance(q.descriptor.as_slice(), t.descriptor.as_slice()),
                    second_distance: None,
                });
            }
            out.push(nearest.into_sorted_asc());
        }
        Ok(out)
    }
}

fn check_dims(query: &[Feature], train: &[Feature]) -> FrameResult<()> {
    let dim = match query.first().or(train.first()) {
        Some(f) => f.descriptor.dim(),
        None => return Ok(()),
    };
    if query
        .iter()
        .chain(train.iter())
        .any(|f| f.descriptor.dim() != dim)
    {
        return Err(FrameError::InvalidInput(
            "descriptors differ in dimension",
        ));
    }
    Ok(())
}
