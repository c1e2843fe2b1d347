//! Match acceptance policies.

use crate::features::Feature;
use crate::matching::{DescriptorMatch, DescriptorMatcher};
use crate::trace::trace_event;
use crate::util::{FrameError, FrameResult};

/// Default best/second-best distance ratio for [`MatchPolicy::RatioTest`].
pub const DEFAULT_RATIO: f32 = 0.8;

/// How candidate matches are accepted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MatchPolicy {
    /// Accept the single best match of every query, unfiltered.
    NearestNeighbor,
    /// Accept a query's best match only if
    /// `best_distance / second_best_distance < ratio`.
    ///
    /// Queries with fewer than two candidates, or whose second-best distance
    /// is zero, are ambiguous and rejected.
    RatioTest { ratio: f32 },
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self::RatioTest {
            ratio: DEFAULT_RATIO,
        }
    }
}

impl MatchPolicy {
    /// Ratio-test policy with a validated threshold in `(0, 1]`.
    pub fn ratio_test(ratio: f32) -> FrameResult<Self> {
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(FrameError::PreconditionViolation(
                "ratio threshold must be in (0, 1]",
            ));
        }
        Ok(Self::RatioTest { ratio })
    }
}

/// Matches `query` against `train` and applies `policy`.
///
/// Returns the number of candidate queries considered together with the
/// accepted matches, in query order.
pub fn select_matches<M>(
    matcher: &M,
    policy: MatchPolicy,
    query: &[Feature],
    train: &[Feature],
) -> FrameResult<(usize, Vec<DescriptorMatch>)>
where
    M: DescriptorMatcher + ?Sized,
{
    let (candidates, accepted) = match policy {
        MatchPolicy::NearestNeighbor => {
            let best = matcher.match_best(query, train)?;
            (best.len(), best)
        }
        MatchPolicy::RatioTest { ratio } => {
            let knn = matcher.knn_match(query, train, 2)?;
            let candidates = knn.iter().filter(|nearest| !nearest.is_empty()).count();
            let accepted = knn
                .iter()
                .filter_map(|nearest| ratio_accept(nearest, ratio))
                .collect();
            (candidates, accepted)
        }
    };
    trace_event!(
        "matches_filtered",
        candidates = candidates,
        accepted = accepted.len()
    );
    Ok((candidates, accepted))
}

fn ratio_accept(nearest: &[DescriptorMatch], ratio: f32) -> Option<DescriptorMatch> {
    let [best, second, ..] = nearest else {
        return None;
    };
    if second.distance <= 0.0 || best.distance / second.distance >= ratio {
        return None;
    }
    Some(DescriptorMatch {
        second_distance: Some(second.distance),
        ..*best
    })
}
