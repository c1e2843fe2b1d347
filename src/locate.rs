//! Locating a template frame inside a scene frame.
//!
//! The locator extracts features from both frames over their full extents,
//! matches template (query) features against scene (train) features, filters
//! the matches with a [`MatchPolicy`] and returns the bounding rectangle of
//! the accepted scene keypoints, clipped to the scene.

use crate::features::{FeatureDetector, FeatureIndex};
use crate::frame::PixelSource;
use crate::geometry::Rec;
use crate::matching::{
    select_matches, BruteForceMatcher, DescriptorMatch, DescriptorMatcher, MatchPolicy,
};
use crate::trace::{trace_event, trace_span};
use crate::util::{FrameError, FrameResult};

/// Configuration for pattern location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocatorConfig {
    /// Match acceptance policy.
    pub policy: MatchPolicy,
    /// Minimum number of accepted matches; fewer is reported as no match.
    pub min_matches: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            policy: MatchPolicy::default(),
            min_matches: 1,
        }
    }
}

/// Which frame a feature index was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureRole {
    /// The pattern being searched for (query side).
    Template,
    /// The frame being searched (train side).
    Scene,
}

/// Optional hook for inspecting intermediate results, e.g. to render
/// keypoints or matches for debugging.
///
/// Observers are never required; all methods default to doing nothing.
pub trait MatchObserver {
    fn on_features(&mut self, _role: FeatureRole, _index: &FeatureIndex) {}

    fn on_matches(
        &mut self,
        _template: &FeatureIndex,
        _scene: &FeatureIndex,
        _accepted: &[DescriptorMatch],
    ) {
    }
}

/// Result of a successful location.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatch {
    /// Bounding rectangle in scene coordinates.
    pub rec: Rec,
    /// Accepted matches; `query_idx` indexes template features and
    /// `train_idx` indexes scene features.
    pub matches: Vec<DescriptorMatch>,
}

/// Finds a template frame inside a scene frame using feature matching.
pub struct PatternLocator<D, M = BruteForceMatcher> {
    detector: D,
    matcher: M,
    cfg: LocatorConfig,
}

impl<D: FeatureDetector> PatternLocator<D> {
    /// Creates a locator with a brute-force L2 matcher and default config.
    pub fn new(detector: D) -> Self {
        Self {
            detector,
            matcher: BruteForceMatcher::default(),
            cfg: LocatorConfig::default(),
        }
    }
}

impl<D: FeatureDetector, M: DescriptorMatcher> PatternLocator<D, M> {
    /// Replaces the descriptor matcher.
    pub fn with_matcher<N: DescriptorMatcher>(self, matcher: N) -> PatternLocator<D, N> {
        PatternLocator {
            detector: self.detector,
            matcher,
            cfg: self.cfg,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: LocatorConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.cfg
    }

    /// Returns the scene rectangle containing `template`.
    ///
    /// Fails with `InvalidInput` if either frame is empty and with
    /// `NoMatchFound` if too few matches survive filtering.
    pub fn find_pattern<S, T>(&self, scene: &S, template: &T) -> FrameResult<Rec>
    where
        S: PixelSource + ?Sized,
        T: PixelSource + ?Sized,
    {
        self.run(scene, template, None).map(|found| found.rec)
    }

    /// Like [`find_pattern`](Self::find_pattern) but reports intermediate
    /// features and accepted matches to `observer`.
    pub fn find_pattern_observed<S, T>(
        &self,
        scene: &S,
        template: &T,
        observer: &mut dyn MatchObserver,
    ) -> FrameResult<Rec>
    where
        S: PixelSource + ?Sized,
        T: PixelSource + ?Sized,
    {
        self.run(scene, template, Some(observer)).map(|found| found.rec)
    }

    /// Returns the rectangle together with the accepted matches.
    pub fn locate<S, T>(&self, scene: &S, template: &T) -> FrameResult<PatternMatch>
    where
        S: PixelSource + ?Sized,
        T: PixelSource + ?Sized,
    {
        self.run(scene, template, None)
    }

    fn run<S, T>(
        &self,
        scene: &S,
        template: &T,
        mut observer: Option<&mut dyn MatchObserver>,
    ) -> FrameResult<PatternMatch>
    where
        S: PixelSource + ?Sized,
        T: PixelSource + ?Sized,
    {
        if scene.is_empty() {
            return Err(FrameError::InvalidInput("scene frame has no pixels"));
        }
        if template.is_empty() {
            return Err(FrameError::InvalidInput("template frame has no pixels"));
        }
        let _span = trace_span!(
            "find_pattern",
            scene_rows = scene.height(),
            scene_cols = scene.width()
        )
        .entered();

        let template_index = FeatureIndex::build(template, None, &self.detector)?;
        let scene_index = FeatureIndex::build(scene, None, &self.detector)?;
        if let Some(obs) = observer.as_deref_mut() {
            obs.on_features(FeatureRole::Template, &template_index);
            obs.on_features(FeatureRole::Scene, &scene_index);
        }

        let (candidates, matches) = select_matches(
            &self.matcher,
            self.cfg.policy,
            template_index.features(),
            scene_index.features(),
        )?;
        if let Some(obs) = observer.as_deref_mut() {
            obs.on_matches(&template_index, &scene_index, &matches);
        }
        if matches.is_empty() || matches.len() < self.cfg.min_matches {
            return Err(FrameError::NoMatchFound {
                candidates,
                accepted: matches.len(),
            });
        }

        let rec = bounding_rec(&scene_index, &matches).intersect(&scene.extent());
        if rec.empty() {
            return Err(FrameError::NoMatchFound {
                candidates,
                accepted: matches.len(),
            });
        }
        trace_event!(
            "pattern_located",
            top = rec.top(),
            left = rec.left(),
            bottom = rec.bottom(),
            right = rec.right()
        );
        Ok(PatternMatch { rec, matches })
    }
}

/// Bounding rectangle of the scene keypoints referenced by `matches`,
/// [`Rec::EMPTY`] when none are referenced.
fn bounding_rec(scene: &FeatureIndex, matches: &[DescriptorMatch]) -> Rec {
    let features = scene.features();
    let mut positions = matches
        .iter()
        .filter_map(|m| features.get(m.train_idx))
        .map(|f| f.keypoint.pos());
    let Some(first) = positions.next() else {
        return Rec::EMPTY;
    };
    let (mut min_row, mut max_row) = (first.row(), first.row());
    let (mut min_col, mut max_col) = (first.col(), first.col());
    for pos in positions {
        min_row = min_row.min(pos.row());
        max_row = max_row.max(pos.row());
        min_col = min_col.min(pos.col());
        max_col = max_col.max(pos.col());
    }
    Rec::tlbr(min_row, min_col, max_row, max_col)
}

#[cfg(test)]
mod tests {
    use super::bounding_rec;
    use crate::features::{Feature, FeatureIndex, Keypoint};
    use crate::geometry::Rec;
    use crate::matching::DescriptorMatch;

    fn m(train_idx: usize) -> DescriptorMatch {
        DescriptorMatch {
            query_idx: 0,
            train_idx,
            distance: 0.0,
            second_distance: None,
        }
    }

    #[test]
    fn bounding_rec_spans_referenced_keypoints_only() {
        let features = vec![
            Feature::new(Keypoint::at(5.0, 7.0), vec![0.0]),
            Feature::new(Keypoint::at(2.5, 9.9), vec![0.0]),
            Feature::new(Keypoint::at(90.0, 90.0), vec![0.0]),
        ];
        let index = FeatureIndex::from_features(features, Rec::tlbr(0, 0, 99, 99)).unwrap();
        let rec = bounding_rec(&index, &[m(0), m(1)]);
        assert_eq!(rec, Rec::tlbr(2, 7, 5, 9));
    }

    #[test]
    fn bounding_rec_of_nothing_is_empty() {
        let index = FeatureIndex::from_features(Vec::new(), Rec::EMPTY).unwrap();
        assert!(bounding_rec(&index, &[]).empty());
    }
}
