//! Feature extraction over a frame or a region of it.

use crate::features::{Feature, FeatureDetector, Keypoint};
use crate::frame::PixelSource;
use crate::geometry::Rec;
use crate::image::{intensity_projection, region_mask};
use crate::trace::{trace_event, trace_span};
use crate::util::{FrameError, FrameResult};

/// Features extracted from one frame.
///
/// The index is a snapshot: it does not observe later writes to the frame and
/// must be rebuilt after the pixels change.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureIndex {
    features: Vec<Feature>,
    region: Rec,
    descriptor_dim: usize,
}

impl FeatureIndex {
    /// Extracts features from `frame`, restricted to `region` when given.
    ///
    /// The region is clipped to the frame. The detector sees the max-channel
    /// intensity projection and a binary mask of the region; keypoints it
    /// reports outside the region are discarded.
    pub fn build<P, D>(frame: &P, region: Option<Rec>, detector: &D) -> FrameResult<Self>
    where
        P: PixelSource + ?Sized,
        D: FeatureDetector + ?Sized,
    {
        if frame.is_empty() {
            return Err(FrameError::InvalidInput("frame has no pixels"));
        }
        let extent = frame.extent();
        let region = match region {
            Some(rec) => rec.intersect(&extent),
            None => extent,
        };
        let _span = trace_span!(
            "feature_index",
            rows = frame.height(),
            cols = frame.width(),
            region = %region
        )
        .entered();

        let image = intensity_projection(frame)?;
        let mask = region_mask(image.width(), image.height(), region)?;
        let keypoints: Vec<Keypoint> = detector
            .detect(image.view(), mask.view())?
            .into_iter()
            .filter(|kp| region.contains_pos(kp.pos()))
            .collect();
        trace_event!("keypoints_detected", count = keypoints.len());

        let features = detector.compute(image.view(), keypoints)?;
        Self::from_features(features, region)
    }

    /// Wraps precomputed features, e.g. from a caller-held cache.
    pub fn from_features(features: Vec<Feature>, region: Rec) -> FrameResult<Self> {
        let descriptor_dim = features.first().map_or(0, |f| f.descriptor.dim());
        if features
            .iter()
            .any(|f| f.descriptor.dim() != descriptor_dim)
        {
            return Err(FrameError::InvalidInput(
                "descriptors differ in dimension",
            ));
        }
        Ok(Self {
            features,
            region,
            descriptor_dim,
        })
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Region the features were extracted from, in frame coordinates.
    pub fn region(&self) -> Rec {
        self.region
    }

    /// Shared descriptor dimension, 0 when there are no features.
    pub fn descriptor_dim(&self) -> usize {
        self.descriptor_dim
    }

    pub fn keypoints(&self) -> impl Iterator<Item = &Keypoint> + '_ {
        self.features.iter().map(|f| &f.keypoint)
    }
}
