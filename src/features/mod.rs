//! Keypoints, descriptors and the detector capability the core is given.
//!
//! The core never implements a detector itself. Callers inject any type that
//! implements [`FeatureDetector`]; tests use deterministic fakes.
//!
//! Every detected keypoint travels together with its descriptor in a single
//! [`Feature`] record, so indices into a feature list address both at once.

mod index;

pub use index::FeatureIndex;

use crate::geometry::Pos;
use crate::image::ImageView;
use crate::util::FrameResult;

/// Salient image location reported by a detector.
///
/// Only the location is interpreted by this crate; the remaining fields are
/// carried through untouched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keypoint {
    /// Row coordinate (sub-pixel).
    pub row: f32,
    /// Column coordinate (sub-pixel).
    pub col: f32,
    /// Diameter of the meaningful neighbourhood.
    pub size: f32,
    /// Orientation in degrees, negative when not computed.
    pub angle: f32,
    /// Detector response; higher is stronger.
    pub response: f32,
    /// Pyramid octave the keypoint was found in.
    pub octave: i32,
}

impl Keypoint {
    /// Creates a keypoint at `(row, col)` with neutral metadata.
    pub fn at(row: f32, col: f32) -> Self {
        Self {
            row,
            col,
            size: 1.0,
            angle: -1.0,
            response: 0.0,
            octave: 0,
        }
    }

    /// Integer pixel containing the keypoint.
    pub fn pos(&self) -> Pos {
        Pos::rc(self.row.floor() as i32, self.col.floor() as i32)
    }
}

/// Fixed-dimension feature vector.
#[derive(Clone, Debug, PartialEq)]
pub struct Descriptor(Vec<f32>);

impl Descriptor {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl From<Vec<f32>> for Descriptor {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// A keypoint paired with the descriptor computed for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub keypoint: Keypoint,
    pub descriptor: Descriptor,
}

impl Feature {
    pub fn new(keypoint: Keypoint, descriptor: impl Into<Descriptor>) -> Self {
        Self {
            keypoint,
            descriptor: descriptor.into(),
        }
    }
}

/// Keypoint detection and description capability.
pub trait FeatureDetector {
    /// Detects keypoints where `mask` is non-zero.
    ///
    /// `image` and `mask` always have the same dimensions.
    fn detect(
        &self,
        image: ImageView<'_, u8>,
        mask: ImageView<'_, u8>,
    ) -> FrameResult<Vec<Keypoint>>;

    /// Computes a descriptor for each keypoint.
    ///
    /// Implementations may drop keypoints they cannot describe (e.g. too
    /// close to the border); each returned feature keeps its own keypoint.
    fn compute(
        &self,
        image: ImageView<'_, u8>,
        keypoints: Vec<Keypoint>,
    ) -> FrameResult<Vec<Feature>>;

    /// Detects and describes in one pass.
    fn detect_and_compute(
        &self,
        image: ImageView<'_, u8>,
        mask: ImageView<'_, u8>,
    ) -> FrameResult<Vec<Feature>> {
        let keypoints = self.detect(image, mask)?;
        self.compute(image, keypoints)
    }
}

impl<D: FeatureDetector + ?Sized> FeatureDetector for &D {
    fn detect(
        &self,
        image: ImageView<'_, u8>,
        mask: ImageView<'_, u8>,
    ) -> FrameResult<Vec<Keypoint>> {
        (**self).detect(image, mask)
    }

    fn compute(
        &self,
        image: ImageView<'_, u8>,
        keypoints: Vec<Keypoint>,
    ) -> FrameResult<Vec<Feature>> {
        (**self).compute(image, keypoints)
    }

    fn detect_and_compute(
        &self,
        image: ImageView<'_, u8>,
        mask: ImageView<'_, u8>,
    ) -> FrameResult<Vec<Feature>> {
        (**self).detect_and_compute(image, mask)
    }
}

#[cfg(test)]
mod tests {
    use super::Keypoint;
    use crate::geometry::Pos;

    #[test]
    fn keypoint_pos_floors_subpixel_location() {
        assert_eq!(Keypoint::at(3.7, 9.2).pos(), Pos::rc(3, 9));
        assert_eq!(Keypoint::at(-0.5, 0.0).pos(), Pos::rc(-1, 0));
    }
}
