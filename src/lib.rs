//! ggframe locates target regions inside captured frames.
//!
//! Two tools are provided. [`GridAligner`] (and
//! [`Frame::best_grid_rec_centered_at`]) snaps a rectangle of a requested size
//! around a point to a pixel grid. [`PatternLocator`] finds the rectangle of a
//! scene that contains a smaller template frame by matching keypoint
//! descriptors; keypoint detection is an injected [`FeatureDetector`].

pub mod features;
pub mod frame;
pub mod geometry;
pub mod grid;
pub mod image;
pub mod locate;
pub mod matching;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use frame::io;

pub use features::{Descriptor, Feature, FeatureDetector, FeatureIndex, Keypoint};
pub use frame::{Frame, PixelSource};
pub use geometry::{Pos, Rec, Size};
pub use grid::GridAligner;
pub use image::{GrayImage, ImageView};
pub use locate::{FeatureRole, LocatorConfig, MatchObserver, PatternLocator, PatternMatch};
pub use matching::{
    BruteForceMatcher, DescriptorMatch, DescriptorMatcher, MatchPolicy, Norm, DEFAULT_RATIO,
};
pub use util::{FrameError, FrameResult};
