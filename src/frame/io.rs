//! Convenience helpers for loading and saving frames via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::frame::Frame;
use crate::util::{FrameError, FrameResult};
use std::path::Path;

/// Creates a three-channel RGB frame from a dynamic image.
pub fn frame_from_dynamic_image(img: &image::DynamicImage) -> FrameResult<Frame> {
    let rgb = img.to_rgb8();
    let cols = rgb.width() as usize;
    let rows = rgb.height() as usize;
    Frame::from_vec(rgb.into_raw(), rows, cols, 3)
}

/// Loads an image from disk as an RGB frame.
pub fn load_frame<P: AsRef<Path>>(path: P) -> FrameResult<Frame> {
    let img = image::open(path).map_err(|err| FrameError::ImageIo {
        reason: err.to_string(),
    })?;
    frame_from_dynamic_image(&img)
}

/// Converts a frame to an RGB image.
///
/// One-channel frames are replicated to gray; frames with more than three
/// channels keep the first three.
pub fn frame_to_rgb_image(frame: &Frame) -> FrameResult<image::RgbImage> {
    if frame.is_empty() {
        return Err(FrameError::InvalidInput("cannot encode an empty frame"));
    }
    let channels = frame.n_channels();
    let mut data = Vec::with_capacity(frame.n_rows() * frame.n_cols() * 3);
    for px in frame.data().chunks_exact(channels) {
        if channels >= 3 {
            data.extend_from_slice(&px[..3]);
        } else {
            data.extend_from_slice(&[px[0]; 3]);
        }
    }
    image::RgbImage::from_raw(frame.n_cols() as u32, frame.n_rows() as u32, data).ok_or(
        FrameError::BufferTooSmall {
            needed: frame.n_rows() * frame.n_cols() * 3,
            got: frame.data().len(),
        },
    )
}

/// Saves a frame to disk; the format follows the file extension.
pub fn save_frame<P: AsRef<Path>>(frame: &Frame, path: P) -> FrameResult<()> {
    frame_to_rgb_image(frame)?
        .save(path)
        .map_err(|err| FrameError::ImageIo {
            reason: err.to_string(),
        })
}
