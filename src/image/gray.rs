//! Owned single-channel buffers: intensity projections and region masks.

use crate::frame::PixelSource;
use crate::geometry::Rec;
use crate::image::ImageView;
use crate::util::{FrameError, FrameResult};

/// Owned contiguous single-channel `u8` image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl GrayImage {
    /// Wraps a row-major buffer of exactly `width * height` bytes.
    pub fn from_vec(data: Vec<u8>, width: usize, height: usize) -> FrameResult<Self> {
        if width == 0 || height == 0 {
            return Err(FrameError::InvalidDimensions {
                rows: height,
                cols: width,
                channels: 1,
            });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(FrameError::InvalidDimensions {
                rows: height,
                cols: width,
                channels: 1,
            })?;
        if data.len() < needed {
            return Err(FrameError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(FrameError::InvalidDimensions {
                rows: height,
                cols: width,
                channels: 1,
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major pixel buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}

/// Reduces a multi-channel source to one intensity channel.
///
/// Each output pixel is the maximum over all channels of the source pixel,
/// not an average: a saturated single channel reads as full intensity.
pub fn intensity_projection<P: PixelSource + ?Sized>(src: &P) -> FrameResult<GrayImage> {
    let width = src.width();
    let height = src.height();
    let channels = src.channels();
    if width == 0 || height == 0 {
        return Err(FrameError::InvalidInput("frame has no pixels"));
    }
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let value = (0..channels)
                .map(|ch| src.pixel(row, col, ch))
                .max()
                .unwrap_or(0);
            data.push(value);
        }
    }
    GrayImage::from_vec(data, width, height)
}

/// Builds a `width x height` mask holding 1 inside `rec` (inclusive) and 0
/// elsewhere.
pub fn region_mask(width: usize, height: usize, rec: Rec) -> FrameResult<GrayImage> {
    let mut data = vec![0u8; width.saturating_mul(height)];
    let extent = Rec::tlbr(0, 0, height as i32 - 1, width as i32 - 1);
    let inside = rec.intersect(&extent);
    if !inside.empty() {
        let (left, right) = (inside.left() as usize, inside.right() as usize);
        for row in inside.top() as usize..=inside.bottom() as usize {
            let start = row * width;
            data[start + left..=start + right].fill(1);
        }
    }
    GrayImage::from_vec(data, width, height)
}
