//! Single-channel image views handed to feature detectors.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than the width represents padded rows. Region views made with
//! [`ImageView::region`] are zero-copy and retain the original stride.

use crate::geometry::Rec;
use crate::util::{FrameError, FrameResult};

mod gray;

pub use gray::{intensity_projection, region_mask, GrayImage};

/// Borrowed 2D image view with an explicit stride, addressed as `(row, col)`.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> FrameResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> FrameResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(FrameError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Full extent as a rectangle in view coordinates.
    pub fn extent(&self) -> Rec {
        Rec::tlbr(0, 0, self.height as i32 - 1, self.width as i32 - 1)
    }

    /// Returns the element at `(row, col)` if it is within bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&'a T> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let idx = row.checked_mul(self.stride)?.checked_add(col)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for `row` with length `width`.
    pub fn row(&self, row: usize) -> Option<&'a [T]> {
        if row >= self.height {
            return None;
        }
        let start = row.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy view of `rec` clipped to this view.
    ///
    /// Fails with `InvalidInput` if the clipped rectangle is empty.
    pub fn region(&self, rec: Rec) -> FrameResult<ImageView<'a, T>> {
        let clipped = rec.intersect(&self.extent());
        if clipped.empty() {
            return Err(FrameError::InvalidInput(
                "region does not overlap the image",
            ));
        }
        let start = (clipped.top() as usize)
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(clipped.left() as usize))
            .ok_or(FrameError::InvalidDimensions {
                rows: self.height,
                cols: self.width,
                channels: 1,
            })?;
        let data = self.data.get(start..).ok_or(FrameError::BufferTooSmall {
            needed: start.saturating_add(1),
            got: self.data.len(),
        })?;
        ImageView::new(
            data,
            clipped.width() as usize,
            clipped.height() as usize,
            self.stride,
        )
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> FrameResult<usize> {
    if width == 0 || height == 0 || width > i32::MAX as usize || height > i32::MAX as usize {
        return Err(FrameError::InvalidDimensions {
            rows: height,
            cols: width,
            channels: 1,
        });
    }
    if stride < width {
        return Err(FrameError::InvalidInput("stride is smaller than width"));
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(FrameError::InvalidDimensions {
            rows: height,
            cols: width,
            channels: 1,
        })
}

#[cfg(test)]
mod tests {
    use super::ImageView;
    use crate::geometry::Rec;
    use crate::util::FrameError;

    #[test]
    fn rejects_short_buffer() {
        let data = [0u8; 3];
        let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
        assert_eq!(err, FrameError::BufferTooSmall { needed: 4, got: 3 });
    }

    #[test]
    fn region_is_zero_copy_and_clipped() {
        let data: Vec<u8> = (0u8..16).collect();
        let view = ImageView::from_slice(&data, 4, 4).unwrap();

        let roi = view.region(Rec::tlbr(1, 1, 2, 2)).unwrap();
        assert_eq!((roi.width(), roi.height(), roi.stride()), (2, 2, 4));
        assert_eq!(roi.row(0).unwrap(), &[5u8, 6u8]);
        assert_eq!(roi.row(1).unwrap(), &[9u8, 10u8]);
        assert_eq!(roi.get(0, 0).copied(), Some(5u8));
        assert!(roi.get(0, 2).is_none());

        let clipped = view.region(Rec::tlbr(3, 3, 10, 10)).unwrap();
        assert_eq!((clipped.width(), clipped.height()), (1, 1));
        assert_eq!(clipped.get(0, 0).copied(), Some(15u8));

        assert!(view.region(Rec::tlbr(5, 5, 6, 6)).is_err());
    }
}
