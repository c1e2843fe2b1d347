//! Owned multi-channel frames and the pixel access trait the core reads through.
//!
//! A [`Frame`] stores interleaved `u8` channels in row-major order. It carries
//! a grid cell size used by [`Frame::best_grid_rec_centered_at`]. Any other
//! pixel buffer can take part in pattern location by implementing
//! [`PixelSource`].

mod draw;
#[cfg(feature = "image-io")]
pub mod io;

use crate::geometry::{Pos, Rec, Size};
use crate::grid::GridAligner;
use crate::util::{FrameError, FrameResult};

/// Read-only pixel access used by feature extraction.
pub trait PixelSource {
    /// Number of columns.
    fn width(&self) -> usize;
    /// Number of rows.
    fn height(&self) -> usize;
    /// Number of interleaved channels per pixel.
    fn channels(&self) -> usize;
    /// Value of one channel; callers stay within the reported bounds.
    fn pixel(&self, row: usize, col: usize, channel: usize) -> u8;

    /// Returns true if the source has no rows or no columns.
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Full extent as a rectangle, [`Rec::EMPTY`] for an empty source.
    fn extent(&self) -> Rec {
        if self.is_empty() {
            return Rec::EMPTY;
        }
        Rec::tlbr(0, 0, self.height() as i32 - 1, self.width() as i32 - 1)
    }
}

/// Owned interleaved pixel buffer with a grid cell size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    rows: usize,
    cols: usize,
    channels: usize,
    grid: GridAligner,
}

impl Default for Frame {
    /// The empty 0x0 frame with one channel.
    fn default() -> Self {
        Self {
            data: Vec::new(),
            rows: 0,
            cols: 0,
            channels: 1,
            grid: GridAligner::default(),
        }
    }
}

impl Frame {
    /// Creates a zero-filled frame.
    pub fn new(rows: usize, cols: usize, channels: usize) -> FrameResult<Self> {
        let len = buffer_len(rows, cols, channels)?;
        Self::from_vec(vec![0u8; len], rows, cols, channels)
    }

    /// Wraps an interleaved row-major buffer of exactly
    /// `rows * cols * channels` bytes.
    pub fn from_vec(data: Vec<u8>, rows: usize, cols: usize, channels: usize) -> FrameResult<Self> {
        let needed = buffer_len(rows, cols, channels)?;
        if data.len() < needed {
            return Err(FrameError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(FrameError::InvalidDimensions {
                rows,
                cols,
                channels,
            });
        }
        Ok(Self {
            data,
            rows,
            cols,
            channels,
            grid: GridAligner::default(),
        })
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    pub fn n_cols(&self) -> usize {
        self.cols
    }

    pub fn n_channels(&self) -> usize {
        self.channels
    }

    /// Index of the last row, 0 for an empty frame.
    pub fn last_row(&self) -> usize {
        self.rows.saturating_sub(1)
    }

    /// Index of the last column, 0 for an empty frame.
    pub fn last_col(&self) -> usize {
        self.cols.saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn frame_rec(&self) -> Rec {
        self.extent()
    }

    /// Returns the interleaved pixel buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn grid_size(&self) -> i32 {
        self.grid.cell_size()
    }

    /// Sets the grid cell size used for target rectangles and grid drawing.
    pub fn set_grid_size(&mut self, size: i32) -> FrameResult<()> {
        self.grid = GridAligner::new(size)?;
        Ok(())
    }

    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        self.index(row, col, channel).map(|idx| self.data[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, channel: usize, value: u8) -> FrameResult<()> {
        let idx = self
            .index(row, col, channel)
            .ok_or(FrameError::OutOfBounds { row, col, channel })?;
        self.data[idx] = value;
        Ok(())
    }

    /// Grid-aligned rectangle of at least `size` centered at `center`,
    /// clipped to this frame. See [`GridAligner`] for the snapping rules.
    pub fn best_grid_rec_centered_at(&self, center: Pos, size: Size) -> Rec {
        self.grid
            .best_rec_centered_at(center, size, self.frame_rec())
    }

    /// Copies the part of `rec` that overlaps this frame into a new frame.
    pub fn crop(&self, rec: Rec) -> FrameResult<Frame> {
        let clipped = rec.intersect(&self.frame_rec());
        if clipped.empty() {
            return Err(FrameError::InvalidInput(
                "crop rectangle does not overlap the frame",
            ));
        }
        let rows = clipped.height() as usize;
        let cols = clipped.width() as usize;
        let row_len = cols * self.channels;
        let mut data = Vec::with_capacity(rows * row_len);
        for row in 0..rows {
            let src_row = clipped.top() as usize + row;
            let start = (src_row * self.cols + clipped.left() as usize) * self.channels;
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        let mut out = Frame::from_vec(data, rows, cols, self.channels)?;
        out.grid = self.grid;
        Ok(out)
    }

    /// Nearest-neighbour resample to `size`.
    pub fn resize(&self, size: Size) -> FrameResult<Frame> {
        if self.is_empty() {
            return Err(FrameError::InvalidInput("cannot resize an empty frame"));
        }
        let rows = size.height() as usize;
        let cols = size.width() as usize;
        let mut out = Frame::new(rows, cols, self.channels)?;
        for row in 0..rows {
            let src_row = row * self.rows / rows;
            for col in 0..cols {
                let src_col = col * self.cols / cols;
                let src = (src_row * self.cols + src_col) * self.channels;
                let dst = (row * cols + col) * self.channels;
                out.data[dst..dst + self.channels]
                    .copy_from_slice(&self.data[src..src + self.channels]);
            }
        }
        out.grid = self.grid;
        Ok(out)
    }

    fn index(&self, row: usize, col: usize, channel: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols || channel >= self.channels {
            return None;
        }
        Some((row * self.cols + col) * self.channels + channel)
    }
}

impl PixelSource for Frame {
    fn width(&self) -> usize {
        self.cols
    }

    fn height(&self) -> usize {
        self.rows
    }

    fn channels(&self) -> usize {
        self.channels
    }

    fn pixel(&self, row: usize, col: usize, channel: usize) -> u8 {
        self.data[(row * self.cols + col) * self.channels + channel]
    }
}

fn buffer_len(rows: usize, cols: usize, channels: usize) -> FrameResult<usize> {
    let invalid = FrameError::InvalidDimensions {
        rows,
        cols,
        channels,
    };
    if channels == 0 || rows > i32::MAX as usize || cols > i32::MAX as usize {
        return Err(invalid);
    }
    rows.checked_mul(cols)
        .and_then(|v| v.checked_mul(channels))
        .ok_or(invalid)
}
