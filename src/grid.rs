//! Grid-aligned target rectangles.
//!
//! The frame is divided into square cells of `cell_size` pixels starting at
//! the origin. A request for a rectangle of a given [`Size`] around a point is
//! answered with the smallest whole number of cells per axis that covers the
//! size (`ceil(dimension / cell_size)`), centered on the cell that contains
//! the point. The run of cells starts `cells / 2` cells before the center
//! cell, so even cell counts lean toward the top-left.
//!
//! Before clipping, the rectangle's width and height are exact multiples of
//! the cell size. The result is then intersected with the frame bounds, so a
//! rectangle touching a frame edge may lose that property; callers that need
//! whole cells must check [`Rec::width`] and [`Rec::height`] themselves.
//!
//! All arithmetic is signed, so centers near the top or left edge produce
//! negative cell indices that are clipped away rather than wrapping.

use crate::geometry::{Pos, Rec, Size};
use crate::util::math::{ceil_div, floor_div};
use crate::util::{FrameError, FrameResult};

/// Snaps target rectangles to a square pixel grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridAligner {
    cell_size: i32,
}

impl Default for GridAligner {
    fn default() -> Self {
        Self { cell_size: 1 }
    }
}

impl GridAligner {
    /// Creates an aligner with the given cell size in pixels.
    pub fn new(cell_size: i32) -> FrameResult<Self> {
        if cell_size < 1 {
            return Err(FrameError::PreconditionViolation(
                "grid cell size must be at least 1",
            ));
        }
        Ok(Self { cell_size })
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Returns the grid-aligned rectangle of at least `size` centered at
    /// `center`, clipped to `bounds`.
    ///
    /// The result is [`Rec::EMPTY`] only when the unclipped rectangle lies
    /// entirely outside `bounds`.
    pub fn best_rec_centered_at(&self, center: Pos, size: Size, bounds: Rec) -> Rec {
        let (top, bottom) = self.axis_span(center.row(), size.height());
        let (left, right) = self.axis_span(center.col(), size.width());
        Rec::tlbr(top, left, bottom, right).intersect(&bounds)
    }

    /// Pixel span `(first, last)` along one axis.
    ///
    /// Computed in `i64` and clamped to `i32`. The unclipped span always
    /// contains `center`, so clamping only cuts pixels no `i32` bound can
    /// reach.
    fn axis_span(&self, center: i32, extent: i32) -> (i32, i32) {
        let g = i64::from(self.cell_size);
        let cells = i64::from(ceil_div(extent, self.cell_size));
        let center_cell = i64::from(floor_div(center, self.cell_size));
        let first_cell = center_cell - cells / 2;
        let first = first_cell * g;
        let last = (first_cell + cells) * g - 1;
        (saturate_i32(first), saturate_i32(last))
    }
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
