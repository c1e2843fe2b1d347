//! Integer coordinate and rectangle value types.
//!
//! All coordinates are signed `i32` in `(row, col)` order. Rows grow
//! downwards and columns grow to the right, matching pixel buffer layout.

mod rec;

pub use rec::Rec;

use crate::util::{FrameError, FrameResult};

/// A pixel position as `(row, col)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pos {
    row: i32,
    col: i32,
}

impl Pos {
    /// Creates a position from a row and a column.
    pub const fn rc(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub const fn row(&self) -> i32 {
        self.row
    }

    pub const fn col(&self) -> i32 {
        self.col
    }
}

/// A strictly positive extent as `(height, width)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    height: i32,
    width: i32,
}

impl Size {
    /// Creates a size, rejecting non-positive dimensions.
    pub fn hw(height: i32, width: i32) -> FrameResult<Self> {
        if height <= 0 || width <= 0 {
            return Err(FrameError::PreconditionViolation(
                "size dimensions must be positive",
            ));
        }
        Ok(Self { height, width })
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    pub const fn width(&self) -> i32 {
        self.width
    }
}
