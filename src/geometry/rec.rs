//! Axis-aligned integer rectangles with inclusive bounds.

use std::fmt;

use crate::geometry::Pos;
use crate::util::{FrameError, FrameResult};

/// Rectangle with inclusive `top..=bottom` and `left..=right` bounds.
///
/// Width and height are derived from the bounds at construction and are never
/// negative: inverted bounds produce a zero-sized dimension, which makes the
/// rectangle [`empty`](Rec::empty).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rec {
    top: i32,
    left: i32,
    bottom: i32,
    right: i32,
    width: u32,
    height: u32,
}

impl Rec {
    /// Canonical empty rectangle returned by non-overlapping intersections.
    pub const EMPTY: Rec = Rec::tlbr(0, 0, -1, -1);

    /// Builds a rectangle from its inclusive bounds.
    ///
    /// Bounds are not validated; use [`Rec::try_tlbr`] to reject inverted ones.
    pub const fn tlbr(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
            width: span(left, right),
            height: span(top, bottom),
        }
    }

    /// Builds a rectangle, rejecting `bottom < top` or `right < left`.
    pub fn try_tlbr(top: i32, left: i32, bottom: i32, right: i32) -> FrameResult<Self> {
        if bottom < top || right < left {
            return Err(FrameError::PreconditionViolation(
                "rectangle bounds are inverted",
            ));
        }
        Ok(Self::tlbr(top, left, bottom, right))
    }

    pub const fn top(&self) -> i32 {
        self.top
    }

    pub const fn left(&self) -> i32 {
        self.left
    }

    pub const fn bottom(&self) -> i32 {
        self.bottom
    }

    pub const fn right(&self) -> i32 {
        self.right
    }

    /// Number of columns covered, `right - left + 1`.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows covered, `bottom - top + 1`.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns true if either dimension is zero.
    pub const fn empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered.
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub const fn top_left(&self) -> Pos {
        Pos::rc(self.top, self.left)
    }

    /// Center pixel, rounded toward the top-left on even extents.
    pub fn center(&self) -> Pos {
        Pos::rc(
            midpoint(self.top, self.bottom),
            midpoint(self.left, self.right),
        )
    }

    /// Overlap of two rectangles, or [`Rec::EMPTY`] when they do not overlap.
    pub fn intersect(&self, other: &Rec) -> Rec {
        if self.empty() || other.empty() {
            return Rec::EMPTY;
        }
        let top = self.top.max(other.top);
        let left = self.left.max(other.left);
        let bottom = self.bottom.min(other.bottom);
        let right = self.right.min(other.right);
        if right < left || bottom < top {
            return Rec::EMPTY;
        }
        Rec::tlbr(top, left, bottom, right)
    }

    /// Inclusive containment test on both axes.
    pub fn contains_pos(&self, pos: Pos) -> bool {
        !self.empty()
            && self.top <= pos.row()
            && pos.row() <= self.bottom
            && self.left <= pos.col()
            && pos.col() <= self.right
    }

    /// Returns true if `other` lies entirely inside `self`.
    pub fn contains_rec(&self, other: &Rec) -> bool {
        !other.empty()
            && self.contains_pos(other.top_left())
            && self.contains_pos(Pos::rc(other.bottom, other.right))
    }

    /// Intersection over union, `0.0` when either rectangle is empty.
    pub fn iou(&self, other: &Rec) -> f64 {
        let inter = u128::from(self.intersect(other).area());
        let union = u128::from(self.area()) + u128::from(other.area()) - inter;
        if union == 0 {
            return 0.0;
        }
        inter as f64 / union as f64
    }
}

fn midpoint(low: i32, high: i32) -> i32 {
    (low as i64 + (high as i64 - low as i64).div_euclid(2)) as i32
}

const fn span(low: i32, high: i32) -> u32 {
    let len = high as i64 - low as i64 + 1;
    if len <= 0 {
        0
    } else if len > u32::MAX as i64 {
        u32::MAX
    } else {
        len as u32
    }
}

impl fmt::Display for Rec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[t={}, l={}, b={}, r={} ({}x{})]",
            self.top, self.left, self.bottom, self.right, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Rec;
    use crate::geometry::Pos;

    #[test]
    fn empty_checks_width_as_well_as_height() {
        let zero_width = Rec::tlbr(0, 5, 9, 4);
        assert_eq!(zero_width.width(), 0);
        assert_eq!(zero_width.height(), 10);
        assert!(zero_width.empty());

        let zero_height = Rec::tlbr(5, 0, 4, 9);
        assert!(zero_height.empty());
        assert!(!Rec::tlbr(0, 0, 0, 0).empty());
    }

    #[test]
    fn full_range_bounds_saturate_instead_of_wrapping() {
        let all = Rec::tlbr(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert!(!all.empty());
        assert_eq!(all.width(), u32::MAX);
        assert_eq!(all.center(), Pos::rc(-1, -1));
        assert_eq!(all.iou(&all), 1.0);
    }

    #[test]
    fn empty_sentinel_contains_nothing() {
        assert!(Rec::EMPTY.empty());
        assert!(!Rec::EMPTY.contains_pos(Pos::rc(0, 0)));
        assert!(!Rec::EMPTY.contains_pos(Pos::rc(-1, -1)));
    }

    #[test]
    fn center_rounds_toward_top_left() {
        assert_eq!(Rec::tlbr(0, 0, 9, 9).center(), Pos::rc(4, 4));
        assert_eq!(Rec::tlbr(2, 4, 4, 6).center(), Pos::rc(3, 5));
    }

    #[test]
    fn display_lists_bounds_and_extent() {
        let text = Rec::tlbr(1, 2, 3, 5).to_string();
        assert_eq!(text, "[t=1, l=2, b=3, r=5 (4x3)]");
    }
}
