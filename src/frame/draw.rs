//! In-buffer annotation: grid lines, rectangle outlines and keypoint markers.

use crate::features::Keypoint;
use crate::frame::Frame;
use crate::geometry::{Pos, Rec};

const GRID_BOOST: u8 = 25;
const MARK: u8 = u8::MAX;

impl Frame {
    /// Brightens every pixel on a grid line by a fixed amount.
    ///
    /// Lines sit on rows and columns that are multiples of the grid size. Only
    /// the first three channels are touched so an alpha channel is preserved.
    pub fn draw_grid(&mut self) {
        let g = self.grid_size() as usize;
        let channels = self.channels.min(3);
        for row in 0..self.rows {
            for col in 0..self.cols {
                if row % g != 0 && col % g != 0 {
                    continue;
                }
                let base = (row * self.cols + col) * self.channels;
                for value in &mut self.data[base..base + channels] {
                    *value = value.saturating_add(GRID_BOOST);
                }
            }
        }
    }

    /// Draws the outline of `rec`, clipped to the frame, on channel 0.
    pub fn draw_rec(&mut self, rec: Rec) {
        let clipped = rec.intersect(&self.frame_rec());
        if clipped.empty() {
            return;
        }
        let (top, bottom) = (clipped.top() as usize, clipped.bottom() as usize);
        let (left, right) = (clipped.left() as usize, clipped.right() as usize);
        for row in top..=bottom {
            self.mark(row, left);
            self.mark(row, right);
        }
        for col in left..=right {
            self.mark(top, col);
            self.mark(bottom, col);
        }
    }

    /// Marks each keypoint with a small cross on channel 0.
    pub fn draw_keypoints(&mut self, keypoints: &[Keypoint]) {
        let extent = self.frame_rec();
        for kp in keypoints {
            let center = kp.pos();
            for (dr, dc) in [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)] {
                let row = center.row() + dr;
                let col = center.col() + dc;
                if extent.contains_pos(Pos::rc(row, col)) {
                    self.mark(row as usize, col as usize);
                }
            }
        }
    }

    fn mark(&mut self, row: usize, col: usize) {
        let idx = (row * self.cols + col) * self.channels;
        self.data[idx] = MARK;
    }
}

#[cfg(test)]
mod tests {
    use crate::features::Keypoint;
    use crate::frame::Frame;
    use crate::geometry::Rec;

    #[test]
    fn grid_lines_are_brightened_on_color_channels_only() {
        let mut frame = Frame::new(4, 4, 4).unwrap();
        frame.set_grid_size(2).unwrap();
        frame.draw_grid();
        assert_eq!(frame.get(0, 1, 0), Some(25));
        assert_eq!(frame.get(1, 2, 2), Some(25));
        assert_eq!(frame.get(1, 1, 0), Some(0));
        assert_eq!(frame.get(0, 0, 3), Some(0));
    }

    #[test]
    fn rec_outline_is_clipped() {
        let mut frame = Frame::new(5, 5, 1).unwrap();
        frame.draw_rec(Rec::tlbr(1, 1, 10, 3));
        assert_eq!(frame.get(1, 1, 0), Some(255));
        assert_eq!(frame.get(4, 3, 0), Some(255));
        assert_eq!(frame.get(4, 2, 0), Some(255));
        assert_eq!(frame.get(2, 2, 0), Some(0));
        assert_eq!(frame.get(0, 0, 0), Some(0));
    }

    #[test]
    fn keypoint_cross_near_edge_stays_in_bounds() {
        let mut frame = Frame::new(3, 3, 1).unwrap();
        frame.draw_keypoints(&[Keypoint::at(0.0, 0.0)]);
        assert_eq!(frame.get(0, 0, 0), Some(255));
        assert_eq!(frame.get(1, 0, 0), Some(255));
        assert_eq!(frame.get(0, 1, 0), Some(255));
        assert_eq!(frame.get(1, 1, 0), Some(0));
    }
}
