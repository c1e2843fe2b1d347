//! Local-extremum keypoints with normalized patch descriptors.
//!
//! A pixel is a keypoint when it exceeds every 8-neighbour by more than
//! `threshold`. The descriptor is the surrounding square patch with its mean
//! removed and scaled to unit length, which makes it insensitive to uniform
//! brightness and contrast changes.

use ggframe::{Feature, FeatureDetector, FrameResult, ImageView, Keypoint, Rec};
use tracing::debug;

pub struct PatchDetector {
    pub threshold: u8,
    pub patch_radius: usize,
    pub max_keypoints: usize,
}

impl Default for PatchDetector {
    fn default() -> Self {
        Self {
            threshold: 8,
            patch_radius: 4,
            max_keypoints: 2000,
        }
    }
}

impl PatchDetector {
    fn response(&self, image: ImageView<'_, u8>, row: usize, col: usize) -> Option<f32> {
        let center = *image.get(row, col)?;
        let mut strongest = 0u8;
        for r in row - 1..=row + 1 {
            for c in col - 1..=col + 1 {
                if (r, c) != (row, col) {
                    strongest = strongest.max(*image.get(r, c)?);
                }
            }
        }
        let margin = center.checked_sub(strongest)?;
        (margin > self.threshold).then_some(margin as f32)
    }
}

impl FeatureDetector for PatchDetector {
    fn detect(
        &self,
        image: ImageView<'_, u8>,
        mask: ImageView<'_, u8>,
    ) -> FrameResult<Vec<Keypoint>> {
        let border = self.patch_radius.max(1);
        let mut out = Vec::new();
        if image.height() <= 2 * border || image.width() <= 2 * border {
            return Ok(out);
        }
        for row in border..image.height() - border {
            for col in border..image.width() - border {
                if mask.get(row, col).copied().unwrap_or(0) == 0 {
                    continue;
                }
                if let Some(response) = self.response(image, row, col) {
                    let mut kp = Keypoint::at(row as f32, col as f32);
                    kp.size = (2 * self.patch_radius + 1) as f32;
                    kp.response = response;
                    out.push(kp);
                }
            }
        }
        out.sort_by(|a, b| b.response.total_cmp(&a.response));
        out.truncate(self.max_keypoints);
        debug!(count = out.len(), "patch keypoints");
        Ok(out)
    }

    fn compute(
        &self,
        image: ImageView<'_, u8>,
        keypoints: Vec<Keypoint>,
    ) -> FrameResult<Vec<Feature>> {
        let r = self.patch_radius as i32;
        let side = (2 * r + 1) as usize;
        let mut out = Vec::with_capacity(keypoints.len());
        for kp in keypoints {
            let p = kp.pos();
            let rec = Rec::tlbr(p.row() - r, p.col() - r, p.row() + r, p.col() + r);
            let patch = image.region(rec)?;
            if patch.width() != side || patch.height() != side {
                continue;
            }
            let mut values = Vec::with_capacity(side * side);
            for row in 0..side {
                if let Some(line) = patch.row(row) {
                    values.extend(line.iter().map(|&v| v as f32));
                }
            }
            let mean = values.iter().sum::<f32>() / values.len() as f32;
            values.iter_mut().for_each(|v| *v -= mean);
            let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
            if norm > 0.0 {
                values.iter_mut().for_each(|v| *v /= norm);
            }
            out.push(Feature::new(kp, values));
        }
        Ok(out)
    }
}
