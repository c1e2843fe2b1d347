use std::cell::RefCell;

use ggframe::{
    Feature, FeatureDetector, FeatureIndex, Frame, FrameError, FrameResult, ImageView, Keypoint,
    Rec,
};

/// Reports a keypoint on every `step`-th masked pixel; the descriptor is the
/// pixel intensity. Records the intensity image it was given.
struct LatticeDetector {
    step: usize,
    seen: RefCell<Vec<u8>>,
}

impl LatticeDetector {
    fn new(step: usize) -> Self {
        Self {
            step,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl FeatureDetector for LatticeDetector {
    fn detect(
        &self,
        image: ImageView<'_, u8>,
        mask: ImageView<'_, u8>,
    ) -> FrameResult<Vec<Keypoint>> {
        let mut seen = self.seen.borrow_mut();
        seen.clear();
        let mut out = Vec::new();
        for row in 0..image.height() {
            seen.extend_from_slice(image.row(row).unwrap());
            for col in 0..image.width() {
                if row % self.step == 0 && col % self.step == 0 && mask.get(row, col) == Some(&1) {
                    out.push(Keypoint::at(row as f32, col as f32));
                }
            }
        }
        Ok(out)
    }

    fn compute(
        &self,
        image: ImageView<'_, u8>,
        keypoints: Vec<Keypoint>,
    ) -> FrameResult<Vec<Feature>> {
        Ok(keypoints
            .into_iter()
            .map(|kp| {
                let pos = kp.pos();
                let value = *image.get(pos.row() as usize, pos.col() as usize).unwrap();
                Feature::new(kp, vec![value as f32])
            })
            .collect())
    }
}

/// Ignores the mask and reports every pixel.
struct MaskBlindDetector;

impl FeatureDetector for MaskBlindDetector {
    fn detect(
        &self,
        image: ImageView<'_, u8>,
        _mask: ImageView<'_, u8>,
    ) -> FrameResult<Vec<Keypoint>> {
        let mut out = Vec::new();
        for row in 0..image.height() {
            for col in 0..image.width() {
                out.push(Keypoint::at(row as f32 + 0.5, col as f32 + 0.5));
            }
        }
        Ok(out)
    }

    fn compute(
        &self,
        _image: ImageView<'_, u8>,
        keypoints: Vec<Keypoint>,
    ) -> FrameResult<Vec<Feature>> {
        Ok(keypoints
            .into_iter()
            .enumerate()
            .map(|(idx, kp)| Feature::new(kp, vec![idx as f32; 2]))
            .collect())
    }
}

/// Produces descriptors of alternating dimension.
struct RaggedDetector;

impl FeatureDetector for RaggedDetector {
    fn detect(
        &self,
        _image: ImageView<'_, u8>,
        _mask: ImageView<'_, u8>,
    ) -> FrameResult<Vec<Keypoint>> {
        Ok(vec![Keypoint::at(0.0, 0.0), Keypoint::at(1.0, 1.0)])
    }

    fn compute(
        &self,
        _image: ImageView<'_, u8>,
        keypoints: Vec<Keypoint>,
    ) -> FrameResult<Vec<Feature>> {
        Ok(keypoints
            .into_iter()
            .enumerate()
            .map(|(idx, kp)| Feature::new(kp, vec![0.0; idx + 1]))
            .collect())
    }
}

fn gradient_frame(rows: usize, cols: usize) -> Frame {
    let mut data = Vec::with_capacity(rows * cols * 3);
    for row in 0..rows {
        for col in 0..cols {
            data.extend_from_slice(&[(row * 3) as u8, (col * 5) as u8, 17]);
        }
    }
    Frame::from_vec(data, rows, cols, 3).unwrap()
}

#[test]
fn full_frame_index_covers_whole_extent() {
    let frame = gradient_frame(20, 30);
    let detector = LatticeDetector::new(5);
    let index = FeatureIndex::build(&frame, None, &detector).unwrap();

    assert_eq!(index.region(), Rec::tlbr(0, 0, 19, 29));
    assert_eq!(index.len(), 4 * 6);
    assert_eq!(index.descriptor_dim(), 1);
}

#[test]
fn detector_sees_max_channel_intensity() {
    let frame = gradient_frame(4, 4);
    let detector = LatticeDetector::new(1);
    FeatureIndex::build(&frame, None, &detector).unwrap();

    let seen = detector.seen.borrow();
    for row in 0..4 {
        for col in 0..4 {
            let expected = (row * 3).max(col * 5).max(17) as u8;
            assert_eq!(seen[row * 4 + col], expected);
        }
    }
}

#[test]
fn region_restricts_keypoints_with_inclusive_bounds() {
    let frame = gradient_frame(20, 30);
    let detector = LatticeDetector::new(5);
    let region = Rec::tlbr(5, 10, 15, 20);
    let index = FeatureIndex::build(&frame, Some(region), &detector).unwrap();

    // rows 5, 10, 15 and cols 10, 15, 20, edges included
    assert_eq!(index.len(), 9);
    assert!(index.keypoints().all(|kp| region.contains_pos(kp.pos())));
}

#[test]
fn region_is_clipped_to_the_frame() {
    let frame = gradient_frame(10, 10);
    let detector = LatticeDetector::new(5);
    let index = FeatureIndex::build(&frame, Some(Rec::tlbr(5, 5, 50, 50)), &detector).unwrap();
    assert_eq!(index.region(), Rec::tlbr(5, 5, 9, 9));
    assert_eq!(index.len(), 1);
}

#[test]
fn keypoints_outside_region_are_dropped_and_pairing_is_kept() {
    let frame = gradient_frame(10, 10);
    let region = Rec::tlbr(2, 2, 4, 4);
    let index = FeatureIndex::build(&frame, Some(region), &MaskBlindDetector).unwrap();

    assert_eq!(index.len(), 9);
    for (idx, feature) in index.features().iter().enumerate() {
        assert!(region.contains_pos(feature.keypoint.pos()));
        assert_eq!(feature.descriptor.as_slice(), &[idx as f32; 2]);
    }
}

#[test]
fn empty_frame_is_invalid_input() {
    let err = FeatureIndex::build(&Frame::default(), None, &LatticeDetector::new(1))
        .err()
        .unwrap();
    assert_eq!(err, FrameError::InvalidInput("frame has no pixels"));

    let no_cols = Frame::new(5, 0, 3).unwrap();
    assert!(FeatureIndex::build(&no_cols, None, &LatticeDetector::new(1)).is_err());
}

#[test]
fn mixed_descriptor_dimensions_are_rejected() {
    let frame = gradient_frame(4, 4);
    let err = FeatureIndex::build(&frame, None, &RaggedDetector)
        .err()
        .unwrap();
    assert_eq!(
        err,
        FrameError::InvalidInput("descriptors differ in dimension")
    );
}
