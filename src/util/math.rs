//! Integer and vector helpers for grid snapping and descriptor distances.

/// Ceiling division for a non-negative numerator and a positive divisor.
pub(crate) fn ceil_div(value: i32, divisor: i32) -> i32 {
    debug_assert!(divisor > 0);
    let q = value.div_euclid(divisor);
    if value.rem_euclid(divisor) == 0 {
        q
    } else {
        q + 1
    }
}

/// Floor division that rounds toward negative infinity.
pub(crate) fn floor_div(value: i32, divisor: i32) -> i32 {
    debug_assert!(divisor > 0);
    value.div_euclid(divisor)
}

/// Euclidean distance between two equally sized vectors.
pub(crate) fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f32>()
        .sqrt()
}

/// Manhattan distance between two equally sized vectors.
pub(crate) fn l1_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
}
