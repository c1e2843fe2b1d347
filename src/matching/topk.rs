//! Bounded collection of the nearest train descriptors for one query.

use std::cmp::Ordering;

use crate::matching::DescriptorMatch;

fn match_cmp_asc(a: &DescriptorMatch, b: &DescriptorMatch) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.train_idx.cmp(&b.train_idx))
}

/// Keeps the `k` smallest-distance matches with O(k) insertion cost.
///
/// Ties are broken by the lower train index so results are deterministic.
pub(crate) struct NearestK {
    k: usize,
    items: Vec<DescriptorMatch>,
}

impl NearestK {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            k,
            items: Vec::with_capacity(k),
        }
    }

    /// Pushes a match, evicting the farthest one if at capacity.
    pub(crate) fn push(&mut self, m: DescriptorMatch) {
        if self.k == 0 {
            return;
        }
        if self.items.len() < self.k {
            self.items.push(m);
            return;
        }

        let mut worst_idx = 0usize;
        for (idx, item) in self.items.iter().enumerate().skip(1) {
            if match_cmp_asc(item, &self.items[worst_idx]) == Ordering::Greater {
                worst_idx = idx;
            }
        }

        if match_cmp_asc(&m, &self.items[worst_idx]) == Ordering::Less {
            self.items[worst_idx] = m;
        }
    }

    /// Returns matches sorted by ascending distance.
    pub(crate) fn into_sorted_asc(mut self) -> Vec<DescriptorMatch> {
        self.items.sort_by(match_cmp_asc);
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::NearestK;
    use crate::matching::DescriptorMatch;

    fn m(train_idx: usize, distance: f32) -> DescriptorMatch {
        DescriptorMatch {
            query_idx: 0,
            train_idx,
            distance,
            second_distance: None,
        }
    }

    #[test]
    fn keeps_smallest_distances_in_order() {
        let mut nearest = NearestK::new(2);
        for (idx, d) in [(0, 5.0), (1, 1.0), (2, 3.0), (3, 0.5)].into_iter() {
            nearest.push(m(idx, d));
        }
        let out = nearest.into_sorted_asc();
        let trains: Vec<usize> = out.iter().map(|x| x.train_idx).collect();
        assert_eq!(trains, vec![3, 1]);
    }

    #[test]
    fn ties_prefer_lower_train_index() {
        let mut nearest = NearestK::new(1);
        nearest.push(m(4, 2.0));
        nearest.push(m(1, 2.0));
        nearest.push(m(7, 2.0));
        assert_eq!(nearest.into_sorted_asc()[0].train_idx, 1);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut nearest = NearestK::new(0);
        nearest.push(m(0, 1.0));
        assert!(nearest.into_sorted_asc().is_empty());
    }
}
