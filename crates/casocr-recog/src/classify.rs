//! Nearest-centroid classification

use crate::error::{RecogError, RecogResult};
use crate::features::GlyphFeatures;
use crate::model::Model;

/// Mean descriptor of one label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub label: char,
    pub mean: GlyphFeatures,
}

/// Result of a nearest-centroid lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    pub label: char,
    /// Squared quadrant-histogram distance to the centroid
    pub distance: f64,
}

/// Immutable centroid table derived from a [`Model`].
///
/// Centroids are held in ascending label order. A lookup scans them in that
/// order and only a strictly smaller distance replaces the current best, so
/// ties resolve to the smallest label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classifier {
    centroids: Vec<Centroid>,
}

impl Classifier {
    /// Derive centroids from a model snapshot.
    pub fn new(model: &Model) -> Self {
        let centroids = model
            .iter()
            .filter_map(|(&label, acc)| acc.mean().map(|mean| Centroid { label, mean }))
            .collect();
        Self { centroids }
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// Centroids in ascending label order
    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    /// Closest centroid, or `None` when the table is empty.
    pub fn nearest(&self, features: &GlyphFeatures) -> Option<Match> {
        let mut best: Option<Match> = None;
        for c in &self.centroids {
            let distance = features.quadrant_distance(&c.mean);
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(Match {
                    label: c.label,
                    distance,
                });
            }
        }
        best
    }

    /// Label of the closest centroid, or `None` when the table is empty.
    pub fn classify(&self, features: &GlyphFeatures) -> Option<char> {
        self.nearest(features).map(|m| m.label)
    }

    /// Like [`classify`](Self::classify), failing with
    /// [`RecogError::EmptyClassifier`] instead of returning `None`.
    pub fn try_classify(&self, features: &GlyphFeatures) -> RecogResult<char> {
        self.classify(features).ok_or(RecogError::EmptyClassifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist(q: [f64; 4]) -> GlyphFeatures {
        GlyphFeatures {
            width: 1.0,
            height: 1.0,
            pixels: q.iter().sum(),
            quadrants: q,
        }
    }

    #[test]
    fn test_empty() {
        let c = Classifier::new(&Model::new());
        assert!(c.is_empty());
        assert_eq!(c.classify(&hist([1.0; 4])), None);
        assert!(matches!(
            c.try_classify(&hist([1.0; 4])),
            Err(RecogError::EmptyClassifier)
        ));
    }

    #[test]
    fn test_centroid_is_mean() {
        let mut model = Model::new();
        model.accumulate('a', &hist([2.0, 0.0, 0.0, 0.0]));
        model.accumulate('a', &hist([4.0, 2.0, 0.0, 0.0]));
        let c = Classifier::new(&model);
        assert_eq!(c.len(), 1);
        assert_eq!(c.centroids()[0].mean.quadrants, [3.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_nearest() {
        let mut model = Model::new();
        model.accumulate('a', &hist([10.0, 0.0, 0.0, 0.0]));
        model.accumulate('b', &hist([0.0, 0.0, 0.0, 10.0]));
        let c = Classifier::new(&model);
        let m = c.nearest(&hist([9.0, 0.0, 0.0, 1.0])).unwrap();
        assert_eq!(m.label, 'a');
        assert_eq!(m.distance, 2.0);
        assert_eq!(c.classify(&hist([1.0, 0.0, 0.0, 8.0])), Some('b'));
    }

    #[test]
    fn test_tie_goes_to_smallest_label() {
        let mut model = Model::new();
        model.accumulate('z', &hist([2.0, 0.0, 0.0, 0.0]));
        model.accumulate('m', &hist([0.0, 2.0, 0.0, 0.0]));
        model.accumulate('b', &hist([0.0, 0.0, 2.0, 0.0]));
        let c = Classifier::new(&model);
        // Equidistant (distance 4) from all three
        let m = c.nearest(&hist([0.0; 4])).unwrap();
        assert_eq!(m.label, 'b');
        assert_eq!(m.distance, 4.0);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut model = Model::new();
        model.accumulate('a', &hist([1.0; 4]));
        let c = Classifier::new(&model);
        model.accumulate('b', &hist([1.0; 4]));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Classifier>();
    }
}
