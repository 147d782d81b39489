//! Trainable glyph model
//!
//! A [`Model`] keeps, for every label, the number of samples seen and the
//! running sum of their feature descriptors. Means are derived only when a
//! [`Classifier`](crate::Classifier) is built, so the model can keep
//! accumulating across sessions without loss.

mod serial;

pub use serial::{MAX_MODEL_LABELS, MODEL_MAGIC, MODEL_VERSION};

use crate::features::GlyphFeatures;
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Per-label running totals
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Accumulator {
    /// Number of samples folded in
    pub samples: u64,
    /// Field-wise sum of the samples
    pub sum: GlyphFeatures,
}

impl Accumulator {
    /// Fold in one sample.
    pub fn add(&mut self, features: &GlyphFeatures) {
        self.samples += 1;
        self.sum += features;
    }

    /// Mean descriptor, or `None` before the first sample.
    pub fn mean(&self) -> Option<GlyphFeatures> {
        (self.samples > 0).then(|| self.sum.scaled_down(self.samples as f64))
    }
}

/// Label-indexed accumulators.
///
/// Iteration is in ascending label order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    entries: BTreeMap<char, Accumulator>,
}

impl Model {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no label has been trained
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Accumulator of a label
    pub fn get(&self, label: char) -> Option<&Accumulator> {
        self.entries.get(&label)
    }

    /// Labels in ascending order
    pub fn labels(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.keys().copied()
    }

    /// `(label, accumulator)` pairs in ascending label order
    pub fn iter(&self) -> btree_map::Iter<'_, char, Accumulator> {
        self.entries.iter()
    }

    /// Sum of sample counts over all labels
    pub fn total_samples(&self) -> u64 {
        self.entries.values().map(|a| a.samples).sum()
    }

    /// Fold one descriptor into a label's accumulator, creating it if needed.
    pub fn accumulate(&mut self, label: char, features: &GlyphFeatures) {
        self.entries.entry(label).or_default().add(features);
    }
}

impl<'a> IntoIterator for &'a Model {
    type Item = (&'a char, &'a Accumulator);
    type IntoIter = btree_map::Iter<'a, char, Accumulator>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(q: [f64; 4]) -> GlyphFeatures {
        GlyphFeatures {
            width: 4.0,
            height: 5.0,
            pixels: q.iter().sum(),
            quadrants: q,
        }
    }

    #[test]
    fn test_empty_model() {
        let model = Model::new();
        assert!(model.is_empty());
        assert_eq!(model.total_samples(), 0);
        assert!(model.get('a').is_none());
    }

    #[test]
    fn test_accumulate() {
        let mut model = Model::new();
        model.accumulate('b', &sample([1.0, 2.0, 3.0, 4.0]));
        model.accumulate('a', &sample([6.0, 6.0, 4.0, 4.0]));
        model.accumulate('a', &sample([6.0, 6.0, 4.0, 4.0]));

        assert_eq!(model.len(), 2);
        assert_eq!(model.total_samples(), 3);
        assert_eq!(model.labels().collect::<String>(), "ab");

        let a = model.get('a').unwrap();
        assert_eq!(a.samples, 2);
        assert_eq!(a.sum.quadrants, [12.0, 12.0, 8.0, 8.0]);
        assert_eq!(a.mean().unwrap(), sample([6.0, 6.0, 4.0, 4.0]));
    }

    #[test]
    fn test_accumulator_mean_empty() {
        assert_eq!(Accumulator::default().mean(), None);
    }

    #[test]
    fn test_labels_case_sensitive() {
        let mut model = Model::new();
        model.accumulate('A', &sample([1.0; 4]));
        model.accumulate('a', &sample([1.0; 4]));
        assert_eq!(model.len(), 2);
        assert_eq!(model.labels().collect::<Vec<_>>(), vec!['A', 'a']);
    }
}
