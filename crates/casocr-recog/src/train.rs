//! Training: folding labeled captchas into a [`Model`]

use crate::error::{RecogError, RecogResult};
use crate::model::Model;
use crate::options::RecogOptions;
use crate::select::glyph_features;
use casocr_core::Pix;
use tracing::debug;

impl Model {
    /// Add one labeled captcha.
    ///
    /// `label` must have exactly `glyph_count` characters; they are paired
    /// with the significant blobs left to right. Every descriptor is
    /// computed before the model is touched, so on error the model is
    /// unchanged.
    pub fn add_sample(&mut self, pix: &Pix, label: &str, options: &RecogOptions) -> RecogResult<()> {
        options.validate()?;

        let chars: Vec<char> = label.chars().collect();
        if chars.len() != options.glyph_count {
            return Err(RecogError::InvalidLabel {
                label: label.to_string(),
                expected: options.glyph_count,
            });
        }

        let features = glyph_features(pix, options)?;
        for (&c, f) in chars.iter().zip(&features) {
            self.accumulate(c, f);
        }
        debug!(label, "added training sample");
        Ok(())
    }
}

/// A training session over a borrowed model.
///
/// Counts attempted and failed samples.
#[derive(Debug)]
pub struct Trainer<'a> {
    model: &'a mut Model,
    options: RecogOptions,
    attempted: u64,
    failed: u64,
}

impl<'a> Trainer<'a> {
    pub fn new(model: &'a mut Model, options: RecogOptions) -> Self {
        Self {
            model,
            options,
            attempted: 0,
            failed: 0,
        }
    }

    /// Add a sample, returning the error on rejection.
    pub fn try_add_sample(&mut self, pix: &Pix, label: &str) -> RecogResult<()> {
        self.attempted += 1;
        let result = self.model.add_sample(pix, label, &self.options);
        if let Err(e) = &result {
            self.failed += 1;
            debug!(label, error = %e, "rejected training sample");
        }
        result
    }

    /// Add a sample; `false` if it was rejected.
    pub fn add_sample(&mut self, pix: &Pix, label: &str) -> bool {
        self.try_add_sample(pix, label).is_ok()
    }

    pub fn attempted(&self) -> u64 {
        self.attempted
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }

    pub fn succeeded(&self) -> u64 {
        self.attempted - self.failed
    }

    /// Fraction of attempted samples that were rejected; 0 before any.
    pub fn failure_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.failed as f64 / self.attempted as f64
        }
    }

    pub fn options(&self) -> &RecogOptions {
        &self.options
    }

    pub fn model(&self) -> &Model {
        &*self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casocr_test::synth::{SyntheticCaptcha, glyphs};

    fn four_glyphs() -> Pix {
        SyntheticCaptcha::row(&glyphs::all()).render().unwrap()
    }

    #[test]
    fn test_add_sample() {
        let mut model = Model::new();
        model
            .add_sample(&four_glyphs(), "abcd", &RecogOptions::default())
            .unwrap();
        assert_eq!(model.len(), 4);
        assert_eq!(model.get('a').unwrap().sum.quadrants, [6.0, 6.0, 4.0, 4.0]);
        assert_eq!(model.get('b').unwrap().sum.quadrants, [8.0, 6.0, 6.0, 0.0]);
        assert_eq!(model.get('c').unwrap().sum.quadrants, [0.0, 6.0, 6.0, 8.0]);
        assert_eq!(model.get('d').unwrap().sum.quadrants, [5.0, 5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_repeated_label_in_one_sample() {
        let mut model = Model::new();
        model
            .add_sample(&four_glyphs(), "aabb", &RecogOptions::default())
            .unwrap();
        assert_eq!(model.len(), 2);
        assert_eq!(model.get('a').unwrap().samples, 2);
        assert_eq!(model.get('a').unwrap().sum.quadrants, [14.0, 12.0, 10.0, 4.0]);
    }

    #[test]
    fn test_invalid_label_leaves_model() {
        let mut model = Model::new();
        let opts = RecogOptions::default();
        for label in ["abc", "abcde", ""] {
            let err = model.add_sample(&four_glyphs(), label, &opts).unwrap_err();
            assert!(matches!(err, RecogError::InvalidLabel { expected: 4, .. }));
        }
        assert!(model.is_empty());
    }

    #[test]
    fn test_label_counts_chars_not_bytes() {
        let mut model = Model::new();
        model
            .add_sample(&four_glyphs(), "äöüß", &RecogOptions::default())
            .unwrap();
        assert_eq!(model.labels().count(), 4);
    }

    #[test]
    fn test_trainer_counts() {
        let mut model = Model::new();
        let mut trainer = Trainer::new(&mut model, RecogOptions::default());
        assert_eq!(trainer.failure_rate(), 0.0);
        assert!(trainer.add_sample(&four_glyphs(), "abcd"));
        assert!(!trainer.add_sample(&four_glyphs(), "abc"));
        let three = SyntheticCaptcha::row(&glyphs::all()[..3]).render().unwrap();
        assert!(matches!(
            trainer.try_add_sample(&three, "abcd"),
            Err(RecogError::GlyphCount { expected: 4, found: 3 })
        ));
        assert_eq!(trainer.attempted(), 3);
        assert_eq!(trainer.failed(), 2);
        assert_eq!(trainer.succeeded(), 1);
        assert!((trainer.failure_rate() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(trainer.model().total_samples(), 4);
    }
}
