//! Captcha recognition

use crate::classify::Classifier;
use crate::error::RecogResult;
use crate::features::extract_features;
use crate::model::Model;
use crate::options::RecogOptions;
use crate::select::significant_blobs;
use casocr_core::Pix;
use std::path::Path;
use tracing::{debug, info};

/// Segments a captcha and classifies each glyph.
///
/// Holds an immutable [`Classifier`], so a single recognizer can be shared
/// across threads by reference. Replacing the classifier requires `&mut`.
#[derive(Debug, Clone)]
pub struct Recognizer {
    classifier: Classifier,
    options: RecogOptions,
}

impl Recognizer {
    /// Build a recognizer from a model snapshot.
    pub fn new(model: &Model, options: RecogOptions) -> RecogResult<Self> {
        options.validate()?;
        Ok(Self {
            classifier: Classifier::new(model),
            options,
        })
    }

    /// Build a recognizer from a model file.
    pub fn from_model_file(path: impl AsRef<Path>, options: RecogOptions) -> RecogResult<Self> {
        let model = Model::read_from_file(path)?;
        Self::new(&model, options)
    }

    /// Replace the centroid table with one derived from `model`.
    pub fn reload(&mut self, model: &Model) {
        self.classifier = Classifier::new(model);
        info!(labels = self.classifier.len(), "reloaded classifier");
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn options(&self) -> &RecogOptions {
        &self.options
    }

    /// Decode a captcha, reporting why it failed.
    pub fn try_recognize(&self, pix: &Pix) -> RecogResult<String> {
        let blobs = significant_blobs(pix, &self.options)?;
        let mut text = String::with_capacity(blobs.len());
        for blob in &blobs {
            let features = extract_features(blob)?;
            text.push(self.classifier.try_classify(&features)?);
        }
        Ok(text)
    }

    /// Decode a captcha; the empty string on any failure.
    pub fn recognize(&self, pix: &Pix) -> String {
        match self.try_recognize(pix) {
            Ok(text) => text,
            Err(e) => {
                debug!(error = %e, "recognition failed");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecogError;
    use casocr_test::synth::{SyntheticCaptcha, glyphs};

    fn trained_recognizer() -> Recognizer {
        let pix = SyntheticCaptcha::row(&glyphs::all()).render().unwrap();
        let mut model = Model::new();
        model.add_sample(&pix, "abcd", &RecogOptions::default()).unwrap();
        Recognizer::new(&model, RecogOptions::default()).unwrap()
    }

    #[test]
    fn test_recognize_trained() {
        let rec = trained_recognizer();
        let pix = SyntheticCaptcha::row(&glyphs::all()).render().unwrap();
        assert_eq!(rec.recognize(&pix), "abcd");
    }

    #[test]
    fn test_empty_model() {
        let rec = Recognizer::new(&Model::new(), RecogOptions::default()).unwrap();
        let pix = SyntheticCaptcha::row(&glyphs::all()).render().unwrap();
        assert!(matches!(rec.try_recognize(&pix), Err(RecogError::EmptyClassifier)));
        assert_eq!(rec.recognize(&pix), "");
    }

    #[test]
    fn test_wrong_glyph_count() {
        let rec = trained_recognizer();
        let g = glyphs::all();
        let three = SyntheticCaptcha::row(&g[..3]).render().unwrap();
        assert_eq!(rec.recognize(&three), "");
        let five: Vec<_> = g.iter().chain(&g[..1]).cloned().collect();
        let five = SyntheticCaptcha::row(&five).render().unwrap();
        assert!(matches!(
            rec.try_recognize(&five),
            Err(RecogError::GlyphCount { expected: 4, found: 5 })
        ));
    }

    #[test]
    fn test_reload() {
        let mut rec = Recognizer::new(&Model::new(), RecogOptions::default()).unwrap();
        assert!(rec.classifier().is_empty());
        let pix = SyntheticCaptcha::row(&glyphs::all()).render().unwrap();
        let mut model = Model::new();
        model.add_sample(&pix, "wxyz", rec.options()).unwrap();
        rec.reload(&model);
        assert_eq!(rec.recognize(&pix), "wxyz");
    }

    #[test]
    fn test_invalid_options() {
        let opts = RecogOptions::default().with_glyph_count(0);
        assert!(Recognizer::new(&Model::new(), opts).is_err());
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Recognizer>();
    }
}
