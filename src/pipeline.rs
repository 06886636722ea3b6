//! The loaded, immutable prediction pipeline.

use crate::assembler::{EncodedFeatureVector, FeatureAssembler};
use crate::classifier::{Classifier, NaiveBayesClassifier, PredictionResult};
use crate::config::ArtifactPaths;
use crate::encoder::EncoderRegistry;
use crate::error::{Result, StrokeError};
use crate::record::RawInputRecord;
use crate::scaler::StandardScaler;
use crate::schema::feature_names;
use log::{debug, info};

/// Encoders, scaler and classifier, validated against each other once and
/// read-only afterwards.
pub struct StrokePredictor<C = NaiveBayesClassifier> {
    assembler: FeatureAssembler,
    classifier: C,
}

impl StrokePredictor<NaiveBayesClassifier> {
    /// Loads all three artifacts. Any failure here means nothing can be served.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        info!("📦 Loading artifacts from {paths}");
        let encoders = EncoderRegistry::load_from_file(&paths.encoders)?;
        let scaler = StandardScaler::load_from_file(&paths.scaler)?;
        let classifier = NaiveBayesClassifier::load_from_file(&paths.model)?;
        StrokePredictor::new(encoders, scaler, classifier)
    }
}

impl<C: Classifier> StrokePredictor<C> {
    pub fn new(encoders: EncoderRegistry, scaler: StandardScaler, classifier: C) -> Result<Self> {
        let assembler = FeatureAssembler::new(encoders, scaler)?;
        if let Some(names) = classifier.feature_names() {
            let expected = feature_names();
            if names != expected.as_slice() {
                return Err(StrokeError::Schema(format!(
                    "classifier was trained on {names:?}, expected {expected:?}"
                )));
            }
        }
        Ok(StrokePredictor {
            assembler,
            classifier,
        })
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn assemble(&self, record: &RawInputRecord) -> Result<EncodedFeatureVector> {
        self.assembler.assemble(record)
    }

    /// Runs one record through the pipeline. Unset selections stop it before
    /// the classifier is consulted.
    pub fn predict(&self, record: &RawInputRecord) -> Result<PredictionResult> {
        let features = self.assemble(record)?;
        let label = self.classifier.predict(&features)?;
        let probability = self.classifier.predict_proba(&features)?;
        debug!("prediction {label:?} with p = {probability:.4}");
        Ok(PredictionResult { label, probability })
    }
}
