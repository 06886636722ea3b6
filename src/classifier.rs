//! The trained classifier and the outcome it produces.

use crate::artifact::{load_msgpack, save_msgpack};
use crate::assembler::EncodedFeatureVector;
use crate::error::{Result, StrokeError};
use crate::schema::feature_names;
use linfa::prelude::Predict;
use linfa_bayes::{GaussianNb, NaiveBayes};
use log::{debug, info};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const POSITIVE_CLASS: usize = 1;

/// Binary outcome of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    NoRisk,
    AtRisk,
}

impl RiskLabel {
    pub fn from_class(class: usize) -> Result<Self> {
        match class {
            0 => Ok(RiskLabel::NoRisk),
            1 => Ok(RiskLabel::AtRisk),
            other => Err(StrokeError::Classifier(format!(
                "classifier returned unexpected class {other}"
            ))),
        }
    }

    pub fn class(self) -> usize {
        match self {
            RiskLabel::NoRisk => 0,
            RiskLabel::AtRisk => 1,
        }
    }

    /// Fixed message shown for this outcome.
    pub fn message(self) -> &'static str {
        match self {
            RiskLabel::NoRisk => "✅ Not at risk of stroke",
            RiskLabel::AtRisk => "⚠️ At risk of stroke",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Label plus the probability of the positive class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub label: RiskLabel,
    pub probability: f64,
}

/// Anything that can score an [`EncodedFeatureVector`].
pub trait Classifier {
    fn predict(&self, features: &EncodedFeatureVector) -> Result<RiskLabel>;

    /// Probability of the positive class, in `[0, 1]`.
    fn predict_proba(&self, features: &EncodedFeatureVector) -> Result<f64>;

    /// Column names the model was trained on, when the artifact records them.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }
}

/// Gaussian Naive Bayes model together with the column layout it was fit on.
#[derive(Serialize, Deserialize)]
pub struct NaiveBayesClassifier {
    feature_names: Vec<String>,
    model: GaussianNb<f64, usize>,
}

impl NaiveBayesClassifier {
    /// Wraps a model fit on vectors in the fixed feature order.
    pub fn new(model: GaussianNb<f64, usize>) -> Self {
        NaiveBayesClassifier {
            feature_names: feature_names(),
            model,
        }
    }

    pub fn with_feature_names(model: GaussianNb<f64, usize>, feature_names: Vec<String>) -> Self {
        NaiveBayesClassifier {
            feature_names,
            model,
        }
    }

    /// Saves the model to a binary `.msgpack` file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        save_msgpack(self, path)
    }

    /// Loads the model from a binary `.msgpack` file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let model: NaiveBayesClassifier = load_msgpack(path)?;
        info!(
            "📦 Loaded classifier over {} features from {:?}",
            model.feature_names.len(),
            path
        );
        Ok(model)
    }

    fn check_width(&self, features: &EncodedFeatureVector) -> Result<()> {
        if features.len() == self.feature_names.len() {
            Ok(())
        } else {
            Err(StrokeError::Classifier(format!(
                "model expects {} features, got {}",
                self.feature_names.len(),
                features.len()
            )))
        }
    }
}

impl Classifier for NaiveBayesClassifier {
    fn predict(&self, features: &EncodedFeatureVector) -> Result<RiskLabel> {
        self.check_width(features)?;
        let input = features.to_row();
        let labels: Array1<usize> = self.model.predict(&input);
        let class = labels
            .first()
            .copied()
            .ok_or_else(|| StrokeError::Classifier("model returned no label".into()))?;
        debug!("predicted class {class}");
        RiskLabel::from_class(class)
    }

    fn predict_proba(&self, features: &EncodedFeatureVector) -> Result<f64> {
        self.check_width(features)?;
        let input = features.to_row();
        let (proba, classes) = self.model.predict_proba(input.view());
        debug!("class probabilities {proba} for classes {classes:?}");

        // A model fit without positive samples never predicts them.
        let p = classes
            .iter()
            .position(|&c| *c == POSITIVE_CLASS)
            .map_or(0.0, |i| proba[[0, i]]);
        Ok(p.clamp(0.0, 1.0))
    }

    fn feature_names(&self) -> Option<&[String]> {
        Some(&self.feature_names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::sample_record;
    use crate::schema::N_FEATURES;
    use crate::testutil::{assembler, fitted_classifier, high_risk_record, low_risk_record};

    #[test]
    fn label_and_probability_are_consistent() {
        let asm = assembler();
        let model = fitted_classifier(&asm);
        for record in [sample_record(), high_risk_record(), low_risk_record()] {
            let v = asm.assemble(&record).unwrap();
            let label = model.predict(&v).unwrap();
            let p = model.predict_proba(&v).unwrap();
            assert!((0.0..=1.0).contains(&p));
            assert_eq!(label == RiskLabel::AtRisk, p > 0.5, "p = {p}");
        }
    }

    #[test]
    fn separates_extreme_patients() {
        let asm = assembler();
        let model = fitted_classifier(&asm);
        let high = asm.assemble(&high_risk_record()).unwrap();
        let low = asm.assemble(&low_risk_record()).unwrap();
        assert_eq!(model.predict(&high).unwrap(), RiskLabel::AtRisk);
        assert_eq!(model.predict(&low).unwrap(), RiskLabel::NoRisk);
        assert!(model.predict_proba(&high).unwrap() > model.predict_proba(&low).unwrap());
    }

    #[test]
    fn records_training_layout() {
        let model = fitted_classifier(&assembler());
        let names = Classifier::feature_names(&model).unwrap();
        assert_eq!(names.len(), N_FEATURES);
        assert_eq!(names[6], "Residence_type");
    }

    #[test]
    fn round_trips_through_msgpack() {
        let asm = assembler();
        let model = fitted_classifier(&asm);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.msgpack");
        model.save_to_file(&path).unwrap();

        let loaded = NaiveBayesClassifier::load_from_file(&path).unwrap();
        let v = asm.assemble(&sample_record()).unwrap();
        assert_eq!(loaded.predict(&v).unwrap(), model.predict(&v).unwrap());
        let (a, b) = (loaded.predict_proba(&v).unwrap(), model.predict_proba(&v).unwrap());
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn label_codes() {
        assert_eq!(RiskLabel::from_class(1).unwrap(), RiskLabel::AtRisk);
        assert_eq!(RiskLabel::NoRisk.class(), 0);
        assert!(RiskLabel::from_class(2).is_err());
        assert_eq!(RiskLabel::AtRisk.to_string(), "⚠️ At risk of stroke");
    }
}
