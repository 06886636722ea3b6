//! Fixtures shared by the unit tests.

use crate::assembler::{EncodedFeatureVector, FeatureAssembler};
use crate::classifier::{Classifier, NaiveBayesClassifier, PredictionResult, RiskLabel};
use crate::encoder::EncoderRegistry;
use crate::error::Result;
use crate::record::{RawInputRecord, sample_record};
use crate::scaler::StandardScaler;
use crate::schema::{N_FEATURES, categorical_features};
use linfa::prelude::{Dataset, Fit};
use linfa_bayes::GaussianNb;
use ndarray::{Array1, Array2, array};
use std::cell::Cell;

pub(crate) fn scaler() -> StandardScaler {
    StandardScaler::new(
        vec!["age".into(), "avg_glucose_level".into(), "bmi".into()],
        array![43.0, 106.0, 29.0],
        array![22.0, 45.0, 8.0],
    )
    .unwrap()
}

pub(crate) fn assembler() -> FeatureAssembler {
    FeatureAssembler::new(EncoderRegistry::from_declared_domains(), scaler()).unwrap()
}

/// A grid of patients where risk means age >= 60 and glucose >= 170.
pub(crate) fn training_records() -> Vec<(RawInputRecord, usize)> {
    let mut rows = Vec::new();
    let mut i = 0usize;
    for age in (5..=95).step_by(10) {
        for glucose in (20..=290).step_by(30) {
            let mut record = RawInputRecord::default();
            for feature in categorical_features() {
                let domain = feature.domain().unwrap();
                record.set_category(feature, Some(domain[i % domain.len()].to_string()));
            }
            record.age = age as f64;
            record.avg_glucose_level = glucose as f64;
            record.bmi = 18.0 + ((age + glucose) % 30) as f64;
            rows.push((record, usize::from(age >= 60 && glucose >= 170)));
            i += 1;
        }
    }
    rows
}

/// Fits a model on [`training_records`] run through `assembler`.
pub(crate) fn fitted_classifier(assembler: &FeatureAssembler) -> NaiveBayesClassifier {
    let rows = training_records();
    let mut flat = Vec::with_capacity(rows.len() * N_FEATURES);
    let mut labels = Vec::with_capacity(rows.len());
    for (record, label) in &rows {
        let v = assembler.assemble(record).unwrap();
        flat.extend(v.view().iter().copied());
        labels.push(*label);
    }
    let x = Array2::from_shape_vec((rows.len(), N_FEATURES), flat).unwrap();
    let y = Array1::from_vec(labels);
    let model: GaussianNb<f64, usize> = GaussianNb::params().fit(&Dataset::new(x, y)).unwrap();
    NaiveBayesClassifier::new(model)
}

pub(crate) fn high_risk_record() -> RawInputRecord {
    RawInputRecord {
        age: 95.0,
        avg_glucose_level: 290.0,
        bmi: 25.0,
        ..sample_record()
    }
}

pub(crate) fn low_risk_record() -> RawInputRecord {
    RawInputRecord {
        age: 5.0,
        avg_glucose_level: 50.0,
        bmi: 25.0,
        ..sample_record()
    }
}

/// Returns a fixed result and counts how often it was asked.
pub(crate) struct CountingClassifier {
    pub result: PredictionResult,
    pub calls: Cell<usize>,
}

impl CountingClassifier {
    pub(crate) fn new(result: PredictionResult) -> Self {
        CountingClassifier {
            result,
            calls: Cell::new(0),
        }
    }
}

impl Classifier for CountingClassifier {
    fn predict(&self, _features: &EncodedFeatureVector) -> Result<RiskLabel> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.result.label)
    }

    fn predict_proba(&self, _features: &EncodedFeatureVector) -> Result<f64> {
        Ok(self.result.probability)
    }
}
