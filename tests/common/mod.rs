//! Fixtures shared by the integration tests and the benches.
#![allow(dead_code)]

use linfa::prelude::{Dataset, Fit};
use linfa_bayes::GaussianNb;
use ndarray::{Array1, Array2, array};
use stroke_risk::schema::categorical_features;
use stroke_risk::{
    EncoderRegistry, FeatureAssembler, N_FEATURES, NaiveBayesClassifier, RawInputRecord,
    StandardScaler,
};

pub fn scaler() -> StandardScaler {
    StandardScaler::new(
        vec!["age".into(), "avg_glucose_level".into(), "bmi".into()],
        array![43.0, 106.0, 29.0],
        array![22.0, 45.0, 8.0],
    )
    .unwrap()
}

pub fn assembler() -> FeatureAssembler {
    FeatureAssembler::new(EncoderRegistry::from_declared_domains(), scaler()).unwrap()
}

pub fn patient(age: f64, glucose: f64) -> RawInputRecord {
    RawInputRecord {
        gender: Some("Male".into()),
        age,
        hypertension: Some("0".into()),
        heart_disease: Some("1".into()),
        ever_married: Some("Yes".into()),
        work_type: Some("Private".into()),
        residence_type: Some("Urban".into()),
        avg_glucose_level: glucose,
        bmi: 36.6,
        smoking_status: Some("formerly smoked".into()),
    }
}

/// Elderly patients with high glucose are labelled at risk.
pub fn is_at_risk(record: &RawInputRecord) -> bool {
    record.age >= 60.0 && record.avg_glucose_level >= 170.0
}

/// An age/glucose grid with every selection cycling through its domain.
pub fn risk_grid() -> Vec<RawInputRecord> {
    let mut records = Vec::new();
    for age in (5..=95).step_by(10) {
        for glucose in (20..=290).step_by(30) {
            let i = records.len();
            let mut record = RawInputRecord::default();
            for feature in categorical_features() {
                let domain = feature.domain().unwrap();
                record.set_category(feature, Some(domain[i % domain.len()].to_string()));
            }
            record.age = age as f64;
            record.avg_glucose_level = glucose as f64;
            record.bmi = 18.0 + ((age + glucose) % 30) as f64;
            records.push(record);
        }
    }
    records
}

/// Fits a Gaussian Naive Bayes model on `records` labelled by [`is_at_risk`].
pub fn fit(assembler: &FeatureAssembler, records: &[RawInputRecord]) -> NaiveBayesClassifier {
    let mut flat = Vec::with_capacity(records.len() * N_FEATURES);
    for record in records {
        flat.extend(assembler.assemble(record).unwrap().view().iter().copied());
    }
    let x = Array2::from_shape_vec((records.len(), N_FEATURES), flat).unwrap();
    let y: Array1<usize> = records.iter().map(|r| usize::from(is_at_risk(r))).collect();
    let model: GaussianNb<f64, usize> = GaussianNb::params().fit(&Dataset::new(x, y)).unwrap();
    NaiveBayesClassifier::new(model)
}
