//! # stroke-risk 🧠
//!
//! Estimate stroke risk from ten patient attributes with a pre-trained classifier.
//!
//! The crate loads three artifacts once at startup: label encoders for the
//! categorical fields, a standard scaler for the numeric fields and a
//! [`linfa-bayes`](https://crates.io/crates/linfa-bayes) Gaussian Naive Bayes
//! model. A raw record is label-encoded, laid out in a fixed column order,
//! standardized at the numeric positions and handed to the classifier, which
//! answers with a binary label and the probability of the positive class.
//!
//! ## Features
//! - Fixed, named feature layout validated against every artifact at load time
//! - Label encoding and standardization matching the training-time layout
//! - Label + probability prediction
//! - Artifact persistence with `rmp-serde` (MessagePack)
//! - Interactive form and CSV batch scoring
//! - Benchmarkable with [Criterion](https://crates.io/crates/criterion)
//!
//! ## Example
//! ```no_run
//! use stroke_risk::{ArtifactPaths, RawInputRecord, StrokePredictor};
//!
//! let predictor = StrokePredictor::load(&ArtifactPaths::default())?;
//! let record = RawInputRecord {
//!     gender: Some("Male".into()),
//!     age: 67.0,
//!     hypertension: Some("0".into()),
//!     heart_disease: Some("1".into()),
//!     ever_married: Some("Yes".into()),
//!     work_type: Some("Private".into()),
//!     residence_type: Some("Urban".into()),
//!     avg_glucose_level: 228.69,
//!     bmi: 36.6,
//!     smoking_status: Some("formerly smoked".into()),
//! };
//! let result = predictor.predict(&record)?;
//! println!("{} (P = {:.2})", result.label, result.probability);
//! # Ok::<(), stroke_risk::StrokeError>(())
//! ```

pub mod artifact;
pub mod assembler;
pub mod batch;
pub mod classifier;
pub mod config;
pub mod encoder;
pub mod error;
pub mod form;
pub mod pipeline;
pub mod record;
pub mod scaler;
pub mod schema;

#[cfg(test)]
mod testutil;

pub use assembler::{EncodedFeatureVector, FeatureAssembler};
pub use batch::{BatchSummary, predict_csv, predict_csv_file};
pub use classifier::{Classifier, NaiveBayesClassifier, PredictionResult, RiskLabel};
pub use config::ArtifactPaths;
pub use encoder::{EncoderRegistry, LabelEncoder};
pub use error::{Result, StrokeError};
pub use pipeline::StrokePredictor;
pub use record::RawInputRecord;
pub use scaler::StandardScaler;
pub use schema::{FEATURE_ORDER, Feature, N_FEATURES};
