//! Turns a [`RawInputRecord`] into the classifier's input vector.
//!
//! Categorical fields are label-encoded first, the whole vector is laid out
//! in [`FEATURE_ORDER`], and only then are the numeric positions replaced by
//! their standardized values. The scaler statistics were fit on that
//! post-encoding layout, so neither the order nor the encode-then-scale
//! sequence may change.

use crate::encoder::EncoderRegistry;
use crate::error::{Result, StrokeError};
use crate::record::{FieldValue, RawInputRecord};
use crate::scaler::StandardScaler;
use crate::schema::{FEATURE_ORDER, Feature, N_FEATURES};
use log::debug;
use ndarray::{Array1, Array2, ArrayView1, Axis};

/// Fixed-order numeric vector ready for the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFeatureVector(Array1<f64>);

impl EncodedFeatureVector {
    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.position()]
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.0.view()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The vector as a single-row matrix.
    pub fn to_row(&self) -> Array2<f64> {
        self.0.clone().insert_axis(Axis(0))
    }
}

/// Owns the encoding artifacts and the scaler's resolved vector positions.
#[derive(Debug, Clone)]
pub struct FeatureAssembler {
    encoders: EncoderRegistry,
    scaler: StandardScaler,
    scaled_positions: Vec<usize>,
}

impl FeatureAssembler {
    /// Validates both artifacts against the feature layout.
    pub fn new(encoders: EncoderRegistry, scaler: StandardScaler) -> Result<Self> {
        encoders.validate_schema()?;
        let scaled_positions = scaler.positions()?;
        Ok(FeatureAssembler {
            encoders,
            scaler,
            scaled_positions,
        })
    }

    pub fn encoders(&self) -> &EncoderRegistry {
        &self.encoders
    }

    pub fn assemble(&self, record: &RawInputRecord) -> Result<EncodedFeatureVector> {
        record.require_selections()?;

        let mut values = Array1::<f64>::zeros(N_FEATURES);
        for feature in FEATURE_ORDER {
            values[feature.position()] = match record.value(feature) {
                FieldValue::Category(Some(v)) => self.encoders.encode(feature, v)? as f64,
                FieldValue::Category(None) => {
                    return Err(StrokeError::MissingSelection(vec![feature]));
                }
                FieldValue::Number(x) => x,
            };
        }

        let raw = values.select(Axis(0), &self.scaled_positions);
        let scaled = self.scaler.transform(raw.view())?;
        for (&pos, &z) in self.scaled_positions.iter().zip(scaled.iter()) {
            values[pos] = z;
        }

        debug!("assembled feature vector {values}");
        Ok(EncodedFeatureVector(values))
    }
}
