//! Standardization of the numeric fields.

use crate::artifact::{load_msgpack, save_msgpack};
use crate::error::{Result, StrokeError};
use crate::schema::{Feature, numeric_features};
use log::info;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Trained `(x - mean) / scale` transform over a fixed list of numeric fields.
///
/// The scaler does not range-check its input; bounds belong to whoever
/// collects the raw values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    features: Vec<String>,
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    pub fn new(features: Vec<String>, mean: Array1<f64>, scale: Array1<f64>) -> Result<Self> {
        if features.len() != mean.len() || features.len() != scale.len() {
            return Err(StrokeError::Schema(format!(
                "scaler has {} features but {} means and {} scales",
                features.len(),
                mean.len(),
                scale.len()
            )));
        }
        // Constant training columns carry a zero scale; leave them unscaled.
        let scale = scale.mapv(|s| if s == 0.0 { 1.0 } else { s });
        Ok(StandardScaler {
            features,
            mean,
            scale,
        })
    }

    pub fn transform(&self, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.check_width(x.len())?;
        Ok((&x - &self.mean) / &self.scale)
    }

    pub fn inverse_transform(&self, z: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.check_width(z.len())?;
        Ok(&z * &self.scale + &self.mean)
    }

    /// Resolves the scaled fields to feature-vector positions. They must be
    /// exactly the numeric fields, in vector order.
    pub fn positions(&self) -> Result<Vec<usize>> {
        let expected: Vec<&str> = numeric_features().map(Feature::name).collect();
        let actual: Vec<&str> = self.features.iter().map(String::as_str).collect();
        if actual != expected {
            return Err(StrokeError::Schema(format!(
                "scaler was fit on {actual:?}, expected {expected:?}"
            )));
        }
        Ok(numeric_features().map(Feature::position).collect())
    }

    fn check_width(&self, len: usize) -> Result<()> {
        if len == self.features.len() {
            Ok(())
        } else {
            Err(StrokeError::Schema(format!(
                "scaler expects {} values, got {len}",
                self.features.len()
            )))
        }
    }

    /// Saves the scaler to a binary `.msgpack` file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        save_msgpack(self, path)
    }

    /// Loads the scaler from a binary `.msgpack` file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let stored: StandardScaler = load_msgpack(path)?;
        let scaler = StandardScaler::new(stored.features, stored.mean, stored.scale)?;
        info!("📦 Loaded scaler over {:?} from {:?}", scaler.features, path);
        Ok(scaler)
    }
}
