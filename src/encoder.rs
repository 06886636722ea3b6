//! Label encoders for the categorical fields.

use crate::artifact::{load_msgpack, save_msgpack};
use crate::error::{Result, StrokeError};
use crate::schema::{Feature, categorical_features};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Maps the values of one categorical field to the integer codes the
/// classifier was trained on. Classes are kept sorted; a value's code is its
/// index in that list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = values.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        LabelEncoder { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn encode(&self, value: &str) -> Option<usize> {
        self.classes.binary_search_by(|c| c.as_str().cmp(value)).ok()
    }

    pub fn decode(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }
}

/// One [`LabelEncoder`] per categorical field, keyed by artifact column name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncoderRegistry {
    encoders: BTreeMap<String, LabelEncoder>,
}

impl EncoderRegistry {
    /// Builds encoders over the domains the form offers.
    pub fn from_declared_domains() -> Self {
        let mut registry = EncoderRegistry::default();
        for feature in categorical_features() {
            let domain = feature.domain().unwrap_or_default();
            registry.insert(feature, LabelEncoder::from_values(domain.iter().copied()));
        }
        registry
    }

    pub fn insert(&mut self, feature: Feature, encoder: LabelEncoder) {
        self.encoders.insert(feature.name().to_string(), encoder);
    }

    pub fn get(&self, feature: Feature) -> Option<&LabelEncoder> {
        self.encoders.get(feature.name())
    }

    /// Integer code of `value` for `feature`.
    pub fn encode(&self, feature: Feature, value: &str) -> Result<usize> {
        self.get(feature)
            .and_then(|encoder| encoder.encode(value))
            .ok_or_else(|| StrokeError::UnknownCategory {
                field: feature.name().to_string(),
                value: value.to_string(),
            })
    }

    pub fn decode(&self, feature: Feature, code: usize) -> Option<&str> {
        self.get(feature).and_then(|encoder| encoder.decode(code))
    }

    /// Checks that every categorical field has an encoder covering its
    /// declared domain, and that no other field has one.
    pub fn validate_schema(&self) -> Result<()> {
        for name in self.encoders.keys() {
            match Feature::from_name(name) {
                Some(feature) if feature.is_categorical() => {}
                Some(_) => {
                    return Err(StrokeError::Schema(format!(
                        "encoder registry has an encoder for numeric field {name}"
                    )));
                }
                None => {
                    return Err(StrokeError::Schema(format!(
                        "encoder registry has an encoder for unknown field {name}"
                    )));
                }
            }
        }

        for feature in categorical_features() {
            let encoder = self.get(feature).ok_or_else(|| {
                StrokeError::Schema(format!("no encoder for field {}", feature.name()))
            })?;
            for value in feature.domain().unwrap_or_default() {
                if encoder.encode(value).is_none() {
                    return Err(StrokeError::Schema(format!(
                        "encoder for {} cannot encode {value:?}",
                        feature.name()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Saves the registry to a binary `.msgpack` file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        save_msgpack(self, path)
    }

    /// Loads the registry from a binary `.msgpack` file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let registry: EncoderRegistry = load_msgpack(path)?;
        info!(
            "📦 Loaded {} label encoders from {:?}",
            registry.encoders.len(),
            path
        );
        Ok(registry)
    }
}
