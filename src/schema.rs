//! The fixed feature layout shared by the encoders, the scaler and the classifier.
//!
//! The order of [`FEATURE_ORDER`] is the column order the artifacts were trained
//! on. It is not recorded in the feature vector itself, so every stage resolves
//! positions through [`Feature::position`] instead of literal indices.

use crate::error::{Result, StrokeError};
use serde::{Deserialize, Serialize};

/// One input attribute of a patient record. The discriminant is the
/// feature's column in the encoded vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Feature {
    Gender = 0,
    Age = 1,
    Hypertension = 2,
    HeartDisease = 3,
    EverMarried = 4,
    WorkType = 5,
    ResidenceType = 6,
    AvgGlucoseLevel = 7,
    Bmi = 8,
    SmokingStatus = 9,
}

/// Column order of the encoded feature vector.
pub const FEATURE_ORDER: [Feature; 10] = [
    Feature::Gender,
    Feature::Age,
    Feature::Hypertension,
    Feature::HeartDisease,
    Feature::EverMarried,
    Feature::WorkType,
    Feature::ResidenceType,
    Feature::AvgGlucoseLevel,
    Feature::Bmi,
    Feature::SmokingStatus,
];

pub const N_FEATURES: usize = FEATURE_ORDER.len();

const GENDER: &[&str] = &["Male", "Female"];
const BINARY_FLAG: &[&str] = &["0", "1"];
const EVER_MARRIED: &[&str] = &["Yes", "No"];
const WORK_TYPE: &[&str] = &[
    "Govt_job",
    "Never_worked",
    "children",
    "Private",
    "Self-employed",
];
const RESIDENCE_TYPE: &[&str] = &["Urban", "Rural"];
const SMOKING_STATUS: &[&str] = &["never smoked", "Unknown", "formerly smoked", "smokes"];

/// Inclusive bounds the form enforces on a numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBounds {
    pub min: f64,
    pub max: f64,
    pub integer: bool,
}

impl NumericBounds {
    /// Returns `value` unchanged if it lies within the bounds.
    pub fn check(&self, feature: Feature, value: f64) -> Result<f64> {
        let in_range = value >= self.min && value <= self.max;
        let integral = !self.integer || value.fract() == 0.0;
        if in_range && integral {
            Ok(value)
        } else {
            Err(StrokeError::InvalidRange {
                field: feature.name().to_string(),
                value,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Value a field takes when the user leaves it untouched.
    pub fn default_value(&self) -> f64 {
        self.min
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureKind {
    Categorical(&'static [&'static str]),
    Numeric(NumericBounds),
}

impl Feature {
    /// Column name used in the trained artifacts and in CSV headers.
    pub const fn name(self) -> &'static str {
        match self {
            Feature::Gender => "gender",
            Feature::Age => "age",
            Feature::Hypertension => "hypertension",
            Feature::HeartDisease => "heart_disease",
            Feature::EverMarried => "ever_married",
            Feature::WorkType => "work_type",
            Feature::ResidenceType => "Residence_type",
            Feature::AvgGlucoseLevel => "avg_glucose_level",
            Feature::Bmi => "bmi",
            Feature::SmokingStatus => "smoking_status",
        }
    }

    /// Human readable label shown by the form.
    pub const fn label(self) -> &'static str {
        match self {
            Feature::Gender => "Gender",
            Feature::Age => "Age",
            Feature::Hypertension => "History of hypertension",
            Feature::HeartDisease => "History of heart disease",
            Feature::EverMarried => "Ever married",
            Feature::WorkType => "Work type",
            Feature::ResidenceType => "Residence type",
            Feature::AvgGlucoseLevel => "Average glucose level",
            Feature::Bmi => "BMI",
            Feature::SmokingStatus => "Smoking status",
        }
    }

    pub const fn kind(self) -> FeatureKind {
        match self {
            Feature::Gender => FeatureKind::Categorical(GENDER),
            Feature::Hypertension | Feature::HeartDisease => FeatureKind::Categorical(BINARY_FLAG),
            Feature::EverMarried => FeatureKind::Categorical(EVER_MARRIED),
            Feature::WorkType => FeatureKind::Categorical(WORK_TYPE),
            Feature::ResidenceType => FeatureKind::Categorical(RESIDENCE_TYPE),
            Feature::SmokingStatus => FeatureKind::Categorical(SMOKING_STATUS),
            Feature::Age => FeatureKind::Numeric(NumericBounds {
                min: 1.0,
                max: 100.0,
                integer: true,
            }),
            Feature::AvgGlucoseLevel => FeatureKind::Numeric(NumericBounds {
                min: 0.0,
                max: 300.0,
                integer: false,
            }),
            Feature::Bmi => FeatureKind::Numeric(NumericBounds {
                min: 0.0,
                max: 60.0,
                integer: false,
            }),
        }
    }

    /// Index of this feature in the encoded vector.
    pub const fn position(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Option<Feature> {
        FEATURE_ORDER.iter().copied().find(|f| f.name() == name)
    }

    pub fn is_categorical(self) -> bool {
        matches!(self.kind(), FeatureKind::Categorical(_))
    }

    /// Declared domain of a categorical feature, in form order.
    pub fn domain(self) -> Option<&'static [&'static str]> {
        match self.kind() {
            FeatureKind::Categorical(domain) => Some(domain),
            FeatureKind::Numeric(_) => None,
        }
    }

    pub fn bounds(self) -> Option<NumericBounds> {
        match self.kind() {
            FeatureKind::Numeric(bounds) => Some(bounds),
            FeatureKind::Categorical(_) => None,
        }
    }

    /// Whether the domain values are numerals (the Yes/No flags). Such
    /// values are only ever selected through their display text.
    pub fn has_numeral_domain(self) -> bool {
        self.domain().is_some_and(|domain| {
            domain
                .iter()
                .all(|v| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()))
        })
    }

    /// Text shown for a domain value; binary flags read as Yes/No.
    pub fn display_value(self, value: &str) -> &str {
        match (self, value) {
            (Feature::Hypertension | Feature::HeartDisease, "1") => "Yes",
            (Feature::Hypertension | Feature::HeartDisease, "0") => "No",
            _ => value,
        }
    }
}

pub fn categorical_features() -> impl Iterator<Item = Feature> {
    FEATURE_ORDER.into_iter().filter(|f| f.is_categorical())
}

pub fn numeric_features() -> impl Iterator<Item = Feature> {
    FEATURE_ORDER.into_iter().filter(|f| !f.is_categorical())
}

/// Artifact column names in vector order.
pub fn feature_names() -> Vec<String> {
    FEATURE_ORDER.iter().map(|f| f.name().to_string()).collect()
}
