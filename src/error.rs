use crate::schema::Feature;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading artifacts or running a prediction.
#[derive(Debug, Error)]
pub enum StrokeError {
    #[error("missing selection for: {}", feature_list(.0))]
    MissingSelection(Vec<Feature>),
    #[error("unknown category {value:?} for field {field}")]
    UnknownCategory { field: String, value: String },
    #[error("{field} = {value} is outside [{min}, {max}]")]
    InvalidRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("artifact schema mismatch: {0}")]
    Schema(String),
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to deserialize {path:?} from MessagePack: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rmp_serde::decode::Error,
    },
    #[error("failed to serialize {path:?} to MessagePack: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: rmp_serde::encode::Error,
    },
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("classifier error: {0}")]
    Classifier(String),
}

pub type Result<T> = std::result::Result<T, StrokeError>;

fn feature_list(features: &[Feature]) -> String {
    features
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}
