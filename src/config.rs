use std::fmt;
use std::path::{Path, PathBuf};

pub const MODEL_FILE: &str = "model.msgpack";
pub const ENCODERS_FILE: &str = "label_encoders.msgpack";
pub const SCALER_FILE: &str = "scaler.msgpack";

/// Where the three trained artifacts live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub encoders: PathBuf,
    pub scaler: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        ArtifactPaths {
            model: dir.join(MODEL_FILE),
            encoders: dir.join(ENCODERS_FILE),
            scaler: dir.join(SCALER_FILE),
        }
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        ArtifactPaths::in_dir(Path::new("."))
    }
}

impl fmt::Display for ArtifactPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "model={}, encoders={}, scaler={}",
            self.model.display(),
            self.encoders.display(),
            self.scaler.display()
        )
    }
}
