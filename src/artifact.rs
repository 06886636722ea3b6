//! MessagePack persistence shared by the model, encoder and scaler artifacts.

use crate::error::{Result, StrokeError};
use rmp_serde::{decode::from_read, encode::write_named};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Serializes `value` to a `.msgpack` file with named fields.
pub fn save_msgpack<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let io_err = |source| StrokeError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write_named(&mut writer, value).map_err(|source| StrokeError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_err)
}

/// Deserializes a value previously written by [`save_msgpack`].
pub fn load_msgpack<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|source| StrokeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    from_read(reader).map_err(|source| StrokeError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
