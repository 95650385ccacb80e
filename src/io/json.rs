//! JSON scene files
//!
//! Streams through `BufReader` / `BufWriter` rather than building an
//! intermediate string for file I/O.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::{IoError, SceneFile};

/// Save a scene file as pretty-printed JSON
pub fn save_scene(file: &SceneFile, path: impl AsRef<Path>) -> Result<(), IoError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, file)
        .map_err(|e| IoError::Serialization(e.to_string()))?;
    writer.flush()?;
    Ok(())
}

/// Load a scene file
pub fn load_scene(path: impl AsRef<Path>) -> Result<SceneFile, IoError> {
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(|e| IoError::Serialization(e.to_string()))
}

/// Serialize a scene file to a JSON string
pub fn to_json_string(file: &SceneFile) -> Result<String, IoError> {
    serde_json::to_string_pretty(file).map_err(|e| IoError::Serialization(e.to_string()))
}

/// Parse a scene file from a JSON string
pub fn from_json_string(json: &str) -> Result<SceneFile, IoError> {
    serde_json::from_str(json).map_err(|e| IoError::Serialization(e.to_string()))
}
