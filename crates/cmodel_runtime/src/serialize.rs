//! Content model persistence using `MessagePack`.
//!
//! Models are written with named fields so files stay readable by other
//! `MessagePack` tools.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::info;

use cmodel_foundation::{Error, ErrorKind, Result};
use cmodel_store::ContentModel;

/// Serializes a model to bytes.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(model: &ContentModel) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(model).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Deserializes a model from bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not a serialized model.
pub fn from_bytes(bytes: &[u8]) -> Result<ContentModel> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Saves a model to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written or serialization fails.
pub fn save_to_file<P: AsRef<Path>>(model: &ContentModel, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(model)?;

    let file = File::create(path)
        .map_err(|e| Error::io(format!("failed to create file '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| Error::io(format!("failed to write file '{}': {e}", path.display())))?;

    info!(model = %model.name(), path = %path.display(), bytes = bytes.len(), "model saved");
    Ok(())
}

/// Loads a model from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a model.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ContentModel> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::io(format!("failed to open file '{}': {e}", path.display())))?;

    let mut bytes = Vec::new();
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(format!("failed to read file '{}': {e}", path.display())))?;

    let model = from_bytes(&bytes)?;
    info!(model = %model.name(), path = %path.display(), declarations = model.len(), "model loaded");
    Ok(model)
}
