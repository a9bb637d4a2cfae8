//! JSON file registry at `<save_location>/models.json`.
//!
//! The file is a JSON array of records. Every hyperparameter and statistics
//! object carries a `type` discriminator; tags are checked against the
//! variants this build knows before typed decoding, so an unknown tag fails
//! the whole load instead of dropping data.

use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::RegistryPort;
use crate::record::{TrainedModelRecord, HYPERPARAMETER_TAGS, STATISTICS_TAGS};
use crate::{Error, Result};

/// File name of the registry inside the save location.
pub const REGISTRY_FILE_NAME: &str = "models.json";

/// Scratch file a save is written to before it replaces the registry.
pub const REGISTRY_TEMP_FILE_NAME: &str = "models.json.tmp";

/// Registry persisted as a single JSON file.
///
/// Saves go to a scratch file that is then renamed over the registry, so a
/// failed write never truncates the previous contents.
#[derive(Debug, Clone)]
pub struct JsonFileRegistry {
    directory: PathBuf,
    path: PathBuf,
    temp_path: PathBuf,
}

impl JsonFileRegistry {
    /// Registry file inside `save_location`.
    #[must_use]
    pub fn new(save_location: impl Into<PathBuf>) -> Self {
        let directory = save_location.into();
        let path = directory.join(REGISTRY_FILE_NAME);
        let temp_path = directory.join(REGISTRY_TEMP_FILE_NAME);
        Self {
            directory,
            path,
            temp_path,
        }
    }

    /// Full path of the registry file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegistryPort for JsonFileRegistry {
    fn load(&self) -> Result<Vec<TrainedModelRecord>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        decode_records(&json)
    }

    fn save(&self, records: &[TrainedModelRecord]) -> Result<()> {
        let json = encode_records(records)?;
        fs::create_dir_all(&self.directory)?;
        if let Err(e) = replace_file(&self.temp_path, &self.path, json.as_bytes()) {
            // Scratch file may be partial; the registry itself is untouched
            let _ = fs::remove_file(&self.temp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

fn replace_file(temp_path: &Path, path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = File::create(temp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    fs::rename(temp_path, path)
}

/// Encode records as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn encode_records(records: &[TrainedModelRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Decode a JSON array of records.
///
/// # Errors
///
/// Returns [`Error::UnknownRecordVariant`] if any `type` tag is not known to
/// this build, or [`Error::Serialization`] if the JSON is malformed.
pub fn decode_records(json: &str) -> Result<Vec<TrainedModelRecord>> {
    let value: Value = serde_json::from_str(json)?;
    if let Some(records) = value.as_array() {
        for record in records {
            check_variants(record)?;
        }
    }
    Ok(serde_json::from_value(value)?)
}

fn check_variants(record: &Value) -> Result<()> {
    if let Some(parameters) = record.get("configuration").and_then(Value::as_array) {
        for parameter in parameters {
            check_tag(parameter, "hyperparameter", HYPERPARAMETER_TAGS)?;
        }
    }
    if let Some(statistics) = record.get("statistics") {
        check_tag(statistics, "model statistics", STATISTICS_TAGS)?;
    }
    Ok(())
}

// Missing or non-string tags are left to serde's own error.
fn check_tag(value: &Value, kind: &'static str, known: &[&str]) -> Result<()> {
    match value.get("type").and_then(Value::as_str) {
        Some(tag) if !known.contains(&tag) => Err(Error::UnknownRecordVariant {
            kind,
            tag: tag.to_string(),
        }),
        _ => Ok(()),
    }
}
