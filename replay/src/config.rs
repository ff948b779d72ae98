use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// How start script bytes become text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptEncoding {
    /// Invalid UTF-8 is replaced with U+FFFD.
    #[default]
    Lossy,

    /// Invalid UTF-8 fails the decode.
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Absolute or relative path to the replay file to load.
    pub replay_path: Option<PathBuf>,

    pub script_encoding: ScriptEncoding,
}

pub trait ReplayConfigSource: std::fmt::Debug {
    fn read_current(&self) -> Result<ReplayConfig, ConfigError>;
}

/// Reads a JSON file off disk every time `read_current` is called, so the
/// desired replay can be switched by rewriting the file.
#[derive(Debug, Clone)]
pub struct JsonFileConfig {
    path: PathBuf,
}

impl JsonFileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReplayConfigSource for JsonFileConfig {
    fn read_current(&self) -> Result<ReplayConfig, ConfigError> {
        let txt = fs::read_to_string(&self.path).map_err(|e| ConfigError::ConfigIo(format!("{}: {e}", self.path.display())))?;
        serde_json::from_str::<ReplayConfig>(&txt).map_err(|e| ConfigError::ConfigParse(format!("{}: {e}", self.path.display())))
    }
}
