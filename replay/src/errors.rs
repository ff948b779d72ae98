use std::str::Utf8Error;

use spring_start_script::ScriptError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReplayError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("read of {requested} bytes at offset {offset} runs past the end of a {len} byte buffer")]
    OutOfBounds { offset: usize, requested: usize, len: usize },

    #[error("not a replay file: magic number is missing")]
    MissingMagicNumber,

    #[error("unsupported replay version {0}")]
    UnrecognisedVersion(i32),

    #[error("corrupt header: declared size is {expected} bytes but {actual} were read")]
    HeaderSizeMismatch { expected: i32, actual: usize },

    #[error("corrupt header: declared {field} size {size} is not a valid length")]
    InvalidBlockSize { field: &'static str, size: i32 },

    #[error("corrupt header: game start time {0} is out of range")]
    InvalidStartTime(i64),

    #[error("start script is not valid UTF-8: {0}")]
    ScriptEncoding(#[from] Utf8Error),

    #[error("invalid game specification: {0}")]
    InvalidGameSpecification(#[from] ScriptError),

    #[error("replay io error: {0}")]
    ReplayIo(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    ConfigIo(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),
}
