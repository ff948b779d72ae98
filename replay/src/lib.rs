//! Decoding for replay ("demo") files recorded by the Spring RTS engine.
//!
//! A replay starts with a fixed-layout header followed by the start script
//! the game was launched with, the demo stream and end-of-game statistics.
//! This crate decodes the header and the start script; the remaining blocks
//! are located (see [`ReplayLayout`]) but left to the caller.
//!
//! ```ignore
//! let data = std::fs::read("demos/20200516_match.sdf")?;
//! let replay = Replay::decode(&data, "demos/20200516_match.sdf")?;
//!
//! println!("{} on {:?}", replay.header.engine_version, replay.game_specification.map_name());
//! ```

use std::path::PathBuf;

use serde::Serialize;
use spring_start_script::GameSpecification;

pub mod config;
pub mod cursor;
pub mod decoder;
pub mod errors;
pub mod header;
pub mod layout;
pub mod parser;
pub mod types;

pub use crate::{
    config::{JsonFileConfig, ReplayConfig, ReplayConfigSource, ScriptEncoding},
    cursor::{ByteCursor, FixedWidth},
    decoder::{ReplayDecoder, ReplayDecoderBuilder, decode_header},
    errors::{ConfigError, ReplayError, Result},
    header::{GAME_ID_LEN, HeaderVariant, MAGIC_NUMBER, RawHeader},
    layout::ReplayLayout,
    parser::{ReplayParser, SpringReplayParser},
    types::ReplayHeader,
};

/// A decoded replay.
#[derive(Clone, Debug, Serialize)]
pub struct Replay {
    pub header: ReplayHeader,

    /// Every header field as stored in the file.
    pub raw_header: RawHeader,

    /// Where the replay was loaded from. Never interpreted.
    pub file_path: PathBuf,

    pub game_specification: GameSpecification,
}

impl Replay {
    /// Decodes `data` with the default start script decoder and settings.
    pub fn decode(data: &[u8], file_path: impl Into<PathBuf>) -> Result<Self> {
        ReplayDecoder::default().decode(data, file_path)
    }

    /// Locates the blocks that follow the header.
    pub fn layout(&self) -> Result<ReplayLayout> {
        ReplayLayout::from_header(&self.raw_header)
    }
}
