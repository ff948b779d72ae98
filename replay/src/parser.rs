use std::fs;
use std::path::Path;

use spring_logging::Log;

use crate::config::ReplayConfigSource;
use crate::decoder::ReplayDecoder;
use crate::errors::{ReplayError, Result};
use crate::Replay;

pub trait ReplayParser: std::fmt::Debug {
    fn parse(&self, path: &Path) -> Result<Replay>;
}

/// Loads replay files from disk in full and decodes them.
#[derive(Debug, Default)]
pub struct SpringReplayParser {
    decoder: ReplayDecoder,
}

impl SpringReplayParser {
    pub fn new(decoder: ReplayDecoder) -> Self {
        Self { decoder }
    }

    /// Loads whichever replay `source` currently points at, decoding with
    /// its script encoding. Returns `Ok(None)` if no replay is configured.
    pub fn parse_configured(&self, source: &dyn ReplayConfigSource) -> Result<Option<Replay>> {
        let config = source.read_current()?;

        let Some(path) = config.replay_path else {
            tracing::debug!(target: Log::Replay, "No replay path configured");
            return Ok(None);
        };

        let data = read(&path)?;

        self.decoder
            .decode_as(&data, path.clone(), config.script_encoding)
            .inspect_err(|error| log_failure(&path, error))
            .map(Some)
    }
}

impl ReplayParser for SpringReplayParser {
    fn parse(&self, path: &Path) -> Result<Replay> {
        let data = read(path)?;

        self.decoder.decode(&data, path).inspect_err(|error| log_failure(path, error))
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        tracing::warn!(target: Log::Replay, ?path, error = ?e, "Unable to read replay file");
        ReplayError::ReplayIo(format!("{}: {e}", path.display()))
    })
}

fn log_failure(path: &Path, error: &ReplayError) {
    tracing::warn!(target: Log::Replay, ?path, ?error, "Unable to decode replay file");
}
