//! Where each block of a replay lives.
//!
//! After the header the engine writes, in order: the start script, the demo
//! stream, the winning ally teams, player statistics and team statistics.
//! Only the script is decoded here; the rest are located from the sizes the
//! header declares so callers can slice them out themselves.

use std::ops::Range;

use serde::Serialize;

use crate::errors::{ReplayError, Result};
use crate::header::RawHeader;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReplayLayout {
    pub header: Range<usize>,
    pub script: Range<usize>,
    pub demo_stream: Range<usize>,
    pub winning_ally_teams: Range<usize>,
    pub player_stats: Range<usize>,
    pub team_stats: Range<usize>,
}

impl ReplayLayout {
    pub fn from_header(header: &RawHeader) -> Result<Self> {
        let mut end: usize = 0;
        let mut next = |field: &'static str, size: i32| -> Result<Range<usize>> {
            let start = end;
            end = usize::try_from(size)
                .ok()
                .and_then(|len| start.checked_add(len))
                .ok_or(ReplayError::InvalidBlockSize { field, size })?;

            Ok(start..end)
        };

        Ok(Self {
            header: next("header", header.header_size)?,
            script: next("script", header.script_size)?,
            demo_stream: next("demo stream", header.demo_stream_size)?,
            winning_ally_teams: next("winning ally team", header.winning_ally_team_size)?,
            player_stats: next("player statistics", header.player_stat_size)?,
            team_stats: next("team statistics", header.team_stat_size)?,
        })
    }

    /// Offset one past the last declared block.
    pub fn end(&self) -> usize {
        self.team_stats.end
    }

    /// Whether a file of `len` bytes holds every declared block. Replays from
    /// a game that did not shut down cleanly are usually cut short.
    pub fn is_complete(&self, len: usize) -> bool {
        len >= self.end()
    }
}
