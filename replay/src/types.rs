use serde::Serialize;
use time::{Duration, OffsetDateTime};

use crate::errors::{ReplayError, Result};
use crate::header::RawHeader;

/// The parts of a replay header most callers care about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReplayHeader {
    /// File format version the replay was written with.
    pub version: i32,

    /// The engine version that recorded the replay.
    pub engine_version: String,

    /// The game identifier, each byte rendered in decimal and concatenated.
    pub game_id: String,

    /// When the game started.
    #[serde(with = "time::serde::timestamp")]
    pub game_start_date: OffsetDateTime,

    /// Game time in seconds. One game frame counts as 1/30 of a second no
    /// matter what speed the game was played at.
    pub duration: i32,
}

impl ReplayHeader {
    pub(crate) fn from_raw(raw: &RawHeader) -> Result<Self> {
        let game_start_date = OffsetDateTime::from_unix_timestamp(raw.unix_start_time)
            .map_err(|_| ReplayError::InvalidStartTime(raw.unix_start_time))?;

        Ok(Self {
            version: raw.variant.version(),
            engine_version: raw.engine_version_text(),
            game_id: raw.game_id_string(),
            game_start_date,
            duration: raw.game_time,
        })
    }

    pub fn game_duration(&self) -> Duration {
        Duration::seconds(self.duration.into())
    }
}
