//! Fixed-layout replay headers.
//!
//! Versions 4 and 5 share one field order and differ only in how wide the
//! engine version string is, so a single routine decodes both, parameterised
//! by [`HeaderVariant`].
//!
//! | Offset   | Size       | Field                          |
//! |----------|------------|--------------------------------|
//! | 0        | 16         | magic, `"spring demofile\0"`   |
//! | 16       | 4          | version                        |
//! | 20       | 4          | header size                    |
//! | 24       | 16 / 256   | engine version (NUL padded)    |
//! | +0       | 16         | game id                        |
//! | +16      | 8          | unix start time                |
//! | +24      | 12 x 4     | block sizes and game stats     |

use std::ffi::CStr;

use serde::Serialize;

use crate::cursor::ByteCursor;
use crate::errors::{ReplayError, Result};

/// Signature every replay starts with.
pub const MAGIC_NUMBER: &[u8; 16] = b"spring demofile\0";

/// Width of the game identifier.
pub const GAME_ID_LEN: usize = 16;

/// Bytes before the variant-specific part: magic, version and header size.
const PREFIX_LEN: usize = MAGIC_NUMBER.len() + 4 + 4;

/// Bytes after the engine version: game id, start time and twelve `i32`s.
const TRAILER_LEN: usize = GAME_ID_LEN + 8 + 12 * 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HeaderVariant {
    /// Version 4, 16 byte engine version.
    Legacy,
    /// Version 5, 256 byte engine version.
    Current,
}

impl HeaderVariant {
    /// Selects the schema for a version tag. There is no fallback: anything
    /// other than 4 or 5 is rejected.
    pub fn from_version(version: i32) -> Result<Self> {
        match version {
            5 => Ok(Self::Current),
            4 => Ok(Self::Legacy),
            other => Err(ReplayError::UnrecognisedVersion(other)),
        }
    }

    pub const fn version(self) -> i32 {
        match self {
            Self::Legacy => 4,
            Self::Current => 5,
        }
    }

    pub const fn engine_version_len(self) -> usize {
        match self {
            Self::Legacy => 16,
            Self::Current => 256,
        }
    }

    /// Size a well-formed header of this variant declares for itself.
    pub const fn expected_header_size(self) -> usize {
        PREFIX_LEN + self.engine_version_len() + TRAILER_LEN
    }

    /// Decodes the header fields that follow the version tag and checks that
    /// the number of bytes consumed from the start of the file matches the
    /// size the header declares.
    pub fn decode(self, cursor: &mut ByteCursor<'_>) -> Result<RawHeader> {
        let header_size = cursor.read::<i32>()?;
        let engine_version = cursor.read_array::<u8>(self.engine_version_len())?;
        let game_id = cursor.read_byte_array::<GAME_ID_LEN>()?;
        let unix_start_time = cursor.read::<i64>()?;

        let header = RawHeader {
            variant: self,
            header_size,
            engine_version,
            game_id,
            unix_start_time,
            script_size: cursor.read()?,
            demo_stream_size: cursor.read()?,
            game_time: cursor.read()?,
            wallclock_time: cursor.read()?,
            player_count: cursor.read()?,
            player_stat_size: cursor.read()?,
            player_stat_element_size: cursor.read()?,
            team_stat_count: cursor.read()?,
            team_stat_size: cursor.read()?,
            team_stat_element_size: cursor.read()?,
            team_stat_period: cursor.read()?,
            winning_ally_team_size: cursor.read()?,
        };

        let actual = cursor.offset();
        if usize::try_from(header_size).ok() != Some(actual) {
            return Err(ReplayError::HeaderSizeMismatch {
                expected: header_size,
                actual,
            });
        }

        Ok(header)
    }
}

/// Every field of a decoded header, as stored in the file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RawHeader {
    pub variant: HeaderVariant,
    /// Declared size of the header in bytes, counted from the start of the file.
    pub header_size: i32,
    /// NUL padded engine version string.
    pub engine_version: Vec<u8>,
    pub game_id: [u8; GAME_ID_LEN],
    /// Seconds since the unix epoch at which the game started.
    pub unix_start_time: i64,
    /// Size of the start script block that follows the header.
    pub script_size: i32,
    pub demo_stream_size: i32,
    /// Game time in seconds, independent of the speed the game ran at.
    pub game_time: i32,
    pub wallclock_time: i32,
    /// Players, including spectators and those who joined after the start.
    pub player_count: i32,
    pub player_stat_size: i32,
    pub player_stat_element_size: i32,
    /// Teams (not ally teams) for which statistics were saved.
    pub team_stat_count: i32,
    pub team_stat_size: i32,
    pub team_stat_element_size: i32,
    /// Seconds between team statistics samples.
    pub team_stat_period: i32,
    pub winning_ally_team_size: i32,
}

impl RawHeader {
    /// Engine version with the NUL padding removed.
    pub fn engine_version_text(&self) -> String {
        String::from_utf8_lossy(until_nul(&self.engine_version)).into_owned()
    }

    /// The identifier as the decimal value of each byte, concatenated without
    /// separators. Kept for compatibility with existing replay indexes; it is
    /// ambiguous, see [`RawHeader::game_id_hex`].
    pub fn game_id_string(&self) -> String {
        self.game_id.iter().map(u8::to_string).collect()
    }

    /// The identifier as 32 lowercase hexadecimal digits.
    pub fn game_id_hex(&self) -> String {
        self.game_id.iter().map(|byte| format!("{byte:02x}")).collect()
    }
}

/// Returns `bytes` up to (not including) the first NUL, or all of it if there
/// is none.
pub(crate) fn until_nul(bytes: &[u8]) -> &[u8] {
    CStr::from_bytes_until_nul(bytes).map_or(bytes, CStr::to_bytes)
}
