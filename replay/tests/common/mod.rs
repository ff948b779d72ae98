//! Builds synthetic replay files with known field values.

#![allow(dead_code)]

pub const GAME_ID: [u8; 16] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];

#[derive(Clone, Debug)]
pub struct ReplayFile {
    pub version: i32,
    pub engine_version_len: usize,
    pub header_size: Option<i32>,
    pub engine_version: Vec<u8>,
    pub game_id: [u8; 16],
    pub unix_time: i64,
    pub script: Vec<u8>,
    pub script_size: Option<i32>,
    pub demo_stream_size: i32,
    pub game_time: i32,
    pub wallclock_time: i32,
    /// player count through winning ally team size, in file order.
    pub stats: [i32; 8],
    pub trailing: Vec<u8>,
}

impl ReplayFile {
    /// The scenario most tests start from: a version 5 replay of a ten
    /// minute game with a 20 byte script block.
    pub fn current() -> Self {
        let mut script = b"[GAME]{}\0".to_vec();
        script.resize(20, 0);

        Self {
            version: 5,
            engine_version_len: 256,
            header_size: None,
            engine_version: b"105.0".to_vec(),
            game_id: GAME_ID,
            unix_time: 1_600_000_000,
            script,
            script_size: None,
            demo_stream_size: 0,
            game_time: 600,
            wallclock_time: 650,
            stats: [0; 8],
            trailing: Vec::new(),
        }
    }

    pub fn legacy() -> Self {
        Self {
            version: 4,
            engine_version_len: 16,
            engine_version: b"0.82.7.1".to_vec(),
            ..Self::current()
        }
    }

    /// Size of the header as laid out, counted from the start of the file.
    pub fn natural_header_size(&self) -> i32 {
        (16 + 4 + 4 + self.engine_version_len + 16 + 8 + 12 * 4) as i32
    }

    pub fn build(&self) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"spring demofile\0");
        data.extend_from_slice(&self.version.to_le_bytes());
        data.extend_from_slice(&self.header_size.unwrap_or(self.natural_header_size()).to_le_bytes());

        let mut engine_version = self.engine_version.clone();
        engine_version.resize(self.engine_version_len, 0);
        data.extend_from_slice(&engine_version);

        data.extend_from_slice(&self.game_id);
        data.extend_from_slice(&self.unix_time.to_le_bytes());

        let script_size = self.script_size.unwrap_or(self.script.len() as i32);
        let ints = [script_size, self.demo_stream_size, self.game_time, self.wallclock_time];
        for value in ints.iter().chain(self.stats.iter()) {
            data.extend_from_slice(&value.to_le_bytes());
        }

        data.extend_from_slice(&self.script);
        data.extend_from_slice(&self.trailing);
        data
    }
}
