//! Loading replays from disk, directly and through a config file.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use spring_replay::{ConfigError, JsonFileConfig, ReplayError, ReplayParser, SpringReplayParser};

mod common;
use common::ReplayFile;

/// A file under the system temp dir that is removed when dropped.
struct TempFile(PathBuf);

impl TempFile {
    fn new(name: &str, contents: &[u8]) -> Self {
        let path = std::env::temp_dir().join(format!("spring-replay-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        Self(path)
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

#[test]
fn test_parses_replay_from_disk() {
    let file = TempFile::new("direct.sdf", &ReplayFile::current().build());

    let replay = SpringReplayParser::default().parse(file.path()).unwrap();

    assert_eq!(replay.header.engine_version, "105.0");
    assert_eq!(replay.file_path, file.path());
}

#[test]
fn test_missing_file_is_an_io_error() {
    let error = SpringReplayParser::default()
        .parse(Path::new("/nonexistent/spring-replay/missing.sdf"))
        .unwrap_err();

    assert!(matches!(error, ReplayError::ReplayIo(message) if message.contains("missing.sdf")));
}

#[test]
fn test_decode_failures_surface_from_disk() {
    let file = TempFile::new("not-a-replay.sdf", b"this is not a replay file at all");

    assert_eq!(
        SpringReplayParser::default().parse(file.path()).unwrap_err(),
        ReplayError::MissingMagicNumber
    );
}

#[test]
fn test_parses_configured_replay() {
    let replay_file = TempFile::new("configured.sdf", &ReplayFile::legacy().build());
    let config_file = TempFile::new(
        "config.json",
        json!({ "replay_path": replay_file.path() }).to_string().as_bytes(),
    );

    let replay = SpringReplayParser::default()
        .parse_configured(&JsonFileConfig::new(config_file.path()))
        .unwrap()
        .unwrap();

    assert_eq!(replay.header.version, 4);
    assert_eq!(replay.file_path, replay_file.path());
}

#[test]
fn test_configured_script_encoding_is_honoured() {
    let replay = ReplayFile {
        script: b"[GAME]{mapname=\xFF;}\0".to_vec(),
        ..ReplayFile::current()
    };
    let replay_file = TempFile::new("strict.sdf", &replay.build());
    let config_file = TempFile::new(
        "strict.json",
        json!({ "replay_path": replay_file.path(), "script_encoding": "strict" })
            .to_string()
            .as_bytes(),
    );

    let error = SpringReplayParser::default()
        .parse_configured(&JsonFileConfig::new(config_file.path()))
        .unwrap_err();

    assert!(matches!(error, ReplayError::ScriptEncoding(_)));
}

#[test]
fn test_nothing_configured() {
    let config_file = TempFile::new("empty.json", b"{}");

    let replay = SpringReplayParser::default()
        .parse_configured(&JsonFileConfig::new(config_file.path()))
        .unwrap();

    assert!(replay.is_none());
}

#[test]
fn test_config_errors_are_wrapped() {
    let config_file = TempFile::new("broken.json", b"{ not json");

    let error = SpringReplayParser::default()
        .parse_configured(&JsonFileConfig::new(config_file.path()))
        .unwrap_err();

    assert!(matches!(error, ReplayError::Config(ConfigError::ConfigParse(_))));
}
