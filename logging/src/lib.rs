//! Shared logging plumbing for the replay crates.
//!
//! Every crate in the workspace logs through `tracing`, tagging each event with
//! one of the targets defined on [`Log`] so output can be filtered per area:
//!
//! ```ignore
//! tracing::debug!(target: Log::Replay, version, "Selected header schema");
//! ```
//!
//! Nothing in the library crates installs a subscriber. Binaries and test
//! harnesses that want output call [`init`] (or [`try_init`]) once at startup.

use std::env;

use thiserror::Error;
use time::macros::format_description;
use tracing::Level;
use tracing_subscriber::fmt::time::UtcTime;

/// Environment variable consulted for the default log level.
pub const LOG_LEVEL_ENV: &str = "SPRING_REPLAY_LOG";

/// Log targets. These are plain string constants so they can be handed to the
/// `target:` argument of the `tracing` macros, which requires a constant.
#[derive(Debug)]
pub struct Log;

#[allow(non_upper_case_globals)]
impl Log {
    /// Replay container decoding: cursor, header schemas, file loading.
    pub const Replay: &'static str = "spring_replay";

    /// Start script (game specification) decoding.
    pub const StartScript: &'static str = "spring_start_script";
}

#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("unable to install tracing subscriber: {0}")]
    SubscriberInstall(String),
}

/// Subscriber settings.
#[derive(Clone, Debug)]
pub struct LogConfig {
    /// Most verbose level that will be emitted.
    pub level: Level,
}

impl LogConfig {
    /// Resolves a level from an optional textual value, falling back to `INFO`
    /// for anything missing or unparseable.
    pub fn from_env_value(value: Option<&str>) -> Self {
        let level = value
            .and_then(|value| value.trim().parse::<Level>().ok())
            .unwrap_or(Level::INFO);

        Self { level }
    }
}

impl Default for LogConfig {
    /// Default configuration values are sourced from the environment.
    fn default() -> Self {
        Self::from_env_value(env::var(LOG_LEVEL_ENV).ok().as_deref())
    }
}

/// Installs a global fmt subscriber with UTC timestamps.
///
/// Fails if a global subscriber has already been set, e.g. when two test
/// binaries race for it or a host application installed its own.
pub fn try_init(config: &LogConfig) -> Result<(), LogInitError> {
    let timer = UtcTime::new(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ));

    tracing_subscriber::fmt()
        .with_timer(timer)
        .with_max_level(config.level)
        .with_target(true)
        .try_init()
        .map_err(|error| LogInitError::SubscriberInstall(error.to_string()))
}

/// Like [`try_init`], but a failure to install is logged (through whichever
/// subscriber won) instead of returned.
pub fn init(config: &LogConfig) {
    if let Err(error) = try_init(config) {
        tracing::warn!(target: Log::Replay, ?error, "Logging was already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing_is_case_insensitive() {
        assert_eq!(LogConfig::from_env_value(Some("DEBUG")).level, Level::DEBUG);
        assert_eq!(LogConfig::from_env_value(Some(" trace ")).level, Level::TRACE);
        assert_eq!(LogConfig::from_env_value(Some("warn")).level, Level::WARN);
    }

    #[test]
    fn test_unknown_or_missing_level_falls_back_to_info() {
        assert_eq!(LogConfig::from_env_value(Some("chatty")).level, Level::INFO);
        assert_eq!(LogConfig::from_env_value(None).level, Level::INFO);
    }

    #[test]
    fn test_second_install_is_reported() {
        let config = LogConfig { level: Level::ERROR };

        // The first call may or may not win the global slot, the second never can.
        let _ = try_init(&config);
        assert!(try_init(&config).is_err());

        // `init` swallows the failure.
        init(&config);
    }
}
