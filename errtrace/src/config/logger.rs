use std::fmt;

use serde::{Deserialize, Serialize};

use super::ConfigPrefix;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub level: LogLevel,
}

impl ConfigPrefix for LoggerConfig {
    const PREFIX: &'static str = "logger";
}

#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// The "trace" level.
    Trace,
    /// The "debug" level.
    Debug,
    /// The "info" level.
    #[default]
    Info,
    /// The "warn" level.
    Warn,
    /// The "error" level.
    Error,
    /// Off level.
    Off,
}

impl LogLevel {
    pub fn as_tracing_level(&self) -> Option<tracing::Level> {
        match self {
            LogLevel::Trace => Some(tracing::Level::TRACE),
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Off => None,
        }
    }

    pub fn as_tracing_level_filter(&self) -> tracing::level_filters::LevelFilter {
        match self.as_tracing_level() {
            Some(level) => level.into(),
            None => tracing::level_filters::LevelFilter::OFF,
        }
    }

    pub fn as_log_level(&self) -> Option<log::Level> {
        match self {
            LogLevel::Trace => Some(log::Level::Trace),
            LogLevel::Debug => Some(log::Level::Debug),
            LogLevel::Info => Some(log::Level::Info),
            LogLevel::Warn => Some(log::Level::Warn),
            LogLevel::Error => Some(log::Level::Error),
            LogLevel::Off => None,
        }
    }

    pub fn as_log_level_filter(&self) -> log::LevelFilter {
        match self.as_log_level() {
            Some(level) => level.to_level_filter(),
            None => log::LevelFilter::Off,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Off => write!(f, "off"),
        }
    }
}

#[cfg(test)]
mod tests {
    use tracing::level_filters::LevelFilter;

    use super::*;

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"warn\"");

        let level: LogLevel = serde_json::from_str("\"trace\"").unwrap();
        assert_eq!(level, LogLevel::Trace);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(LogLevel::Debug.as_tracing_level(), Some(tracing::Level::DEBUG));
        assert_eq!(LogLevel::Off.as_tracing_level(), None);
        assert_eq!(LogLevel::Error.as_tracing_level_filter(), LevelFilter::ERROR);
        assert_eq!(LogLevel::Off.as_tracing_level_filter(), LevelFilter::OFF);
        assert_eq!(LogLevel::Info.as_log_level(), Some(log::Level::Info));
        assert_eq!(LogLevel::Warn.as_log_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Off.as_log_level_filter(), log::LevelFilter::Off);
    }

    #[test]
    fn test_display_round_trips_through_serde() {
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
            LogLevel::Off,
        ] {
            let parsed: LogLevel = serde_json::from_str(&format!("\"{level}\"")).unwrap();
            assert_eq!(parsed, level);
        }
    }
}
