use serde::{Deserialize, Serialize};

use super::{logger::LogLevel, ConfigPrefix};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReporterConfig {
    /// Level of the event emitted for each reported error; `off` silences reports.
    pub level: LogLevel,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Error,
        }
    }
}

impl ConfigPrefix for ReporterConfig {
    const PREFIX: &'static str = "reporter";
}
