use errtrace_core::chain::{ChainFormatter, MAX_DEPTH};
use serde::{Deserialize, Serialize};

use super::ConfigPrefix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatterConfig {
    /// Chain levels rendered before the remainder is elided.
    pub max_depth: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }
}

impl ConfigPrefix for FormatterConfig {
    const PREFIX: &'static str = "formatter";
}

impl From<FormatterConfig> for ChainFormatter {
    fn from(cfg: FormatterConfig) -> Self {
        ChainFormatter::with_max_depth(cfg.max_depth)
    }
}
