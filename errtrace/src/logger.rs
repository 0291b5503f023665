use snafu::ResultExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{
    config::{logger::LoggerConfig, Config, ConfigPrefix},
    error::{Error, InitLoggerSnafu, LoadConfigSnafu},
};

/// Installs a global `fmt` subscriber at the configured level.
///
/// Fails with [`Error::InitLogger`] when a global subscriber is already set.
pub fn init_logger(config: &Config) -> Result<(), Error> {
    let cfg: LoggerConfig = config.get().context(LoadConfigSnafu {
        prefix: LoggerConfig::PREFIX,
    })?;

    tracing_subscriber::fmt()
        .with_max_level(cfg.level.as_tracing_level_filter())
        .finish()
        .try_init()
        .context(InitLoggerSnafu)
}
