use std::error::Error as StdError;

use errtrace_core::{
    chain::ChainFormatter,
    depth::{depth, depth_std},
    error_ext::ErrorExt,
};
use snafu::ResultExt;

use crate::{
    config::{
        formatter::FormatterConfig, logger::LogLevel, reporter::ReporterConfig, Config,
        ConfigPrefix,
    },
    error::{BuildConfigSnafu, Error, LoadConfigSnafu},
};

macro_rules! emit {
    ($level:expr, $($field:tt)*) => {
        match $level {
            LogLevel::Trace => tracing::trace!($($field)*),
            LogLevel::Debug => tracing::debug!($($field)*),
            LogLevel::Info => tracing::info!($($field)*),
            LogLevel::Warn => tracing::warn!($($field)*),
            LogLevel::Error => tracing::error!($($field)*),
            LogLevel::Off => {}
        }
    };
}

/// Formats error chains with the configured bound and logs them as one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reporter {
    formatter: ChainFormatter,
    level: LogLevel,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(ChainFormatter::new(), ReporterConfig::default().level)
    }
}

impl Reporter {
    pub fn new(formatter: ChainFormatter, level: LogLevel) -> Self {
        Self { formatter, level }
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let formatter: FormatterConfig = config.get().context(LoadConfigSnafu {
            prefix: FormatterConfig::PREFIX,
        })?;
        let reporter: ReporterConfig = config.get().context(LoadConfigSnafu {
            prefix: ReporterConfig::PREFIX,
        })?;

        Ok(Self::new(formatter.into(), reporter.level))
    }

    /// Builds a reporter from the configuration of the current run environment.
    pub fn from_env() -> Result<Self, Error> {
        let config = Config::from_env().context(BuildConfigSnafu)?;
        Self::from_config(&config)
    }

    pub fn formatter(&self) -> &ChainFormatter {
        &self.formatter
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn render(&self, error: Option<&dyn ErrorExt>) -> String {
        self.formatter.format(error)
    }

    /// Logs `error` with its chain depth and formatted chain, returning the chain.
    pub fn report(&self, error: &dyn ErrorExt) -> String {
        let chain = self.formatter.format(Some(error));
        let depth = depth(Some(error));

        emit!(
            self.level,
            error_type = error.type_name(),
            depth,
            chain = %chain,
            "{error}"
        );

        chain
    }

    pub fn report_std(&self, error: &(dyn StdError + 'static)) -> String {
        let chain = self.formatter.format_std(Some(error));
        let depth = depth_std(Some(error));

        emit!(self.level, depth, chain = %chain, "{error}");

        chain
    }
}
