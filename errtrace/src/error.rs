use config::ConfigError;
use errtrace_core::{
    error_ext::{ErrorExt, NextError},
    location::Location,
    stack_trace::StackFrame,
};
use snafu::Snafu;
use tracing_subscriber::util::TryInitError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("failed to build the layered configuration"))]
    BuildConfig {
        #[snafu(implicit)]
        location: Location,
        source: ConfigError,
    },

    #[snafu(display("failed to load configuration section `{prefix}`"))]
    LoadConfig {
        #[snafu(implicit)]
        location: Location,
        prefix: &'static str,
        source: ConfigError,
    },

    #[snafu(display("failed to install the global logger"))]
    InitLogger {
        #[snafu(implicit)]
        location: Location,
        source: TryInitError,
    },
}

impl ErrorExt for Error {
    fn frames(&self) -> Vec<&dyn StackFrame> {
        match self {
            Error::BuildConfig { location, .. }
            | Error::LoadConfig { location, .. }
            | Error::InitLogger { location, .. } => {
                vec![location as &dyn StackFrame]
            }
        }
    }

    fn inner(&self) -> NextError<'_> {
        match self {
            Error::BuildConfig { source, .. } | Error::LoadConfig { source, .. } => {
                NextError::std(source)
            }
            Error::InitLogger { source, .. } => NextError::std(source),
        }
    }
}
