pub mod formatter;
pub mod logger;
pub mod reporter;

use std::{
    env,
    ops::Deref,
    path::{Path, PathBuf},
};

use config::{ConfigError, File, ValueKind};
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::environment::Environment;

/// Prefix of environment variables that override file settings,
/// e.g. `ERRTRACE_FORMATTER__MAX_DEPTH=50`.
pub const ENV_PREFIX: &str = "ERRTRACE";

#[derive(Debug, Clone)]
pub struct Config {
    inner: config::Config,
    env: Option<Environment>,
}

impl Config {
    pub fn new(config: config::Config) -> Self {
        Self {
            inner: config,
            env: None,
        }
    }

    /// Resolves the run environment from `ERRTRACE_ENV` and loads the layered
    /// configuration for it.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = Environment::resolve_from_env();
        tracing::info!("loading configuration for the `{}` environment", env);

        Self::load(&env)
    }

    /// Loads from the `config` folder next to the crate manifest, or next to
    /// the running binary when not started through cargo.
    pub fn load(env: &Environment) -> Result<Self, ConfigError> {
        static DEFAULT_FOLDER: Lazy<PathBuf> = Lazy::new(|| {
            let mut parent = match env::var("CARGO_MANIFEST_DIR") {
                Ok(dir) => PathBuf::from(dir),
                Err(_) => env::current_exe()
                    .ok()
                    .and_then(|exe| exe.parent().map(Path::to_path_buf))
                    .unwrap_or_default(),
            };

            parent.push("config");
            parent
        });

        Self::from_folder(env, DEFAULT_FOLDER.as_path())
    }

    pub fn from_folder(env: &Environment, path: &Path) -> Result<Self, ConfigError> {
        let app_cfg = path.join("app.toml");
        let env_cfg = path.join(format!("app-{}.toml", env));
        let env_vars = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__");

        for file in [&app_cfg, &env_cfg] {
            tracing::info!("trying to load configuration from `{}`", file.display());
            if !file.exists() {
                tracing::info!("`{}` does not exist", file.display());
            }
        }

        let config = config::Config::builder()
            .add_source(File::from(app_cfg).required(false))
            .add_source(File::from(env_cfg).required(false))
            .add_source(env_vars)
            .build()?;

        Ok(Self {
            inner: config,
            env: Some(env.clone()),
        })
    }

    /// The environment this configuration was loaded for, if it came from files.
    pub fn environment(&self) -> Option<&Environment> {
        self.env.as_ref()
    }

    /// Reads the section named by `T::PREFIX`, falling back to the section's
    /// defaults when it is missing.
    pub fn get<'de, T>(&self) -> Result<T, ConfigError>
    where
        T: ConfigPrefix + Deserialize<'de>,
    {
        match self.inner.get::<T>(T::PREFIX) {
            Ok(o) => Ok(o),
            Err(e) => {
                let ConfigError::NotFound(_) = &e else {
                    return Err(e);
                };

                let v = config::Value::new(None, ValueKind::Table(Default::default()));

                match T::deserialize(v) {
                    Ok(o) => Ok(o),
                    Err(_) => Err(e),
                }
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(config::Config::default())
    }
}

impl Deref for Config {
    type Target = config::Config;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub trait ConfigPrefix {
    const PREFIX: &'static str;
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use super::{formatter::FormatterConfig, logger::LogLevel, logger::LoggerConfig, *};

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = Config::default();
        assert_eq!(config.environment(), None);

        let formatter: FormatterConfig = config.get().unwrap();
        assert_eq!(formatter.max_depth, 20);

        let logger: LoggerConfig = config.get().unwrap();
        assert_eq!(logger.level, LogLevel::Info);
    }

    #[test]
    fn test_overrides() {
        let inner = config::Config::builder()
            .set_override("formatter.max_depth", 3)
            .unwrap()
            .set_override("logger.level", "debug")
            .unwrap()
            .build()
            .unwrap();
        let config = Config::new(inner);

        let formatter: FormatterConfig = config.get().unwrap();
        assert_eq!(formatter.max_depth, 3);

        let logger: LoggerConfig = config.get().unwrap();
        assert_eq!(logger.level, LogLevel::Debug);
    }

    #[test]
    fn test_invalid_section_is_an_error() {
        let inner = config::Config::builder()
            .set_override("formatter.max_depth", "deep")
            .unwrap()
            .build()
            .unwrap();

        assert!(Config::new(inner).get::<FormatterConfig>().is_err());
    }

    #[test]
    fn test_from_folder() {
        let dir = env::temp_dir().join(format!("errtrace-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("app.toml"), "[formatter]\nmax_depth = 7\n").unwrap();
        fs::write(dir.join("app-test.toml"), "[logger]\nlevel = \"warn\"\n").unwrap();

        let config = Config::from_folder(&Environment::Test, &dir).unwrap();
        assert_eq!(config.environment(), Some(&Environment::Test));

        let formatter: FormatterConfig = config.get().unwrap();
        assert_eq!(formatter.max_depth, 7);

        let logger: LoggerConfig = config.get().unwrap();
        assert_eq!(logger.level, LogLevel::Warn);

        fs::remove_dir_all(&dir).unwrap();
    }
}
