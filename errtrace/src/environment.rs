use std::{env, fmt};

use serde::{Deserialize, Serialize};

pub const ERRTRACE_ENV: &str = "ERRTRACE_ENV";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub enum Environment {
    #[serde(rename = "prod")]
    Prod,

    #[serde(rename = "dev")]
    Dev,

    #[serde(rename = "test")]
    Test,

    #[serde(untagged)]
    Custom(Box<str>),
}

impl Environment {
    pub fn resolve_from_env() -> Self {
        match env::var(ERRTRACE_ENV) {
            Ok(e) => Self::from(e),
            Err(_) => {
                if cfg!(debug_assertions) {
                    Environment::Dev
                } else {
                    Environment::Prod
                }
            }
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Prod => write!(f, "prod"),
            Environment::Dev => write!(f, "dev"),
            Environment::Test => write!(f, "test"),
            Environment::Custom(c) => c.fmt(f),
        }
    }
}

impl From<Box<str>> for Environment {
    fn from(s: Box<str>) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Environment::Prod,
            "dev" | "development" => Environment::Dev,
            "test" => Environment::Test,
            _ => Environment::Custom(s),
        }
    }
}

impl From<String> for Environment {
    fn from(s: String) -> Self {
        s.into_boxed_str().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, reporter::Reporter};

    #[test]
    fn test_env_serialize() {
        let serialized = serde_json::to_string(&Environment::Prod).unwrap();
        assert_eq!(serialized, "\"prod\"");

        let serialized = serde_json::to_string(&Environment::Custom("staging".into())).unwrap();
        assert_eq!(serialized, "\"staging\"");
    }

    #[test]
    fn test_resolve_from_env() {
        let original = env::var(ERRTRACE_ENV);

        env::remove_var(ERRTRACE_ENV);
        assert_eq!(Environment::resolve_from_env(), Environment::Dev);

        env::set_var(ERRTRACE_ENV, "Production");
        assert_eq!(Environment::resolve_from_env(), Environment::Prod);

        env::set_var(ERRTRACE_ENV, "ci");
        assert_eq!(
            Environment::resolve_from_env(),
            Environment::Custom("ci".into())
        );

        let config = Config::from_env().unwrap();
        assert_eq!(config.environment(), Some(&Environment::Custom("ci".into())));
        assert_eq!(Reporter::from_env().unwrap(), Reporter::default());

        match original {
            Ok(v) => env::set_var(ERRTRACE_ENV, v),
            Err(_) => env::remove_var(ERRTRACE_ENV),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!("test", Environment::Test.to_string());
        assert_eq!("ci", Environment::Custom("ci".into()).to_string());
    }
}
