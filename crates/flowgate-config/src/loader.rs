//! Configuration loader.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Gumloop API key.
pub const ENV_API_KEY: &str = "GUMLOOP_API_KEY";
/// Gumloop user id.
pub const ENV_USER_ID: &str = "GUMLOOP_USER_ID";
/// Optional Gumloop project id.
pub const ENV_PROJECT_ID: &str = "GUMLOOP_PROJECT_ID";

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load the file if it exists, fall back to defaults otherwise, then
    /// overlay the process environment.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            Config::default()
        };
        Self::apply_env(&mut config, |name| std::env::var(name).ok());
        Ok(config)
    }

    /// Overlay Gumloop credentials from the environment.
    ///
    /// Empty values are ignored so a blank `.env` entry does not wipe a
    /// value from the file.
    pub fn apply_env<F>(config: &mut Config, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            config.gumloop.api_key = Some(key);
        }
        if let Some(user) = get(ENV_USER_ID) {
            config.gumloop.user_id = Some(user);
        }
        if let Some(project) = get(ENV_PROJECT_ID) {
            config.gumloop.project_id = Some(project);
        }
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in ENV_VAR_PATTERN.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
