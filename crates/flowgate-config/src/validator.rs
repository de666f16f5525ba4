//! Configuration validation.

use crate::error::ConfigError;
use crate::loader::{ENV_API_KEY, ENV_USER_ID};
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Collapse errors into a single `ConfigError`, for fail-fast startup.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        if self.errors.is_empty() {
            return Ok(self.warnings);
        }
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        Err(ConfigError::Invalid(joined))
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_gumloop(config, &mut result);
        Self::validate_polling(config, &mut result);
        Self::validate_flows(config, &mut result);
        Self::validate_spec_fetch(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_gumloop(config: &Config, result: &mut ValidationResult) {
        let gumloop = &config.gumloop;

        if gumloop.api_key.as_deref().is_none_or(str::is_empty) {
            result.add_error(ValidationError::new(
                "gumloop.api_key",
                format!("API key is not set (set {} or gumloop.api_key)", ENV_API_KEY),
            ));
        }

        if gumloop.user_id.as_deref().is_none_or(str::is_empty) {
            result.add_error(ValidationError::new(
                "gumloop.user_id",
                format!("User id is not set (set {} or gumloop.user_id)", ENV_USER_ID),
            ));
        }

        if !is_http_url(&gumloop.base_url) {
            result.add_error(ValidationError::new(
                "gumloop.base_url",
                "base_url must start with http:// or https://",
            ));
        }

        if gumloop.project_id.as_deref() == Some("") {
            result.add_warning(ValidationWarning::new(
                "gumloop.project_id",
                "project_id is empty and will be ignored",
            ));
        }
    }

    fn validate_polling(config: &Config, result: &mut ValidationResult) {
        if config.polling.interval_ms == 0 {
            result.add_error(ValidationError::new(
                "polling.interval_ms",
                "interval_ms must be greater than 0",
            ));
        }

        if config.polling.timeout_ms < config.polling.interval_ms {
            result.add_warning(ValidationWarning::new(
                "polling.timeout_ms",
                "timeout_ms is shorter than interval_ms, runs will be polled at most twice",
            ));
        }
    }

    fn validate_flows(config: &Config, result: &mut ValidationResult) {
        if config.flows.saved_items.is_empty() {
            result.add_warning(ValidationWarning::new(
                "flows",
                "No flow types configured, every flow-start request will be rejected",
            ));
        }

        for (flow_type, saved_item_id) in &config.flows.saved_items {
            if saved_item_id.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("flows.{}", flow_type),
                    "saved-pipeline id cannot be empty",
                ));
            }
        }
    }

    fn validate_spec_fetch(config: &Config, result: &mut ValidationResult) {
        if !is_http_url(&config.spec_fetch.trusted_prefix) {
            result.add_error(ValidationError::new(
                "spec_fetch.trusted_prefix",
                "trusted_prefix must start with http:// or https://",
            ));
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
