//! Gumloop provider errors.

use std::time::Duration;

use thiserror::Error;

use crate::types::RunStatus;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Bad or missing caller input, raised before any outbound call.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Gumloop answered with a non-success status.
    #[error("Upstream error: {status} - {body}")]
    Upstream { status: u16, body: String },

    /// Gumloop answered 2xx but the body is not what we expect.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The run reached FAILED or TERMINATED.
    #[error("Flow failed with state: {state}")]
    FlowExecution { state: RunStatus },

    #[error("Polling timeout exceeded after {}ms", elapsed.as_millis())]
    Timeout { elapsed: Duration },

    #[error("Network error: {0}")]
    Network(String),
}

impl ProviderError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = ProviderError::invalid_argument("Invalid flow type");
        assert!(err.to_string().contains("Invalid flow type"));
    }

    #[test]
    fn test_upstream_display() {
        let err = ProviderError::Upstream {
            status: 401,
            body: "{\"detail\":\"bad key\"}".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("401"));
        assert!(display.contains("bad key"));
    }

    #[test]
    fn test_flow_execution_display() {
        let err = ProviderError::FlowExecution {
            state: RunStatus::Terminated,
        };
        assert_eq!(err.to_string(), "Flow failed with state: TERMINATED");
    }

    #[test]
    fn test_timeout_display() {
        let err = ProviderError::Timeout {
            elapsed: Duration::from_millis(1500),
        };
        assert!(err.to_string().contains("1500ms"));
    }

    #[test]
    fn test_protocol_display() {
        let err = ProviderError::protocol("run_id missing");
        assert!(err.to_string().contains("Protocol error"));
        assert!(err.to_string().contains("run_id missing"));
    }
}
