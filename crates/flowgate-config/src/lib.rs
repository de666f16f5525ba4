//! # Flowgate Config
//!
//! Configuration for the Flowgate gateway: server binding, Gumloop
//! credentials, polling defaults, the flow-type table and the trusted
//! host for spec document passthrough.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::{ConfigLoader, ENV_API_KEY, ENV_PROJECT_ID, ENV_USER_ID};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
