//! # Flowgate API
//!
//! HTTP front door for the Flowgate gateway.
//!
//! ```text
//! client ──► axum router ──► handlers ──► FlowRouter ──► PipelineProvider ──► Gumloop
//!               │
//!               └── Payload extractor (JSON / YAML bodies → one JSON value)
//! ```
//!
//! Every request is independent: the gateway keeps no record of runs it
//! started. Run state lives only at Gumloop and is re-fetched on demand.

pub mod body;
pub mod error;
pub mod http;
pub mod query;
pub mod server;
pub mod spec_fetch;
pub mod state;

pub use body::{BodyFormat, Payload};
pub use error::ApiError;
pub use http::routes::create_router;
pub use query::QueryParams;
pub use server::{GatewayConfig, GatewayServer};
pub use spec_fetch::SpecFetcher;
pub use state::{AppState, Credentials, FlowOverrides, PollingDefaults};
