//! HTTP interface module.
//!
//! Provides REST API endpoints for:
//! - Starting flows and fetching run details
//! - Fetching and parsing spec documents
//! - Health checks

pub mod handlers;
pub mod routes;

pub(crate) mod monitoring;
pub(crate) mod spec;
