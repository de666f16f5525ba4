//! Query string extraction with the gateway's error body.

use axum::extract::{FromRequestParts, Query};

use crate::error::ApiError;

/// `Query<T>` whose rejection is an [`ApiError`] instead of axum's
/// plain-text 400.
#[derive(Debug, Clone, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);
