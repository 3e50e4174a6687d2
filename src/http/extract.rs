//! Request extractors that turn parse failures into [`ApiError`].

use super::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON body extractor rejecting malformed input as a validation failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ValidJson<T>(pub T);

/// Path extractor rejecting malformed segments as a validation failure.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ValidPath<T>(pub T);

/// Query-string extractor rejecting malformed parameters as a validation
/// failure.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ValidQuery<T>(pub T);
