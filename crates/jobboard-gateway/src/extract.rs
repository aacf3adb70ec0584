//! Request body extractors.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` whose rejection renders as an [`ApiError`].
///
/// A body that is not JSON, lacks the JSON content type, or does not match the
/// expected shape becomes a `bad_request` error instead of axum's plain-text
/// response.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
