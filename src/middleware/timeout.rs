//! Whole-exchange deadline.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::chain::{from_fn, Middleware};

/// Answer 503 when the rest of the chain has not produced a response within
/// `limit`. The inner future is dropped, cancelling the handler.
pub fn timeout(limit: Duration) -> Middleware {
    from_fn(move |req, next| async move {
        match tokio::time::timeout(limit, next(req)).await {
            Ok(response) => response,
            Err(_) => {
                tracing::warn!(?limit, "command exceeded write timeout");
                StatusCode::SERVICE_UNAVAILABLE.into_response()
            }
        }
    })
}
