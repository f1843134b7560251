//! The terminal handler: classify, decode, look up, invoke, reply.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request as HttpRequest;
use axum::http::header::ALLOW;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use super::content::ContentKind;
use super::envelope;
use super::error::DecodeError;
use super::registry::Registry;
use super::request::Request;
use crate::middleware::{endpoint, Endpoint};

/// Routes decoded commands to their handlers.
///
/// Holds a frozen snapshot of the registry; handlers registered after the
/// dispatcher was built are not visible to it.
pub struct Dispatcher<C> {
    registry: Arc<Registry<C>>,
    context: Arc<C>,
    body_limit: usize,
    read_timeout: Option<Duration>,
}

impl<C: Send + Sync + 'static> Dispatcher<C> {
    pub fn new(registry: Arc<Registry<C>>, context: Arc<C>, body_limit: usize) -> Self {
        Self {
            registry,
            context,
            body_limit,
            read_timeout: None,
        }
    }

    /// Bound the time spent reading and decoding the body. A body still
    /// incomplete when it elapses is treated as undecodable.
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = Some(read_timeout);
        self
    }

    /// Handle one request.
    ///
    /// The content type is checked before the method, so a `GET` with an
    /// unsupported content type gets 415, not 405.
    pub async fn dispatch(&self, request: HttpRequest) -> Response {
        let kind = ContentKind::from_headers(request.headers());
        if !kind.is_known() {
            tracing::debug!("unsupported content type");
            return StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response();
        }

        if request.method() != Method::POST {
            tracing::debug!(method = %request.method(), "method not allowed");
            return (
                StatusCode::METHOD_NOT_ALLOWED,
                [(ALLOW, HeaderValue::from_static("POST"))],
            )
                .into_response();
        }

        let decode = envelope::decode(request, kind, self.body_limit);
        let decoded = match self.read_timeout {
            Some(limit) => tokio::time::timeout(limit, decode)
                .await
                .unwrap_or(Err(DecodeError::Timeout(limit))),
            None => decode.await,
        };

        let (parts, command) = match decoded {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!(error = %e, "rejecting undecodable command envelope");
                return StatusCode::UNPROCESSABLE_ENTITY.into_response();
            }
        };

        let Some(handler) = self.registry.get(&command.name) else {
            tracing::debug!(command = %command.name, "unknown command");
            return StatusCode::NOT_FOUND.into_response();
        };

        tracing::debug!(command = %command.name, "dispatching command");
        let reply = handler(Request::new(command, parts), Arc::clone(&self.context)).await;

        // No reply means the handler had nothing to say: empty 200.
        match reply {
            Some(reply) => reply.into_response(),
            None => ().into_response(),
        }
    }

    /// Turn the dispatcher into the innermost [`Endpoint`] of a chain.
    pub fn into_endpoint(self) -> Endpoint {
        let dispatcher = Arc::new(self);
        endpoint(move |request| {
            let dispatcher = Arc::clone(&dispatcher);
            async move { dispatcher.dispatch(request).await }
        })
    }
}
