//! Strict-path guard and the serve mode it depends on.
//!
//! A server bound at `/` that owns its listener must not treat every
//! unrelated path as the command endpoint. When the same server is mounted
//! inside a caller-owned router, that router has already decided which paths
//! reach it, so the guard steps aside.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::chain::{from_fn, Middleware};

/// How a server is currently being reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The server's own router or listener is in use.
    Standalone,
    /// A request has arrived through the embeddable router.
    Embedded,
}

/// One-way serve-mode state shared by every router built from a server.
///
/// Starts [`Mode::Standalone`]. The first request through the embeddable
/// router switches it to [`Mode::Embedded`]; it never switches back.
#[derive(Debug, Default)]
pub struct ServeMode {
    embedded: AtomicBool,
}

impl ServeMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        if self.embedded.load(Ordering::Acquire) {
            Mode::Embedded
        } else {
            Mode::Standalone
        }
    }

    pub fn is_standalone(&self) -> bool {
        self.mode() == Mode::Standalone
    }

    pub(crate) fn mark_embedded(&self) {
        if !self.embedded.swap(true, Ordering::AcqRel) {
            tracing::debug!("command server mounted in an external router; strict path disabled");
        }
    }
}

/// Reject with 404 when the server is standalone, bound at `/`, and the
/// request path is anything but `/`.
pub fn strict_path(command_path: &str, mode: Arc<ServeMode>) -> Middleware {
    let bound_at_root = command_path == "/";
    from_fn(move |req, next| {
        let reject = bound_at_root && mode.is_standalone() && req.uri().path() != "/";
        async move {
            if reject {
                tracing::debug!(path = %req.uri().path(), "path rejected by strict-path guard");
                return StatusCode::NOT_FOUND.into_response();
            }
            next(req).await
        }
    })
}
