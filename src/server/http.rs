//! HTTP transport: axum routers and the standalone listener.
//!
//! ## Standalone
//!
//! ```ignore
//! // Bind `config.bind` and serve until the process exits.
//! server.start().await?;
//!
//! // Or hand the router to your own listener.
//! let app = server.router();
//! ```
//!
//! ## Embedded
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/", get(index))
//!     .nest_service("/rpc", server.embed());
//! ```
//!
//! Requests arriving through [`Server::embed`] switch the server to
//! embedded mode, which disables the strict-path guard for good.

use std::future::Future;
use std::sync::Arc;

use axum::extract::Request as HttpRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use futures::future::{self, FutureExt};
use tokio::net::TcpListener;

use super::server::Server;
use crate::error::ServeError;
use crate::middleware::{Endpoint, ServeMode};

impl<C: Send + Sync + 'static> Server<C> {
    /// Build a standalone router serving the command path.
    ///
    /// Other paths get 404. When the command path is `/`, every path reaches
    /// the chain so the strict-path guard can reject the ones that are not
    /// `/`.
    pub fn router(&self) -> Router {
        route_endpoint(&self.config().path, self.endpoint(), None)
    }

    /// Build a router to mount inside a caller-owned router.
    ///
    /// The command path is matched relative to the mount point. The first
    /// request through this router switches the server to embedded mode.
    pub fn embed(&self) -> Router {
        route_endpoint(&self.config().path, self.endpoint(), Some(self.serve_mode()))
    }

    /// Serve the standalone router on an already bound listener.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), ServeError> {
        log_listening(&listener, &self.config().path);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }

    /// Bind `config.bind` and serve until the process exits.
    pub async fn start(&self) -> Result<(), ServeError> {
        let listener = self.bind().await?;
        self.serve(listener).await
    }

    /// Bind `config.bind` and serve until `signal` resolves, then drain
    /// in-flight requests.
    pub async fn start_with_shutdown<F>(&self, signal: F) -> Result<(), ServeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        log_listening(&listener, &self.config().path);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(signal)
            .await?;
        tracing::info!("command server shut down");
        Ok(())
    }

    async fn bind(&self) -> Result<TcpListener, ServeError> {
        let addr = &self.config().bind;
        TcpListener::bind(addr).await.map_err(|source| ServeError::Bind {
            addr: addr.clone(),
            source,
        })
    }
}

/// Route every request through `endpoint`, comparing the request path to
/// `path` literally so characters such as `:` and `*` carry no routing
/// meaning. A root `path` accepts all paths and leaves them to the
/// strict-path guard.
fn route_endpoint(path: &str, endpoint: Endpoint, embedded: Option<Arc<ServeMode>>) -> Router {
    let path = path.to_owned();
    let handler = move |request: HttpRequest| {
        if path != "/" && request.uri().path() != path {
            return future::ready(StatusCode::NOT_FOUND.into_response()).boxed();
        }
        if let Some(mode) = &embedded {
            mode.mark_embedded();
        }
        endpoint(request)
    };

    Router::new().fallback(handler)
}

fn log_listening(listener: &TcpListener, path: &str) {
    match listener.local_addr() {
        Ok(addr) => tracing::info!(%addr, path, "command server listening"),
        Err(e) => tracing::warn!(error = %e, path, "command server listening on unknown address"),
    }
}
