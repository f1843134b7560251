//! Middleware composition.
//!
//! An [`Endpoint`] is an async function from request to response. A
//! [`Middleware`] decorates an endpoint: it receives the next endpoint in the
//! chain and returns a new one of the same shape.

use std::future::Future;
use std::sync::Arc;

use axum::extract::Request as HttpRequest;
use axum::response::Response;
use futures::future::{BoxFuture, FutureExt};

/// A type-erased request handler.
pub type Endpoint = Arc<dyn Fn(HttpRequest) -> BoxFuture<'static, Response> + Send + Sync>;

/// A decorator around an [`Endpoint`].
pub type Middleware = Arc<dyn Fn(Endpoint) -> Endpoint + Send + Sync>;

/// Erase an async function into an [`Endpoint`].
pub fn endpoint<F, Fut>(f: F) -> Endpoint
where
    F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(move |request: HttpRequest| f(request).boxed())
}

/// Build a [`Middleware`] from an async function of the request and the next
/// endpoint.
///
/// Code before `next(req).await` runs on the way in; code after it runs on
/// the way out.
///
/// ```ignore
/// let timing = middleware::from_fn(|req, next| async move {
///     let started = Instant::now();
///     let response = next(req).await;
///     tracing::info!(elapsed = ?started.elapsed(), "handled");
///     response
/// });
/// ```
pub fn from_fn<F, Fut>(f: F) -> Middleware
where
    F: Fn(HttpRequest, Endpoint) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    let f = Arc::new(f);
    Arc::new(move |next: Endpoint| {
        let f = Arc::clone(&f);
        Arc::new(move |request: HttpRequest| f(request, Arc::clone(&next)).boxed()) as Endpoint
    })
}

/// Wrap `terminal` in `middleware`.
///
/// The first middleware is outermost: it runs first on the way in and last
/// on the way out. `terminal` runs innermost.
pub fn compose(middleware: &[Middleware], terminal: Endpoint) -> Endpoint {
    middleware
        .iter()
        .rev()
        .fold(terminal, |inner, wrap| wrap(inner))
}
