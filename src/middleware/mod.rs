//! Decorators around the command endpoint.
//!
//! Every request passes through the write timeout and the strict-path guard
//! first, then through the user chain in registration order, then reaches
//! the dispatcher.
//!
//! ```ignore
//! use courier::middleware;
//!
//! server.use_middleware([
//!     middleware::cors("*"),
//!     middleware::from_fn(|req, next| async move {
//!         let mut response = next(req).await;
//!         response.headers_mut().insert("x-served-by", HeaderValue::from_static("courier"));
//!         response
//!     }),
//! ]);
//! ```

mod chain;
#[cfg(feature = "cors")]
mod cors;
mod strict_path;
mod timeout;

pub use chain::{compose, endpoint, from_fn, Endpoint, Middleware};
#[cfg(feature = "cors")]
pub use cors::cors;
pub use strict_path::{strict_path, Mode, ServeMode};
pub use timeout::timeout;
