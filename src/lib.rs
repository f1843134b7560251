//! A single-endpoint HTTP-RPC command dispatcher for axum.
//!
//! Clients POST an envelope naming a command to one path:
//!
//! ```json
//! { "name": "echo", "data": { "text": "hi" } }
//! ```
//!
//! either as an `application/json` body or as the `command` field of a
//! `multipart/form-data` form. The server looks the name up, awaits the
//! registered handler with the decoded request and the shared context, and
//! writes the handler's [`Reply`].

pub mod dispatch;
mod error;
pub mod middleware;
pub mod server;

pub use dispatch::{Command, CommandArg, ContentKind, DecodeError, RegistrationError, Reply, Request};
pub use error::{ConfigError, ServeError};
pub use middleware::{from_fn, Endpoint, Middleware, Mode};
pub use server::{Config, Server};

#[cfg(feature = "cors")]
pub use middleware::cors;

// Re-export the transport types handlers and middleware touch most.
pub use axum::http::StatusCode;
pub use axum::response::Response;
