//! The request view handed to command handlers.
//!
//! Carries the decoded envelope plus the request head (method, URI,
//! headers, extensions). The body has already been consumed by the time a
//! handler runs.

use axum::http::request::Parts;
use axum::http::{Extensions, HeaderMap, Method, Uri};
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use super::envelope::Command;

/// A decoded command request.
///
/// ## Example
///
/// ```ignore
/// async fn greet(req: Request, ctx: Arc<AppState>) -> Option<Reply> {
///     let input: Greeting = match req.read_command() {
///         Ok(input) => input,
///         Err(e) => return Some(Reply::error(StatusCode::BAD_REQUEST, e.to_string())),
///     };
///     Some(Reply::text(format!("hello {}", input.name)))
/// }
/// ```
#[derive(Debug)]
pub struct Request {
    command: Command,
    parts: Parts,
}

impl Request {
    pub(crate) fn new(command: Command, parts: Parts) -> Self {
        Self { command, parts }
    }

    /// Deserialize the envelope's `data` into a typed value.
    ///
    /// A missing `data` field decodes as JSON `null`, so `Option<T>` and
    /// unit-like targets succeed while structs fail.
    pub fn read_command<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match &self.command.data {
            Some(raw) => serde_json::from_str(raw.get()),
            None => serde_json::from_str("null"),
        }
    }

    /// The command name.
    pub fn name(&self) -> &str {
        &self.command.name
    }

    /// The envelope's `data` exactly as the client sent it. An explicit
    /// `null` is `Some`; only a missing field is `None`.
    pub fn raw_data(&self) -> Option<&RawValue> {
        self.command.data.as_deref()
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    /// The request head.
    pub fn parts(&self) -> &Parts {
        &self.parts
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Extensions set by the transport or by middleware.
    pub fn extensions(&self) -> &Extensions {
        &self.parts.extensions
    }

    pub fn into_parts(self) -> (Command, Parts) {
        (self.command, self.parts)
    }
}
