//! Envelope decoding, the command registry and the terminal handler.
//!
//! A command request is a POST whose body (or multipart `command` field) is
//! an envelope:
//!
//! ```json
//! { "name": "echo", "data": { "text": "hi" } }
//! ```
//!
//! The dispatcher classifies the content type, checks the method, decodes
//! the envelope, looks the name up in the [`Registry`], and awaits the
//! handler. Outcomes the dispatcher decides itself:
//!
//! | Condition                               | Status |
//! |-----------------------------------------|--------|
//! | content type not JSON or multipart      | 415    |
//! | method not POST                         | 405 + `Allow: POST` |
//! | envelope missing or malformed           | 422    |
//! | no handler for `name`                   | 404    |
//!
//! Everything else is whatever the handler's [`Reply`] says.

mod content;
mod dispatcher;
mod envelope;
mod error;
mod registry;
mod reply;
mod request;

pub use content::{ContentKind, JSON_MEDIA_TYPE, MULTIPART_MEDIA_TYPE};
pub use dispatcher::Dispatcher;
pub use envelope::{decode, Command, COMMAND_FIELD};
pub use error::{DecodeError, RegistrationError};
pub use registry::{boxed, BoxHandler, CommandArg, Registry};
pub use reply::{Reply, JSON_CONTENT_TYPE, TEXT_CONTENT_TYPE};
pub use request::Request;
