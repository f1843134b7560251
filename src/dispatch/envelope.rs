//! Command envelope decoding.
//!
//! An envelope is `{"name": "<command>", "data": <any JSON>}`. It arrives
//! either as the whole body of an `application/json` request or as the text
//! of the `command` field of a `multipart/form-data` form.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::body::{self, Body, Bytes};
use axum::extract::Request as HttpRequest;
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use futures::{future, stream};
use serde_json::value::RawValue;

use super::content::ContentKind;
use super::error::DecodeError;

/// Name of the multipart form field that carries the envelope.
pub const COMMAND_FIELD: &str = "command";

/// A decoded command envelope.
///
/// `data` is kept as raw JSON and handed to the handler untouched.
#[derive(Debug, Clone, Default)]
pub struct Command {
    /// Command name, matched against the registry. Empty when absent or
    /// `null`.
    pub name: String,
    /// Opaque payload. `None` only when the field is absent; an explicit
    /// `null` is kept as raw `null`.
    pub data: Option<Box<RawValue>>,
}

impl Command {
    /// Parse envelope JSON.
    ///
    /// The document must be an object or `null`; `null` is an empty
    /// envelope. Unknown fields are ignored.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let Some(mut fields) = serde_json::from_slice::<Option<HashMap<String, Box<RawValue>>>>(bytes)? else {
            return Ok(Command::default());
        };

        let name = match fields.remove("name") {
            Some(raw) => serde_json::from_str::<Option<String>>(raw.get())?.unwrap_or_default(),
            None => String::new(),
        };

        Ok(Command {
            name,
            data: fields.remove("data"),
        })
    }
}

/// Decode the envelope of `request` according to its content kind.
///
/// Returns the request head alongside the envelope so handlers can still
/// inspect method, URI, headers and extensions after the body is consumed.
/// Both kinds read at most `body_limit` bytes.
pub async fn decode(
    request: HttpRequest,
    kind: ContentKind,
    body_limit: usize,
) -> Result<(Parts, Command), DecodeError> {
    match kind {
        ContentKind::Json => {
            let (parts, body) = request.into_parts();
            let bytes = read_body(body, body_limit).await?;
            Ok((parts, Command::from_slice(&bytes)?))
        }
        ContentKind::Multipart => {
            let (parts, body) = request.into_parts();
            let content_type = parts
                .headers
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();
            let boundary = multer::parse_boundary(content_type)?;
            let bytes = read_body(body, body_limit).await?;
            let text = command_field(multipart(bytes, boundary)).await?;
            Ok((parts, Command::from_slice(text.as_bytes())?))
        }
        ContentKind::Unknown => Err(DecodeError::UnsupportedContent),
    }
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, DecodeError> {
    body::to_bytes(body, limit).await.map_err(DecodeError::Body)
}

/// Parse an already bounded body.
fn multipart(bytes: Bytes, boundary: String) -> multer::Multipart<'static> {
    let chunks = stream::once(future::ready(Ok::<_, Infallible>(bytes)));
    multer::Multipart::new(chunks, boundary)
}

/// Find the first non-file `command` field and return its text.
///
/// File parts are skipped even when named `command`; only plain form values
/// can carry an envelope.
async fn command_field(mut multipart: multer::Multipart<'static>) -> Result<String, DecodeError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(COMMAND_FIELD) || field.file_name().is_some() {
            continue;
        }

        let text = field.text().await?;
        if text.is_empty() {
            return Err(DecodeError::EmptyCommandField);
        }
        return Ok(text);
    }

    Err(DecodeError::MissingCommandField)
}
