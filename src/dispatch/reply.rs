//! Response directives returned by command handlers.
//!
//! A handler builds a [`Reply`]; the dispatcher applies it exactly once,
//! after the handler has finished.

use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

/// `Content-Type` of JSON and error replies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// `Content-Type` of text replies.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// What to write to the response.
#[derive(Debug)]
pub enum Reply {
    /// 200 with a serialized JSON body.
    Json(Bytes),
    /// 200 with a plain text body.
    Text(String),
    /// A bare status code, no body.
    Status(StatusCode),
    /// `{"error": "<message>"}` with the given status.
    Error { status: StatusCode, message: String },
    /// A response the handler built itself.
    Raw(Response),
}

impl Reply {
    /// Serialize `value` into a JSON reply, keeping field order.
    ///
    /// A value that fails to serialize becomes a 500 error reply.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Reply::Json(Bytes::from(body)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize JSON reply");
                Reply::error(StatusCode::INTERNAL_SERVER_ERROR, "failed to serialize reply")
            }
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    pub fn status(status: StatusCode) -> Self {
        Reply::Status(status)
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Reply::Error {
            status,
            message: message.into(),
        }
    }
}

impl From<StatusCode> for Reply {
    fn from(status: StatusCode) -> Self {
        Reply::Status(status)
    }
}

impl From<Response> for Reply {
    fn from(response: Response) -> Self {
        Reply::Raw(response)
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Json(body) => json_body(StatusCode::OK, body),
            Reply::Text(text) => (
                [(CONTENT_TYPE, HeaderValue::from_static(TEXT_CONTENT_TYPE))],
                text,
            )
                .into_response(),
            Reply::Status(status) => status.into_response(),
            Reply::Error { status, message } => {
                json_body(status, Bytes::from(json!({ "error": message }).to_string()))
            }
            Reply::Raw(response) => response,
        }
    }
}

fn json_body(status: StatusCode, body: Bytes) -> Response {
    (
        status,
        [(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
        body,
    )
        .into_response()
}
