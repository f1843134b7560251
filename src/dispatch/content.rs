//! Content-kind classification for inbound command requests.

use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;

/// Media type of a plain JSON command body.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Media type of a multipart form carrying the envelope in a field.
pub const MULTIPART_MEDIA_TYPE: &str = "multipart/form-data";

/// The body encodings the dispatcher knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Anything else. Rejected with 415 before the method is even checked.
    Unknown,
    /// `multipart/form-data`; the envelope travels in the `command` field.
    Multipart,
    /// `application/json`; the body is the envelope itself.
    Json,
}

impl ContentKind {
    /// Classify a declared content type.
    ///
    /// Matching is case-insensitive and ignores everything after the first
    /// `;`, so `application/json; charset=utf-8` is [`ContentKind::Json`].
    /// Whitespace is not trimmed.
    pub fn from_content_type(value: &str) -> Self {
        let media_type = value.split_once(';').map_or(value, |(head, _)| head);

        if media_type.eq_ignore_ascii_case(JSON_MEDIA_TYPE) {
            ContentKind::Json
        } else if media_type.eq_ignore_ascii_case(MULTIPART_MEDIA_TYPE) {
            ContentKind::Multipart
        } else {
            ContentKind::Unknown
        }
    }

    /// Classify a request by its `Content-Type` header.
    ///
    /// A missing or non-UTF-8 header is [`ContentKind::Unknown`].
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map_or(ContentKind::Unknown, Self::from_content_type)
    }

    pub fn is_known(self) -> bool {
        self != ContentKind::Unknown
    }
}
