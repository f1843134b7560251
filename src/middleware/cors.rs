//! CORS preflight middleware.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;

use super::chain::{from_fn, Middleware};

pub const ALLOW_CREDENTIALS: &str = "true";
pub const EXPOSE_HEADERS: &str = "X-Auth-Token";
pub const ALLOW_HEADERS: &str = "Origin, Content-Type, Accept, Authorization, X-Requested-With";
pub const ALLOW_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";

/// Answer `OPTIONS` preflight requests for `origin` with 200 and the CORS
/// headers. Every other request passes through untouched.
///
/// An `origin` that is not a valid header value is sent as `null`.
pub fn cors(origin: &str) -> Middleware {
    let origin = HeaderValue::from_str(origin).unwrap_or_else(|_| {
        tracing::warn!(origin, "invalid CORS origin, answering preflights with `null`");
        HeaderValue::from_static("null")
    });

    from_fn(move |req, next| {
        let preflight = req.method() == Method::OPTIONS;
        let origin = origin.clone();
        async move {
            if !preflight {
                return next(req).await;
            }

            (
                StatusCode::OK,
                [
                    (ACCESS_CONTROL_ALLOW_ORIGIN, origin),
                    (ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static(ALLOW_CREDENTIALS)),
                    (ACCESS_CONTROL_EXPOSE_HEADERS, HeaderValue::from_static(EXPOSE_HEADERS)),
                    (ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS)),
                    (ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS)),
                ],
            )
                .into_response()
        }
    })
}
