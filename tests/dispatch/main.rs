//! Command dispatch integration tests.

mod support;
mod multipart;
mod replies;
mod registration;
