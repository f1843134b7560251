//! The command server and its HTTP transport.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use courier::{Config, Reply, Request, Server};
//!
//! struct AppState { greeting: String }
//!
//! let mut server = Server::new(
//!     Config::new("0.0.0.0:8080", "/"),
//!     AppState { greeting: "hi".into() },
//! );
//!
//! server.command("greet", |_req: Request, ctx: Arc<AppState>| async move {
//!     Some(Reply::text(ctx.greeting.clone()))
//! });
//!
//! server.start().await?;
//! ```
//!
//! ## Handler Convention
//!
//! Handlers can live in their own modules:
//!
//! ```ignore
//! // src/commands/greet.rs
//!
//! pub const COMMAND: &str = "greet";
//!
//! pub async fn handle(req: Request, ctx: Arc<AppState>) -> Option<Reply> {
//!     Some(Reply::text(ctx.greeting.clone()))
//! }
//! ```
//!
//! and are registered together with [`register_commands!`](crate::register_commands).

mod config;
mod http;
#[allow(clippy::module_inception)]
mod server;

pub use config::{
    normalize_path, Config, DEFAULT_BIND, DEFAULT_BODY_LIMIT, DEFAULT_PATH, DEFAULT_READ_TIMEOUT_MS,
    DEFAULT_WRITE_TIMEOUT_MS,
};
pub use server::Server;

/// Register command modules with a server using the convention pattern.
///
/// Each module must export:
/// - `COMMAND: &str`: the command name
/// - `handle(req, ctx) -> Option<Reply>`: the async handler
///
/// # Example
/// ```ignore
/// courier::register_commands!(
///     server,
///     commands::greet,
///     commands::echo,
/// );
/// ```
#[macro_export]
macro_rules! register_commands {
    ($server:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $server
        $(
            .command(
                $($seg)::+::COMMAND,
                $($seg)::+::handle,
            )
        )+
    };
}
