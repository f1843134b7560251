//! Echo server.
//!
//! ```sh
//! cargo run --example echo
//! curl -d '{"name":"echo","data":{"text":"hi"}}' -H 'content-type: application/json' localhost:8080
//! ```
//!
//! Set `COURIER_CONFIG` to a TOML file to override the bind address, path,
//! or body limit.

use std::sync::Arc;

use courier::{Config, Reply, Request, Server, StatusCode};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Deserialize)]
struct Echo {
    text: String,
}

#[derive(Serialize)]
struct Echoed {
    echo: String,
}

struct AppState {
    repeat: usize,
}

async fn echo(req: Request, ctx: Arc<AppState>) -> Option<Reply> {
    match req.read_command::<Echo>() {
        Ok(input) => Some(Reply::json(&Echoed {
            echo: vec![input.text; ctx.repeat].join(" "),
        })),
        Err(e) => Some(Reply::error(StatusCode::BAD_REQUEST, e.to_string())),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::var_os("COURIER_CONFIG") {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut server = Server::new(config, AppState { repeat: 3 });
    server
        .command("echo", echo)
        .use_middleware([courier::cors("*")]);

    server
        .start_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
            }
        })
        .await?;
    Ok(())
}
