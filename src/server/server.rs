//! Server configuration, command registration and chain assembly.
//!
//! `Server<C>` owns the shared context, the handler registry, and the user
//! middleware chain. Routers built from it freeze a snapshot of all three.
//!
//! ## Example
//!
//! ```ignore
//! use courier::{Config, Reply, Request, Server};
//!
//! let mut server = Server::new(Config::new("127.0.0.1:8080", "/rpc"), AppState::default());
//! server.command("echo", |req: Request, _ctx| async move {
//!     Some(Reply::json(&req.read_command::<serde_json::Value>().ok()?))
//! });
//! server.start().await?;
//! ```

use std::future::Future;
use std::sync::Arc;

use super::config::Config;
use crate::dispatch::{CommandArg, Dispatcher, RegistrationError, Registry, Reply, Request};
use crate::middleware::{compose, strict_path, timeout, Endpoint, Middleware, Mode, ServeMode};

/// A single-path command server generic over its shared context `C`.
pub struct Server<C> {
    config: Config,
    context: Arc<C>,
    registry: Registry<C>,
    middleware: Vec<Middleware>,
    mode: Arc<ServeMode>,
}

impl<C: Send + Sync + 'static> Server<C> {
    /// Create a server. The config's path is normalized to start with `/`.
    pub fn new(config: Config, context: C) -> Self {
        Self::with_shared_context(config, Arc::new(context))
    }

    /// Create a server around a context the caller keeps a handle to.
    pub fn with_shared_context(config: Config, context: Arc<C>) -> Self {
        Self {
            config: config.normalized(),
            context,
            registry: Registry::new(),
            middleware: Vec::new(),
            mode: Arc::new(ServeMode::new()),
        }
    }

    /// Register a command handler.
    ///
    /// A second registration under the same name replaces the first.
    pub fn command<F, Fut>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(Request, Arc<C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<Reply>> + Send + 'static,
    {
        self.registry.insert(name, crate::dispatch::boxed(handler));
        self
    }

    /// Register alternating name/handler arguments.
    ///
    /// Stops at the first malformed pair; pairs registered before it stay
    /// registered.
    pub fn commands(
        &mut self,
        args: impl IntoIterator<Item = CommandArg<C>>,
    ) -> Result<(), RegistrationError> {
        self.registry.insert_all(args)
    }

    /// Install the user middleware chain, replacing any previous chain.
    ///
    /// The first middleware runs outermost. Routers built earlier keep the
    /// chain they were built with.
    pub fn use_middleware(&mut self, middleware: impl IntoIterator<Item = Middleware>) -> &mut Self {
        self.middleware = middleware.into_iter().collect();
        self
    }

    /// List registered command names.
    pub fn registered_commands(&self) -> Vec<&str> {
        self.registry.names()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn context(&self) -> &Arc<C> {
        &self.context
    }

    /// Current serve mode, shared by every router built from this server.
    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    pub(crate) fn serve_mode(&self) -> Arc<ServeMode> {
        Arc::clone(&self.mode)
    }

    /// Assemble the full chain: write timeout, strict-path guard, user
    /// middleware, dispatcher.
    pub fn endpoint(&self) -> Endpoint {
        let dispatcher = Dispatcher::new(
            Arc::new(self.registry.clone()),
            Arc::clone(&self.context),
            self.config.body_limit,
        )
        .with_read_timeout(self.config.read_timeout());

        let mut chain = Vec::with_capacity(self.middleware.len() + 2);
        chain.push(timeout(self.config.write_timeout()));
        chain.push(strict_path(&self.config.path, self.serve_mode()));
        chain.extend(self.middleware.iter().cloned());

        compose(&chain, dispatcher.into_endpoint())
    }
}
