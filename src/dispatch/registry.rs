//! Command name to handler mapping.
//!
//! Handlers are async functions taking the decoded [`Request`] and the
//! server's shared context:
//!
//! ```ignore
//! async fn echo(req: Request, ctx: Arc<AppState>) -> Option<Reply> {
//!     Some(Reply::json(&req.read_command::<Value>().ok()?))
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use super::error::RegistrationError;
use super::reply::Reply;
use super::request::Request;

/// A type-erased command handler.
pub type BoxHandler<C> =
    Arc<dyn Fn(Request, Arc<C>) -> BoxFuture<'static, Option<Reply>> + Send + Sync>;

/// Erase a handler function into a [`BoxHandler`].
pub fn boxed<C, F, Fut>(handler: F) -> BoxHandler<C>
where
    C: Send + Sync + 'static,
    F: Fn(Request, Arc<C>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Option<Reply>> + Send + 'static,
{
    Arc::new(move |request, context| handler(request, context).boxed())
}

/// Registered handlers, keyed by command name.
pub struct Registry<C> {
    handlers: HashMap<String, BoxHandler<C>>,
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<C> Clone for Registry<C> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<C> fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("commands", &self.names())
            .finish()
    }
}

impl<C> Registry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, replacing any previous handler with
    /// the same name.
    pub fn insert(&mut self, name: impl Into<String>, handler: BoxHandler<C>) {
        let name = name.into();
        if self.handlers.insert(name.clone(), handler).is_some() {
            tracing::debug!(command = %name, "replaced existing command handler");
        }
    }

    /// Register alternating name/handler arguments.
    ///
    /// Pairs are registered in order. On the first malformed pair the
    /// method stops and returns an error; pairs before it stay registered.
    pub fn insert_all(
        &mut self,
        args: impl IntoIterator<Item = CommandArg<C>>,
    ) -> Result<(), RegistrationError> {
        let mut args = args.into_iter().enumerate().peekable();
        if args.peek().is_none() {
            return Err(RegistrationError::Empty);
        }

        while let Some((position, arg)) = args.next() {
            let CommandArg::Name(name) = arg else {
                return Err(RegistrationError::ExpectedName { position });
            };

            match args.next() {
                Some((_, CommandArg::Handler(handler))) => self.insert(name, handler),
                Some((position, CommandArg::Name(_))) => {
                    return Err(RegistrationError::ExpectedHandler { position })
                }
                None => return Err(RegistrationError::Unpaired { position }),
            }
        }

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&BoxHandler<C>> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// List registered command names.
    pub fn names(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// One item of a bulk registration list.
///
/// ```ignore
/// server.commands([
///     CommandArg::from("cmd1"),
///     CommandArg::handler(cmd1),
///     CommandArg::from("cmd2"),
///     CommandArg::handler(cmd2),
/// ])?;
/// ```
pub enum CommandArg<C> {
    Name(String),
    Handler(BoxHandler<C>),
}

impl<C: Send + Sync + 'static> CommandArg<C> {
    pub fn name(name: impl Into<String>) -> Self {
        CommandArg::Name(name.into())
    }

    pub fn handler<F, Fut>(handler: F) -> Self
    where
        F: Fn(Request, Arc<C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<Reply>> + Send + 'static,
    {
        CommandArg::Handler(boxed(handler))
    }
}

impl<C> From<&str> for CommandArg<C> {
    fn from(name: &str) -> Self {
        CommandArg::Name(name.to_string())
    }
}

impl<C> From<String> for CommandArg<C> {
    fn from(name: String) -> Self {
        CommandArg::Name(name)
    }
}

impl<C> fmt::Debug for CommandArg<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandArg::Name(name) => f.debug_tuple("Name").field(name).finish(),
            CommandArg::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}
