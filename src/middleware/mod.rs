//! Middleware chain
//!
//! A matched route runs an ordered list of middleware followed by one
//! terminal handler. Each middleware either lets the request continue or
//! answers it, which ends the chain on the spot.
//!
//! The traversal of a single request is tracked by [`Traversal`]:
//!
//! ```text
//! Pending ──start──▶ InMiddleware(0) ──advance──▶ ... ──▶ InMiddleware(n)
//!                         │                                   │
//!                     terminate                            complete
//!                         ▼                                   ▼
//!                  TerminatedEarly                          Handled
//! ```
//!
//! `InMiddleware(n)`, where `n` is the middleware count, is the terminal
//! handler's turn. Once a response exists every further transition is a
//! [`ChainError`].

pub mod authorize;
pub mod logger;

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

use crate::http::{Request, Response};

pub use authorize::{Authorize, Identity};
pub use logger::RequestLogger;

/// Outcome of a single middleware step
#[derive(Debug)]
pub enum Flow {
    /// Hand the request to the next element of the chain
    Continue,
    /// Answer now; nothing after this middleware runs
    Respond(Response),
}

pub trait Middleware: Send + Sync {
    fn name(&self) -> &'static str;

    fn handle(&self, req: &mut Request) -> Flow;
}

impl<F> Middleware for F
where
    F: Fn(&mut Request) -> Flow + Send + Sync,
{
    fn name(&self) -> &'static str {
        "closure"
    }

    fn handle(&self, req: &mut Request) -> Flow {
        self(req)
    }
}

/// The last element of a chain; always produces the response when reached
#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(&self, req: Request) -> Response;
}

#[async_trait]
impl<F, Fut> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    async fn call(&self, req: Request) -> Response {
        self(req).await
    }
}

pub type SharedMiddleware = Arc<dyn Middleware>;
pub type SharedHandler = Arc<dyn Handler>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    Pending,
    InMiddleware(usize),
    Handled,
    TerminatedEarly,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("response already sent (state {0:?})")]
    AlreadyResponded(ChainState),

    #[error("cannot {action} from state {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: ChainState,
    },
}

/// Per-request traversal state over `middleware_count` middleware plus one handler
#[derive(Debug)]
pub struct Traversal {
    state: ChainState,
    middleware_count: usize,
}

impl Traversal {
    pub const fn new(middleware_count: usize) -> Self {
        Self {
            state: ChainState::Pending,
            middleware_count,
        }
    }

    pub const fn state(&self) -> ChainState {
        self.state
    }

    pub const fn is_finished(&self) -> bool {
        matches!(self.state, ChainState::Handled | ChainState::TerminatedEarly)
    }

    pub fn start(&mut self) -> Result<(), ChainError> {
        match self.state {
            ChainState::Pending => {
                self.state = ChainState::InMiddleware(0);
                Ok(())
            }
            state => Err(self.reject("start", state)),
        }
    }

    /// A middleware called its continuation
    pub fn advance(&mut self) -> Result<(), ChainError> {
        match self.state {
            ChainState::InMiddleware(i) if i < self.middleware_count => {
                self.state = ChainState::InMiddleware(i + 1);
                Ok(())
            }
            state => Err(self.reject("advance", state)),
        }
    }

    /// A middleware answered without continuing
    pub fn terminate(&mut self) -> Result<(), ChainError> {
        match self.state {
            ChainState::InMiddleware(i) if i < self.middleware_count => {
                self.state = ChainState::TerminatedEarly;
                Ok(())
            }
            state => Err(self.reject("terminate", state)),
        }
    }

    /// The terminal handler produced its response
    pub fn complete(&mut self) -> Result<(), ChainError> {
        match self.state {
            ChainState::InMiddleware(i) if i == self.middleware_count => {
                self.state = ChainState::Handled;
                Ok(())
            }
            state => Err(self.reject("complete", state)),
        }
    }

    fn reject(&self, action: &'static str, state: ChainState) -> ChainError {
        if self.is_finished() {
            ChainError::AlreadyResponded(state)
        } else {
            ChainError::InvalidTransition { action, state }
        }
    }
}

/// Ordered middleware plus terminal handler, as stored in a route entry
#[derive(Clone)]
pub struct Chain {
    middleware: Vec<SharedMiddleware>,
    handler: SharedHandler,
}

impl Chain {
    pub fn new(middleware: Vec<SharedMiddleware>, handler: SharedHandler) -> Self {
        Self {
            middleware,
            handler,
        }
    }

    pub fn middleware_names(&self) -> Vec<&'static str> {
        self.middleware.iter().map(|m| m.name()).collect()
    }

    /// Run the chain to completion or to the first middleware that responds.
    ///
    /// A handler that never resolves keeps the request pending; only the
    /// connection timeout ends it.
    pub async fn run(&self, mut req: Request) -> Result<Response, ChainError> {
        let mut traversal = Traversal::new(self.middleware.len());
        traversal.start()?;

        for middleware in &self.middleware {
            match middleware.handle(&mut req) {
                Flow::Continue => traversal.advance()?,
                Flow::Respond(resp) => {
                    traversal.terminate()?;
                    tracing::debug!(
                        middleware = middleware.name(),
                        status = resp.status.as_u16(),
                        "chain terminated early"
                    );
                    return Ok(resp);
                }
            }
        }

        let resp = self.handler.call(req).await;
        traversal.complete()?;
        Ok(resp)
    }
}
