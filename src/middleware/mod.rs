//! Middleware layer.
//!
//! A middleware stage sits between the server and the router and is the place
//! for cross-cutting concerns. Stages are composed into a
//! [`Pipeline`](crate::Pipeline) in a fixed order at startup; each one sees the
//! request on the way in and the response on the way out.
//!
//! Built-in stages:
//! - [`Trace`] — per-request span with method, path, status, latency
//! - [`Compression`] — gzip / deflate response bodies per `Accept-Encoding`
//! - [`Recover`] — turns handler panics into `500` responses
//! - [`Cors`] — cross-origin headers and preflight answers
//!
//! Writing a stage:
//!
//! ```rust
//! use std::sync::Arc;
//! use flightfinder_api::middleware::{Middleware, Next};
//! use flightfinder_api::{BoxFuture, Request};
//!
//! struct PoweredBy;
//!
//! impl Middleware for PoweredBy {
//!     fn process(self: Arc<Self>, req: Request, next: Next) -> BoxFuture {
//!         Box::pin(async move {
//!             let mut res = next.run(req).await;
//!             res.set_header("x-powered-by", "flightfinder");
//!             res
//!         })
//!     }
//! }
//! ```

mod compression;
mod cors;
mod recover;
mod trace;

use std::sync::Arc;

use crate::handler::BoxFuture;
use crate::request::Request;
use crate::router::Router;

pub use compression::Compression;
pub use cors::{AllowOrigin, Cors};
pub use recover::Recover;
pub use trace::Trace;

/// One stage of the request-processing chain.
///
/// `process` either answers the request itself (short-circuit) or passes it
/// through with [`Next::run`], optionally rewriting the response it gets back.
///
/// The receiver is `Arc<Self>` so the returned future can own the stage and
/// stay `'static`.
pub trait Middleware: Send + Sync + 'static {
    fn process(self: Arc<Self>, req: Request, next: Next) -> BoxFuture;
}

/// The remainder of the chain after the current stage.
pub struct Next {
    stages: Arc<[Arc<dyn Middleware>]>,
    index: usize,
    router: Arc<Router>,
}

impl Next {
    pub(crate) fn new(stages: Arc<[Arc<dyn Middleware>]>, router: Arc<Router>) -> Self {
        Self { stages, index: 0, router }
    }

    /// Runs the next stage, or the router once the stages are exhausted.
    pub fn run(self, req: Request) -> BoxFuture {
        let Some(stage) = self.stages.get(self.index).cloned() else {
            let router = self.router;
            return Box::pin(async move { router.dispatch(req).await });
        };
        let rest = Self {
            stages: self.stages,
            index: self.index + 1,
            router: self.router,
        };
        stage.process(req, rest)
    }
}
