//! The composed request-processing chain.

use std::sync::Arc;

use crate::middleware::{Middleware, Next};
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// An ordered chain of middleware stages ending in a [`Router`].
///
/// Stages run in the order they are added: the first [`layer`](Pipeline::layer)
/// is outermost and sees the request first and the response last. Cloning is
/// two reference-count bumps.
///
/// ```rust
/// use flightfinder_api::middleware::{Cors, Trace};
/// use flightfinder_api::{Method, Pipeline, Request, Router};
///
/// async fn root(_req: Request) -> &'static str { "running" }
///
/// let app = Pipeline::new(Router::new().on(Method::Get, "/", root))
///     .layer(Trace)
///     .layer(Cors::permissive());
/// ```
#[derive(Clone)]
pub struct Pipeline {
    stages: Arc<[Arc<dyn Middleware>]>,
    router: Arc<Router>,
}

impl Pipeline {
    pub fn new(router: Router) -> Self {
        Self { stages: Vec::new().into(), router: Arc::new(router) }
    }

    /// Appends a stage inside all previously added ones.
    pub fn layer(mut self, stage: impl Middleware) -> Self {
        let mut stages = self.stages.to_vec();
        stages.push(Arc::new(stage));
        self.stages = stages.into();
        self
    }

    /// Runs one request through every stage and the router.
    ///
    /// The server calls this once per request; tests can call it directly to
    /// exercise the full chain without a socket.
    pub async fn handle(&self, req: Request) -> Response {
        Next::new(Arc::clone(&self.stages), Arc::clone(&self.router))
            .run(req)
            .await
    }
}
