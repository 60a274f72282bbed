//! Request spans and completion logs.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, info_span, Instrument};

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::request::Request;

/// Opens a `request` span per request and logs the outcome with its latency.
pub struct Trace;

impl Middleware for Trace {
    fn process(self: Arc<Self>, req: Request, next: Next) -> BoxFuture {
        let span = info_span!("request", method = %req.method(), path = %req.path());
        Box::pin(
            async move {
                let started = Instant::now();
                let res = next.run(req).await;
                info!(
                    status = res.status_code(),
                    latency_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
                    "request completed",
                );
                res
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Method, Pipeline, Router};

    async fn ok(_req: Request) -> &'static str { "ok" }

    #[tokio::test]
    async fn passes_the_response_through() {
        let app = Pipeline::new(Router::new().on(Method::Get, "/", ok)).layer(Trace);
        let res = app.handle(Request::new(Method::Get, "/")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"ok");

        let res = app.handle(Request::new(Method::Get, "/missing")).await;
        assert_eq!(res.status_code(), 404);
    }
}
