//! Panic recovery for handlers and inner stages.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tracing::error;

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Catches panics from the stages and handlers below it and answers `500`.
///
/// With `diagnostics` on (development), the response body names the request
/// and the panic message. Otherwise the client gets a bare `500`.
pub struct Recover {
    diagnostics: bool,
}

impl Recover {
    /// Detailed failure pages, for development.
    pub fn detailed() -> Self {
        Self { diagnostics: true }
    }

    /// Bare `500` responses.
    pub fn generic() -> Self {
        Self { diagnostics: false }
    }
}

impl Middleware for Recover {
    fn process(self: Arc<Self>, req: Request, next: Next) -> BoxFuture {
        let method = req.method();
        let path = req.path().to_owned();

        Box::pin(async move {
            // The handler is invoked inside the guarded future so panics raised
            // while building its future are caught as well.
            let guarded = AssertUnwindSafe(async move { next.run(req).await });
            match guarded.catch_unwind().await {
                Ok(res) => res,
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!(%method, %path, "unhandled panic while processing request: {message}");

                    if !self.diagnostics {
                        return Response::status(Status::InternalServerError);
                    }
                    Response::builder()
                        .status(Status::InternalServerError)
                        .text(format!(
                            "An unhandled exception occurred while processing the request.\n\n\
                             {method} {path}\n\n\
                             panic: {message}\n",
                        ))
                }
            }
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Method, Pipeline, Router};

    async fn boom(_req: Request) -> Response {
        panic!("airport table corrupted");
    }

    async fn fine(_req: Request) -> &'static str { "fine" }

    fn app(recover: Recover) -> Pipeline {
        let router = Router::new()
            .on(Method::Get, "/boom", boom)
            .on(Method::Get, "/fine", fine);
        Pipeline::new(router).layer(recover)
    }

    #[tokio::test]
    async fn detailed_page_names_the_panic() {
        let res = app(Recover::detailed()).handle(Request::new(Method::Get, "/boom")).await;
        assert_eq!(res.status_code(), 500);
        let body = String::from_utf8(res.body().to_vec()).unwrap();
        assert!(body.contains("GET /boom"));
        assert!(body.contains("airport table corrupted"));
    }

    #[tokio::test]
    async fn generic_page_hides_details() {
        let res = app(Recover::generic()).handle(Request::new(Method::Get, "/boom")).await;
        assert_eq!(res.status_code(), 500);
        assert!(res.body().is_empty());
    }

    #[tokio::test]
    async fn passes_through_without_panic() {
        let res = app(Recover::generic()).handle(Request::new(Method::Get, "/fine")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"fine");
    }
}
