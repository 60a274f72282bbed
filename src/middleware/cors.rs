//! Cross-origin resource sharing: preflight answers and allow-origin headers.

use std::sync::Arc;

use tracing::debug;

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Which origins may read responses cross-origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllowOrigin {
    /// `access-control-allow-origin: *`
    Any,
    /// Exact, case-insensitive matches; the matching origin is echoed back.
    List(Vec<String>),
}

/// Cross-origin resource sharing.
///
/// Any method and any request header are allowed; origins follow
/// [`AllowOrigin`]. Preflight requests are answered here with `204` and never
/// reach the router.
pub struct Cors {
    origins: AllowOrigin,
}

impl Cors {
    /// Any origin, any method, any header.
    pub fn permissive() -> Self {
        Self { origins: AllowOrigin::Any }
    }

    /// Only the listed origins. An empty list means any origin.
    pub fn allow_origins<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list: Vec<String> = origins.into_iter().map(Into::into).collect();
        if list.is_empty() {
            return Self::permissive();
        }
        Self { origins: AllowOrigin::List(list) }
    }

    pub fn origins(&self) -> &AllowOrigin {
        &self.origins
    }

    fn allow_origin_header(&self, origin: &str) -> Option<String> {
        match &self.origins {
            AllowOrigin::Any => Some("*".to_owned()),
            AllowOrigin::List(list) => list.iter()
                .any(|o| o.eq_ignore_ascii_case(origin))
                .then(|| origin.to_owned()),
        }
    }

    /// Sets the allow-origin header for an allowed origin. In list mode every
    /// response varies on `origin`, allowed or not.
    fn decorate(&self, res: &mut Response, allow_origin: Option<&str>) {
        if let Some(allow_origin) = allow_origin {
            res.set_header("access-control-allow-origin", allow_origin);
        }
        if matches!(self.origins, AllowOrigin::List(_)) {
            res.append_header("vary", "origin");
        }
    }
}

impl Middleware for Cors {
    fn process(self: Arc<Self>, req: Request, next: Next) -> BoxFuture {
        let origin = req.header("origin");
        let allow_origin = origin.and_then(|o| self.allow_origin_header(o));
        if let (Some(origin), None) = (origin, &allow_origin) {
            debug!(%origin, "origin not allowed, omitting CORS headers");
        }

        let requested_method = req.header("access-control-request-method");
        if let (Some(allow_origin), Method::Options, Some(requested_method)) =
            (&allow_origin, req.method(), requested_method)
        {
            let mut res = Response::builder()
                .status(Status::NoContent)
                .header("access-control-allow-methods", requested_method)
                .no_body();
            if let Some(headers) = req.header("access-control-request-headers") {
                res.append_header("access-control-allow-headers", headers);
            }
            self.decorate(&mut res, Some(allow_origin.as_str()));
            return Box::pin(async move { res });
        }

        Box::pin(async move {
            let mut res = next.run(req).await;
            self.decorate(&mut res, allow_origin.as_deref());
            res
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pipeline, Router};

    async fn airports(_req: Request) -> &'static str { "[]" }

    fn app(cors: Cors) -> Pipeline {
        Pipeline::new(Router::new().on(Method::Get, "/api/airports", airports)).layer(cors)
    }

    #[tokio::test]
    async fn same_origin_requests_are_untouched() {
        let res = app(Cors::permissive()).handle(Request::new(Method::Get, "/api/airports")).await;
        assert_eq!(res.header("access-control-allow-origin"), None);
    }

    #[tokio::test]
    async fn permissive_allows_any_origin() {
        let req = Request::new(Method::Get, "/api/airports")
            .with_header("origin", "http://localhost:3000");
        let res = app(Cors::permissive()).handle(req).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.header("access-control-allow-origin"), Some("*"));
        assert_eq!(res.header("vary"), None);
    }

    #[tokio::test]
    async fn preflight_short_circuits() {
        let req = Request::new(Method::Options, "/api/airports")
            .with_header("origin", "https://flights.example")
            .with_header("access-control-request-method", "PUT")
            .with_header("access-control-request-headers", "content-type, x-client");
        let res = app(Cors::permissive()).handle(req).await;
        assert_eq!(res.status_code(), 204);
        assert_eq!(res.header("access-control-allow-origin"), Some("*"));
        assert_eq!(res.header("access-control-allow-methods"), Some("PUT"));
        assert_eq!(res.header("access-control-allow-headers"), Some("content-type, x-client"));
    }

    #[tokio::test]
    async fn plain_options_goes_to_the_router() {
        let req = Request::new(Method::Options, "/api/airports")
            .with_header("origin", "https://flights.example");
        let res = app(Cors::permissive()).handle(req).await;
        assert_eq!(res.status_code(), 405);
    }

    #[tokio::test]
    async fn listed_origin_is_echoed() {
        let cors = Cors::allow_origins(["https://flights.example"]);
        let req = Request::new(Method::Get, "/api/airports")
            .with_header("origin", "https://flights.example");
        let res = app(cors).handle(req).await;
        assert_eq!(res.header("access-control-allow-origin"), Some("https://flights.example"));
        assert_eq!(res.header("vary"), Some("origin"));
    }

    #[tokio::test]
    async fn unlisted_origin_gets_no_headers() {
        let cors = Cors::allow_origins(["https://flights.example"]);
        let req = Request::new(Method::Get, "/api/airports")
            .with_header("origin", "https://evil.example");
        let res = app(cors).handle(req).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.header("access-control-allow-origin"), None);
        assert_eq!(res.header("vary"), Some("origin"));
    }

    #[tokio::test]
    async fn listed_mode_varies_on_origin_even_without_one() {
        let cors = Cors::allow_origins(["https://flights.example"]);
        let res = app(cors).handle(Request::new(Method::Get, "/api/airports")).await;
        assert_eq!(res.header("access-control-allow-origin"), None);
        assert_eq!(res.header("vary"), Some("origin"));

        let res = app(Cors::permissive()).handle(Request::new(Method::Get, "/api/airports")).await;
        assert_eq!(res.header("vary"), None);
    }

    #[tokio::test]
    async fn listed_preflight_varies_on_origin() {
        let cors = Cors::allow_origins(["https://flights.example"]);
        let req = Request::new(Method::Options, "/api/airports")
            .with_header("origin", "https://flights.example")
            .with_header("access-control-request-method", "GET");
        let res = app(cors).handle(req).await;
        assert_eq!(res.status_code(), 204);
        assert_eq!(res.header("access-control-allow-origin"), Some("https://flights.example"));
        assert_eq!(res.header("vary"), Some("origin"));
    }

    #[tokio::test]
    async fn unlisted_preflight_reaches_the_router() {
        let cors = Cors::allow_origins(["https://flights.example"]);
        let req = Request::new(Method::Options, "/api/airports")
            .with_header("origin", "https://evil.example")
            .with_header("access-control-request-method", "GET");
        let res = app(cors).handle(req).await;
        assert_eq!(res.status_code(), 405);
        assert_eq!(res.header("access-control-allow-origin"), None);
        assert_eq!(res.header("vary"), Some("origin"));
    }

    #[test]
    fn empty_list_is_permissive() {
        assert_eq!(Cors::allow_origins(Vec::<String>::new()).origins(), &AllowOrigin::Any);
    }
}
