//! FlightFinder routes and the middleware chain they run behind.

use std::sync::Arc;

use crate::airport::AirportProvider;
use crate::config::Config;
use crate::handler::Handler;
use crate::middleware::{Compression, Cors, Recover, Trace};
use crate::{IntoResponse, Json, Method, Pipeline, Request, Router};

/// Body of `GET /`.
pub const ROOT_MESSAGE: &str = "FlightFinder API is running. Try GET /api/airports";

/// `GET /`: fixed plain-text status line.
pub async fn root(_req: Request) -> &'static str {
    ROOT_MESSAGE
}

/// `GET /api/airports`: every airport the provider holds, as JSON.
pub fn airports(provider: Arc<AirportProvider>) -> impl Handler {
    move |_req: Request| {
        let provider = Arc::clone(&provider);
        async move { Json(provider.list()).into_response() }
    }
}

pub fn router(provider: Arc<AirportProvider>) -> Router {
    Router::new()
        .on(Method::Get, "/", root)
        .on(Method::Get, "/api/airports", airports(provider))
}

/// The full application: trace → compression → recover → cors → router.
pub fn app(config: &Config, provider: Arc<AirportProvider>) -> Pipeline {
    stack(config, router(provider))
}

/// Wraps any router in the application's middleware, configured from `config`.
pub fn stack(config: &Config, router: Router) -> Pipeline {
    let recover = if config.environment.is_development() {
        Recover::detailed()
    } else {
        Recover::generic()
    };

    Pipeline::new(router)
        .layer(Trace)
        .layer(Compression::new().with_mime_type("application/octet-stream"))
        .layer(recover)
        .layer(Cors::allow_origins(config.cors_origins.iter().cloned()))
}
