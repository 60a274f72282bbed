//! # flightfinder-api
//!
//! A small HTTP API that serves the FlightFinder airport list.
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | `GET` | `/api/airports` | `200`, JSON array of [`Airport`] |
//! | `GET` | `/` | `200`, plain-text status line |
//!
//! Under the routes sits a minimal HTTP layer: a [`matchit`] radix-tree
//! [`Router`], an explicit [`Pipeline`] of [`middleware`] stages (tracing,
//! compression, panic recovery, CORS), and a hyper-based [`Server`] with
//! graceful shutdown.
//!
//! ## Running it in-process
//!
//! ```rust
//! use std::sync::Arc;
//! use flightfinder_api::{routes, AirportProvider, Config, Method, Request};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = Arc::new(AirportProvider::sample());
//! let app = routes::app(&Config::default(), provider);
//!
//! let res = app.handle(Request::new(Method::Get, "/api/airports")).await;
//! assert_eq!(res.status_code(), 200);
//! # }
//! ```

mod error;
mod handler;
mod method;
mod pipeline;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod airport;
pub mod config;
pub mod middleware;
pub mod routes;

pub use airport::{Airport, AirportProvider};
pub use config::{Config, Environment};
pub use error::Error;
pub use handler::{BoxFuture, Handler};
pub use method::{Method, UnknownMethod};
pub use pipeline::Pipeline;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
