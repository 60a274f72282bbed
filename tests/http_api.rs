use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;

use flate2::read::GzDecoder;
use flightfinder_api::routes::ROOT_MESSAGE;
use flightfinder_api::{routes, Airport, AirportProvider, Config, Error, Server};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct TestServer {
    base: String,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), Error>>,
}

impl TestServer {
    async fn start() -> Self {
        let config = Config {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            ..Config::default()
        };
        let app = routes::app(&config, Arc::new(AirportProvider::sample()));

        let server = Server::bind(config.addr).await.unwrap();
        let addr = server.local_addr().unwrap();
        let (shutdown, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.serve_with_shutdown(app, async move {
            let _ = rx.await;
        }));

        Self { base: format!("http://{addr}"), shutdown, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn stop(self) {
        let _ = self.shutdown.send(());
        self.handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn airports_over_http() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/airports")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert!(res.headers().get("content-encoding").is_none());

    let airports: Vec<Airport> = res.json().await.unwrap();
    assert_eq!(airports, AirportProvider::sample().list());

    server.stop().await;
}

#[tokio::test]
async fn root_and_unknown_paths() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.headers()["content-type"].to_str().unwrap().starts_with("text/plain"));
    assert!(res.text().await.unwrap().contains("is running"));

    let res = client.get(server.url("/api/nothing-here")).send().await.unwrap();
    assert_eq!(res.status(), 404);

    let res = client.post(server.url("/api/airports")).send().await.unwrap();
    assert_eq!(res.status(), 405);
    assert_eq!(res.headers()["allow"], "GET");

    server.stop().await;
}

#[tokio::test]
async fn gzip_when_client_accepts_it() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let plain = client.get(server.url("/api/airports")).send().await.unwrap()
        .bytes().await.unwrap();

    let res = client.get(server.url("/api/airports"))
        .header("accept-encoding", "gzip")
        .send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-encoding"], "gzip");
    let compressed = res.bytes().await.unwrap();

    let mut decoded = Vec::new();
    GzDecoder::new(&compressed[..]).read_to_end(&mut decoded).unwrap();
    assert_eq!(decoded, plain.to_vec());

    server.stop().await;
}

#[tokio::test]
async fn concurrent_requests_see_identical_payloads() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..100 {
        let client = client.clone();
        let url = server.url("/api/airports");
        tasks.spawn(async move {
            let res = client.get(url).send().await.unwrap();
            assert_eq!(res.status(), 200);
            res.bytes().await.unwrap()
        });
    }

    let mut bodies = Vec::new();
    while let Some(body) = tasks.join_next().await {
        bodies.push(body.unwrap());
    }
    assert_eq!(bodies.len(), 100);
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));

    server.stop().await;
}

#[tokio::test]
async fn cors_preflight_over_http() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let res = client.request(reqwest::Method::OPTIONS, server.url("/api/airports"))
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "GET")
        .send().await.unwrap();
    assert_eq!(res.status(), 204);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert_eq!(res.headers()["access-control-allow-methods"], "GET");

    server.stop().await;
}

#[test]
fn root_message_names_the_airports_route() {
    assert!(ROOT_MESSAGE.contains("/api/airports"));
}
