//! In-process stand-in for the lookup provider.

use hyper::http::Uri;
use hyper::server::conn::AddrStream;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) struct Canned {
    status: StatusCode,
    body: String,
    delay: Duration,
}

impl Canned {
    pub(crate) fn json(body: &str) -> Self {
        Self::status(StatusCode::OK, body)
    }

    pub(crate) fn status(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_owned(),
            delay: Duration::ZERO,
        }
    }

    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub(crate) struct TestProvider {
    pub(crate) uri: Uri,
    paths: Arc<Mutex<Vec<String>>>,
}

impl TestProvider {
    /// Serve `respond(path)` for every request on an ephemeral loopback port.
    pub(crate) async fn spawn<F>(respond: F) -> Self
    where
        F: Fn(&str) -> Canned + Send + Sync + 'static,
    {
        let paths = Arc::new(Mutex::new(Vec::new()));
        let respond = Arc::new(respond);

        let make_service = {
            let paths = paths.clone();
            make_service_fn(move |_: &AddrStream| {
                let paths = paths.clone();
                let respond = respond.clone();
                let service = service_fn(move |request: Request<Body>| {
                    let path = request.uri().path().to_owned();
                    paths.lock().unwrap().push(path.clone());
                    let canned = respond(&path);
                    async move {
                        if !canned.delay.is_zero() {
                            tokio::time::sleep(canned.delay).await;
                        }
                        Ok::<_, Infallible>(
                            Response::builder()
                                .status(canned.status)
                                .header("Content-Type", "application/json")
                                .body(Body::from(canned.body))
                                .unwrap(),
                        )
                    }
                });
                async move { Ok::<_, Infallible>(service) }
            })
        };

        let server = Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(make_service);
        let uri = format!("http://{}", server.local_addr()).parse().unwrap();
        tokio::spawn(async move {
            if let Err(e) = server.await {
                log::error!("test provider error: {e}");
            }
        });
        Self { uri, paths }
    }

    pub(crate) fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}
