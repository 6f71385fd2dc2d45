// src/server/handler.rs
use crate::probe::{Probe, SharedProbe};
use crate::query::StatusQuery;
use hyper::{Body, Request, Response, StatusCode};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tower::Service;

pub const LIVE_PATH: &str = "/live";
pub const READY_PATH: &str = "/ready";

/// Liveness and readiness endpoint.
///
/// `/live` runs the liveness probes, `/ready` runs liveness followed by
/// readiness probes (a process that is not alive is never ready). Every
/// request runs a fresh query; nothing is cached between requests.
#[derive(Clone)]
pub struct Kubeprobes {
    liveness: Arc<[SharedProbe]>,
    readiness: Arc<[SharedProbe]>,
    query_timeout: Option<Duration>,
}

impl Kubeprobes {
    pub fn builder() -> KubeprobesBuilder {
        KubeprobesBuilder::default()
    }

    pub fn liveness_probes(&self) -> &[SharedProbe] {
        &self.liveness
    }

    pub fn readiness_probes(&self) -> &[SharedProbe] {
        &self.readiness
    }

    pub async fn handle<B>(&self, req: Request<B>) -> Response<Body> {
        let probes = match req.uri().path() {
            LIVE_PATH => self.liveness.to_vec(),
            READY_PATH => self
                .liveness
                .iter()
                .chain(self.readiness.iter())
                .cloned()
                .collect(),
            _ => return empty_response(StatusCode::NOT_FOUND),
        };

        if self.is_all_green(&probes).await {
            empty_response(StatusCode::OK)
        } else {
            tracing::debug!(path = req.uri().path(), "reporting unavailable");
            empty_response(StatusCode::SERVICE_UNAVAILABLE)
        }
    }

    async fn is_all_green(&self, probes: &[SharedProbe]) -> bool {
        let query = StatusQuery::run(probes);
        match self.query_timeout {
            Some(deadline) => query.is_all_green_within(deadline).await,
            None => query.is_all_green().await,
        }
    }
}

fn empty_response(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}

impl Service<Request<Body>> for Kubeprobes {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let probes = self.clone();
        Box::pin(async move { Ok(probes.handle(req).await) })
    }
}

/// Additive configuration for [`Kubeprobes`]. Both sets start empty and
/// every call appends; calls can be made in any order.
#[derive(Default)]
pub struct KubeprobesBuilder {
    liveness: Vec<SharedProbe>,
    readiness: Vec<SharedProbe>,
    query_timeout: Option<Duration>,
}

impl KubeprobesBuilder {
    pub fn with_liveness_probes<I>(mut self, probes: I) -> Self
    where
        I: IntoIterator<Item = SharedProbe>,
    {
        self.liveness.extend(probes);
        self
    }

    pub fn with_readiness_probes<I>(mut self, probes: I) -> Self
    where
        I: IntoIterator<Item = SharedProbe>,
    {
        self.readiness.extend(probes);
        self
    }

    pub fn with_liveness_probe<P: Probe>(mut self, probe: P) -> Self {
        self.liveness.push(Arc::new(probe));
        self
    }

    pub fn with_readiness_probe<P: Probe>(mut self, probe: P) -> Self {
        self.readiness.push(Arc::new(probe));
        self
    }

    /// Bound every query; a query that does not finish in time reports 503.
    pub fn with_query_timeout(mut self, deadline: Duration) -> Self {
        self.query_timeout = Some(deadline);
        self
    }

    pub fn build(self) -> Kubeprobes {
        Kubeprobes {
            liveness: self.liveness.into(),
            readiness: self.readiness.into(),
            query_timeout: self.query_timeout,
        }
    }
}
