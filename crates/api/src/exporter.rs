//! Wires the request histogram, the metrics middleware and the exposition
//! endpoint around an application's [`RouteTable`].
//!
//! Without a listen address the exposition route is merged into the
//! application router. With one, it is served by a separate listener so
//! scrapes never show up in the application's own traffic.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, MethodRouter},
    Router,
};
use prometheus::Registry;
use routemeter_core::MetricsConfig;
use tokio::{net::TcpListener, task::JoinHandle};
use tracing::{error, info, warn};

use crate::error::MetricsResult;
use crate::histogram::RequestHistogram;
use crate::middleware::metrics::track_requests;
use crate::routes::exposition::exposition;
use crate::state::HttpMetrics;
use crate::table::RouteTable;

pub struct PrometheusMetrics {
    config: MetricsConfig,
    registry: Registry,
    histogram: RequestHistogram,
    side_router: Option<Router>,
}

impl PrometheusMetrics {
    /// Registers the request histogram in `registry`.
    ///
    /// Each instance should get its own registry, or at least its own subsystem.
    pub fn new(config: MetricsConfig, registry: Registry) -> MetricsResult<Self> {
        config.validate()?;
        let histogram = RequestHistogram::register(&registry, &config)?;
        Ok(Self {
            config,
            registry,
            histogram,
            side_router: None,
        })
    }

    /// Base router for the separate listener, e.g. to serve health checks
    /// next to the metrics.
    pub fn with_exposition_router(mut self, router: Router) -> Self {
        self.side_router = Some(router);
        self
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn histogram(&self) -> &RequestHistogram {
        &self.histogram
    }

    pub fn exposition_route<S>(&self) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        get(exposition).with_state(self.registry.clone())
    }

    /// Build the application router with request metrics on every route.
    pub fn instrument<S>(&self, table: RouteTable<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let (mut router, catalog) = table.into_parts();
        let path = self.config.metrics_path.as_str();

        if self.config.listen_address.is_none() {
            if catalog.contains(&axum::http::Method::GET, path) {
                warn!(path, "application already serves the metrics path, not exposing metrics");
            } else {
                router = router.route(path, self.exposition_route());
            }
        }

        let state = HttpMetrics::new(self.histogram.clone(), catalog, path);
        router.layer(from_fn_with_state(state, track_requests))
    }

    /// Router served by the separate listener.
    pub fn exposition_router(&self) -> Router {
        self.side_router
            .clone()
            .unwrap_or_default()
            .route(&self.config.metrics_path, self.exposition_route())
    }

    /// Start the separate exposition listener when a listen address is configured.
    ///
    /// Bind and serve failures are logged and end the task; they never
    /// reach the caller.
    pub fn spawn_listener(&self) -> Option<JoinHandle<()>> {
        let addr = self.config.listen_address?;
        let router = self.exposition_router();

        Some(tokio::spawn(async move {
            let listener = match TcpListener::bind(addr).await {
                Ok(listener) => listener,
                Err(err) => {
                    error!(%addr, error = %err, "failed to bind metrics listener");
                    return;
                }
            };

            info!(%addr, "serving metrics");

            if let Err(err) = axum::serve(listener, router).await {
                error!(%addr, error = %err, "metrics listener stopped");
            }
        }))
    }
}
