use std::time::{Duration, Instant};

use http::{Method, StatusCode};

use crate::catalog::{RouteId, RouteLookup};
use crate::label::{endpoint_for, status_label};

/// One histogram observation: `(code, endpoint)` labels and a latency in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub code: String,
    pub endpoint: String,
    pub seconds: f64,
}

impl MetricSample {
    pub fn new(status: StatusCode, endpoint: String, elapsed: Duration) -> Self {
        Self {
            code: status_label(status),
            endpoint,
            seconds: elapsed.as_secs_f64(),
        }
    }
}

/// A request being measured. Lives from request entry until its sample is recorded.
#[derive(Debug)]
pub struct RequestObservation {
    method: Method,
    path: String,
    started: Instant,
}

impl RequestObservation {
    pub fn start(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            started: Instant::now(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn finish<L>(self, status: StatusCode, served: Option<RouteId>, routes: &L) -> MetricSample
    where
        L: RouteLookup + ?Sized,
    {
        let elapsed = self.started.elapsed();
        let endpoint = endpoint_for(&self.method, &self.path, status, served, routes);
        MetricSample::new(status, endpoint, elapsed)
    }
}
