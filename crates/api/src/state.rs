use std::sync::Arc;

use routemeter_core::RouteCatalog;

use crate::histogram::RequestHistogram;

/// Everything the metrics middleware needs per request.
#[derive(Clone)]
pub struct HttpMetrics {
    pub histogram: RequestHistogram,
    pub catalog: Arc<RouteCatalog>,
    pub metrics_path: Arc<str>,
}

impl HttpMetrics {
    pub fn new(histogram: RequestHistogram, catalog: RouteCatalog, metrics_path: &str) -> Self {
        Self {
            histogram,
            catalog: Arc::new(catalog),
            metrics_path: Arc::from(metrics_path),
        }
    }
}
