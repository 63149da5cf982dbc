use prometheus::{HistogramOpts, HistogramVec, Registry};
use routemeter_core::{MetricSample, MetricsConfig};

use crate::error::MetricsResult;

pub const REQUEST_DURATION_SECONDS: &str = "request_duration_seconds";
pub const REQUEST_DURATION_HELP: &str = "request latencies";
pub const LABEL_NAMES: [&str; 2] = ["code", "endpoint"];

/// Request latency histogram labelled by status code and endpoint.
///
/// Cloning is cheap and every clone writes to the same series.
#[derive(Clone)]
pub struct RequestHistogram {
    inner: HistogramVec,
}

impl RequestHistogram {
    pub fn register(registry: &Registry, config: &MetricsConfig) -> MetricsResult<Self> {
        let opts = HistogramOpts::new(REQUEST_DURATION_SECONDS, REQUEST_DURATION_HELP)
            .subsystem(config.subsystem.clone())
            .buckets(config.buckets.clone());
        let inner = HistogramVec::new(opts, &LABEL_NAMES)?;
        registry.register(Box::new(inner.clone()))?;
        Ok(Self { inner })
    }

    /// Wrap an already registered vector.
    pub fn from_vec(inner: HistogramVec) -> Self {
        Self { inner }
    }

    pub fn observe(&self, sample: &MetricSample) -> MetricsResult<()> {
        let histogram = self
            .inner
            .get_metric_with_label_values(&[sample.code.as_str(), sample.endpoint.as_str()])?;
        histogram.observe(sample.seconds);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn sample_count(&self, code: &str, endpoint: &str) -> u64 {
        self.inner
            .get_metric_with_label_values(&[code, endpoint])
            .map(|h| h.get_sample_count())
            .unwrap_or(0)
    }
}
