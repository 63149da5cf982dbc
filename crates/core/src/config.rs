use std::net::SocketAddr;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::pattern::RoutePattern;

pub const DEFAULT_METRICS_PATH: &str = "/metrics";

/// Seconds. Covers fast handlers up to slow five second requests.
pub const DEFAULT_BUCKETS: [f64; 10] = [0.1, 0.2, 0.3, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 5.0];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Prefix of the histogram name. Empty means no prefix.
    pub subsystem: String,
    pub metrics_path: String,
    pub buckets: Vec<f64>,
    /// Serve the exposition endpoint on its own listener instead of the app router.
    pub listen_address: Option<SocketAddr>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            subsystem: String::new(),
            metrics_path: DEFAULT_METRICS_PATH.to_string(),
            buckets: DEFAULT_BUCKETS.to_vec(),
            listen_address: None,
        }
    }
}

impl MetricsConfig {
    pub fn new(subsystem: impl Into<String>) -> Self {
        Self::default().with_subsystem(subsystem)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(subsystem) = lookup("ROUTEMETER_SUBSYSTEM") {
            config.subsystem = subsystem;
        }
        if let Some(path) = lookup("ROUTEMETER_METRICS_PATH") {
            config.metrics_path = path;
        }
        if let Some(raw) = lookup("ROUTEMETER_METRICS_BUCKETS") {
            config.buckets = parse_buckets(&raw)?;
        }
        if let Some(raw) = lookup("ROUTEMETER_METRICS_BIND").filter(|v| !v.trim().is_empty()) {
            let addr = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidListenAddress(raw.clone()))?;
            config.listen_address = Some(addr);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_subsystem(mut self, subsystem: impl Into<String>) -> Self {
        self.subsystem = subsystem.into();
        self
    }

    pub fn with_metrics_path(mut self, path: impl Into<String>) -> Self {
        self.metrics_path = path.into();
        self
    }

    pub fn with_buckets(mut self, buckets: Vec<f64>) -> Self {
        self.buckets = buckets;
        self
    }

    pub fn with_listen_address(mut self, addr: SocketAddr) -> Self {
        self.listen_address = Some(addr);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let literal = RoutePattern::parse(&self.metrics_path).is_ok_and(|p| p.is_literal());
        if !literal {
            return Err(ConfigError::InvalidMetricsPath(self.metrics_path.clone()));
        }
        if self.buckets.is_empty() {
            return Err(ConfigError::EmptyBuckets);
        }
        if let Some(bad) = self.buckets.iter().find(|b| !b.is_finite()) {
            return Err(ConfigError::InvalidBucket(bad.to_string()));
        }
        for pair in self.buckets.windows(2) {
            if pair[0] >= pair[1] {
                return Err(ConfigError::UnorderedBuckets {
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(())
    }
}

fn parse_buckets(raw: &str) -> Result<Vec<f64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<f64>()
                .map_err(|_| ConfigError::InvalidBucket(v.to_string()))
        })
        .collect()
}
