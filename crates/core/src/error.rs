use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern {
        pattern: String,
        reason: &'static str,
    },
    #[error("route {method} {pattern} is already registered")]
    Duplicate { method: String, pattern: String },
    #[error("route `{pattern}` conflicts with registered route `{existing}`")]
    Conflict { pattern: String, existing: String },
    #[error("unsupported http method {0}")]
    UnsupportedMethod(String),
}

impl RouteError {
    pub(crate) fn invalid(pattern: &str, reason: &'static str) -> Self {
        RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("metrics path must start with '/', got `{0}`")]
    InvalidMetricsPath(String),
    #[error("histogram buckets must not be empty")]
    EmptyBuckets,
    #[error("invalid histogram bucket `{0}`")]
    InvalidBucket(String),
    #[error("histogram buckets must be strictly ascending ({previous} then {next})")]
    UnorderedBuckets { previous: f64, next: f64 },
    #[error("invalid listen address `{0}`")]
    InvalidListenAddress(String),
}
