use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use prometheus::{Encoder, Registry, TextEncoder, TEXT_FORMAT};
use tracing::error;

use crate::error::{MetricsError, MetricsResult};

/// Prometheus text exposition of everything in `registry`.
pub fn render(registry: &Registry) -> MetricsResult<Vec<u8>> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    Ok(buffer)
}

pub async fn exposition(State(registry): State<Registry>) -> Result<Response, MetricsError> {
    let body = render(&registry).map_err(|err| {
        error!(error = %err, "failed to encode metrics");
        err
    })?;
    Ok(([(header::CONTENT_TYPE, TEXT_FORMAT)], body).into_response())
}
