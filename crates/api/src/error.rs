use axum::{http::StatusCode, response::IntoResponse, Json};
use routemeter_core::{ConfigError, RouteError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error("prometheus: {0}")]
    Prometheus(#[from] prometheus::Error),
}

impl IntoResponse for MetricsError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = match self {
            MetricsError::Prometheus(_) => (StatusCode::INTERNAL_SERVER_ERROR, "metrics_unavailable"),
            MetricsError::Config(_) | MetricsError::Route(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: ErrorBody {
                    code: code.to_string(),
                    message: self.to_string(),
                },
            }),
        )
            .into_response()
    }
}

pub type MetricsResult<T> = Result<T, MetricsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_prometheus_error_response() {
        let err = MetricsError::Prometheus(prometheus::Error::Msg("encoder failed".to_string()));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"]["code"], "metrics_unavailable");
        assert_eq!(json["error"]["message"], "prometheus: encoder failed");
    }

    #[tokio::test]
    async fn test_config_error_response() {
        let err = MetricsError::from(ConfigError::EmptyBuckets);
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"]["code"], "internal_error");
        assert_eq!(json["error"]["message"], "histogram buckets must not be empty");
    }

    #[test]
    fn test_route_error_is_transparent() {
        let err = MetricsError::from(RouteError::UnsupportedMethod("BREW".to_string()));
        assert_eq!(err.to_string(), "unsupported http method BREW");
    }
}
