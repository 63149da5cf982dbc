use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use routemeter_core::{RequestObservation, RouteId};
use tracing::warn;

use crate::state::HttpMetrics;

/// Records one latency observation per request, labelled by status code and
/// the route pattern that served it.
///
/// Requests to the exposition path pass through unmeasured. Recording is
/// best effort: a rejected observation is logged and the response is
/// returned untouched.
pub async fn track_requests(State(metrics): State<HttpMetrics>, req: Request, next: Next) -> Response {
    if req.uri().path() == &*metrics.metrics_path {
        return next.run(req).await;
    }

    let observation = RequestObservation::start(req.method().clone(), req.uri().path());
    let resp = next.run(req).await;

    let served = resp.extensions().get::<RouteId>().copied();
    let sample = observation.finish(resp.status(), served, metrics.catalog.as_ref());

    if let Err(err) = metrics.histogram.observe(&sample) {
        warn!(
            code = %sample.code,
            endpoint = %sample.endpoint,
            error = %err,
            "dropping request observation"
        );
    }

    resp
}
