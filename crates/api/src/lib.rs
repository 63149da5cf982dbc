//! Request latency metrics for axum services, labelled by route pattern.
//!
//! Register routes through a [`RouteTable`], then let [`PrometheusMetrics`]
//! instrument it:
//!
//! ```ignore
//! let metrics = PrometheusMetrics::new(MetricsConfig::new("shop"), Registry::new())?;
//! let app = metrics.instrument(RouteTable::new().get("/items/:id", get_item)?);
//! ```
//!
//! `GET /items/123` is then recorded as `endpoint="GET_/items/:id"`, and any
//! unmatched `GET` as `endpoint="404_GET"`.

pub mod error;
pub mod exporter;
pub mod histogram;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod table;

pub use error::{MetricsError, MetricsResult};
pub use exporter::PrometheusMetrics;
pub use histogram::RequestHistogram;
pub use state::HttpMetrics;
pub use table::RouteTable;
