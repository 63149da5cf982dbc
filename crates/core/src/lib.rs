pub mod catalog;
pub mod config;
pub mod error;
pub mod label;
pub mod observation;
pub mod pattern;
pub mod resolver;

pub use catalog::{RouteCatalog, RouteId, RouteLookup};
pub use config::MetricsConfig;
pub use error::{ConfigError, RouteError};
pub use observation::{MetricSample, RequestObservation};
pub use pattern::RoutePattern;
pub use resolver::resolve;
