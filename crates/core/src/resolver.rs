//! Maps a concrete request path back to the route pattern that served it.
//!
//! The endpoint label of a request must come from the registered pattern
//! (`/users/:id/orders`), never from the concrete path (`/users/42/orders`),
//! otherwise every distinct id becomes a new time series.

use http::Method;
use tracing::debug;

use crate::catalog::{RouteId, RouteLookup};

/// Resolve the pattern that produced the match for `path`.
///
/// `served` is the identity of the handler that actually ran, as reported
/// by the dispatcher. Without it the dispatcher is asked to look `path` up
/// again. When the dispatcher can name the pattern directly that answer is
/// used; otherwise every pattern registered for `method` is probed in
/// registration order and the first one whose lookup lands on the served
/// handler wins.
///
/// Falls back to `path` itself when nothing matches.
pub fn resolve<L>(method: &Method, path: &str, served: Option<RouteId>, routes: &L) -> String
where
    L: RouteLookup + ?Sized,
{
    let Some(served) = served.or_else(|| routes.lookup(method, path)) else {
        debug!(%method, path, "no route served request, labelling by path");
        return path.to_string();
    };

    if let Some(pattern) = routes.pattern_of(served) {
        return pattern.as_str().to_string();
    }

    routes
        .registered_patterns(method)
        .iter()
        .find(|pattern| routes.lookup(method, pattern.as_str()) == Some(served))
        .map(|pattern| pattern.as_str().to_string())
        .unwrap_or_else(|| {
            debug!(%method, path, "no registered pattern resolved, labelling by path");
            path.to_string()
        })
}
