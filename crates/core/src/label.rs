use http::{Method, StatusCode};

use crate::catalog::{RouteId, RouteLookup};
use crate::resolver::resolve;

pub fn endpoint_label(method: &Method, route: &str) -> String {
    format!("{}_{}", method.as_str(), route)
}

/// Shared label for every unmatched request of a method, whatever path was probed.
pub fn not_found_label(method: &Method) -> String {
    format!("404_{}", method.as_str())
}

pub fn status_label(status: StatusCode) -> String {
    status.as_u16().to_string()
}

/// The endpoint label recorded for a finished request.
pub fn endpoint_for<L>(
    method: &Method,
    path: &str,
    status: StatusCode,
    served: Option<RouteId>,
    routes: &L,
) -> String
where
    L: RouteLookup + ?Sized,
{
    if status == StatusCode::NOT_FOUND {
        return not_found_label(method);
    }
    endpoint_label(method, &resolve(method, path, served, routes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RouteCatalog;
    use crate::pattern::RoutePattern;

    fn catalog() -> RouteCatalog {
        let mut catalog = RouteCatalog::new();
        catalog
            .register(Method::GET, RoutePattern::parse("/items/:id").unwrap())
            .unwrap();
        catalog
    }

    #[test]
    fn test_labels() {
        assert_eq!(endpoint_label(&Method::GET, "/items/:id"), "GET_/items/:id");
        assert_eq!(not_found_label(&Method::POST), "404_POST");
        assert_eq!(status_label(StatusCode::OK), "200");
    }

    #[test]
    fn test_endpoint_for_matched_route() {
        let label = endpoint_for(&Method::GET, "/items/123", StatusCode::OK, None, &catalog());
        assert_eq!(label, "GET_/items/:id");
    }

    #[test]
    fn test_endpoint_for_not_found_ignores_path() {
        let catalog = catalog();
        for path in ["/a", "/a/b/c", "/../../etc", "/items/123"] {
            assert_eq!(
                endpoint_for(&Method::GET, path, StatusCode::NOT_FOUND, None, &catalog),
                "404_GET"
            );
        }
    }

    #[test]
    fn test_endpoint_for_unmatched_non_404_keeps_path() {
        let label = endpoint_for(
            &Method::POST,
            "/items/123",
            StatusCode::METHOD_NOT_ALLOWED,
            None,
            &catalog(),
        );
        assert_eq!(label, "POST_/items/123");
    }
}
