use std::collections::HashMap;

use http::Method;

use crate::error::RouteError;
use crate::pattern::RoutePattern;

/// Stable identity of a registered handler.
///
/// Two lookups resolved to the same handler when their `RouteId`s are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(pub(crate) usize);

impl RouteId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Read-only introspection a dispatcher offers to the resolver.
pub trait RouteLookup {
    /// Patterns registered for `method`, in registration order.
    fn registered_patterns(&self, method: &Method) -> &[RoutePattern];

    /// The handler the dispatcher would run for `path`, if any.
    ///
    /// Must only perform matching, never run the handler.
    fn lookup(&self, method: &Method, path: &str) -> Option<RouteId>;

    /// The pattern behind a handler identity, for dispatchers that can
    /// answer directly. The resolver probes patterns when this is `None`.
    fn pattern_of(&self, _id: RouteId) -> Option<&RoutePattern> {
        None
    }
}

#[derive(Debug, Default)]
struct MethodRoutes {
    patterns: Vec<RoutePattern>,
    ids: Vec<RouteId>,
}

/// Every route registered with the dispatcher, partitioned by method.
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Default)]
pub struct RouteCatalog {
    routes: HashMap<Method, MethodRoutes>,
    // RouteId -> (method, position within that method's routes)
    index: Vec<(Method, usize)>,
}

impl RouteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, method: Method, pattern: RoutePattern) -> Result<RouteId, RouteError> {
        // axum keeps one path tree for all methods
        for existing in self.routes.values().flat_map(|r| r.patterns.iter()) {
            if existing.conflicts_with(&pattern) {
                return Err(RouteError::Conflict {
                    pattern: pattern.as_str().to_string(),
                    existing: existing.as_str().to_string(),
                });
            }
        }

        if self.contains(&method, pattern.as_str()) {
            return Err(RouteError::Duplicate {
                method: method.to_string(),
                pattern: pattern.as_str().to_string(),
            });
        }

        let id = RouteId(self.index.len());
        let entry = self.routes.entry(method.clone()).or_default();
        self.index.push((method, entry.patterns.len()));
        entry.patterns.push(pattern);
        entry.ids.push(id);
        Ok(id)
    }

    pub fn contains(&self, method: &Method, pattern: &str) -> bool {
        self.routes
            .get(method)
            .is_some_and(|r| r.patterns.iter().any(|p| p.as_str() == pattern))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl RouteLookup for RouteCatalog {
    fn registered_patterns(&self, method: &Method) -> &[RoutePattern] {
        self.routes
            .get(method)
            .map(|r| r.patterns.as_slice())
            .unwrap_or(&[])
    }

    fn lookup(&self, method: &Method, path: &str) -> Option<RouteId> {
        let routes = self.routes.get(method)?;
        routes
            .patterns
            .iter()
            .zip(routes.ids.iter())
            .filter(|(pattern, _)| pattern.matches(path))
            // min_by_key keeps the first of equal keys, so registration order breaks ties
            .min_by_key(|(pattern, _)| pattern.specificity())
            .map(|(_, id)| *id)
    }

    fn pattern_of(&self, id: RouteId) -> Option<&RoutePattern> {
        let (method, pos) = self.index.get(id.0)?;
        self.routes.get(method)?.patterns.get(*pos)
    }
}
