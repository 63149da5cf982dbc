use axum::{
    handler::Handler,
    http::Method,
    middleware::map_response,
    response::Response,
    routing::{on, MethodFilter},
    Router,
};
use routemeter_core::{RouteCatalog, RouteError, RouteId, RoutePattern};

/// Builds the application router while recording every registration in a
/// [`RouteCatalog`].
///
/// Patterns use `:name` and `*name` segments. Every response produced by a
/// registered handler carries that handler's [`RouteId`] in its extensions.
pub struct RouteTable<S = ()> {
    router: Router<S>,
    catalog: RouteCatalog,
}

impl<S> Default for RouteTable<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> RouteTable<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            catalog: RouteCatalog::new(),
        }
    }

    pub fn on<H, T>(mut self, method: Method, pattern: &str, handler: H) -> Result<Self, RouteError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let filter = MethodFilter::try_from(method.clone())
            .map_err(|_| RouteError::UnsupportedMethod(method.to_string()))?;
        let pattern = RoutePattern::parse(pattern)?;
        let path = pattern.to_axum_path();
        let id = self.catalog.register(method, pattern)?;

        let route = on(filter, handler).route_layer(map_response(move |res: Response| tag(id, res)));
        self.router = self.router.route(&path, route);
        Ok(self)
    }

    pub fn get<H, T>(self, pattern: &str, handler: H) -> Result<Self, RouteError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.on(Method::GET, pattern, handler)
    }

    pub fn post<H, T>(self, pattern: &str, handler: H) -> Result<Self, RouteError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.on(Method::POST, pattern, handler)
    }

    pub fn put<H, T>(self, pattern: &str, handler: H) -> Result<Self, RouteError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.on(Method::PUT, pattern, handler)
    }

    pub fn patch<H, T>(self, pattern: &str, handler: H) -> Result<Self, RouteError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.on(Method::PATCH, pattern, handler)
    }

    pub fn delete<H, T>(self, pattern: &str, handler: H) -> Result<Self, RouteError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.on(Method::DELETE, pattern, handler)
    }

    pub fn catalog(&self) -> &RouteCatalog {
        &self.catalog
    }

    /// Finish the table. Unmatched paths get axum's default 404, paths
    /// registered under other methods a 405.
    pub fn into_parts(self) -> (Router<S>, RouteCatalog) {
        (self.router, self.catalog)
    }
}

async fn tag(id: RouteId, mut res: Response) -> Response {
    res.extensions_mut().insert(id);
    res
}
