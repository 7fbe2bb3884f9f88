//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. Registration happens
//! through [`App`](crate::App); the router itself knows nothing about
//! classification or composition — a path either has a handler or it falls
//! through to the asset/shell fallbacks.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};

pub(crate) struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub(crate) fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for
    /// chaining. Path parameters use `{name}` syntax.
    ///
    /// # Panics
    ///
    /// Panics on an invalid or conflicting route pattern — registration is
    /// startup-time configuration, not a runtime condition.
    pub(crate) fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Response;
    use crate::Request;

    async fn noop(_req: Request) -> Response {
        Response::html("")
    }

    #[test]
    fn lookup_extracts_params() {
        let router = Router::new().on(Method::GET, "/orders/{id}", noop);
        let (_, params) = router.lookup(&Method::GET, "/orders/42").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn lookup_misses_on_wrong_method_or_path() {
        let router = Router::new().on(Method::GET, "/orders", noop);
        assert!(router.lookup(&Method::POST, "/orders").is_none());
        assert!(router.lookup(&Method::GET, "/invoices").is_none());
    }
}
