//! Route table and lookup.
//!
//! # Responsibilities
//! - Store compiled routes keyed by their template
//! - Look up the first route whose pattern matches a path
//! - Return the matched route with its captures, or an explicit no-match
//!
//! # Design Decisions
//! - Routes live in a `Vec`: lookup order is registration order
//! - Re-registering a template replaces the handler in place (last write wins)
//! - O(n) scan; no specificity scoring, so register specific routes first

use std::fmt;
use std::sync::Arc;

use crate::http::{RequestContext, Response};
use crate::routing::matcher::{Captures, PathPattern};
use crate::routing::methods::MethodSet;

/// Error type handlers may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// What a handler returns.
pub type HandlerResult = Result<Response, BoxError>;

/// A request handler: receives the request context and the captured path
/// values in template order.
pub trait Handler: Send + Sync {
    fn call(&self, ctx: &RequestContext, captures: &[String]) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&RequestContext, &[String]) -> HandlerResult + Send + Sync,
{
    fn call(&self, ctx: &RequestContext, captures: &[String]) -> HandlerResult {
        self(ctx, captures)
    }
}

/// A registered route. Never mutated after registration.
pub struct Route {
    methods: MethodSet,
    pattern: PathPattern,
    handler: Arc<dyn Handler>,
}

impl Route {
    pub fn methods(&self) -> &MethodSet {
        &self.methods
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("methods", &self.methods)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Result of a successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub captures: Captures,
}

/// Ordered route table.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `template`, accepting `methods`.
    pub fn register<M, F>(&mut self, methods: M, template: &str, handler: F) -> &mut Self
    where
        M: Into<MethodSet>,
        F: Fn(&RequestContext, &[String]) -> HandlerResult + Send + Sync + 'static,
    {
        self.register_handler(methods, template, Arc::new(handler))
    }

    /// Register an already shared handler.
    pub fn register_handler<M>(
        &mut self,
        methods: M,
        template: &str,
        handler: Arc<dyn Handler>,
    ) -> &mut Self
    where
        M: Into<MethodSet>,
    {
        let route = Route {
            methods: methods.into(),
            pattern: PathPattern::new(template),
            handler,
        };

        match self.routes.iter_mut().find(|r| r.template() == template) {
            Some(existing) => {
                tracing::debug!(template = %template, "Replacing existing route");
                *existing = route;
            }
            None => {
                tracing::debug!(
                    template = %template,
                    simple = route.pattern.is_simple(),
                    "Route registered"
                );
                self.routes.push(route);
            }
        }
        self
    }

    /// Find the first route matching `path`.
    pub fn find(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            route
                .pattern
                .match_path(path)
                .map(|captures| RouteMatch { route, captures })
        })
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    fn body_of(route_match: &RouteMatch<'_>) -> String {
        let ctx = RequestContext::new(Method::GET, "/");
        route_match
            .route
            .handler()
            .call(&ctx, route_match.captures.as_slice())
            .unwrap()
            .body_text()
            .into_owned()
    }

    fn sample_router() -> Router {
        let mut router = Router::new();
        router
            .register(Method::GET, "/", |_: &RequestContext, _: &[String]| {
                Ok(Response::ok("A"))
            })
            .register(Method::GET, "/foo/:bar", |_: &RequestContext, caps: &[String]| {
                Ok(Response::ok(format!("B {}", caps[0])))
            });
        router
    }

    #[test]
    fn find_root() {
        let router = sample_router();
        let found = router.find("/").unwrap();
        assert_eq!(found.route.template(), "/");
        assert_eq!(body_of(&found), "A");
    }

    #[test]
    fn find_variable_route() {
        let router = sample_router();
        let found = router.find("/foo/anything").unwrap();
        assert_eq!(found.route.template(), "/foo/:bar");
        assert_eq!(found.captures.as_slice(), ["anything"]);
        assert_eq!(body_of(&found), "B anything");
    }

    #[test]
    fn empty_variable_is_no_match() {
        let router = sample_router();
        assert!(router.find("/foo/").is_none());
        assert!(router.find("/nope").is_none());
    }

    #[test]
    fn first_registered_wins() {
        let mut router = Router::new();
        router
            .register(Method::GET, "/users/:id", |_: &RequestContext, _: &[String]| {
                Ok(Response::ok("by-id"))
            })
            .register(Method::GET, "/users/me", |_: &RequestContext, _: &[String]| {
                Ok(Response::ok("me"))
            });

        let found = router.find("/users/me").unwrap();
        assert_eq!(found.route.template(), "/users/:id");
    }

    #[test]
    fn reregistration_replaces_in_place() {
        let mut router = sample_router();
        router.register([Method::GET, Method::POST], "/", |_: &RequestContext, _: &[String]| {
            Ok(Response::ok("A2"))
        });

        assert_eq!(router.len(), 2);
        let templates: Vec<_> = router.routes().map(Route::template).collect();
        assert_eq!(templates, vec!["/", "/foo/:bar"]);

        let found = router.find("/").unwrap();
        assert_eq!(body_of(&found), "A2");
        assert!(found.route.methods().contains(&Method::POST));
    }
}
