//! Request routing
//!
//! Routes are tried in table order and the first match wins. `/` is a literal
//! prefix of every target, so it is only ever matched exactly.
//!
//! | Target            | Methods   | Handler      |
//! |-------------------|-----------|--------------|
//! | `/`               | any       | root         |
//! | `/echo/<rest>`    | any       | echo         |
//! | `/user-agent`     | any       | user agent   |
//! | `/files/<name>`   | GET, POST | files        |
//! | anything else     |           | 404          |

pub mod handlers;
pub mod route;

pub use route::{Handler, MethodFilter, PathMatcher, Route};

use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::storage::FileStorage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No route matches the target
    NotFound,
    /// A route matches the target but not the method
    MethodNotSupported(Method),
}

impl std::fmt::Display for RouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteError::NotFound => write!(f, "no route for target"),
            RouteError::MethodNotSupported(m) => write!(f, "method {} not supported", m),
        }
    }
}

impl std::error::Error for RouteError {}

/// Outcome of a successful route lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matched<'a> {
    pub handler: Handler,
    /// Remainder of the target captured by a prefix route
    pub param: &'a str,
}

#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(vec![
            Route::exact("/", Handler::Root),
            Route::prefix("/echo/", Handler::Echo),
            Route::exact("/user-agent", Handler::UserAgent),
            Route::prefix("/files/", Handler::Files).methods([Method::GET, Method::POST]),
        ])
    }
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn resolve<'a>(&self, method: &Method, target: &'a str) -> Result<Matched<'a>, RouteError> {
        let (route, param) = self
            .routes
            .iter()
            .find_map(|route| route.matcher.matches(target).map(|param| (route, param)))
            .ok_or(RouteError::NotFound)?;

        if !route.methods.allows(method) {
            return Err(RouteError::MethodNotSupported(method.clone()));
        }

        Ok(Matched {
            handler: route.handler,
            param,
        })
    }
}

/// Routes requests to handlers, giving them access to file storage.
pub struct Dispatcher<S> {
    router: Router,
    storage: S,
}

impl<S: FileStorage> Dispatcher<S> {
    pub fn new(storage: S) -> Self {
        Self::with_router(Router::default(), storage)
    }

    pub fn with_router(router: Router, storage: S) -> Self {
        Self { router, storage }
    }

    pub async fn dispatch(&self, req: &Request) -> Response {
        let matched = match self.router.resolve(&req.method, &req.target) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::debug!(method = %req.method, target = %req.target, error = %e, "Route lookup failed");
                // Unsupported methods are answered like unknown targets
                return Response::not_found();
            }
        };

        match matched.handler {
            Handler::Root => handlers::root(),
            Handler::Echo => handlers::echo(req, matched.param),
            Handler::UserAgent => handlers::user_agent(req),
            Handler::Files => handlers::files(&self.storage, req, matched.param).await,
        }
    }
}
