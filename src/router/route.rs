use crate::http::request::Method;

/// Handlers a route can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Root,
    Echo,
    UserAgent,
    Files,
}

/// How a route matches a request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMatcher {
    /// The whole target must equal this string
    Exact(&'static str),
    /// The target must start with this string; the remainder is captured
    Prefix(&'static str),
}

impl PathMatcher {
    /// Returns the captured parameter on a match (empty for exact matches).
    pub fn matches<'a>(&self, target: &'a str) -> Option<&'a str> {
        match self {
            PathMatcher::Exact(path) => (target == *path).then_some(""),
            PathMatcher::Prefix(prefix) => target.strip_prefix(prefix),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodFilter {
    Any,
    Only(Vec<Method>),
}

impl MethodFilter {
    pub fn allows(&self, method: &Method) -> bool {
        match self {
            MethodFilter::Any => true,
            MethodFilter::Only(methods) => methods.contains(method),
        }
    }
}

/// A path matcher and method set bound to a handler.
#[derive(Debug, Clone)]
pub struct Route {
    pub methods: MethodFilter,
    pub matcher: PathMatcher,
    pub handler: Handler,
}

impl Route {
    pub fn new(methods: MethodFilter, matcher: PathMatcher, handler: Handler) -> Self {
        Self {
            methods,
            matcher,
            handler,
        }
    }

    pub fn exact(path: &'static str, handler: Handler) -> Self {
        Self::new(MethodFilter::Any, PathMatcher::Exact(path), handler)
    }

    pub fn prefix(prefix: &'static str, handler: Handler) -> Self {
        Self::new(MethodFilter::Any, PathMatcher::Prefix(prefix), handler)
    }

    /// Restricts the route to the given methods.
    pub fn methods(mut self, methods: impl Into<Vec<Method>>) -> Self {
        self.methods = MethodFilter::Only(methods.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_captures_remainder() {
        let matcher = PathMatcher::Prefix("/echo/");
        assert_eq!(matcher.matches("/echo/abc"), Some("abc"));
        assert_eq!(matcher.matches("/echo/"), Some(""));
        assert_eq!(matcher.matches("/echo"), None);
    }

    #[test]
    fn exact_requires_whole_target() {
        let matcher = PathMatcher::Exact("/user-agent");
        assert_eq!(matcher.matches("/user-agent"), Some(""));
        assert_eq!(matcher.matches("/user-agent/x"), None);
    }
}
