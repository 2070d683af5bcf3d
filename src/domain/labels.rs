//! Request label pair used by every HTTP instrument.
//!
//! The route is the raw request path exactly as received. No template
//! normalization is applied, so `/users/1` and `/users/2` are distinct
//! series.

use std::fmt;

/// `(http_request_method, http_route)` for one inbound request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteLabels {
    /// Upper-case HTTP method (`GET`, `POST`, ...).
    pub method: String,
    /// Raw request path, without the query string.
    pub route: String,
}

impl RouteLabels {
    /// Build a label pair from a method and a raw path.
    pub fn new(method: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            route: route.into(),
        }
    }

    /// Label values in declaration order: method, then route.
    pub fn values(&self) -> [&str; 2] {
        [self.method.as_str(), self.route.as_str()]
    }
}

impl fmt::Display for RouteLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_keep_declaration_order() {
        let labels = RouteLabels::new("POST", "/complete-sale");
        assert_eq!(labels.values(), ["POST", "/complete-sale"]);
    }

    #[test]
    fn test_concrete_paths_are_distinct() {
        let a = RouteLabels::new("GET", "/users/123");
        let b = RouteLabels::new("GET", "/users/124");
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        let labels = RouteLabels::new("GET", "/");
        assert_eq!(labels.to_string(), "GET /");
    }
}
