//! Route table module
//!
//! An ordered list of (method, path matcher, endpoint) entries.
//! Matching walks the list and the first entry that accepts both the method
//! and the path wins.

use hyper::Method;

use super::matcher::{CollectionPath, NumericMemberPath, PathMatcher, PathParams};

/// Path variable bound by the member route
pub const USER_ID_PARAM: &str = "id";

/// Endpoint a route dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListUsers,
    GetUser,
    CreateUser,
}

/// A single routing rule
#[derive(Debug)]
pub struct Route {
    pub method: Method,
    pub matcher: Box<dyn PathMatcher>,
    pub endpoint: Endpoint,
}

impl Route {
    pub fn new(method: Method, matcher: impl PathMatcher + 'static, endpoint: Endpoint) -> Self {
        Self {
            method,
            matcher: Box::new(matcher),
            endpoint,
        }
    }
}

/// The user collection routes in priority order
pub fn user_routes() -> Vec<Route> {
    vec![
        Route::new(Method::GET, CollectionPath::new("/users"), Endpoint::ListUsers),
        Route::new(
            Method::GET,
            NumericMemberPath::new("/users", USER_ID_PARAM),
            Endpoint::GetUser,
        ),
        Route::new(Method::POST, CollectionPath::new("/users"), Endpoint::CreateUser),
    ]
}

/// Find the first route accepting `method` and `path`
pub fn match_route<'a>(
    method: &Method,
    path: &str,
    routes: &'a [Route],
) -> Option<(&'a Route, PathParams)> {
    routes
        .iter()
        .filter(|route| route.method == *method)
        .find_map(|route| route.matcher.match_path(path).map(|params| (route, params)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint_for(method: &Method, path: &str) -> Option<Endpoint> {
        let routes = user_routes();
        match_route(method, path, &routes).map(|(route, _)| route.endpoint)
    }

    #[test]
    fn test_list_route() {
        assert_eq!(endpoint_for(&Method::GET, "/users"), Some(Endpoint::ListUsers));
        assert_eq!(endpoint_for(&Method::GET, "/users/"), Some(Endpoint::ListUsers));
    }

    #[test]
    fn test_get_route_captures_id() {
        let routes = user_routes();
        let (route, params) = match_route(&Method::GET, "/users/42", &routes).unwrap();
        assert_eq!(route.endpoint, Endpoint::GetUser);
        assert_eq!(params.get(USER_ID_PARAM), Some("42"));
    }

    #[test]
    fn test_create_route() {
        assert_eq!(endpoint_for(&Method::POST, "/users"), Some(Endpoint::CreateUser));
        assert_eq!(endpoint_for(&Method::POST, "/users/"), Some(Endpoint::CreateUser));
    }

    #[test]
    fn test_unmatched_combinations() {
        assert_eq!(endpoint_for(&Method::POST, "/users/1"), None);
        assert_eq!(endpoint_for(&Method::DELETE, "/users"), None);
        assert_eq!(endpoint_for(&Method::PUT, "/users/1"), None);
        assert_eq!(endpoint_for(&Method::GET, "/users/abc"), None);
        assert_eq!(endpoint_for(&Method::GET, "/users/1/extra"), None);
        assert_eq!(endpoint_for(&Method::GET, "/"), None);
        assert_eq!(endpoint_for(&Method::GET, "/users//"), None);
        assert_eq!(endpoint_for(&Method::POST, "/users//"), None);
    }

    #[test]
    fn test_first_match_wins() {
        #[derive(Debug)]
        struct Everything;

        impl PathMatcher for Everything {
            fn match_path(&self, _path: &str) -> Option<PathParams> {
                Some(PathParams::default())
            }
        }

        let mut routes = vec![Route::new(Method::GET, Everything, Endpoint::ListUsers)];
        routes.extend(user_routes());

        // The catch-all shadows the member route behind it
        let (route, params) = match_route(&Method::GET, "/users/1", &routes).unwrap();
        assert_eq!(route.endpoint, Endpoint::ListUsers);
        assert_eq!(params.get(USER_ID_PARAM), None);
    }
}
