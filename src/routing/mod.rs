//! Routing module
//!
//! Maps an inbound (method, path) pair onto an endpoint:
//! - Path shapes behind the `PathMatcher` capability
//! - An ordered, first-match-wins route table

mod matcher;
mod table;

pub use matcher::{PathMatcher, PathParams};
pub use table::{match_route, user_routes, Endpoint, Route, USER_ID_PARAM};
