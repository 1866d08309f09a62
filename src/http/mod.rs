//! HTTP protocol layer module
//!
//! JSON response builders and the request-level error taxonomy,
//! decoupled from routing and storage.

pub mod error;
pub mod response;

pub use error::ApiError;
pub use response::{build_error_response, json_response};
