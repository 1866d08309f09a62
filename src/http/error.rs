//! Request-level error taxonomy
//!
//! Every handler failure maps onto exactly one of these variants, and each
//! variant maps onto exactly one status code and fixed JSON body.

use hyper::StatusCode;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// Request body could not be read or decoded
    #[error("bad request")]
    BadRequest,
    /// No record at the requested key, or no route for the request
    #[error("not found")]
    NotFound,
    /// Response serialization failed
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub const fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
