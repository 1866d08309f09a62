//! User collection handlers
//!
//! Each handler owns its failure: it either produces the success response or
//! converts its local error into the matching `ApiError` response.

use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Response, StatusCode};
use serde_json::Value;

use crate::http::{build_error_response, json_response, ApiError};
use crate::logger;
use crate::routing::{PathParams, USER_ID_PARAM};
use crate::store::{Store, User};

/// GET /users
pub async fn list(store: &Store) -> Response<Full<Bytes>> {
    let users = store.snapshot().await;
    json_response(StatusCode::OK, &users)
}

/// GET /users/<id>
pub async fn get(store: &Store, params: &PathParams) -> Response<Full<Bytes>> {
    let Some(id) = params.get(USER_ID_PARAM) else {
        logger::log_warning("User route matched without an id capture");
        return build_error_response(ApiError::NotFound);
    };

    match store.get(id).await {
        Some(user) => json_response(StatusCode::OK, &user),
        None => {
            logger::log_debug(&format!("No user stored at key '{id}'"));
            build_error_response(ApiError::NotFound)
        }
    }
}

/// POST /users
///
/// Upserts the decoded record at its own `id` and echoes it back.
/// Only the first JSON value in the body is decoded.
pub async fn create<B>(store: &Store, body: B, max_body_size: usize) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let bytes = match Limited::new(body, max_body_size).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            return build_error_response(ApiError::BadRequest);
        }
    };

    let user = match decode_user(&bytes) {
        Ok(user) => user,
        Err(reason) => {
            logger::log_debug(&format!("Rejected user body: {reason}"));
            return build_error_response(ApiError::BadRequest);
        }
    };

    store.put(user.clone()).await;
    json_response(StatusCode::OK, &user)
}

/// Decode the first JSON value in `bytes` as a user object.
///
/// Anything after the first value is ignored. Non-object values are
/// rejected before field decoding, where missing fields default to "".
fn decode_user(bytes: &[u8]) -> Result<User, String> {
    let value = match serde_json::Deserializer::from_slice(bytes)
        .into_iter::<Value>()
        .next()
    {
        Some(Ok(value)) => value,
        Some(Err(e)) => return Err(e.to_string()),
        None => return Err("empty body".to_string()),
    };

    if !value.is_object() {
        return Err(format!("expected a JSON object, got {value}"));
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}
