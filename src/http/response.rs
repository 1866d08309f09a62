//! HTTP response building module
//!
//! All responses produced by this service are JSON. The content type is
//! attached in one place so that every response carries it exactly once.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::error::ApiError;
use crate::logger;

pub const APPLICATION_JSON: &str = "application/json";

/// Serialize `body` and wrap it in a response with `status`.
///
/// Falls back to a 500 error response when serialization fails.
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(json) => build_json_response(status, Bytes::from(json)),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            build_error_response(ApiError::Internal)
        }
    }
}

/// Build the fixed `{"error": "..."}` response for an error
pub fn build_error_response(error: ApiError) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": error.to_string() });
    build_json_response(error.status(), Bytes::from(body.to_string()))
}

fn build_json_response(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde::ser::Error as _;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refusing to serialize"))
        }
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_json_response_sets_single_content_type() {
        let response = json_response(StatusCode::OK, &serde_json::json!({"id": "1"}));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get_all(CONTENT_TYPE).iter().count(), 1);
        assert_eq!(response.headers()[CONTENT_TYPE], APPLICATION_JSON);
        assert_eq!(body_string(response).await, r#"{"id":"1"}"#);
    }

    #[tokio::test]
    async fn test_error_bodies() {
        let response = build_error_response(ApiError::NotFound);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CONTENT_TYPE], APPLICATION_JSON);
        assert_eq!(body_string(response).await, r#"{"error":"not found"}"#);

        let response = build_error_response(ApiError::BadRequest);
        assert_eq!(body_string(response).await, r#"{"error":"bad request"}"#);
    }

    #[tokio::test]
    async fn test_serialization_failure_becomes_500() {
        let response = json_response(StatusCode::OK, &Unserializable);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[CONTENT_TYPE], APPLICATION_JSON);
        assert_eq!(
            body_string(response).await,
            r#"{"error":"internal server error"}"#
        );
    }
}
