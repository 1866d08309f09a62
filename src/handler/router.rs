//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: route matching, dispatch to the
//! user handlers and access logging.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::users;
use crate::config::AppState;
use crate::http::{build_error_response, ApiError};
use crate::logger::{self, AccessLogEntry};
use crate::routing::{match_route, user_routes, Endpoint, Route};
use crate::store::Store;

/// Routes requests onto handlers backed by an injected store
pub struct Dispatcher {
    store: Arc<Store>,
    routes: Vec<Route>,
    max_body_size: usize,
}

impl Dispatcher {
    /// Dispatcher over the standard user routes
    pub fn new(store: Arc<Store>, max_body_size: usize) -> Self {
        Self::with_routes(store, user_routes(), max_body_size)
    }

    pub fn with_routes(store: Arc<Store>, routes: Vec<Route>, max_body_size: usize) -> Self {
        Self {
            store,
            routes,
            max_body_size,
        }
    }

    /// Match the request against the route table and run the endpoint
    pub async fn dispatch<B>(&self, req: Request<B>) -> Response<Full<Bytes>>
    where
        B: Body,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let Some((route, params)) = match_route(req.method(), req.uri().path(), &self.routes)
        else {
            logger::log_debug(&format!(
                "No route for {} {}",
                req.method(),
                req.uri().path()
            ));
            return build_error_response(ApiError::NotFound);
        };

        match route.endpoint {
            Endpoint::ListUsers => users::list(&self.store).await,
            Endpoint::GetUser => users::get(&self.store, &params).await,
            Endpoint::CreateUser => {
                users::create(&self.store, req.into_body(), self.max_body_size).await
            }
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let entry = state
        .access_log
        .then(|| access_log_entry(&req, remote_addr));

    let response = state.dispatcher.dispatch(req).await;

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_default();
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.access_log_format);
    }

    Ok(response)
}

/// Capture the request side of an access log line
fn access_log_entry<B>(req: &Request<B>, remote_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = http_version_label(req.version()).to_string();
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry
}

fn http_version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
