//! The main RPC HTTP service implementing hyper's `Service` trait.
//!
//! [`RpcHttpService`] ties together URI parsing, pattern-tree routing,
//! dispatch, and response formatting:
//!
//! 1. Request URI parsing into a [`ParsedUri`](corridor_router::ParsedUri)
//! 2. Routing against the compiled pattern tree
//! 3. Translation of the no-match sentinel into a `404` response
//! 4. Request body collection
//! 5. Operation dispatch to the [`OperationHandler`]
//! 6. Common response headers (`x-request-id`, `Server`)
//!
//! The pattern tree is compiled once from the service schema and shared
//! behind an `Arc`; every request routes against the same frozen tree.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::service::Service;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use corridor_router::PatternTree;

use crate::body::RpcResponseBody;
use crate::dispatch::{OperationHandler, dispatch_operation};
use crate::error::RpcError;
use crate::request::parse_request_uri;
use crate::response::error_to_response;
use crate::schema::{OperationShape, SchemaError, ServiceSchema};

/// Configuration for the RPC HTTP service.
#[derive(Debug, Clone)]
pub struct RpcHttpConfig {
    /// Whether empty path segments are permitted and may bind to labels.
    pub allow_empty_path_segments: bool,
    /// Value of the `Server` response header.
    pub server_name: String,
}

impl Default for RpcHttpConfig {
    fn default() -> Self {
        Self {
            allow_empty_path_segments: false,
            server_name: "Corridor".to_owned(),
        }
    }
}

impl RpcHttpConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("ALLOW_EMPTY_PATH_SEGMENTS") {
            config.allow_empty_path_segments = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Ok(v) = std::env::var("SERVER_NAME") {
            config.server_name = v;
        }

        config
    }
}

/// The RPC HTTP service: routes each request against the compiled pattern
/// tree and dispatches the winning operation to the handler.
///
/// # Type Parameters
///
/// - `H`: The business logic handler implementing [`OperationHandler`].
#[derive(Debug)]
pub struct RpcHttpService<H: OperationHandler> {
    handler: Arc<H>,
    tree: Arc<PatternTree<OperationShape>>,
    config: Arc<RpcHttpConfig>,
}

impl<H: OperationHandler> RpcHttpService<H> {
    /// Compile `schema` and create a service around `handler`.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when any route template fails to parse or
    /// conflicts with an earlier registration; the service must not start.
    pub fn new(
        handler: H,
        schema: &ServiceSchema,
        config: RpcHttpConfig,
    ) -> Result<Self, SchemaError> {
        let tree = schema.compile()?;
        Ok(Self {
            handler: Arc::new(handler),
            tree: Arc::new(tree),
            config: Arc::new(config),
        })
    }

    /// Create a service from an already-shared handler and compiled tree.
    #[must_use]
    pub fn from_shared(
        handler: Arc<H>,
        tree: Arc<PatternTree<OperationShape>>,
        config: RpcHttpConfig,
    ) -> Self {
        Self {
            handler,
            tree,
            config: Arc::new(config),
        }
    }
}

impl<H: OperationHandler> Clone for RpcHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            tree: Arc::clone(&self.tree),
            config: Arc::clone(&self.config),
        }
    }
}

impl<H, B> Service<http::Request<B>> for RpcHttpService<H>
where
    H: OperationHandler,
    B: http_body::Body<Data = Bytes> + Send + 'static,
    B::Error: std::fmt::Display,
{
    type Response = http::Response<RpcResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let tree = Arc::clone(&self.tree);
        let config = Arc::clone(&self.config);

        Box::pin(async move {
            let request_id = Uuid::new_v4().to_string();

            let response =
                process_request(req, handler.as_ref(), &tree, &config, &request_id).await;

            Ok(add_common_headers(
                response,
                &request_id,
                &config.server_name,
            ))
        })
    }
}

/// Process an incoming HTTP request through the routing pipeline.
async fn process_request<H, B>(
    req: http::Request<B>,
    handler: &H,
    tree: &PatternTree<OperationShape>,
    config: &RpcHttpConfig,
    request_id: &str,
) -> http::Response<RpcResponseBody>
where
    H: OperationHandler,
    B: http_body::Body<Data = Bytes> + Send + 'static,
    B::Error: std::fmt::Display,
{
    let (parts, body) = req.into_parts();
    debug!(method = %parts.method, uri = %parts.uri, request_id, "processing rpc request");

    // Route before touching the body; routing needs only the URI. The
    // match is reduced to owned values here so no request-scoped routing
    // state survives into the dispatch await.
    let parsed = parse_request_uri(&parts.uri, config.allow_empty_path_segments);
    let routed = tree
        .route(&parsed)
        .map(|matched| (matched.payload().clone(), matched.labels()));

    let Some((operation, labels)) = routed else {
        warn!(path = %parts.uri.path(), request_id, "no operation matches request uri");
        return error_to_response(&RpcError::not_found(), request_id);
    };

    info!(
        operation = %operation.name,
        path_labels = labels.len(),
        request_id,
        "routed rpc request"
    );

    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            error!(error = %err, request_id, "failed to collect request body");
            return error_to_response(
                &RpcError::internal_error("Failed to read request body"),
                request_id,
            );
        }
    };

    match dispatch_operation(handler, operation, labels, parts, body).await {
        Ok(response) => response,
        Err(err) => {
            debug!(error = %err, request_id, "operation returned error");
            error_to_response(&err, request_id)
        }
    }
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<RpcResponseBody>,
    request_id: &str,
    server_name: &str,
) -> http::Response<RpcResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::header::HeaderValue::from_str(request_id) {
        headers.insert("x-request-id", hv);
    }
    if let Ok(hv) = http::header::HeaderValue::from_str(server_name) {
        headers.insert(http::header::SERVER, hv);
    }

    response
}
