//! Integration tests for the Corridor routing runtime.
//!
//! These tests run fully in-process: the HTTP service is driven through
//! its hyper `Service` interface with `Full<Bytes>` request bodies, so no
//! sockets or live server are involved.

use std::future::Future;
use std::pin::Pin;
use std::sync::Once;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::service::Service;

use corridor_http::dispatch::OperationHandler;
use corridor_http::response::json_response;
use corridor_http::schema::{OperationShape, ServiceSchema};
use corridor_http::service::{RpcHttpConfig, RpcHttpService};
use corridor_http::{RpcError, RpcResponseBody};
use corridor_router::LabelBindings;

static INIT: Once = Once::new();

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// The shared service fixture: a widget registry with deliberately
/// overlapping routes — literal/label ambiguity, a greedy download route,
/// and operations distinguished only by query pattern.
#[must_use]
pub fn widget_schema() -> ServiceSchema {
    ServiceSchema::new("WidgetRegistry")
        .operation("ListWidgets", "widgets")
        .operation("GetWidget", "widgets/{id}")
        .operation("GetCurrentWidget", "widgets/current")
        .operation("GetWidgetPart", "widgets/{id}/parts/{part}")
        .operation("DownloadBundle", "bundles/{path+}")
        .operation("DescribeWidgets", "query?Action=Describe")
        .operation("ListTagged", "query?Action=List&Tag={tag}")
        .operation("SearchWidgets", "search/{scope}?Filter={filter}")
        .operation("SearchWidgetsExact", "search/{scope}?Exact=true")
}

/// Echoes the routed operation and captured labels as JSON.
#[derive(Debug, Clone, Default)]
pub struct EchoHandler;

impl OperationHandler for EchoHandler {
    fn handle_operation(
        &self,
        operation: OperationShape,
        labels: LabelBindings,
        _parts: http::request::Parts,
        _body: Bytes,
    ) -> Pin<Box<dyn Future<Output = Result<http::Response<RpcResponseBody>, RpcError>> + Send>>
    {
        Box::pin(async move {
            let mut bound = serde_json::Map::new();
            for (name, values) in labels.iter() {
                bound.insert(name.to_owned(), serde_json::json!(values));
            }
            Ok(json_response(
                http::StatusCode::OK,
                &serde_json::json!({
                    "operation": operation.name,
                    "labels": bound,
                }),
            ))
        })
    }
}

/// Build the echo service over the widget schema.
#[must_use]
pub fn echo_service() -> RpcHttpService<EchoHandler> {
    init_tracing();
    RpcHttpService::new(EchoHandler, &widget_schema(), RpcHttpConfig::default())
        .expect("widget schema should compile")
}

/// Drive one request through the service.
pub async fn call(
    service: &RpcHttpService<EchoHandler>,
    uri: &str,
) -> http::Response<RpcResponseBody> {
    let request = http::Request::builder()
        .method(http::Method::POST)
        .uri(uri)
        .body(Full::new(Bytes::new()))
        .expect("valid request");
    service.call(request).await.expect("service is infallible")
}

/// Collect a response body as JSON.
pub async fn body_json(response: http::Response<RpcResponseBody>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

mod test_concurrency;
mod test_routing;
mod test_specificity;
