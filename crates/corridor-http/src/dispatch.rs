//! Operation dispatch: hands a routed request to the business logic.
//!
//! [`OperationHandler`] is the boundary between the HTTP layer and the
//! generated service implementation: the handler receives the matched
//! operation, the label values the route captured, and the raw request
//! parts and body, and returns a fully formed response. The trait uses
//! boxed futures so it can sit behind `Arc<dyn OperationHandler>` in the
//! service layer.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use corridor_router::LabelBindings;

use crate::body::RpcResponseBody;
use crate::error::RpcError;
use crate::schema::OperationShape;

/// Trait that the generated service implementation must provide.
pub trait OperationHandler: Send + Sync + 'static {
    /// Handle one routed operation and produce an HTTP response.
    ///
    /// `labels` holds every path- and query-bound capture of the matched
    /// route; greedy captures arrive joined by `/`.
    fn handle_operation(
        &self,
        operation: OperationShape,
        labels: LabelBindings,
        parts: http::request::Parts,
        body: Bytes,
    ) -> Pin<Box<dyn Future<Output = Result<http::Response<RpcResponseBody>, RpcError>> + Send>>;
}

/// Dispatch a routed request to the handler.
///
/// Called by [`RpcHttpService`](crate::service::RpcHttpService) once
/// routing has selected an operation.
pub async fn dispatch_operation<H: OperationHandler>(
    handler: &H,
    operation: OperationShape,
    labels: LabelBindings,
    parts: http::request::Parts,
    body: Bytes,
) -> Result<http::Response<RpcResponseBody>, RpcError> {
    tracing::debug!(operation = %operation.name, "dispatching operation");
    handler.handle_operation(operation, labels, parts, body).await
}

/// A handler that rejects every operation with `NotImplemented`.
///
/// Useful for exercising the routing layer in isolation.
#[derive(Debug, Clone, Default)]
pub struct UnimplementedHandler;

impl OperationHandler for UnimplementedHandler {
    fn handle_operation(
        &self,
        operation: OperationShape,
        _labels: LabelBindings,
        _parts: http::request::Parts,
        _body: Bytes,
    ) -> Pin<Box<dyn Future<Output = Result<http::Response<RpcResponseBody>, RpcError>> + Send>>
    {
        Box::pin(async move { Err(RpcError::not_implemented(&operation.name)) })
    }
}
