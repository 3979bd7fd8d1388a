//! HTTP binding layer for Corridor services.
//!
//! This crate connects the routing core in `corridor-router` to an HTTP
//! server. It handles:
//!
//! - **Schemas** ([`schema`]): the registration surface the code generator
//!   emits — operation names with route templates — compiled into a
//!   pattern tree at startup.
//!
//! - **Request parsing** ([`request`]): converts an `http::Uri` into the
//!   router's `ParsedUri`, decoding percent-escapes once per segment.
//!
//! - **Dispatch** ([`dispatch`]): hands the matched operation and its
//!   captured labels to the business logic via the
//!   [`OperationHandler`](dispatch::OperationHandler) trait.
//!
//! - **Responses** ([`response`], [`body`]): JSON error formatting and the
//!   [`RpcResponseBody`](body::RpcResponseBody) type supporting buffered
//!   and empty modes.
//!
//! - **Service** ([`service`]): the main
//!   [`RpcHttpService`](service::RpcHttpService) that implements hyper's
//!   `Service` trait, tying parsing, routing, dispatch, and common
//!   response headers together.
//!
//! # Architecture
//!
//! ```text
//! HTTP Request
//!   -> RpcHttpService (hyper Service)
//!     -> ParsedUri (per-segment decode)
//!     -> PatternTree::route (specificity-ranked match)
//!     -> 404 on the no-match sentinel
//!     -> Body collection
//!     -> dispatch_operation (OperationHandler trait)
//!     -> Common response headers (x-request-id, Server)
//!   <- HTTP Response
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use corridor_http::service::{RpcHttpConfig, RpcHttpService};
//! use corridor_http::dispatch::UnimplementedHandler;
//! use corridor_http::schema::ServiceSchema;
//!
//! let schema = ServiceSchema::new("WidgetRegistry")
//!     .operation("GetWidget", "widgets/{id}")
//!     .operation("ListWidgets", "widgets");
//!
//! let service = RpcHttpService::new(
//!     UnimplementedHandler,
//!     &schema,
//!     RpcHttpConfig::default(),
//! )?;
//! // Use `service` with a hyper server.
//! # Ok::<(), corridor_http::schema::SchemaError>(())
//! ```

pub mod body;
pub mod dispatch;
pub mod error;
pub mod request;
pub mod response;
pub mod schema;
pub mod service;

// Re-export key types for convenience.
pub use body::RpcResponseBody;
pub use dispatch::{OperationHandler, UnimplementedHandler};
pub use error::{RpcError, RpcErrorCode};
pub use request::parse_request_uri;
pub use schema::{OperationShape, SchemaError, ServiceSchema};
pub use service::{RpcHttpConfig, RpcHttpService};
