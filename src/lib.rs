//! Request-data merging, JSON response formatting and a remote JSON API data
//! source for MVC-style web hosts.
//!
//! The crate provides three plugins:
//! - **Request data**: [`RequestDataMerger`](web::RequestDataMerger) folds
//!   query-string, route and form parameters into one map
//!   (query > named > form)
//! - **Response formatting**: [`ResponseFormatter`](response::ResponseFormatter)
//!   derives the HTTP status from the action's method type and outcome and
//!   writes a uniform JSON envelope with `X-Paging-*` headers
//! - **Remote data**: [`RemoteApiDataSource`] maps CRUD onto
//!   `{base}/{resource}/{action}.json` calls over an [`HttpTransport`]
//!
//! # Core Types
//!
//! - [`web::RequestAdapter`]: owned snapshot of a routed request
//! - [`web::RequestCycle`]: runs the component lifecycle for one request
//! - [`response::ResponseEnvelope`]: the JSON object clients receive
//! - [`ResponseSink`]: where status line, headers and body are written
//!
//! # Examples
//!
//! ```
//! use json_api_plugins::web::{RequestAdapter, RequestCycle};
//! use json_api_plugins::{BufferedResponse, HttpMethod};
//!
//! let mut request = RequestAdapter::new("tasks", "add");
//! request.set_extension(Some("json".to_string()));
//! request.set_method(HttpMethod::Post);
//! request.add_query_param("name", "Buy milk");
//!
//! let sink = BufferedResponse::new();
//! let envelope = RequestCycle::default()
//!     .run(&mut request, &sink, |ctx| {
//!         ctx.response.set("name", ctx.data.get("name").cloned().unwrap_or_default());
//!         ctx.response.set_method_success(true, None);
//!         Ok(())
//!     })
//!     .expect("response written")
//!     .expect("json request");
//!
//! assert_eq!(envelope.code.as_deref(), Some("201 Created"));
//! assert_eq!(sink.status().as_deref(), Some("HTTP/1.1 201 Created"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
pub mod datasource;
mod error;
mod http;
pub mod inflector;
mod logging;
mod request;
pub mod response;
mod sink;
pub mod web;

pub use config::{DataSourceConfig, RequestDataConfig, BASE_URL_ENV};
pub use datasource::{ApiModel, Calculation, RemoteApiDataSource, RemoteModel};
pub use error::{Error, Result};
pub use http::{HttpMethod, HttpRequest, HttpTransport, ParseMethodError, RecordingTransport, TransportError};
#[cfg(feature = "reqwest-transport")]
pub use http::ReqwestTransport;
pub use logging::RequestLog;
pub use request::{PagingInfo, ParamMap, RequestMeta};
pub use sink::{BufferedResponse, ResponseSink, SinkError, SinkErrorKind};
