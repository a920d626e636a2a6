//! Host framework integration surface.
//!
//! This module is the boundary between a web host and the plugins. It
//! contains no framework-specific code:
//! - [`RequestAdapter`] is an owned snapshot of one routed request
//! - the extraction traits describe what the plugins read from a request
//! - [`Component`] is the lifecycle every plugin implements
//! - [`RequestCycle`] drives one request through the lifecycle in host order
//!
//! # Integration Model
//!
//! A host integration should:
//! 1. Build a `RequestAdapter` from its native request (or implement the
//!    extraction traits on it directly)
//! 2. Run the components' `initialize`, then `startup`
//! 3. Dispatch the controller action
//! 4. Run `before_render` with a [`ResponseSink`](crate::ResponseSink)
//!
//! # Example Flow
//!
//! ```
//! use json_api_plugins::web::{RequestAdapter, RequestCycle};
//! use json_api_plugins::{BufferedResponse, HttpMethod};
//!
//! let mut request = RequestAdapter::new("tasks", "view");
//! request.set_extension(Some("json".to_string()));
//! request.set_method(HttpMethod::Get);
//! request.add_named_param("id", 3);
//!
//! let sink = BufferedResponse::new();
//! let mut cycle = RequestCycle::default();
//! cycle
//!     .run(&mut request, &sink, |ctx| {
//!         let id = ctx.data.get("id").cloned();
//!         ctx.response.set("task", serde_json::json!({ "id": id }));
//!         ctx.response.set_method_success(true, None);
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! assert_eq!(sink.status().as_deref(), Some("HTTP/1.1 200 Ok"));
//! ```

mod adapter;
mod extract;
mod middleware;
mod request_data;

pub use adapter::RequestAdapter;
pub use extract::{DetectMethod, ExtractMetadata, ExtractPaging, ExtractParams};
pub use middleware::{ActionContext, Component, RequestCycle};
pub use request_data::{MergedParameters, RequestDataMerger};
