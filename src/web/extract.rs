//! Extraction boundary traits for host integration.
//!
//! These traits are what the plugins read from a request. Hosts either build
//! a [`RequestAdapter`](super::RequestAdapter) or implement the traits on
//! their own request type.

use crate::http::HttpMethod;
use crate::request::{PagingInfo, ParamMap, RequestMeta};

/// Extracts request identity from a host request.
///
/// # Examples
///
/// ```
/// use json_api_plugins::web::ExtractMetadata;
/// use json_api_plugins::RequestMeta;
///
/// struct HostRequest {
///     route: (String, String),
/// }
///
/// impl ExtractMetadata for HostRequest {
///     fn extract_metadata(&self) -> RequestMeta {
///         RequestMeta {
///             controller: self.route.0.clone(),
///             action: self.route.1.clone(),
///             ..RequestMeta::default()
///         }
///     }
/// }
/// ```
pub trait ExtractMetadata {
    /// Returns controller, action, plugin, url and extension.
    fn extract_metadata(&self) -> RequestMeta;
}

/// Exposes the three raw parameter layers of a request.
pub trait ExtractParams {
    /// Query-string parameters, possibly still carrying the `url`/`ext`
    /// routing artifacts.
    fn query_params(&self) -> &ParamMap;

    /// Route (named) parameters.
    fn named_params(&self) -> &ParamMap;

    /// Form body parameters.
    fn form_params(&self) -> &ParamMap;
}

/// Exposes paginator counters the host produced for this request.
pub trait ExtractPaging {
    /// Counters for `model` (a class name such as `Task`), if the paginator
    /// ran for it.
    fn paging(&self, model: &str) -> Option<&PagingInfo>;
}

/// Verb introspection over the current request.
///
/// Only [`method`](DetectMethod::method) is required.
pub trait DetectMethod {
    /// The HTTP method of the current request.
    fn method(&self) -> HttpMethod;

    /// `true` for GET requests.
    fn is_get(&self) -> bool {
        self.method() == HttpMethod::Get
    }

    /// `true` for POST requests.
    fn is_post(&self) -> bool {
        self.method() == HttpMethod::Post
    }

    /// `true` for PUT requests.
    fn is_put(&self) -> bool {
        self.method() == HttpMethod::Put
    }

    /// `true` for DELETE requests.
    fn is_delete(&self) -> bool {
        self.method() == HttpMethod::Delete
    }

    /// `true` for any verb that changes server state.
    fn is_mutating(&self) -> bool {
        self.method().is_mutating()
    }

    /// `true` for safe, read-only verbs.
    fn is_read(&self) -> bool {
        self.method().is_read()
    }
}

impl DetectMethod for HttpMethod {
    fn method(&self) -> HttpMethod {
        *self
    }
}
