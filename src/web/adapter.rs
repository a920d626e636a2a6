//! Request adapter for mapping host requests to plugin types.

use indexmap::IndexMap;
use serde_json::Value;

use crate::http::HttpMethod;
use crate::request::{PagingInfo, ParamMap, RequestMeta};

use super::{DetectMethod, ExtractMetadata, ExtractPaging, ExtractParams};

/// Owned, framework-agnostic snapshot of one request.
///
/// `RequestAdapter` carries everything the plugins read (identity, verb,
/// parameter layers, paging counters) plus a slot map that components
/// write request-scoped results into. Host integrations fill it in from
/// their native request type before dispatch.
///
/// # Examples
///
/// ```
/// use json_api_plugins::web::{RequestAdapter, ExtractMetadata, ExtractParams};
/// use json_api_plugins::HttpMethod;
///
/// let mut request = RequestAdapter::new("tasks", "index");
/// request.set_extension(Some("json".to_string()));
/// request.set_method(HttpMethod::Get);
/// request.add_query_param("page", "2");
///
/// let meta = request.extract_metadata();
/// assert!(meta.wants_json());
/// assert!(request.query_params().contains_key("page"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    meta: RequestMeta,
    method: HttpMethod,
    query_params: ParamMap,
    named_params: ParamMap,
    form_params: ParamMap,
    paging: IndexMap<String, PagingInfo>,
    slots: ParamMap,
}

impl RequestAdapter {
    /// Creates an adapter for a routed controller action.
    ///
    /// The method defaults to GET; every other field starts empty.
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            meta: RequestMeta {
                controller: controller.into(),
                action: action.into(),
                ..RequestMeta::default()
            },
            method: HttpMethod::Get,
            query_params: ParamMap::new(),
            named_params: ParamMap::new(),
            form_params: ParamMap::new(),
            paging: IndexMap::new(),
            slots: ParamMap::new(),
        }
    }

    /// Sets the plugin the controller belongs to.
    pub fn set_plugin(&mut self, plugin: Option<String>) {
        self.meta.plugin = plugin;
    }

    /// Sets the request URL relative to the application root.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.meta.url = url.into();
    }

    /// Sets the requested representation (`json`, `xml`, ...).
    pub fn set_extension(&mut self, extension: Option<String>) {
        self.meta.extension = extension;
    }

    /// Sets the HTTP method of the request.
    pub fn set_method(&mut self, method: HttpMethod) {
        self.method = method;
    }

    /// Adds a query-string parameter.
    pub fn add_query_param(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.query_params.insert(key.into(), value.into());
    }

    /// Adds a route (named) parameter.
    pub fn add_named_param(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.named_params.insert(key.into(), value.into());
    }

    /// Adds a form body parameter.
    pub fn add_form_param(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.form_params.insert(key.into(), value.into());
    }

    /// Replaces the named-parameter layer.
    pub fn set_named_params(&mut self, params: ParamMap) {
        self.named_params = params;
    }

    /// Records paginator counters for a model.
    pub fn set_paging(&mut self, model: impl Into<String>, paging: PagingInfo) {
        self.paging.insert(model.into(), paging);
    }

    /// Stores a request-scoped value under `key`.
    pub fn set_slot(&mut self, key: impl Into<String>, value: Value) {
        self.slots.insert(key.into(), value);
    }

    /// Returns a request-scoped value stored by a component.
    pub fn slot(&self, key: &str) -> Option<&Value> {
        self.slots.get(key)
    }

    /// Returns the request identity.
    pub fn meta(&self) -> &RequestMeta {
        &self.meta
    }
}

impl ExtractMetadata for RequestAdapter {
    fn extract_metadata(&self) -> RequestMeta {
        self.meta.clone()
    }
}

impl ExtractParams for RequestAdapter {
    fn query_params(&self) -> &ParamMap {
        &self.query_params
    }

    fn named_params(&self) -> &ParamMap {
        &self.named_params
    }

    fn form_params(&self) -> &ParamMap {
        &self.form_params
    }
}

impl ExtractPaging for RequestAdapter {
    fn paging(&self, model: &str) -> Option<&PagingInfo> {
        self.paging.get(model)
    }
}

impl DetectMethod for RequestAdapter {
    fn method(&self) -> HttpMethod {
        self.method
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_adapter_new() {
        let adapter = RequestAdapter::new("tasks", "view");
        assert_eq!(adapter.meta().controller, "tasks");
        assert_eq!(adapter.meta().action, "view");
        assert!(adapter.meta().plugin.is_none());
        assert!(adapter.is_get());
    }

    #[test]
    fn request_adapter_collects_layers_separately() {
        let mut adapter = RequestAdapter::new("tasks", "index");
        adapter.add_query_param("q", "milk");
        adapter.add_named_param("page", 2);
        adapter.add_form_param("Task", json!({"name": "Buy milk"}));

        assert_eq!(adapter.query_params().len(), 1);
        assert_eq!(adapter.named_params()["page"], json!(2));
        assert_eq!(adapter.form_params()["Task"], json!({"name": "Buy milk"}));
    }

    #[test]
    fn extract_metadata_copies_identity() {
        let mut adapter = RequestAdapter::new("tasks", "add");
        adapter.set_plugin(Some("todo".to_string()));
        adapter.set_url("todo/tasks/add.json");
        adapter.set_extension(Some("json".to_string()));

        let meta = adapter.extract_metadata();
        assert_eq!(meta.plugin.as_deref(), Some("todo"));
        assert_eq!(meta.url, "todo/tasks/add.json");
        assert!(meta.wants_json());
    }

    #[test]
    fn slots_and_paging_are_keyed() {
        let mut adapter = RequestAdapter::new("tasks", "index");
        adapter.set_slot("requestData", json!({"a": 1}));
        adapter.set_paging("Task", PagingInfo::default());

        assert_eq!(adapter.slot("requestData"), Some(&json!({"a": 1})));
        assert!(adapter.slot("missing").is_none());
        assert!(adapter.paging("Task").is_some());
        assert!(adapter.paging("User").is_none());
    }

    #[test]
    fn method_can_be_changed() {
        let mut adapter = RequestAdapter::new("tasks", "delete");
        adapter.set_method(HttpMethod::Delete);
        assert!(adapter.is_delete());
        assert!(adapter.is_mutating());
    }
}
