//! Merges query-string, route and form parameters into one lookup map.
//!
//! Precedence on key collision is query > named > form. The layers are
//! applied form first, then named, then query, each overwriting what the
//! previous one left behind.

use serde::Serialize;
use serde_json::Value;

use crate::config::RequestDataConfig;
use crate::error::Result;
use crate::logging::RequestLog;
use crate::request::ParamMap;

use super::{Component, ExtractParams, RequestAdapter};

/// Query keys that are routing artifacts rather than parameters.
const RESERVED_QUERY_KEYS: [&str; 2] = ["url", "ext"];

/// The merged, read-only parameter map of one request.
///
/// Keys keep the position of their first insertion; values come from the
/// highest-priority layer that carried the key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MergedParameters(ParamMap);

impl MergedParameters {
    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` when `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of merged parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no parameters were merged.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over parameters in merge order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrows the underlying ordered map.
    pub fn as_map(&self) -> &ParamMap {
        &self.0
    }

    /// Consumes the wrapper and returns the ordered map.
    pub fn into_inner(self) -> ParamMap {
        self.0
    }

    /// Converts the parameters into a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

/// Request component that builds [`MergedParameters`].
///
/// # Examples
///
/// ```
/// use json_api_plugins::web::{RequestAdapter, RequestDataMerger};
/// use json_api_plugins::RequestDataConfig;
/// use serde_json::json;
///
/// let mut request = RequestAdapter::new("tasks", "index");
/// request.add_query_param("sort", "name");
/// request.add_named_param("sort", "created");
/// request.add_named_param("page", 3);
///
/// let merger = RequestDataMerger::new(RequestDataConfig::default());
/// let merged = merger.merge(&request);
///
/// assert_eq!(merged.get("sort"), Some(&json!("name")));
/// assert_eq!(merged.get("page"), Some(&json!(3)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestDataMerger {
    config: RequestDataConfig,
}

impl RequestDataMerger {
    /// Creates a merger with the given options.
    pub fn new(config: RequestDataConfig) -> Self {
        Self { config }
    }

    /// Creates a merger from a host settings object.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` when a known option is mistyped.
    pub fn from_settings(settings: &Value) -> Result<Self> {
        RequestDataConfig::from_settings(settings).map(Self::new)
    }

    /// Returns the active options.
    pub fn config(&self) -> &RequestDataConfig {
        &self.config
    }

    /// Merges the enabled layers of `request`.
    ///
    /// Disabled or empty layers contribute nothing; the result may be empty
    /// but merging never fails.
    pub fn merge<R: ExtractParams + ?Sized>(&self, request: &R) -> MergedParameters {
        let mut merged = ParamMap::new();
        if self.config.form {
            merged.extend(flatten_form(request.form_params()));
        }
        if self.config.named {
            merged.extend(
                request
                    .named_params()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone())),
            );
        }
        if self.config.query {
            merged.extend(
                request
                    .query_params()
                    .iter()
                    .filter(|(k, _)| !RESERVED_QUERY_KEYS.contains(&k.as_str()))
                    .map(|(k, v)| (k.clone(), v.clone())),
            );
        }
        MergedParameters(merged)
    }

    /// Merges `request` and stores the result on it.
    ///
    /// The merged object is written to the slot named by the `key` option.
    /// Older consumers read route parameters only, so the merged map is
    /// also copied into the named layer when that layer was empty.
    pub fn apply(&self, request: &mut RequestAdapter) -> MergedParameters {
        let merged = self.merge(request);
        let meta = request.meta().clone();
        RequestLog::new(&meta.controller, &meta.action).debug(format_args!(
            "merged {} request parameters into '{}'",
            merged.len(),
            self.config.key
        ));

        request.set_slot(self.config.key.clone(), merged.to_value());
        if request.named_params().is_empty() {
            request.set_named_params(merged.as_map().clone());
        }
        merged
    }
}

impl Component for RequestDataMerger {
    fn initialize(&mut self, request: &mut RequestAdapter) -> Result<()> {
        self.apply(request);
        Ok(())
    }
}

/// Flattens grouped form fields one level.
///
/// Object-valued entries are field groups and are merged into the top
/// level; arrays and scalars stay under their own key.
fn flatten_form(form: &ParamMap) -> ParamMap {
    let mut flat = ParamMap::new();
    for (key, value) in form {
        match value {
            Value::Object(group) => {
                flat.extend(group.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            other => {
                flat.insert(key.clone(), other.clone());
            }
        }
    }
    flat
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn merger(named: bool, query: bool, form: bool) -> RequestDataMerger {
        RequestDataMerger::new(RequestDataConfig {
            key: "requestData".to_string(),
            named,
            query,
            form,
        })
    }

    #[test]
    fn query_only_strips_routing_artifacts() {
        let mut request = RequestAdapter::new("tasks", "index");
        request.add_query_param("url", "tasks/index.json");
        request.add_query_param("ext", "json");
        request.add_query_param("limit", "10");
        request.add_named_param("page", 2);

        let merged = merger(false, true, false).merge(&request);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get("limit"), Some(&json!("10")));
        assert!(!merged.contains_key("url"));
        assert!(!merged.contains_key("ext"));
    }

    #[test]
    fn precedence_is_query_then_named_then_form() {
        let mut request = RequestAdapter::new("tasks", "edit");
        request.add_form_param("a", "form");
        request.add_form_param("b", "form");
        request.add_form_param("c", "form");
        request.add_named_param("a", "named");
        request.add_named_param("b", "named");
        request.add_query_param("a", "query");

        let merged = merger(true, true, true).merge(&request);

        assert_eq!(merged.get("a"), Some(&json!("query")));
        assert_eq!(merged.get("b"), Some(&json!("named")));
        assert_eq!(merged.get("c"), Some(&json!("form")));
    }

    #[test]
    fn keys_keep_first_insertion_position() {
        let mut request = RequestAdapter::new("tasks", "edit");
        request.add_form_param("z", 1);
        request.add_named_param("y", 2);
        request.add_query_param("z", 3);

        let merged = merger(true, true, true).merge(&request);
        let keys: Vec<_> = merged.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["z", "y"]);
        assert_eq!(merged.get("z"), Some(&json!(3)));
    }

    #[test]
    fn form_is_disabled_by_default() {
        let mut request = RequestAdapter::new("tasks", "add");
        request.add_form_param("name", "Buy milk");

        let merged = RequestDataMerger::default().merge(&request);
        assert!(merged.is_empty());
    }

    #[test]
    fn form_groups_are_flattened_one_level() {
        let mut request = RequestAdapter::new("tasks", "add");
        request.add_form_param("Task", json!({"name": "Buy milk", "done": false}));
        request.add_form_param("tags", json!(["home", "shop"]));
        request.add_form_param("token", "abc");

        let merged = merger(false, false, true).merge(&request);

        assert_eq!(merged.get("name"), Some(&json!("Buy milk")));
        assert_eq!(merged.get("done"), Some(&json!(false)));
        assert_eq!(merged.get("tags"), Some(&json!(["home", "shop"])));
        assert_eq!(merged.get("token"), Some(&json!("abc")));
        assert!(!merged.contains_key("Task"));
    }

    #[test]
    fn empty_request_merges_to_empty_map() {
        let request = RequestAdapter::new("tasks", "index");
        assert!(merger(true, true, true).merge(&request).is_empty());
    }

    #[test]
    fn apply_stores_slot_and_mirrors_empty_named_layer() {
        let mut request = RequestAdapter::new("tasks", "index");
        request.add_query_param("q", "milk");

        let merged = RequestDataMerger::default().apply(&mut request);

        assert_eq!(request.slot("requestData"), Some(&json!({"q": "milk"})));
        assert_eq!(request.named_params(), merged.as_map());
    }

    #[test]
    fn apply_keeps_existing_named_layer() {
        let mut request = RequestAdapter::new("tasks", "view");
        request.add_named_param("id", 5);
        request.add_query_param("fields", "name");

        let mut component = RequestDataMerger::from_settings(&json!({"key": "input"})).unwrap();
        component.initialize(&mut request).unwrap();

        assert_eq!(request.named_params().len(), 1);
        assert_eq!(
            request.slot("input"),
            Some(&json!({"id": 5, "fields": "name"}))
        );
        assert!(request.slot("requestData").is_none());
    }
}
