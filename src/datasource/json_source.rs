use std::fmt::Display;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::DataSourceConfig;
use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpTransport};
use crate::inflector;

use super::RemoteModel;

/// Result of [`RemoteApiDataSource::calculate`].
///
/// The remote API can count anything it can list, so the data source only
/// reports the capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Calculation {
    /// Counting is supported
    pub count: bool,
}

/// Data source that forwards CRUD operations to a remote JSON API.
///
/// | operation  | request                                   |
/// |------------|-------------------------------------------|
/// | `describe` | `GET {base}/{resource}/describe.json`     |
/// | `read`     | `GET {base}/{resource}/index.json`        |
/// | `create`   | `POST {base}/{resource}/add.json`         |
/// | `update`   | `PUT {base}/{resource}/edit/{id}.json`    |
/// | `delete`   | `DELETE {base}/{resource}/delete/{id}.json` |
///
/// Responses are decoded into untyped JSON; an empty body is `null`.
///
/// # Examples
///
/// ```
/// use json_api_plugins::datasource::{ApiModel, RemoteApiDataSource};
/// use json_api_plugins::{DataSourceConfig, HttpMethod, RecordingTransport};
/// use serde_json::json;
///
/// let http = RecordingTransport::new();
/// http.push_response(r#"{"id": 12}"#);
///
/// let source = RemoteApiDataSource::new(DataSourceConfig::new("https://api.example.com"), http);
/// let created = source
///     .create(&ApiModel::new("Task"), &["name"], &[json!("Buy milk")])
///     .unwrap();
///
/// assert_eq!(created, json!({"id": 12}));
/// let request = source.transport().last_request().unwrap();
/// assert_eq!(request.method, HttpMethod::Post);
/// assert_eq!(request.url, "https://api.example.com/tasks/add.json");
/// ```
#[derive(Debug, Clone)]
pub struct RemoteApiDataSource<T> {
    config: DataSourceConfig,
    transport: T,
}

impl<T: HttpTransport> RemoteApiDataSource<T> {
    /// Creates a data source talking to `config.base_url` through
    /// `transport`.
    pub fn new(config: DataSourceConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// The active configuration.
    pub fn config(&self) -> &DataSourceConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The remote API exposes no enumerable source list; always `true`.
    pub fn list_sources(&self) -> bool {
        true
    }

    /// Fetches the model schema and stores it on the model.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` or `Error::Decode` when the call fails.
    pub fn describe<M: RemoteModel + ?Sized>(&self, model: &mut M) -> Result<Value> {
        let url = self.endpoint(model, "describe.json");
        let schema = self.call(&url, HttpMethod::Get, None)?;
        model.set_schema(schema.clone());
        Ok(schema)
    }

    /// Lists records of the model.
    ///
    /// The query is logged but not sent to the remote API.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` or `Error::Decode` when the call fails.
    pub fn read<M: RemoteModel + ?Sized>(&self, model: &M, query: &Value) -> Result<Value> {
        tracing::debug!(query = %query, "read query is not forwarded");
        let url = self.endpoint(model, "index.json");
        self.call(&url, HttpMethod::Get, None)
    }

    /// Creates a record from parallel field and value lists.
    ///
    /// Fields without a value are sent as `null`; surplus values are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` or `Error::Decode` when the call fails.
    pub fn create<M, F>(&self, model: &M, fields: &[F], values: &[Value]) -> Result<Value>
    where
        M: RemoteModel + ?Sized,
        F: AsRef<str>,
    {
        let url = self.endpoint(model, "add.json");
        let data = data_object(fields, values);
        self.call(&url, HttpMethod::Post, Some(&data))
    }

    /// Updates the model's current record.
    ///
    /// The id is percent-encoded into a single path segment.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingId` when the model has no id, and
    /// `Error::Transport` or `Error::Decode` when the call fails.
    pub fn update<M, F>(&self, model: &M, fields: &[F], values: &[Value]) -> Result<Value>
    where
        M: RemoteModel + ?Sized,
        F: AsRef<str>,
    {
        let id = model
            .id()
            .ok_or_else(|| Error::MissingId(model.api_model().unwrap_or_default().to_string()))?;
        let url = self.endpoint(model, &format!("edit/{}.json", encode_segment(&id)));
        let data = data_object(fields, values);
        self.call(&url, HttpMethod::Put, Some(&data))
    }

    /// Deletes the record with the given id.
    ///
    /// The id is percent-encoded into a single path segment.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` or `Error::Decode` when the call fails.
    pub fn delete<M: RemoteModel + ?Sized>(&self, model: &M, id: impl Display) -> Result<Value> {
        let url = self.endpoint(model, &format!("delete/{}.json", encode_segment(&id.to_string())));
        self.call(&url, HttpMethod::Delete, None)
    }

    /// Reports which aggregates the remote API supports.
    pub fn calculate<M: RemoteModel + ?Sized>(&self, _model: &M) -> Calculation {
        Calculation { count: true }
    }

    /// Base URL with a trailing slash, followed by the model's resource name
    /// lower-cased and pluralized when the model declares one.
    ///
    /// ```
    /// use json_api_plugins::datasource::{ApiModel, RemoteApiDataSource};
    /// use json_api_plugins::{DataSourceConfig, RecordingTransport};
    ///
    /// let source = RemoteApiDataSource::new(
    ///     DataSourceConfig::new("https://api.example.com"),
    ///     RecordingTransport::new(),
    /// );
    /// assert_eq!(source.api_url(&ApiModel::new("Category")), "https://api.example.com/categories");
    /// assert_eq!(source.api_url(&ApiModel::root()), "https://api.example.com/");
    /// ```
    pub fn api_url<M: RemoteModel + ?Sized>(&self, model: &M) -> String {
        let mut url = self.config.base_url.clone();
        if !url.ends_with('/') {
            url.push('/');
        }
        if let Some(resource) = model.api_model() {
            url.push_str(&inflector::pluralize(&resource.to_lowercase()));
        }
        url
    }

    /// Sends one request and decodes the response body.
    ///
    /// Returns `Ok(None)` without calling the transport when `url` is empty
    /// or no method is given.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` when the transport fails and
    /// `Error::Decode` when the body is not JSON.
    pub fn make_api_call(
        &self,
        url: &str,
        method: Option<HttpMethod>,
        body: Option<&Value>,
    ) -> Result<Option<Value>> {
        let Some(method) = method.filter(|_| !url.is_empty()) else {
            tracing::warn!(url, "remote api call skipped: missing url or method");
            return Ok(None);
        };

        tracing::debug!(%method, url, has_body = body.is_some(), "calling remote api");
        let raw = self.transport.send(method, url, body).map_err(|e| {
            tracing::warn!(%method, url, error = %e, "remote api call failed");
            e
        })?;
        if raw.trim().is_empty() {
            return Ok(Some(Value::Null));
        }
        serde_json::from_str(&raw).map(Some).map_err(Error::Decode)
    }

    fn call(&self, url: &str, method: HttpMethod, body: Option<&Value>) -> Result<Value> {
        self.make_api_call(url, Some(method), body)
            .map(Option::unwrap_or_default)
    }

    fn endpoint<M: RemoteModel + ?Sized>(&self, model: &M, path: &str) -> String {
        let mut url = self.api_url(model);
        if !url.ends_with('/') {
            url.push('/');
        }
        url.push_str(path);
        url
    }
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn encode_segment(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

/// Zips field names with values into a JSON object.
fn data_object<F: AsRef<str>>(fields: &[F], values: &[Value]) -> Value {
    let data: Map<String, Value> = fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            (
                field.as_ref().to_string(),
                values.get(i).cloned().unwrap_or(Value::Null),
            )
        })
        .collect();
    Value::Object(data)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::datasource::ApiModel;
    use crate::http::RecordingTransport;

    const BASE: &str = "https://api.example.com";

    fn source() -> RemoteApiDataSource<RecordingTransport> {
        RemoteApiDataSource::new(DataSourceConfig::new(BASE), RecordingTransport::new())
    }

    #[test]
    fn create_posts_zipped_fields() {
        let source = source();
        source.transport().push_response(r#"{"success": 1}"#);

        let result = source
            .create(&ApiModel::new("Task"), &["name"], &[json!("Buy milk")])
            .unwrap();

        assert_eq!(result, json!({"success": 1}));
        let request = source.transport().last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://api.example.com/tasks/add.json");
        assert_eq!(request.body, Some(json!({"name": "Buy milk"})));
    }

    #[test]
    fn missing_values_become_null() {
        let source = source();
        source
            .create(&ApiModel::new("Task"), &["name", "done"], &[json!("Walk dog")])
            .unwrap();

        let body = source.transport().last_request().unwrap().body.unwrap();
        assert_eq!(body, json!({"name": "Walk dog", "done": null}));
    }

    #[test]
    fn delete_uses_id_in_path_without_body() {
        let source = source();
        source.delete(&ApiModel::new("Task"), 7).unwrap();

        let request = source.transport().last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.url, "https://api.example.com/tasks/delete/7.json");
        assert!(request.body.is_none());
    }

    #[test]
    fn update_puts_to_model_id() {
        let source = source();
        let task = ApiModel::new("Task").with_id(5);
        source.update(&task, &["done"], &[json!(true)]).unwrap();

        let request = source.transport().last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.url, "https://api.example.com/tasks/edit/5.json");
        assert_eq!(request.body, Some(json!({"done": true})));
    }

    #[test]
    fn ids_are_encoded_as_one_path_segment() {
        let source = source();
        source.delete(&ApiModel::new("Task"), "a/b?c#d").unwrap();
        assert_eq!(
            source.transport().last_request().unwrap().url,
            "https://api.example.com/tasks/delete/a%2Fb%3Fc%23d.json"
        );

        let task = ApiModel::new("Task").with_id("café 1");
        source.update(&task, &["done"], &[json!(true)]).unwrap();
        assert_eq!(
            source.transport().last_request().unwrap().url,
            "https://api.example.com/tasks/edit/caf%C3%A9%201.json"
        );
    }

    #[test]
    fn update_without_id_is_rejected_before_sending() {
        let source = source();
        let err = source
            .update(&ApiModel::new("Task"), &["done"], &[json!(true)])
            .unwrap_err();

        assert!(matches!(err, Error::MissingId(ref model) if model == "Task"));
        assert_eq!(source.transport().request_count(), 0);
    }

    #[test]
    fn read_ignores_query() {
        let source = source();
        source.transport().push_response(r#"[{"id": 1}]"#);

        let rows = source
            .read(&ApiModel::new("Task"), &json!({"conditions": {"done": false}}))
            .unwrap();

        assert_eq!(rows, json!([{"id": 1}]));
        let request = source.transport().last_request().unwrap();
        assert_eq!(request.url, "https://api.example.com/tasks/index.json");
        assert!(request.body.is_none());
    }

    #[test]
    fn describe_stores_schema_on_model() {
        let source = source();
        source
            .transport()
            .push_response(r#"{"id": {"type": "integer"}, "name": {"type": "string"}}"#);

        let mut task = ApiModel::new("Task");
        let schema = source.describe(&mut task).unwrap();

        assert_eq!(task.schema(), Some(&schema));
        assert_eq!(schema["name"]["type"], "string");
        assert_eq!(
            source.transport().last_request().unwrap().url,
            "https://api.example.com/tasks/describe.json"
        );
    }

    #[test]
    fn api_url_normalizes_slash_and_resource() {
        let with_slash = RemoteApiDataSource::new(
            DataSourceConfig::new("https://api.example.com/v1/"),
            RecordingTransport::new(),
        );
        assert_eq!(
            with_slash.api_url(&ApiModel::new("Person")),
            "https://api.example.com/v1/people"
        );
        assert_eq!(source().api_url(&ApiModel::new("TASK")), "https://api.example.com/tasks");
    }

    #[test]
    fn model_without_resource_talks_to_root() {
        let source = source();
        source.read(&ApiModel::root(), &Value::Null).unwrap();
        assert_eq!(
            source.transport().last_request().unwrap().url,
            "https://api.example.com/index.json"
        );
    }

    #[test]
    fn make_api_call_sentinel_skips_transport() {
        let source = source();
        assert_eq!(source.make_api_call("", Some(HttpMethod::Get), None).unwrap(), None);
        assert_eq!(source.make_api_call("https://api.example.com/x.json", None, None).unwrap(), None);
        assert_eq!(source.transport().request_count(), 0);
    }

    #[test]
    fn empty_body_decodes_to_null() {
        let source = source();
        source.transport().push_response("  ");
        let value = source.delete(&ApiModel::new("Task"), 1).unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let source = source();
        source.transport().push_response("<html>oops</html>");
        let err = source.read(&ApiModel::new("Task"), &Value::Null).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn transport_failure_propagates() {
        let source = source();
        source.transport().push_failure("connection refused");
        let err = source.read(&ApiModel::new("Task"), &Value::Null).unwrap_err();
        assert!(matches!(err, Error::Transport(ref e) if e.message() == "connection refused"));
    }

    #[test]
    fn calculate_and_list_sources() {
        let source = source();
        let calc = source.calculate(&ApiModel::new("Task"));
        assert_eq!(serde_json::to_value(calc).unwrap(), json!({"count": true}));
        assert!(source.list_sources());
    }
}
