use serde_json::Value;

/// A model backed by a remote API resource.
pub trait RemoteModel {
    /// Resource name as declared by the model, e.g. `Task`. `None` means
    /// the model talks to the API root.
    fn api_model(&self) -> Option<&str>;

    /// Id of the current record, used by `update`.
    fn id(&self) -> Option<String> {
        None
    }

    /// Stores the schema returned by `describe`.
    fn set_schema(&mut self, schema: Value);
}

/// Plain [`RemoteModel`] for callers without their own model type.
///
/// # Examples
///
/// ```
/// use json_api_plugins::datasource::{ApiModel, RemoteModel};
///
/// let task = ApiModel::new("Task").with_id(3);
/// assert_eq!(task.api_model(), Some("Task"));
/// assert_eq!(task.id().as_deref(), Some("3"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiModel {
    api_model: Option<String>,
    id: Option<String>,
    schema: Option<Value>,
}

impl ApiModel {
    /// Creates a model for the named resource.
    pub fn new(api_model: impl Into<String>) -> Self {
        Self {
            api_model: Some(api_model.into()),
            ..Self::default()
        }
    }

    /// Creates a model without a resource name.
    pub fn root() -> Self {
        Self::default()
    }

    /// Sets the current record id.
    pub fn with_id(mut self, id: impl ToString) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// The schema stored by the last `describe`.
    pub fn schema(&self) -> Option<&Value> {
        self.schema.as_ref()
    }
}

impl RemoteModel for ApiModel {
    fn api_model(&self) -> Option<&str> {
        self.api_model.as_deref()
    }

    fn id(&self) -> Option<String> {
        self.id.clone()
    }

    fn set_schema(&mut self, schema: Value) {
        self.schema = Some(schema);
    }
}
