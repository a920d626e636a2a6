use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::request::{PagingInfo, RequestMeta};

/// The JSON object returned to API clients.
///
/// Identity fields are filled at setup; `status`, `code`, `message`,
/// `success` and `paging` are resolved at finalize; `response` holds the
/// payload the controller accumulated.
///
/// # Examples
///
/// ```
/// use json_api_plugins::response::ResponseEnvelope;
/// use json_api_plugins::RequestMeta;
///
/// let meta = RequestMeta {
///     controller: "tasks".to_string(),
///     action: "index".to_string(),
///     url: "tasks/index.json".to_string(),
///     ..RequestMeta::default()
/// };
/// let envelope = ResponseEnvelope::for_request(&meta);
/// let json = serde_json::to_string(&envelope).unwrap();
/// assert!(json.starts_with(r#"{"controller":"tasks","action":"index""#));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Routed controller
    pub controller: String,
    /// Routed action
    pub action: String,
    /// Owning plugin
    pub plugin: Option<String>,
    /// Request URL
    pub url: String,
    /// Resolved HTTP status
    pub status: Option<u16>,
    /// Formatted status line text, e.g. `"201 Created"`
    pub code: Option<String>,
    /// Human-readable outcome message
    pub message: Option<String>,
    /// 1 on success, 0 on failure
    pub success: Option<u8>,
    /// Paginator counters for the primary model
    pub paging: Option<PagingInfo>,
    /// Controller payload
    pub response: Value,
}

impl ResponseEnvelope {
    /// Creates an envelope with only the identity fields populated.
    pub fn for_request(meta: &RequestMeta) -> Self {
        Self {
            controller: meta.controller.clone(),
            action: meta.action.clone(),
            plugin: meta.plugin.clone(),
            url: meta.url.clone(),
            ..Self::default()
        }
    }

    /// Returns `true` when the envelope reports success.
    pub fn is_success(&self) -> bool {
        self.success == Some(1)
    }
}
