use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An ordered parameter layer (query string, named params, form body).
pub type ParamMap = IndexMap<String, Value>;

/// Identity of the request being dispatched.
///
/// Captured by the response formatter at setup and echoed back in the
/// response envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMeta {
    /// Routed controller name (e.g. `tasks`)
    pub controller: String,
    /// Routed action name (e.g. `index`)
    pub action: String,
    /// Plugin the controller belongs to, if any
    pub plugin: Option<String>,
    /// Request URL relative to the application root
    pub url: String,
    /// Requested representation (e.g. `json`), from the URL extension
    pub extension: Option<String>,
}

impl RequestMeta {
    /// Returns `true` when the request targets the JSON representation.
    pub fn wants_json(&self) -> bool {
        self.extension
            .as_deref()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

/// Pagination counters produced by the host's paginator for one model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingInfo {
    /// Requested page
    pub page: i64,
    /// Number of records on the current page
    pub current: i64,
    /// Total record count
    pub count: i64,
    /// 1 when a next page exists
    pub next_page: i64,
    /// 1 when a previous page exists
    pub prev_page: i64,
    /// Total number of pages
    pub page_count: i64,
}

impl PagingInfo {
    /// Returns the `X-Paging-*` headers describing these counters.
    pub fn headers(&self) -> [(&'static str, String); 6] {
        [
            ("X-Paging-Page", self.page.to_string()),
            ("X-Paging-Current", self.current.to_string()),
            ("X-Paging-Count", self.count.to_string()),
            ("X-Paging-Next", self.next_page.to_string()),
            ("X-Paging-Prev", self.prev_page.to_string()),
            ("X-Paging-PageCount", self.page_count.to_string()),
        ]
    }
}
