use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method
    Get,
    /// HTTP HEAD method
    Head,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP DELETE method
    Delete,
    /// HTTP PATCH method
    Patch,
}

impl HttpMethod {
    /// Returns `true` for verbs that change server state.
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Delete | HttpMethod::Patch
        )
    }

    /// Returns `true` for safe, read-only verbs.
    pub fn is_read(self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Head)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Head => write!(f, "HEAD"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
            HttpMethod::Patch => write!(f, "PATCH"),
        }
    }
}

/// Error returned when a verb name is not a supported HTTP method.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method: {0}")]
pub struct ParseMethodError(String);

impl FromStr for HttpMethod {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "HEAD" => Ok(HttpMethod::Head),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            _ => Err(ParseMethodError(s.to_string())),
        }
    }
}

/// Failure reported by an [`HttpTransport`].
///
/// The message is whatever the underlying client reported; it is passed
/// through to the caller untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Creates a transport error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Blocking HTTP client used by the remote data source.
///
/// Implementations send one request and return the raw response body.
/// Only [`send`](HttpTransport::send) is required; the verb helpers are
/// provided on top of it.
pub trait HttpTransport {
    /// Sends a request and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` when the request could not be completed.
    fn send(&self, method: HttpMethod, url: &str, body: Option<&Value>)
        -> Result<String, TransportError>;

    /// Sends a GET request.
    fn get(&self, url: &str) -> Result<String, TransportError> {
        self.send(HttpMethod::Get, url, None)
    }

    /// Sends a POST request with an optional body.
    fn post(&self, url: &str, body: Option<&Value>) -> Result<String, TransportError> {
        self.send(HttpMethod::Post, url, body)
    }

    /// Sends a PUT request with an optional body.
    fn put(&self, url: &str, body: Option<&Value>) -> Result<String, TransportError> {
        self.send(HttpMethod::Put, url, body)
    }

    /// Sends a DELETE request.
    fn delete(&self, url: &str) -> Result<String, TransportError> {
        self.send(HttpMethod::Delete, url, None)
    }
}

/// A request captured by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method used
    pub method: HttpMethod,
    /// Target URL
    pub url: String,
    /// JSON body, when one was sent
    pub body: Option<Value>,
}

/// An in-memory transport that records requests and replays queued responses.
///
/// No network I/O is performed, which keeps tests deterministic and offline.
/// Responses are returned in the order they were queued; once the queue is
/// drained every request answers with an empty body.
///
/// # Examples
///
/// ```
/// use json_api_plugins::{HttpMethod, HttpTransport, RecordingTransport};
///
/// let http = RecordingTransport::new();
/// http.push_response(r#"{"ok": true}"#);
///
/// let body = http.get("https://api.example.com/tasks/index.json").unwrap();
/// assert_eq!(body, r#"{"ok": true}"#);
///
/// let requests = http.requests();
/// assert_eq!(requests[0].method, HttpMethod::Get);
/// ```
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: RefCell<Vec<HttpRequest>>,
    responses: RefCell<VecDeque<Result<String, TransportError>>>,
}

impl RecordingTransport {
    /// Creates a transport with no recorded requests and no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response body.
    pub fn push_response(&self, body: impl Into<String>) {
        self.responses.borrow_mut().push_back(Ok(body.into()));
    }

    /// Queues a transport failure.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError::new(message)));
    }

    /// Returns the number of recorded requests.
    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Returns a snapshot of all recorded requests.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// Returns the most recent request, if any.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl HttpTransport for RecordingTransport {
    fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<String, TransportError> {
        self.requests.borrow_mut().push(HttpRequest {
            method,
            url: url.to_string(),
            body: body.cloned(),
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

#[cfg(feature = "reqwest-transport")]
pub use blocking::ReqwestTransport;

#[cfg(feature = "reqwest-transport")]
mod blocking {
    use serde_json::Value;

    use super::{HttpMethod, HttpTransport, TransportError};

    /// Blocking transport backed by `reqwest`.
    ///
    /// Bodies are sent as JSON. No retries are attempted.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::blocking::Client,
    }

    impl ReqwestTransport {
        /// Creates a transport with a default client.
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a transport around a preconfigured client.
        pub fn with_client(client: reqwest::blocking::Client) -> Self {
            Self { client }
        }
    }

    impl From<HttpMethod> for reqwest::Method {
        fn from(method: HttpMethod) -> Self {
            match method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Head => reqwest::Method::HEAD,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Put => reqwest::Method::PUT,
                HttpMethod::Delete => reqwest::Method::DELETE,
                HttpMethod::Patch => reqwest::Method::PATCH,
            }
        }
    }

    impl HttpTransport for ReqwestTransport {
        fn send(
            &self,
            method: HttpMethod,
            url: &str,
            body: Option<&Value>,
        ) -> Result<String, TransportError> {
            let mut request = self.client.request(method.into(), url);
            if let Some(body) = body {
                request = request.json(body);
            }
            let response = request
                .send()
                .map_err(|e| TransportError::new(e.to_string()))?;
            response
                .text()
                .map_err(|e| TransportError::new(e.to_string()))
        }
    }
}
