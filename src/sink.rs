use std::cell::RefCell;
use std::fmt;

/// Error returned when writing to a response sink fails.
///
/// # Examples
///
/// ```
/// use json_api_plugins::{SinkError, SinkErrorKind};
///
/// let error = SinkError::new(SinkErrorKind::Terminated);
/// assert_eq!(error.kind(), SinkErrorKind::Terminated);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkError {
    kind: SinkErrorKind,
    message: Option<String>,
}

impl SinkError {
    /// Creates a new sink error with the specified kind.
    pub fn new(kind: SinkErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Creates a new sink error with a custom message.
    pub fn with_message(kind: SinkErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> SinkErrorKind {
        self.kind
    }

    /// Returns the error message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(msg) = &self.message {
            write!(f, "sink error ({}): {}", self.kind, msg)
        } else {
            write!(f, "sink error ({})", self.kind)
        }
    }
}

impl std::error::Error for SinkError {}

/// Kind of sink error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkErrorKind {
    /// The response body was already written; the request is over.
    Terminated,
    /// I/O error occurred while writing the response.
    Io,
}

impl fmt::Display for SinkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminated => write!(f, "response already terminated"),
            Self::Io => write!(f, "I/O error"),
        }
    }
}

/// Destination for the HTTP output of a request.
///
/// Writes are irreversible: once a status line or header is written there is
/// no rollback, and writing the body terminates the response.
pub trait ResponseSink {
    /// Writes the status line (e.g. `HTTP/1.1 201 Created`).
    ///
    /// # Errors
    ///
    /// Returns `SinkError` if the response was already terminated or the
    /// underlying writer failed.
    fn status_line(&self, line: &str) -> Result<(), SinkError>;

    /// Writes one response header.
    ///
    /// # Errors
    ///
    /// Returns `SinkError` if the response was already terminated or the
    /// underlying writer failed.
    fn header(&self, name: &str, value: &str) -> Result<(), SinkError>;

    /// Writes the body and terminates the response.
    ///
    /// # Errors
    ///
    /// Returns `SinkError` if a body was already written.
    fn body(&self, body: &str) -> Result<(), SinkError>;
}

#[derive(Debug, Default)]
struct Buffer {
    status_line: Option<String>,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

/// A response sink that keeps everything in memory.
///
/// Hosts without a streaming writer can render from it after the request
/// terminates; tests use it to inspect what was emitted.
///
/// # Examples
///
/// ```
/// use json_api_plugins::{BufferedResponse, ResponseSink};
///
/// let response = BufferedResponse::new();
/// response.status_line("HTTP/1.1 200 Ok").unwrap();
/// response.header("X-Paging-Page", "1").unwrap();
/// response.body("{}").unwrap();
///
/// assert!(response.is_terminated());
/// assert!(response.body("again").is_err());
/// ```
#[derive(Debug, Default)]
pub struct BufferedResponse {
    buffer: RefCell<Buffer>,
}

impl BufferedResponse {
    /// Creates a new empty response buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last status line written, if any.
    pub fn status(&self) -> Option<String> {
        self.buffer.borrow().status_line.clone()
    }

    /// Returns all headers in write order.
    pub fn headers(&self) -> Vec<(String, String)> {
        self.buffer.borrow().headers.clone()
    }

    /// Returns the value of the first header with the given name.
    pub fn header_value(&self, name: &str) -> Option<String> {
        self.buffer
            .borrow()
            .headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }

    /// Returns the body, if the response was terminated.
    pub fn body_text(&self) -> Option<String> {
        self.buffer.borrow().body.clone()
    }

    /// Returns `true` once a body has been written.
    pub fn is_terminated(&self) -> bool {
        self.buffer.borrow().body.is_some()
    }

    fn ensure_open(&self) -> Result<(), SinkError> {
        if self.is_terminated() {
            return Err(SinkError::new(SinkErrorKind::Terminated));
        }
        Ok(())
    }
}

impl ResponseSink for BufferedResponse {
    fn status_line(&self, line: &str) -> Result<(), SinkError> {
        self.ensure_open()?;
        self.buffer.borrow_mut().status_line = Some(line.to_string());
        Ok(())
    }

    fn header(&self, name: &str, value: &str) -> Result<(), SinkError> {
        self.ensure_open()?;
        self.buffer
            .borrow_mut()
            .headers
            .push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn body(&self, body: &str) -> Result<(), SinkError> {
        self.ensure_open()?;
        self.buffer.borrow_mut().body = Some(body.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_error_display_includes_message() {
        let error = SinkError::with_message(SinkErrorKind::Io, "broken pipe");
        assert_eq!(error.to_string(), "sink error (I/O error): broken pipe");
        assert_eq!(error.message(), Some("broken pipe"));
    }

    #[test]
    fn buffered_response_records_writes() {
        let response = BufferedResponse::new();
        response.status_line("HTTP/1.1 404 Not Found").unwrap();
        response.header("X-Paging-Count", "0").unwrap();

        assert_eq!(response.status().as_deref(), Some("HTTP/1.1 404 Not Found"));
        assert_eq!(response.header_value("x-paging-count").as_deref(), Some("0"));
        assert!(!response.is_terminated());
        assert!(response.body_text().is_none());
    }

    #[test]
    fn buffered_response_rejects_writes_after_body() {
        let response = BufferedResponse::new();
        response.body("{}").unwrap();

        let err = response.header("X-Late", "1").unwrap_err();
        assert_eq!(err.kind(), SinkErrorKind::Terminated);
        assert!(response.status_line("HTTP/1.1 200 Ok").is_err());
        assert_eq!(response.body_text().as_deref(), Some("{}"));
    }
}
