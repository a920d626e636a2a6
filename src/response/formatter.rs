//! Per-request JSON response formatting.
//!
//! The formatter runs in three phases driven by the host: `setup` captures
//! request identity, `guard` checks the declared method type against the
//! HTTP verb, and `finalize` resolves the status, writes headers and body to
//! the sink, and returns the envelope it serialized. Outside JSON mode every
//! phase is a no-op.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::inflector;
use crate::logging::RequestLog;
use crate::sink::ResponseSink;
use crate::web::{Component, DetectMethod, ExtractMetadata, ExtractPaging, RequestAdapter};

use super::status::{derive_status, HTTP_VERSION, INTERNAL_SERVER_ERROR};
use super::{
    ControllerHooks, MethodType, ResponseEnvelope, ResponseProperty, ResponseSettings,
    StatusCodeTable, StatusOutcome,
};

/// Status forced when the method type and the HTTP verb disagree.
const METHOD_NOT_ALLOWED: u16 = 405;

/// Builds the JSON envelope for one request.
///
/// # Examples
///
/// ```
/// use json_api_plugins::response::ResponseFormatter;
/// use json_api_plugins::web::RequestAdapter;
/// use json_api_plugins::{BufferedResponse, HttpMethod};
///
/// let mut request = RequestAdapter::new("tasks", "add");
/// request.set_extension(Some("json".to_string()));
/// request.set_method(HttpMethod::Post);
///
/// let mut formatter = ResponseFormatter::new();
/// formatter.setup(&request);
/// formatter.guard(&request);
/// formatter.set("id", 7);
/// formatter.set_method_success(true, None);
///
/// let sink = BufferedResponse::new();
/// let envelope = formatter.finalize(&request, &sink).unwrap().unwrap();
///
/// assert_eq!(envelope.status, Some(201));
/// assert_eq!(sink.status().as_deref(), Some("HTTP/1.1 201 Created"));
/// ```
#[derive(Default)]
pub struct ResponseFormatter {
    envelope: ResponseEnvelope,
    settings: ResponseSettings,
    payload: Map<String, Value>,
    json_mode: bool,
    finalized: bool,
    hooks: Option<Box<dyn ControllerHooks>>,
}

impl fmt::Debug for ResponseFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseFormatter")
            .field("envelope", &self.envelope)
            .field("settings", &self.settings)
            .field("payload", &self.payload)
            .field("json_mode", &self.json_mode)
            .field("finalized", &self.finalized)
            .field("hooks", &self.hooks.is_some())
            .finish()
    }
}

impl ResponseFormatter {
    /// Creates an inactive formatter with no controller hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter that consults `hooks` during guard and finalize.
    pub fn with_hooks(hooks: impl ControllerHooks + 'static) -> Self {
        Self {
            hooks: Some(Box::new(hooks)),
            ..Self::default()
        }
    }

    /// Installs or replaces the controller hooks.
    pub fn set_hooks(&mut self, hooks: impl ControllerHooks + 'static) {
        self.hooks = Some(Box::new(hooks));
    }

    /// Captures request identity and detects JSON mode.
    pub fn setup<R: ExtractMetadata + ?Sized>(&mut self, request: &R) {
        let meta = request.extract_metadata();
        self.json_mode = meta.wants_json();
        self.envelope = ResponseEnvelope::for_request(&meta);
        self.log().debug(format_args!("json mode: {}", self.json_mode));
    }

    /// Returns `true` when the request asked for JSON.
    pub fn is_active(&self) -> bool {
        self.json_mode
    }

    /// Infers the method type from the action and enforces the verb rules.
    ///
    /// Mutating types (add, edit, delete) need a mutating verb; read types
    /// (view, index) need a read verb. A mismatch forces `405`.
    pub fn guard<D: DetectMethod + ?Sized>(&mut self, request: &D) {
        if !self.json_mode {
            return;
        }
        if self.settings.method_type.is_none() {
            if let Some(inferred) = MethodType::from_action(&self.envelope.action) {
                self.log()
                    .debug(format_args!("method type inferred from action: {inferred}"));
                self.settings.method_type = Some(inferred);
            }
        }
        if let Some(hooks) = &self.hooks {
            self.settings.method_type = hooks.override_method_type(self.settings.method_type.take());
        }

        let verb = request.method();
        let allowed = match &self.settings.method_type {
            Some(method_type) if method_type.is_mutating() => request.is_mutating(),
            Some(method_type) if method_type.is_read() => request.is_read(),
            _ => true,
        };
        if !allowed {
            self.log().warn(format_args!(
                "{verb} not allowed for method type {}",
                self.settings
                    .method_type
                    .as_ref()
                    .map_or("", MethodType::as_str)
            ));
            self.settings.response_code = Some(METHOD_NOT_ALLOWED);
        }
    }

    /// Stores `value` in the payload under `key`, replacing any previous
    /// value.
    ///
    /// A `null` value is ignored and the call returns `false`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let value = value.into();
        if value.is_null() {
            return false;
        }
        self.payload.insert(key.into(), value);
        true
    }

    /// Merges several entries into the payload, later entries winning.
    ///
    /// Follows the same rule as [`set`](Self::set): `null` values are
    /// skipped. Returns `false` when nothing was stored.
    pub fn set_many<I, K, V>(&mut self, entries: I) -> bool
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut merged = false;
        for (key, value) in entries {
            merged |= self.set(key, value);
        }
        merged
    }

    /// Returns the accumulated payload.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Records the outcome of the controller action and an optional message.
    ///
    /// An empty message leaves the current message untouched. Returns the
    /// recorded success flag.
    pub fn set_method_success(&mut self, success: bool, message: Option<&str>) -> bool {
        self.settings.method_success = success;
        if let Some(message) = message.filter(|m| !m.is_empty()) {
            self.settings.response_message = Some(message.to_string());
        }
        success
    }

    /// Forces the response status.
    pub fn set_response_code(&mut self, code: u16) {
        self.settings.response_code = Some(code);
    }

    /// The forced response status, if any.
    pub fn response_code(&self) -> Option<u16> {
        self.settings.response_code
    }

    /// Forces the response message.
    pub fn set_response_message(&mut self, message: impl Into<String>) {
        self.settings.response_message = Some(message.into());
    }

    /// The forced response message, if any.
    pub fn response_message(&self) -> Option<&str> {
        self.settings.response_message.as_deref()
    }

    /// Declares the method type; an empty name clears it.
    pub fn set_method_type(&mut self, method_type: impl Into<MethodType>) {
        self.settings.method_type = match method_type.into() {
            MethodType::Unrecognized(name) if name.is_empty() => None,
            method_type => Some(method_type),
        };
    }

    /// The declared or inferred method type.
    pub fn method_type(&self) -> Option<&MethodType> {
        self.settings.method_type.as_ref()
    }

    /// The recorded outcome of the controller action.
    pub fn method_success(&self) -> bool {
        self.settings.method_success
    }

    /// All controller-declared properties.
    pub fn settings(&self) -> &ResponseSettings {
        &self.settings
    }

    /// Mutable access to the controller-declared properties.
    pub fn settings_mut(&mut self) -> &mut ResponseSettings {
        &mut self.settings
    }

    /// Assigns a property by name.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownProperty` for a name that is not one of
    /// `responseCode`, `responseMessage`, `methodType` or `methodSuccess`,
    /// and `Error::InvalidPropertyValue` for a mistyped value.
    pub fn set_property(&mut self, name: &str, value: Value) -> Result<()> {
        let property: ResponseProperty = name.parse()?;
        self.settings.assign(property, value)
    }

    /// Reads a property by name.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownProperty` for an unknown name.
    pub fn property(&self, name: &str) -> Result<Value> {
        let property: ResponseProperty = name.parse()?;
        Ok(self.settings.read(property))
    }

    /// Resolves status, message and success into the envelope.
    ///
    /// A forced response code wins when it is in the status table;
    /// otherwise the method type and outcome decide. A forced message always
    /// replaces the derived one. Returns `false` when no status was
    /// committed.
    pub fn generate_status_code(&mut self) -> bool {
        let success = self.settings.method_success;
        let (status, derived) = match self.settings.response_code {
            Some(code) if StatusCodeTable::contains(code) => (code, None),
            _ => derive_status(self.settings.method_type.as_ref(), success),
        };
        let message = self
            .settings
            .response_message
            .clone()
            .or_else(|| derived.map(str::to_string));

        let mut outcome = StatusOutcome {
            status: Some(status),
            message,
            success,
        };
        if let Some(hooks) = &self.hooks {
            outcome = hooks.override_status(outcome);
        }

        match outcome.status {
            Some(status) if status != 0 => {
                self.envelope.status = Some(status);
                if let Some(message) = outcome.message.filter(|m| !m.is_empty()) {
                    self.envelope.message = Some(message);
                }
                self.envelope.success = Some(u8::from(outcome.success));
                true
            }
            _ => false,
        }
    }

    /// Resolves the status and writes the response to `sink`.
    ///
    /// Paging headers for the primary model (the controller name as a class
    /// name) come first, then the status line, then the serialized envelope.
    /// An unknown or missing status is reported as
    /// `500 Internal Server Error`. Returns `None` outside JSON mode or when
    /// the response was already finalized.
    ///
    /// # Errors
    ///
    /// Returns `Error::Sink` when the sink rejects a write and
    /// `Error::Serialize` when the envelope cannot be encoded.
    pub fn finalize<R, S>(&mut self, request: &R, sink: &S) -> Result<Option<ResponseEnvelope>>
    where
        R: ExtractPaging + ?Sized,
        S: ResponseSink + ?Sized,
    {
        if !self.json_mode {
            return Ok(None);
        }
        if self.finalized {
            self.log().debug(format_args!("response already finalized"));
            return Ok(None);
        }
        self.finalized = true;

        self.generate_status_code();

        let model = inflector::classify(&self.envelope.controller);
        if let Some(paging) = request.paging(&model) {
            for (name, value) in paging.headers() {
                sink.header(name, &value)?;
            }
            self.envelope.paging = Some(*paging);
        }

        let code = match self.envelope.status.and_then(StatusCodeTable::lookup) {
            Some(code) => code,
            None => {
                self.log().warn(format_args!(
                    "status {:?} has no status line, answering {INTERNAL_SERVER_ERROR}",
                    self.envelope.status
                ));
                INTERNAL_SERVER_ERROR
            }
        };
        sink.status_line(&format!("{HTTP_VERSION} {code}"))?;
        self.envelope.code = Some(code.to_string());

        let payload = Value::Object(self.payload.clone());
        self.envelope.response = match &self.hooks {
            Some(hooks) => hooks.transform_payload(payload),
            None => payload,
        };

        let body = serde_json::to_string(&self.envelope).map_err(Error::Serialize)?;
        sink.body(&body)?;
        self.log()
            .info(format_args!("responded {code} ({} bytes)", body.len()));
        Ok(Some(self.envelope.clone()))
    }

    /// The envelope in its current state.
    pub fn envelope(&self) -> &ResponseEnvelope {
        &self.envelope
    }

    fn log(&self) -> RequestLog<'_> {
        RequestLog::new(&self.envelope.controller, &self.envelope.action)
    }
}

impl Component for ResponseFormatter {
    fn initialize(&mut self, request: &mut RequestAdapter) -> Result<()> {
        self.setup(&*request);
        Ok(())
    }

    fn startup(&mut self, request: &RequestAdapter) -> Result<()> {
        self.guard(request);
        Ok(())
    }

    fn before_render(&mut self, request: &RequestAdapter, sink: &dyn ResponseSink) -> Result<()> {
        self.finalize(request, sink).map(|_| ())
    }
}
