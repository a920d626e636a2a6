//! Component lifecycle and the per-request driver.
//!
//! Hosts call component hooks in a fixed order:
//!
//! ```text
//! Routed request
//!   ↓
//! initialize (every component)   merge parameters, capture identity
//!   ↓
//! startup (every component)      method-type inference, verb guard
//!   ↓
//! controller action              payload, outcome, status overrides
//!   ↓
//! before_render (every component) status line, headers, JSON body
//! ```
//!
//! [`RequestCycle`] runs exactly that sequence for the two request
//! components, which is how a host without its own lifecycle (or a test)
//! drives them.

use crate::error::Result;
use crate::response::{ResponseEnvelope, ResponseFormatter};
use crate::sink::ResponseSink;

use super::{MergedParameters, RequestAdapter, RequestDataMerger};

/// Lifecycle hooks of a request component.
///
/// Only `initialize` is required; the later hooks default to doing nothing.
pub trait Component {
    /// Called once the request is routed, before any controller code runs.
    ///
    /// # Errors
    ///
    /// Implementations return an error when the request cannot be served.
    fn initialize(&mut self, request: &mut RequestAdapter) -> Result<()>;

    /// Called after every component was initialized, right before the
    /// controller action.
    ///
    /// # Errors
    ///
    /// Implementations return an error when the request cannot be served.
    fn startup(&mut self, _request: &RequestAdapter) -> Result<()> {
        Ok(())
    }

    /// Called after the controller action, before the host would render a
    /// view.
    ///
    /// # Errors
    ///
    /// Implementations return an error when the response cannot be written.
    fn before_render(&mut self, _request: &RequestAdapter, _sink: &dyn ResponseSink) -> Result<()> {
        Ok(())
    }
}

/// What a controller action sees while it runs.
#[derive(Debug)]
pub struct ActionContext<'a> {
    /// The routed request
    pub request: &'a RequestAdapter,
    /// Formatter collecting payload and outcome
    pub response: &'a mut ResponseFormatter,
    /// Merged request parameters
    pub data: &'a MergedParameters,
}

/// Drives one request through the parameter merger and the response
/// formatter.
#[derive(Debug, Default)]
pub struct RequestCycle {
    request_data: RequestDataMerger,
    response: ResponseFormatter,
    data: MergedParameters,
}

impl RequestCycle {
    /// Creates a cycle from configured components.
    pub fn new(request_data: RequestDataMerger, response: ResponseFormatter) -> Self {
        Self {
            request_data,
            response,
            data: MergedParameters::default(),
        }
    }

    /// Runs the `initialize` hooks: parameters first, then the formatter.
    ///
    /// # Errors
    ///
    /// Propagates component errors.
    pub fn initialize(&mut self, request: &mut RequestAdapter) -> Result<()> {
        self.data = self.request_data.apply(request);
        self.response.initialize(request)
    }

    /// Runs the `startup` hooks.
    ///
    /// # Errors
    ///
    /// Propagates component errors.
    pub fn startup(&mut self, request: &RequestAdapter) -> Result<()> {
        self.request_data.startup(request)?;
        self.response.startup(request)
    }

    /// Runs the `before_render` hooks and returns the envelope written to
    /// `sink`, if the formatter was active.
    ///
    /// # Errors
    ///
    /// Propagates sink and serialization errors.
    pub fn render(
        &mut self,
        request: &RequestAdapter,
        sink: &dyn ResponseSink,
    ) -> Result<Option<ResponseEnvelope>> {
        self.request_data.before_render(request, sink)?;
        self.response.finalize(request, sink)
    }

    /// Runs the whole lifecycle around `action`.
    ///
    /// An error from `action` aborts the cycle before anything is rendered.
    ///
    /// # Errors
    ///
    /// Propagates errors from the components and from `action`.
    pub fn run<F>(
        &mut self,
        request: &mut RequestAdapter,
        sink: &dyn ResponseSink,
        action: F,
    ) -> Result<Option<ResponseEnvelope>>
    where
        F: FnOnce(&mut ActionContext<'_>) -> Result<()>,
    {
        self.initialize(request)?;
        self.startup(request)?;

        let mut ctx = ActionContext {
            request,
            response: &mut self.response,
            data: &self.data,
        };
        action(&mut ctx)?;

        self.render(request, sink)
    }

    /// The response formatter.
    pub fn response(&self) -> &ResponseFormatter {
        &self.response
    }

    /// Mutable access to the response formatter, e.g. to declare a method
    /// type before `startup`.
    pub fn response_mut(&mut self) -> &mut ResponseFormatter {
        &mut self.response
    }

    /// Parameters merged during `initialize`.
    pub fn data(&self) -> &MergedParameters {
        &self.data
    }
}
