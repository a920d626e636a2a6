//! JSON response formatting.
//!
//! [`ResponseFormatter`] turns the outcome of a controller action into a
//! [`ResponseEnvelope`]: it infers a [`MethodType`] from the action, rejects
//! verbs that do not match it, derives the status from the
//! [`StatusCodeTable`] and writes status line, paging headers and body to a
//! [`ResponseSink`](crate::ResponseSink).

mod envelope;
mod formatter;
mod hooks;
mod method_type;
mod settings;
mod status;

pub use envelope::ResponseEnvelope;
pub use formatter::ResponseFormatter;
pub use hooks::{ControllerHooks, StatusOutcome};
pub use method_type::MethodType;
pub use settings::{ResponseProperty, ResponseSettings};
pub use status::{
    derive_status, StatusCodeTable, HTTP_VERSION, INTERNAL_SERVER_ERROR, NOT_IMPLEMENTED,
    NOT_IMPLEMENTED_MESSAGE,
};
