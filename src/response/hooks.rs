use serde_json::Value;

use super::MethodType;

/// Status, message and success flag about to be committed to the envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusOutcome {
    /// HTTP status; `None` leaves the envelope status unset
    pub status: Option<u16>,
    /// Outcome message
    pub message: Option<String>,
    /// Whether the controller action succeeded
    pub success: bool,
}

/// Optional controller callbacks invoked by the response formatter.
///
/// Every method defaults to passing its input through unchanged, so an
/// implementation only overrides the points it cares about.
///
/// # Examples
///
/// ```
/// use json_api_plugins::response::{ControllerHooks, MethodType};
///
/// /// Treats the `search` action as a listing.
/// struct SearchIsIndex;
///
/// impl ControllerHooks for SearchIsIndex {
///     fn override_method_type(&self, method_type: Option<MethodType>) -> Option<MethodType> {
///         method_type.or(Some(MethodType::Index))
///     }
/// }
/// ```
pub trait ControllerHooks {
    /// Rewrites the method type right before the verb check in `startup`.
    fn override_method_type(&self, method_type: Option<MethodType>) -> Option<MethodType> {
        method_type
    }

    /// Rewrites the derived status before it is committed.
    fn override_status(&self, outcome: StatusOutcome) -> StatusOutcome {
        outcome
    }

    /// Transforms the payload right before serialization.
    fn transform_payload(&self, payload: Value) -> Value {
        payload
    }
}
