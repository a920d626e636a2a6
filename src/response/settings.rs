//! Controller-declared response properties.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::Error;

use super::MethodType;

/// Values a controller declares to steer status derivation.
///
/// An explicit `response_code` that is in the status table wins over the
/// method-type defaults; an explicit `response_message` always replaces the
/// derived message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSettings {
    /// Status forced by the controller
    pub response_code: Option<u16>,
    /// Message forced by the controller
    pub response_message: Option<String>,
    /// Declared or inferred method type
    pub method_type: Option<MethodType>,
    /// Outcome of the controller action
    pub method_success: bool,
}

/// Names of the properties reachable through the string-keyed accessors.
///
/// Names are matched ignoring case and underscores, so `responseCode`,
/// `ResponseCode` and `response_code` all address the same property.
/// Any other name is an [`Error::UnknownProperty`].
///
/// # Examples
///
/// ```
/// use json_api_plugins::response::ResponseProperty;
///
/// assert_eq!("response_code".parse::<ResponseProperty>().unwrap(), ResponseProperty::ResponseCode);
/// assert!("responseCod".parse::<ResponseProperty>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseProperty {
    /// `responseCode`
    ResponseCode,
    /// `responseMessage`
    ResponseMessage,
    /// `methodType`
    MethodType,
    /// `methodSuccess`
    MethodSuccess,
}

impl ResponseProperty {
    /// The camel-case property name.
    pub fn name(self) -> &'static str {
        match self {
            ResponseProperty::ResponseCode => "responseCode",
            ResponseProperty::ResponseMessage => "responseMessage",
            ResponseProperty::MethodType => "methodType",
            ResponseProperty::MethodSuccess => "methodSuccess",
        }
    }
}

impl fmt::Display for ResponseProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResponseProperty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "responsecode" => Ok(ResponseProperty::ResponseCode),
            "responsemessage" => Ok(ResponseProperty::ResponseMessage),
            "methodtype" => Ok(ResponseProperty::MethodType),
            "methodsuccess" => Ok(ResponseProperty::MethodSuccess),
            _ => Err(Error::UnknownProperty(s.to_string())),
        }
    }
}

impl ResponseSettings {
    /// Assigns a property from a loosely typed value.
    ///
    /// `null` and `false` clear optional properties. Method types are
    /// strings; method success accepts booleans and numbers.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPropertyValue` when the value has the wrong
    /// shape for the property.
    pub fn assign(&mut self, property: ResponseProperty, value: Value) -> Result<(), Error> {
        let invalid = |reason: &str| Error::InvalidPropertyValue {
            property: property.name(),
            reason: reason.to_string(),
        };
        match property {
            ResponseProperty::ResponseCode => {
                self.response_code = match value {
                    Value::Null | Value::Bool(false) => None,
                    Value::Number(n) => Some(
                        n.as_u64()
                            .and_then(|code| u16::try_from(code).ok())
                            .ok_or_else(|| invalid("expected an HTTP status code"))?,
                    ),
                    _ => return Err(invalid("expected an HTTP status code")),
                };
            }
            ResponseProperty::ResponseMessage => {
                self.response_message = match value {
                    Value::Null | Value::Bool(false) => None,
                    Value::String(message) if message.is_empty() => None,
                    Value::String(message) => Some(message),
                    _ => return Err(invalid("expected a string")),
                };
            }
            ResponseProperty::MethodType => {
                self.method_type = match value {
                    Value::Null | Value::Bool(false) => None,
                    Value::String(name) if name.is_empty() => None,
                    Value::String(name) => Some(MethodType::parse(&name)),
                    _ => return Err(invalid("expected a method type name")),
                };
            }
            ResponseProperty::MethodSuccess => {
                self.method_success = match value {
                    Value::Bool(flag) => flag,
                    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
                    Value::Null => false,
                    _ => return Err(invalid("expected a boolean")),
                };
            }
        }
        Ok(())
    }

    /// Reads a property as a loosely typed value.
    pub fn read(&self, property: ResponseProperty) -> Value {
        match property {
            ResponseProperty::ResponseCode => self.response_code.map_or(Value::Null, Value::from),
            ResponseProperty::ResponseMessage => self
                .response_message
                .clone()
                .map_or(Value::Null, Value::String),
            ResponseProperty::MethodType => self
                .method_type
                .as_ref()
                .map_or(Value::Null, |m| Value::String(m.as_str().to_string())),
            ResponseProperty::MethodSuccess => Value::Bool(self.method_success),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn property_names_accept_common_spellings() {
        for name in ["responseCode", "ResponseCode", "response_code", "RESPONSECODE"] {
            assert_eq!(name.parse::<ResponseProperty>().unwrap(), ResponseProperty::ResponseCode);
        }
        assert_eq!(
            "method_success".parse::<ResponseProperty>().unwrap(),
            ResponseProperty::MethodSuccess
        );
    }

    #[test]
    fn unknown_property_fails_loudly() {
        let err = "statusCode".parse::<ResponseProperty>().unwrap_err();
        assert!(matches!(err, Error::UnknownProperty(ref name) if name == "statusCode"));
    }

    #[test]
    fn assign_and_read_round_trip() {
        let mut settings = ResponseSettings::default();
        settings.assign(ResponseProperty::ResponseCode, json!(404)).unwrap();
        settings.assign(ResponseProperty::ResponseMessage, json!("Not here")).unwrap();
        settings.assign(ResponseProperty::MethodType, json!("View")).unwrap();
        settings.assign(ResponseProperty::MethodSuccess, json!(1)).unwrap();

        assert_eq!(settings.response_code, Some(404));
        assert_eq!(settings.method_type, Some(MethodType::View));
        assert!(settings.method_success);
        assert_eq!(settings.read(ResponseProperty::ResponseCode), json!(404));
        assert_eq!(settings.read(ResponseProperty::MethodType), json!("view"));
        assert_eq!(settings.read(ResponseProperty::ResponseMessage), json!("Not here"));
    }

    #[test]
    fn falsy_values_clear_optional_properties() {
        let mut settings = ResponseSettings {
            response_code: Some(403),
            response_message: Some("nope".to_string()),
            method_type: Some(MethodType::Add),
            method_success: true,
        };
        settings.assign(ResponseProperty::ResponseCode, json!(false)).unwrap();
        settings.assign(ResponseProperty::ResponseMessage, json!("")).unwrap();
        settings.assign(ResponseProperty::MethodType, json!(null)).unwrap();
        settings.assign(ResponseProperty::MethodSuccess, json!(0)).unwrap();

        assert_eq!(settings, ResponseSettings::default());
    }

    #[test]
    fn mistyped_values_are_rejected() {
        let mut settings = ResponseSettings::default();
        assert!(settings
            .assign(ResponseProperty::ResponseCode, json!("404"))
            .is_err());
        assert!(settings
            .assign(ResponseProperty::ResponseCode, json!(70000))
            .is_err());
        assert!(settings
            .assign(ResponseProperty::MethodType, json!(3))
            .is_err());
        assert!(settings
            .assign(ResponseProperty::MethodSuccess, json!("yes"))
            .is_err());
    }
}
