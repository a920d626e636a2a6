//! Component settings.
//!
//! Settings arrive from the host as a loose JSON object. Only the options a
//! component knows about are read; anything else in the object is ignored,
//! and a missing or empty object leaves every option at its default.

use std::env;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Environment variable consulted by [`DataSourceConfig::from_env`].
pub const BASE_URL_ENV: &str = "JSON_API_BASE_URL";

/// Options for the request-data merger.
///
/// # Examples
///
/// ```
/// use json_api_plugins::RequestDataConfig;
/// use serde_json::json;
///
/// let config = RequestDataConfig::from_settings(&json!({"form": true, "colour": "red"})).unwrap();
/// assert!(config.form);
/// assert_eq!(config.key, "requestData");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDataConfig {
    /// Request slot the merged map is stored under
    pub key: String,
    /// Include route (named) parameters
    pub named: bool,
    /// Include query-string parameters
    pub query: bool,
    /// Include form body parameters
    pub form: bool,
}

impl Default for RequestDataConfig {
    fn default() -> Self {
        Self {
            key: "requestData".to_string(),
            named: true,
            query: true,
            form: false,
        }
    }
}

impl RequestDataConfig {
    /// Builds a config from a host settings object.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` when a known option has the wrong type
    /// (e.g. `"named": "yes"`).
    pub fn from_settings(settings: &Value) -> Result<Self> {
        from_settings(settings)
    }
}

/// Options for the remote JSON API data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceConfig {
    /// Root URL of the remote API
    pub base_url: String,
}

impl DataSourceConfig {
    /// Creates a config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Builds a config from a host settings object.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` when `base_url` is not a string.
    pub fn from_settings(settings: &Value) -> Result<Self> {
        from_settings(settings)
    }

    /// Reads the base URL from the `JSON_API_BASE_URL` environment variable.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` when the variable is unset or not
    /// valid unicode.
    pub fn from_env() -> Result<Self> {
        env::var(BASE_URL_ENV)
            .map(Self::new)
            .map_err(|e| Error::InvalidConfig(format!("{BASE_URL_ENV}: {e}")))
    }
}

fn from_settings<T>(settings: &Value) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    match settings {
        Value::Object(map) if !map.is_empty() => {
            serde_json::from_value(settings.clone()).map_err(|e| Error::InvalidConfig(e.to_string()))
        }
        _ => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_data_defaults() {
        let config = RequestDataConfig::default();
        assert_eq!(config.key, "requestData");
        assert!(config.named);
        assert!(config.query);
        assert!(!config.form);
    }

    #[test]
    fn empty_or_non_object_settings_keep_defaults() {
        assert_eq!(
            RequestDataConfig::from_settings(&json!({})).unwrap(),
            RequestDataConfig::default()
        );
        assert_eq!(
            RequestDataConfig::from_settings(&json!(null)).unwrap(),
            RequestDataConfig::default()
        );
        assert_eq!(
            RequestDataConfig::from_settings(&json!(["form"])).unwrap(),
            RequestDataConfig::default()
        );
    }

    #[test]
    fn known_options_override_defaults_and_unknown_are_ignored() {
        let config =
            RequestDataConfig::from_settings(&json!({"key": "input", "query": false, "extra": 1}))
                .unwrap();
        assert_eq!(config.key, "input");
        assert!(!config.query);
        assert!(config.named);
    }

    #[test]
    fn mistyped_option_is_a_config_error() {
        let err = RequestDataConfig::from_settings(&json!({"named": "yes"})).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn data_source_from_settings() {
        let config =
            DataSourceConfig::from_settings(&json!({"base_url": "https://api.example.com"}))
                .unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
    }
}
