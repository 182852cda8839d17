//! Filter configuration.
//!
//! Each criterion is an `Option<Vec<_>>`: `None` means the criterion was
//! never configured, `Some(vec![])` means it was configured with an empty
//! list (and therefore rejects everything).
//!
//! Untyped input is validated once here, in [`FilterConfiguration::from_value`],
//! and never reaches the filter itself.

use crate::error::Result;
use crate::types::IdValue;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Configuration key for accepted `deviceId/deviceIdType` signatures.
pub const ACCEPTED_DEVICE_SIGNATURES: &str = "acceptedDeviceSignatures";
/// Configuration key for accepted device identifiers.
pub const ACCEPTED_DEVICE_IDS: &str = "acceptedDeviceIds";
/// Configuration key for accepted device identifier types.
pub const ACCEPTED_DEVICE_ID_TYPES: &str = "acceptedDeviceIdTypes";

/// Acceptance criteria supplied when building a [`SpatemFilter`](crate::SpatemFilter).
///
/// ## Usage
/// ```ignore
/// let config = FilterConfiguration::new()
///     .with_accepted_device_ids(["X1"])
///     .with_accepted_device_id_types([2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_device_signatures: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_device_ids: Option<Vec<IdValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_device_id_types: Option<Vec<IdValue>>,
}

impl FilterConfiguration {
    /// Create an empty configuration (accepts everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate the signatures criterion (builder pattern).
    pub fn with_accepted_device_signatures<I, S>(mut self, signatures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_device_signatures = Some(signatures.into_iter().map(Into::into).collect());
        self
    }

    /// Activate the device-id criterion (builder pattern).
    pub fn with_accepted_device_ids<I, V>(mut self, device_ids: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<IdValue>,
    {
        self.accepted_device_ids = Some(device_ids.into_iter().map(Into::into).collect());
        self
    }

    /// Activate the device-id-type criterion (builder pattern).
    pub fn with_accepted_device_id_types<I, V>(mut self, device_id_types: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<IdValue>,
    {
        self.accepted_device_id_types = Some(device_id_types.into_iter().map(Into::into).collect());
        self
    }

    /// True if no criterion is configured.
    pub fn is_empty(&self) -> bool {
        self.accepted_device_signatures.is_none()
            && self.accepted_device_ids.is_none()
            && self.accepted_device_id_types.is_none()
    }

    /// Build a configuration from untyped JSON.
    ///
    /// ## Rules
    /// - A criterion is active only if its key is present AND its value is an array
    /// - Any other value for a key (string, number, null, object) is ignored
    /// - A value that is not an object yields the empty configuration
    /// - Array elements that could never match a record are dropped
    ///   (non-string signatures; arrays and objects among ids and types);
    ///   the criterion stays active even if every element is dropped
    ///
    /// This never fails.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            if !value.is_null() {
                debug!("Configuration is not an object; no criteria will be active");
            }
            return Self::default();
        };

        Self {
            accepted_device_signatures: array_field(object, ACCEPTED_DEVICE_SIGNATURES)
                .map(signatures_from),
            accepted_device_ids: array_field(object, ACCEPTED_DEVICE_IDS)
                .map(|items| id_values_from(ACCEPTED_DEVICE_IDS, items)),
            accepted_device_id_types: array_field(object, ACCEPTED_DEVICE_ID_TYPES)
                .map(|items| id_values_from(ACCEPTED_DEVICE_ID_TYPES, items)),
        }
    }

    /// Parse a configuration from JSON text.
    ///
    /// # Returns
    /// * `Ok(FilterConfiguration)` - Following the rules of [`Self::from_value`]
    /// * `Err(ConfigError::InvalidJson)` - If the text is not JSON at all
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }
}

impl<'de> Deserialize<'de> for FilterConfiguration {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

fn array_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a [Value]> {
    match object.get(key)? {
        Value::Array(items) => Some(items),
        other => {
            debug!(key, value = %other, "Ignoring non-array configuration value");
            None
        }
    }
}

fn signatures_from(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(signature) => Some(signature.clone()),
            other => {
                warn!(key = ACCEPTED_DEVICE_SIGNATURES, value = %other, "Dropping non-string signature");
                None
            }
        })
        .collect()
}

fn id_values_from(key: &str, items: &[Value]) -> Vec<IdValue> {
    items
        .iter()
        .filter_map(|item| {
            let id_value = IdValue::from_json(item);
            if id_value.is_none() {
                warn!(key, value = %item, "Dropping array or object that cannot be an identifier");
            }
            id_value
        })
        .collect()
}
