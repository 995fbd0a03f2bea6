//! Payload decoder — JSON text after the marker into a [`SharePayload`].

use crate::error::DecodeError;
use crate::types::SharePayload;

/// Decode `payload` as a JSON object.
///
/// Field presence is preserved as found; checking that required fields exist
/// is the normalizer's job. Truncated input, non-object JSON and fields of the
/// wrong JSON type all fail here.
pub fn decode(payload: &str) -> Result<SharePayload, DecodeError> {
    if payload.is_empty() {
        return Err(DecodeError::new(payload, "empty payload"));
    }
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| DecodeError::new(payload, e.to_string()))?;
    if !value.is_object() {
        return Err(DecodeError::new(payload, "payload is not a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| DecodeError::new(payload, e.to_string()))
}
