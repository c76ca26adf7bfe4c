//! Session attribute handling
//!
//! The voice platform owns the per-session attribute mapping and hands
//! it to the backend on every request. The backend reads and writes one
//! field, `conversationHistory`; everything else in the mapping belongs
//! to the platform and must round-trip untouched. Attributes are
//! explicit values: handlers receive the current attributes and return
//! the updated attributes, never mutating platform state by reference.

use crate::conversation::Transcript;
use serde::{Deserialize, Serialize};

/// Per-session attributes exchanged with the voice platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionAttributes {
    /// The conversation transcript retained across turns of the session
    #[serde(default, rename = "conversationHistory")]
    pub conversation_history: Transcript,

    /// Platform-owned attributes this backend does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SessionAttributes {
    /// Creates empty session attributes
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_empty() {
        let attrs = SessionAttributes::new();
        assert!(attrs.conversation_history.is_empty());
        assert!(attrs.extra.is_empty());
    }

    #[test]
    fn test_history_field_name_is_camel_case() {
        let mut attrs = SessionAttributes::new();
        attrs.conversation_history = Transcript::seeded("prompt", "ack");
        let json = serde_json::to_value(&attrs).unwrap();
        assert!(json.get("conversationHistory").is_some());
        assert_eq!(json["conversationHistory"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_history_deserializes_empty() {
        let attrs: SessionAttributes = serde_json::from_value(json!({})).unwrap();
        assert!(attrs.conversation_history.is_empty());
    }

    #[test]
    fn test_unknown_attributes_roundtrip() {
        let value = json!({
            "conversationHistory": [],
            "launchCount": 3,
            "locale": "en-US"
        });
        let attrs: SessionAttributes = serde_json::from_value(value).unwrap();
        assert_eq!(attrs.extra["launchCount"], json!(3));
        assert_eq!(attrs.extra["locale"], json!("en-US"));

        let back = serde_json::to_value(&attrs).unwrap();
        assert_eq!(back["launchCount"], json!(3));
        assert_eq!(back["locale"], json!("en-US"));
    }

    #[test]
    fn test_history_roundtrip() {
        let mut attrs = SessionAttributes::new();
        attrs.conversation_history = Transcript::seeded("prompt", "ack");
        attrs.conversation_history.push_user("hello");

        let json = serde_json::to_string(&attrs).unwrap();
        let back: SessionAttributes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, attrs);
    }
}
