//! Cached value encoding
//!
//! Values are stored as JSON scalars: a string for `value`, a boolean for
//! `checked` / `selected`.

use fos_dom::{NodeId, PropertyValue};
use serde::{Deserialize, Serialize};

use crate::FormCacheError;

/// Serialized field state stored in the cache attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CachedValue {
    Bool(bool),
    Text(String),
}

impl CachedValue {
    /// JSON text for the attribute
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse attribute text; anything but a JSON string or boolean is malformed
    pub fn decode(node: NodeId, raw: &str) -> Result<Self, FormCacheError> {
        serde_json::from_str(raw).map_err(|source| FormCacheError::MalformedValue { node, source })
    }
}

impl From<PropertyValue> for CachedValue {
    fn from(value: PropertyValue) -> Self {
        match value {
            PropertyValue::Text(s) => Self::Text(s),
            PropertyValue::Bool(b) => Self::Bool(b),
        }
    }
}

impl From<CachedValue> for PropertyValue {
    fn from(value: CachedValue) -> Self {
        match value {
            CachedValue::Text(s) => Self::Text(s),
            CachedValue::Bool(b) => Self::Bool(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_json() {
        assert_eq!(CachedValue::Text("test@email.com".into()).encode().unwrap(), r#""test@email.com""#);
        assert_eq!(CachedValue::Text("say \"hi\"".into()).encode().unwrap(), r#""say \"hi\"""#);
        assert_eq!(CachedValue::Bool(true).encode().unwrap(), "true");
    }

    #[test]
    fn test_encoded_text_decodes_to_same_value() {
        let value = CachedValue::Text("line one\nline \"two\"".into());
        let encoded = value.encode().unwrap();

        assert_eq!(encoded, r#""line one\nline \"two\"""#);
        assert_eq!(CachedValue::decode(NodeId::ROOT, &encoded).unwrap(), value);
    }

    #[test]
    fn test_decode_scalars() {
        let node = NodeId::ROOT;
        assert_eq!(CachedValue::decode(node, "false").unwrap(), CachedValue::Bool(false));
        assert_eq!(CachedValue::decode(node, r#""audi""#).unwrap(), CachedValue::Text("audi".into()));
    }

    #[test]
    fn test_decode_rejects_other_json() {
        let node = NodeId::ROOT;
        for raw in ["not json", "42", "null", "[true]", r#"{"a":1}"#, ""] {
            let err = CachedValue::decode(node, raw).unwrap_err();
            assert!(matches!(err, FormCacheError::MalformedValue { .. }), "{raw}");
        }
    }
}
