//! # Core Types
//!
//! Graph-side records: [`UserProfile`] (User node properties) and [`Recommendation`]
//! (preference values grouped by category).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::KnowledgeError;

/// Property name that keys User nodes.
pub const USER_ID_KEY: &str = "user_id";

/// Maximum number of category groups returned by a recommendations query.
pub const MAX_RECOMMENDATION_CATEGORIES: usize = 5;

/// Arbitrary profile attributes (property name → scalar or list of scalars).
pub type ProfileAttributes = BTreeMap<String, Value>;

/// Properties of a User node. Serialized flat, exactly like the node: `{"user_id": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(flatten)]
    pub attributes: ProfileAttributes,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            attributes: ProfileAttributes::new(),
        }
    }

    /// Builds a profile from raw node properties. The `user_id` property is lifted out of the
    /// attributes; when it is missing or not a string, `fallback_user_id` is used.
    pub fn from_properties(fallback_user_id: &str, mut properties: ProfileAttributes) -> Self {
        let user_id = match properties.remove(USER_ID_KEY) {
            Some(Value::String(id)) => id,
            _ => fallback_user_id.to_string(),
        };
        Self {
            user_id,
            attributes: properties,
        }
    }

    /// All properties including `user_id`, as stored on the node.
    pub fn to_properties(&self) -> ProfileAttributes {
        let mut props = self.attributes.clone();
        props.insert(USER_ID_KEY.to_string(), Value::String(self.user_id.clone()));
        props
    }

    /// Merges `updates` into the attributes: same keys are overwritten, `null` removes a key,
    /// others are left untouched.
    pub fn merge(&mut self, updates: &ProfileAttributes) {
        for (key, value) in updates {
            if key == USER_ID_KEY {
                continue;
            }
            if value.is_null() {
                self.attributes.remove(key);
            } else {
                self.attributes.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Preference values a user likes, grouped under one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub preferences: Vec<String>,
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

/// Whether a value can be stored as a node property: scalars, `null` (removal), or lists of scalars.
pub fn is_storable_property(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.iter().all(is_scalar),
        other => is_scalar(other),
    }
}

/// Drops the `user_id` key and rejects values that cannot live on a node.
pub fn sanitize_attributes(
    attributes: &ProfileAttributes,
) -> Result<ProfileAttributes, KnowledgeError> {
    let mut clean = ProfileAttributes::new();
    for (key, value) in attributes {
        if key == USER_ID_KEY {
            continue;
        }
        if !is_storable_property(value) {
            return Err(KnowledgeError::InvalidProperty(key.clone()));
        }
        clean.insert(key.clone(), value.clone());
    }
    Ok(clean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(v: Value) -> ProfileAttributes {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_profile_serializes_flat() {
        let mut p = UserProfile::new("u1");
        p.attributes.insert("budget".into(), json!("mid"));
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v, json!({"user_id": "u1", "budget": "mid"}));
    }

    #[test]
    fn test_from_properties_lifts_user_id() {
        let p = UserProfile::from_properties("x", attrs(json!({"user_id": "u2", "age": 30})));
        assert_eq!(p.user_id, "u2");
        assert_eq!(p.attributes.len(), 1);
        assert_eq!(p.to_properties()["user_id"], json!("u2"));
    }

    #[test]
    fn test_merge_overwrites_adds_and_removes() {
        let mut p = UserProfile::new("u1");
        p.merge(&attrs(json!({"a": 1, "b": 2})));
        p.merge(&attrs(json!({"b": 3, "c": 4, "a": null, "user_id": "hijack"})));
        assert_eq!(p.user_id, "u1");
        assert_eq!(p.attributes, attrs(json!({"b": 3, "c": 4})));
    }

    #[test]
    fn test_storable_properties() {
        assert!(is_storable_property(&json!("s")));
        assert!(is_storable_property(&json!(1.5)));
        assert!(is_storable_property(&json!(["a", "b"])));
        assert!(is_storable_property(&Value::Null));
        assert!(!is_storable_property(&json!({"nested": true})));
        assert!(!is_storable_property(&json!([{"x": 1}])));
    }

    #[test]
    fn test_sanitize_rejects_nested_and_strips_user_id() {
        let ok = sanitize_attributes(&attrs(json!({"user_id": "z", "name": "Ann"}))).unwrap();
        assert_eq!(ok, attrs(json!({"name": "Ann"})));
        let err = sanitize_attributes(&attrs(json!({"address": {"city": "Oslo"}}))).unwrap_err();
        assert!(matches!(err, KnowledgeError::InvalidProperty(k) if k == "address"));
    }
}
