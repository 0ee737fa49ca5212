//! Core domain types shared by the Cribl API crates.
//!
//! Listed entities are deliberately schema-less: the remote services add and
//! rename fields between releases, and callers only rely on an identifier.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Cribl API surfaces reachable from this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CriblApi {
    /// Control plane of a Cribl leader (cloud workspace or on-premise)
    ControlPlane,
    /// Cribl.Cloud organization management plane
    ManagementPlane,
}

impl CriblApi {
    /// Returns the API name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ControlPlane => "control-plane",
            Self::ManagementPlane => "mgmt-plane",
        }
    }
}

impl fmt::Display for CriblApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An open-shaped record returned by a listing operation.
///
/// Field order is preserved exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(Map<String, Value>);

impl Entity {
    /// Look up a raw field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Render a field for display, treating `null` and empty strings as absent.
    #[must_use]
    pub fn display_field(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            value => Some(display_value(value)),
        }
    }

    /// Iterate over every field in received order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

/// Render a JSON value the way a person would expect to read it on a console.
///
/// Strings are shown without quotes; everything else uses compact JSON.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Envelope returned by listing endpoints: `{ "count": n, "items": [...] }`.
///
/// Both fields may be missing; an absent `items` means zero results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    /// Total reported by the server, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Returned records (first page only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<T>>,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            count: None,
            items: None,
        }
    }
}

impl<T> ListResponse<T> {
    /// Build a response carrying the given items.
    #[must_use]
    pub fn from_items(items: Vec<T>) -> Self {
        Self {
            count: Some(items.len() as u64),
            items: Some(items),
        }
    }

    /// Consume the envelope, normalizing an absent collection to an empty one.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entity(value: Value) -> Entity {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_api_names() {
        assert_eq!(CriblApi::ControlPlane.name(), "control-plane");
        assert_eq!(CriblApi::ManagementPlane.to_string(), "mgmt-plane");
    }

    #[test]
    fn test_entity_preserves_field_order() {
        let entity: Entity =
            serde_json::from_str(r#"{"zeta": 1, "id": "g1", "alpha": true}"#).unwrap();
        let keys: Vec<&str> = entity.fields().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["zeta", "id", "alpha"]);
    }

    #[test]
    fn test_entity_display_field() {
        let entity = entity(json!({
            "id": "default",
            "blank": "",
            "none": null,
            "workerCount": 3
        }));

        assert_eq!(entity.display_field("id").as_deref(), Some("default"));
        assert_eq!(entity.display_field("workerCount").as_deref(), Some("3"));
        assert!(entity.display_field("blank").is_none());
        assert!(entity.display_field("none").is_none());
        assert!(entity.display_field("missing").is_none());
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("text")), "text");
        assert_eq!(display_value(&json!(null)), "null");
        assert_eq!(display_value(&json!(false)), "false");
        assert_eq!(display_value(&json!(1.5)), "1.5");
        assert_eq!(display_value(&json!(["a", "b"])), r#"["a","b"]"#);
        assert_eq!(display_value(&json!({"k": 1})), r#"{"k":1}"#);
    }

    #[test]
    fn test_list_response_absent_items_is_empty() {
        let response: ListResponse<Entity> = serde_json::from_str("{}").unwrap();
        assert!(response.items.is_none());
        assert!(response.into_items().is_empty());

        let response: ListResponse<Entity> =
            serde_json::from_str(r#"{"count": 0, "items": null}"#).unwrap();
        assert!(response.into_items().is_empty());
    }

    #[test]
    fn test_list_response_items() {
        let response: ListResponse<Entity> = serde_json::from_value(json!({
            "count": 2,
            "items": [{"id": "g1"}, {"id": "g2"}]
        }))
        .unwrap();

        assert_eq!(response.count, Some(2));
        let items = response.into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].display_field("id").as_deref(), Some("g2"));
    }

    #[test]
    fn test_list_response_from_items() {
        let response = ListResponse::from_items(vec![Entity::default()]);
        assert_eq!(response.count, Some(1));
        assert_eq!(response.into_items().len(), 1);
    }
}
