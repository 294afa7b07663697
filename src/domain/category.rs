//! Category records as exchanged with the catalog service.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to a parent category.
///
/// The listing service embeds the parent's name when it has it; only the id
/// is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ParentRef {
    pub fn new(id: u64) -> Self {
        Self { id, name: None }
    }
}

/// A catalog category as returned by the category-listing service.
///
/// `parent: None` means top-level. The parent graph is expected to be
/// acyclic; a parent id that does not resolve against the current list is
/// treated as absent downstream (orphan-as-root).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub parent: Option<ParentRef>,
}

impl Category {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent_id: u64) -> Self {
        self.parent = Some(ParentRef::new(parent_id));
        self
    }

    /// The declared parent id, if any.
    pub fn parent_id(&self) -> Option<u64> {
        self.parent.as_ref().map(|p| p.id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_wire_json_when_deserializing_then_matches_service_shape() {
        let json = r#"{"id":2,"name":"Phones","description":"Mobile","parent":{"id":1,"name":"Electronics"}}"#;
        let category: Category = serde_json::from_str(json).unwrap();

        assert_eq!(category.id, 2);
        assert_eq!(category.name, "Phones");
        assert_eq!(category.description.as_deref(), Some("Mobile"));
        assert_eq!(category.parent_id(), Some(1));
    }

    #[test]
    fn given_null_parent_when_deserializing_then_category_is_top_level() {
        let json = r#"{"id":1,"name":"Electronics","parent":null}"#;
        let category: Category = serde_json::from_str(json).unwrap();

        assert!(category.parent.is_none());
        assert!(category.description.is_none());
    }

    #[test]
    fn given_top_level_category_when_serializing_then_omits_description() {
        let category = Category::new(7, "Stationery");
        let json = serde_json::to_string(&category).unwrap();

        assert_eq!(json, r#"{"id":7,"name":"Stationery","parent":null}"#);
    }
}
