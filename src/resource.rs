//! Resource kinds and schema-less documents
//!
//! The dashboard knows four named collections. Their documents carry no
//! fixed schema; the only field the crate ever looks at is `_id`, and only
//! to key rendered lists.

use serde_json::{Map, Value};
use std::fmt;

/// A schema-less document as returned by the data service.
///
/// Key order is preserved as received.
pub type Document = Map<String, Value>;

/// Named document collection served by the data service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Users,
    Customers,
    Jobs,
    Pipelines,
}

impl ResourceKind {
    /// All kinds in dispatch and render order
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Users,
        ResourceKind::Customers,
        ResourceKind::Jobs,
        ResourceKind::Pipelines,
    ];

    /// Collection name in the backing store
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Users => "users",
            ResourceKind::Customers => "customers",
            ResourceKind::Jobs => "jobs",
            ResourceKind::Pipelines => "pipelines",
        }
    }

    /// Endpoint path relative to the API base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            ResourceKind::Users => "/users",
            ResourceKind::Customers => "/customers",
            ResourceKind::Jobs => "/jobs",
            ResourceKind::Pipelines => "/pipelines",
        }
    }

    /// Route served by the data service
    pub fn route(&self) -> String {
        format!("/api{}", self.endpoint())
    }

    /// Section title
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Users => "Users",
            ResourceKind::Customers => "Customers",
            ResourceKind::Jobs => "Jobs",
            ResourceKind::Pipelines => "Pipelines",
        }
    }

    /// Stable slot index, matching [`ResourceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            ResourceKind::Users => 0,
            ResourceKind::Customers => 1,
            ResourceKind::Jobs => 2,
            ResourceKind::Pipelines => 3,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// Identity key of a document, if it carries a usable `_id`
pub fn document_id(doc: &Document) -> Option<String> {
    match doc.get("_id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        // Extended JSON form, e.g. {"$oid": "..."}
        Value::Object(inner) => inner.get("$oid").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_paths() {
        assert_eq!(ResourceKind::Users.endpoint(), "/users");
        assert_eq!(ResourceKind::Pipelines.route(), "/api/pipelines");
        assert_eq!(ResourceKind::Customers.collection(), "customers");
        assert_eq!(ResourceKind::Jobs.to_string(), "jobs");
    }

    #[test]
    fn test_index_matches_all() {
        for (i, kind) in ResourceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_document_id() {
        let doc = json!({"_id": "1", "name": "Bob"});
        assert_eq!(document_id(doc.as_object().unwrap()), Some("1".to_string()));

        let doc = json!({"_id": {"$oid": "65a1b2c3d4e5f60718293a4b"}});
        assert_eq!(
            document_id(doc.as_object().unwrap()),
            Some("65a1b2c3d4e5f60718293a4b".to_string())
        );

        let doc = json!({"name": "no id"});
        assert_eq!(document_id(doc.as_object().unwrap()), None);
    }

    #[test]
    fn test_document_preserves_key_order() {
        let doc: Document = serde_json::from_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
