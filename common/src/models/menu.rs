//! Sidebar navigation tree.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A node of the sidebar menu.
///
/// `key` identifies the node among its siblings and is what the context
/// menu receives; `label` is the display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MenuItem {
    pub key: String,
    pub label: String,
    /// Child nodes, empty for leaves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(no_recursion)]
    pub children: Vec<MenuItem>,
    /// Set when `key` names a real backend database.
    #[serde(default)]
    pub database_backed: bool,
}

impl MenuItem {
    /// A leaf node.
    pub fn leaf(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            children: Vec::new(),
            database_backed: false,
        }
    }

    /// A static group node.
    pub fn group(key: impl Into<String>, label: impl Into<String>, children: Vec<MenuItem>) -> Self {
        Self {
            children,
            ..Self::leaf(key, label)
        }
    }

    /// A group for a backend database, keyed and labeled by its name.
    pub fn database(name: &str, tables: &[String]) -> Self {
        Self {
            key: name.to_string(),
            label: name.to_string(),
            children: tables.iter().map(|t| Self::leaf(t.as_str(), t.as_str())).collect(),
            database_backed: true,
        }
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
