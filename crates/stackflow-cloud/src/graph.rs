//! Resource graph handed to a provisioning backend

use crate::error::{CloudError, Result};
use serde::{Deserialize, Serialize};

/// Provider configuration block emitted at the head of the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderBlock {
    /// Provider name (e.g., "azurerm")
    pub name: String,

    /// Provider-specific configuration
    pub config: serde_json::Value,
}

impl ProviderBlock {
    pub fn new(name: impl Into<String>, config: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// A single declared resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDeclaration {
    /// Resource type (e.g., "azurerm_resource_group", "azurerm_linux_virtual_machine")
    pub resource_type: String,

    /// Logical identifier, unique within the graph across all types
    pub id: String,

    /// Resource attributes
    pub config: serde_json::Value,
}

impl ResourceDeclaration {
    pub fn new(
        resource_type: impl Into<String>,
        id: impl Into<String>,
        config: serde_json::Value,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
            config,
        }
    }

    /// Get the full resource key (type:id)
    pub fn key(&self) -> String {
        format!("{}:{}", self.resource_type, self.id)
    }

    /// Get a configuration value as a specific type
    pub fn get_config<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.config
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Ordered collection of resource declarations.
///
/// Insertion order is preserved so that the serialised graph is byte-identical
/// for identical inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceGraph {
    /// Provider block, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderBlock>,

    /// Resources in declaration order
    pub resources: Vec<ResourceDeclaration>,
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, provider: ProviderBlock) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Append a declaration, rejecting a logical id that is already present
    pub fn add(&mut self, resource: ResourceDeclaration) -> Result<()> {
        let key = resource.key();
        if let Some(existing) = self.resources.iter().find(|r| r.id == resource.id) {
            return Err(CloudError::DuplicateResource(format!(
                "{} (already declared as {})",
                key,
                existing.key()
            )));
        }
        tracing::debug!("Declared {}", key);
        self.resources.push(resource);
        Ok(())
    }

    pub fn get(&self, resource_type: &str, id: &str) -> Option<&ResourceDeclaration> {
        self.resources
            .iter()
            .find(|r| r.resource_type == resource_type && r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceDeclaration> {
        self.resources.iter()
    }

    pub fn by_type(&self, resource_type: &str) -> Vec<&ResourceDeclaration> {
        self.resources
            .iter()
            .filter(|r| r.resource_type == resource_type)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Render the graph as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_preserves_order() {
        let mut graph = ResourceGraph::new();
        graph
            .add(ResourceDeclaration::new("rg", "b", json!({})))
            .unwrap();
        graph
            .add(ResourceDeclaration::new("rg", "a", json!({})))
            .unwrap();

        let ids: Vec<&str> = graph.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut graph = ResourceGraph::new();
        graph
            .add(ResourceDeclaration::new("vm", "alpha", json!({})))
            .unwrap();
        let err = graph
            .add(ResourceDeclaration::new("vm", "alpha", json!({"size": "x"})))
            .unwrap_err();
        assert!(matches!(err, CloudError::DuplicateResource(k) if k.starts_with("vm:alpha")));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_same_id_different_type_rejected() {
        let mut graph = ResourceGraph::new();
        graph
            .add(ResourceDeclaration::new("rg", "alpha", json!({})))
            .unwrap();
        let err = graph
            .add(ResourceDeclaration::new("vm", "alpha", json!({})))
            .unwrap_err();
        assert!(
            matches!(err, CloudError::DuplicateResource(k) if k == "vm:alpha (already declared as rg:alpha)")
        );
        assert_eq!(graph.len(), 1);
        assert!(graph.by_type("vm").is_empty());
    }

    #[test]
    fn test_get_config() {
        let decl = ResourceDeclaration::new("vm", "alpha", json!({"size": "Standard_D2s_v4"}));
        assert_eq!(
            decl.get_config::<String>("size"),
            Some("Standard_D2s_v4".to_string())
        );
        assert_eq!(decl.get_config::<String>("missing"), None);
    }

    #[test]
    fn test_provider_omitted_when_absent() {
        let graph = ResourceGraph::new();
        let json = graph.to_json().unwrap();
        assert!(!json.contains("provider"));
    }
}
