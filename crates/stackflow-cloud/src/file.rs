//! JSON file backend
//!
//! Writes the declared graph to `<out_dir>/<stem>.graph.json` for an external
//! provisioning engine to pick up. The previous file, if any, is kept as
//! `<stem>.graph.json.backup`.

use crate::auth::CredentialBundle;
use crate::backend::{ApplyResult, ProvisioningBackend};
use crate::error::{CloudError, Result};
use crate::graph::ResourceGraph;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

const GRAPH_SUFFIX: &str = "graph.json";
const BACKUP_SUFFIX: &str = "backup";

/// Backend that hands the graph off as a JSON file
pub struct JsonFileBackend {
    out_dir: PathBuf,
    stem: String,
}

impl JsonFileBackend {
    pub fn new(out_dir: impl AsRef<Path>, stem: impl Into<String>) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
            stem: stem.into(),
        }
    }

    /// Path the graph is written to
    pub fn graph_path(&self) -> PathBuf {
        self.out_dir.join(format!("{}.{}", self.stem, GRAPH_SUFFIX))
    }

    fn backup_path(&self) -> PathBuf {
        self.out_dir
            .join(format!("{}.{}.{}", self.stem, GRAPH_SUFFIX, BACKUP_SUFFIX))
    }

    async fn ensure_out_dir(&self) -> Result<()> {
        if !self.out_dir.exists() {
            fs::create_dir_all(&self.out_dir).await?;
            tracing::debug!("Created output directory: {}", self.out_dir.display());
        }
        Ok(())
    }

    /// Write the graph, rotating any previous file to the backup path
    pub async fn write(&self, graph: &ResourceGraph) -> Result<PathBuf> {
        self.ensure_out_dir().await?;

        let path = self.graph_path();
        let backup = self.backup_path();

        if path.exists() {
            if backup.exists() {
                fs::remove_file(&backup).await?;
            }
            fs::rename(&path, &backup).await?;
            tracing::debug!("Rotated previous graph to {}", backup.display());
        }

        let content = graph.to_json()?;
        fs::write(&path, content).await?;

        tracing::info!(
            resources = graph.len(),
            path = %path.display(),
            "Wrote resource graph"
        );
        Ok(path)
    }

    /// Read a previously written graph back
    pub async fn load(&self) -> Result<ResourceGraph> {
        let content = fs::read_to_string(self.graph_path()).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl ProvisioningBackend for JsonFileBackend {
    fn name(&self) -> &str {
        "json-file"
    }

    async fn submit(
        &self,
        graph: &ResourceGraph,
        credentials: &CredentialBundle,
    ) -> Result<ApplyResult> {
        if !credentials.has_subscription() {
            return Err(CloudError::InvalidConfig(
                "subscription id is required to submit a graph".to_string(),
            ));
        }

        let start = std::time::Instant::now();
        let path = self.write(graph).await?;

        let mut result = ApplyResult::new();
        for resource in graph.iter() {
            result.add_success(
                resource.key(),
                format!("declared in {}", path.display()),
            );
        }
        result.duration_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ResourceDeclaration;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample_graph() -> ResourceGraph {
        let mut graph = ResourceGraph::new();
        graph
            .add(ResourceDeclaration::new(
                "azurerm_resource_group",
                "stg-rg-leader",
                json!({"name": "stg-rg-leader", "location": "eastus"}),
            ))
            .unwrap();
        graph
    }

    fn creds() -> CredentialBundle {
        CredentialBundle::new("sub-123", "tenant", "client", "secret")
    }

    #[tokio::test]
    async fn test_submit_writes_graph() {
        let temp_dir = tempdir().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().join("out"), "stg-leader");

        let result = backend.submit(&sample_graph(), &creds()).await.unwrap();
        assert!(result.is_success());
        assert_eq!(result.succeeded.len(), 1);
        assert_eq!(
            result.succeeded[0].resource_key,
            "azurerm_resource_group:stg-rg-leader"
        );

        let loaded = backend.load().await.unwrap();
        assert_eq!(loaded, sample_graph());
    }

    #[tokio::test]
    async fn test_previous_graph_is_backed_up() {
        let temp_dir = tempdir().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path(), "stg-leader");

        backend.write(&ResourceGraph::new()).await.unwrap();
        backend.write(&sample_graph()).await.unwrap();

        let backup = temp_dir.path().join("stg-leader.graph.json.backup");
        assert!(backup.exists());
        let previous: ResourceGraph =
            serde_json::from_str(&std::fs::read_to_string(backup).unwrap()).unwrap();
        assert!(previous.is_empty());
    }

    #[tokio::test]
    async fn test_submit_requires_subscription() {
        let temp_dir = tempdir().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path(), "stg-leader");
        let empty = CredentialBundle::new("", "tenant", "client", "secret");

        let err = backend.submit(&sample_graph(), &empty).await.unwrap_err();
        assert!(matches!(err, CloudError::InvalidConfig(_)));
        assert!(!backend.graph_path().exists());
    }

    #[tokio::test]
    async fn test_secret_never_written() {
        let temp_dir = tempdir().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path(), "stg-leader");
        backend.submit(&sample_graph(), &creds()).await.unwrap();

        let content = std::fs::read_to_string(backend.graph_path()).unwrap();
        assert!(!content.contains("secret"));
    }
}
