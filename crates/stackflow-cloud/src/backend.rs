//! Provisioning backend trait definition

use crate::auth::CredentialBundle;
use crate::error::Result;
use crate::graph::ResourceGraph;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Provisioning backend abstraction
///
/// A backend receives a fully declared [`ResourceGraph`] and realizes it
/// against live infrastructure (or, for [`crate::JsonFileBackend`], hands it
/// off on disk). Diffing, locking and rollback are the backend's concern.
#[async_trait]
pub trait ProvisioningBackend: Send + Sync {
    /// Returns the backend name (e.g., "json-file")
    fn name(&self) -> &str;

    /// Hand the declared graph to the backend
    async fn submit(
        &self,
        graph: &ResourceGraph,
        credentials: &CredentialBundle,
    ) -> Result<ApplyResult>;
}

/// Result of submitting a graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyResult {
    /// Successfully handled resources
    pub succeeded: Vec<ResourceResult>,

    /// Failed resources
    pub failed: Vec<ResourceResult>,

    /// Total execution time in milliseconds
    pub duration_ms: u64,
}

impl ApplyResult {
    pub fn new() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn add_success(&mut self, resource_key: String, message: String) {
        self.succeeded.push(ResourceResult {
            resource_key,
            message,
            error: None,
        });
    }

    pub fn add_failure(&mut self, resource_key: String, error: String) {
        self.failed.push(ResourceResult {
            resource_key,
            message: String::new(),
            error: Some(error),
        });
    }
}

impl Default for ApplyResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome for a single resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceResult {
    /// Resource key (type:id)
    pub resource_key: String,

    /// Success message
    pub message: String,

    /// Error message if failed
    pub error: Option<String>,
}
