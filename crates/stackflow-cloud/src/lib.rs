//! StackFlow Cloud Contract
//!
//! This crate defines the contract between the topology compiler and the
//! provisioning backend: the declared resource graph, the credentials a
//! backend authenticates with, and the backend trait itself.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 stackflow CLI                    │
//! │            (stackflow synth/validate)            │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               stackflow-core                     │
//! │   network builder · allocator · compiler         │
//! └─────────────────┬───────────────────────────────┘
//!                   │ ResourceGraph
//! ┌─────────────────▼───────────────────────────────┐
//! │               stackflow-cloud                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │   trait ProvisioningBackend { ... }       │   │
//! │  └──────────────────────────────────────────┘   │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼───────┐
//! │ json-file     │  (external engines plug in here)
//! └───────────────┘
//! ```

pub mod auth;
pub mod backend;
pub mod error;
pub mod file;
pub mod graph;

// Re-exports
pub use auth::CredentialBundle;
pub use backend::{ApplyResult, ProvisioningBackend, ResourceResult};
pub use error::{CloudError, Result};
pub use file::JsonFileBackend;
pub use graph::{ProviderBlock, ResourceDeclaration, ResourceGraph};
