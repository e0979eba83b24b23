//! Service principal credentials consumed by the provider block and backends

use serde::{Deserialize, Serialize};

/// Credentials for authenticating against the cloud provider.
///
/// Issued by an external credential provider and only ever borrowed by the
/// compiler. The secret is skipped when serialising and redacted in `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBundle {
    pub subscription_id: String,
    pub tenant_id: String,
    pub client_id: String,
    #[serde(skip_serializing, default)]
    pub client_secret: String,
}

impl CredentialBundle {
    pub fn new(
        subscription_id: impl Into<String>,
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Whether a usable subscription id is present
    pub fn has_subscription(&self) -> bool {
        !self.subscription_id.trim().is_empty()
    }
}

impl std::fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("subscription_id", &self.subscription_id)
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
