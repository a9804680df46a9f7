//! Collaborator trait definitions
//!
//! The pipeline never talks to a cloud API itself. A `ProvisioningClient`
//! creates (or looks up) each resource and hands back a handle; a
//! `CatalogClient` publishes the finished product. Implementations own
//! their transport, credentials and retry behaviour.

use anyhow::Result;
use async_trait::async_trait;

use cdk_bootstrap_core::{BucketHandle, KeyHandle, RegistryHandle, RoleHandle};
use cdk_bootstrap_policy::{EncryptionDecision, RoleSpec};

use crate::plan::BootstrapPlan;
use crate::product::{ListingEntry, ProductDefinition};
use crate::resources::{BucketSpec, RegistrySpec};

/// Creates the resources of one bootstrap pass
#[async_trait]
pub trait ProvisioningClient: Send + Sync {
    /// Create the key for `NewManagedKey`, otherwise resolve the existing one
    ///
    /// Must never create a key for `ExistingManagedKeyByAlias`. The alias
    /// must be resolved to the ARN of the key it points at; an alias ARN is
    /// not a valid resource in a key policy statement.
    async fn create_or_lookup_key(&self, decision: &EncryptionDecision) -> Result<KeyHandle>;

    async fn create_bucket(&self, spec: &BucketSpec) -> Result<BucketHandle>;

    async fn create_registry(&self, spec: &RegistrySpec) -> Result<RegistryHandle>;

    /// Create one role; the returned ARN must equal `spec.arn`
    async fn create_role(&self, spec: &RoleSpec) -> Result<RoleHandle>;
}

/// Publishes a bootstrap plan as a self-service product
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn register_product(
        &self,
        plan: &BootstrapPlan,
        product: &ProductDefinition,
    ) -> Result<ListingEntry>;
}
