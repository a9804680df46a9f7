//! In-memory provisioning and catalog collaborator
//!
//! Behaves like an empty account: every name can be created once, keys get
//! random ids and the provider-managed key always exists behind a stable
//! key id. Useful for dry
//! runs and for exercising the pipeline without a cloud.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use cdk_bootstrap_core::{
    BootstrapEnvironment, BucketHandle, KeyHandle, RegistryHandle, RoleHandle,
};
use cdk_bootstrap_policy::{EncryptionDecision, ManagedKeySpec, RoleSpec};

use crate::plan::BootstrapPlan;
use crate::product::{ListingEntry, ProductDefinition};
use crate::resources::{BucketSpec, RegistrySpec};
use crate::traits::{CatalogClient, ProvisioningClient};

#[derive(Debug, Default)]
struct State {
    /// Created keys by alias
    keys: BTreeMap<String, (KeyHandle, ManagedKeySpec)>,
    /// Provider-managed keys by alias, resolved on first lookup
    managed_keys: BTreeMap<String, KeyHandle>,
    buckets: BTreeMap<String, BucketSpec>,
    registries: BTreeMap<String, RegistrySpec>,
    roles: BTreeMap<String, RoleSpec>,
    listings: Vec<ListingEntry>,
    calls: Vec<String>,
}

/// Collaborator holding every created resource in memory
pub struct InMemoryProvisioner {
    env: BootstrapEnvironment,
    state: Mutex<State>,
}

impl InMemoryProvisioner {
    pub fn new(env: BootstrapEnvironment) -> Self {
        Self {
            env,
            state: Mutex::new(State::default()),
        }
    }

    /// Collaborator calls so far, e.g. `create_role(cdk-...-lookup-role-...)`
    pub async fn calls(&self) -> Vec<String> {
        self.state.lock().await.calls.clone()
    }

    pub async fn was_called(&self, operation: &str) -> bool {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .any(|c| c.starts_with(operation))
    }

    pub async fn created_key(&self, alias: &str) -> Option<ManagedKeySpec> {
        self.state
            .lock()
            .await
            .keys
            .get(alias)
            .map(|(_, spec)| spec.clone())
    }

    pub async fn key_count(&self) -> usize {
        self.state.lock().await.keys.len()
    }

    pub async fn bucket(&self, name: &str) -> Option<BucketSpec> {
        self.state.lock().await.buckets.get(name).cloned()
    }

    pub async fn registry(&self, name: &str) -> Option<RegistrySpec> {
        self.state.lock().await.registries.get(name).cloned()
    }

    pub async fn role(&self, name: &str) -> Option<RoleSpec> {
        self.state.lock().await.roles.get(name).cloned()
    }

    pub async fn listings(&self) -> Vec<ListingEntry> {
        self.state.lock().await.listings.clone()
    }
}

#[async_trait]
impl ProvisioningClient for InMemoryProvisioner {
    async fn create_or_lookup_key(&self, decision: &EncryptionDecision) -> Result<KeyHandle> {
        let mut state = self.state.lock().await;
        state
            .calls
            .push(format!("create_or_lookup_key({})", decision.mode_name()));

        let handle = match decision {
            EncryptionDecision::NewManagedKey(spec) => {
                if state.keys.contains_key(&spec.alias) {
                    bail!("alias {} already exists", spec.alias);
                }
                let handle = KeyHandle::new(self.env.key_arn(&Uuid::new_v4().to_string()));
                state
                    .keys
                    .insert(spec.alias.clone(), (handle.clone(), spec.clone()));
                handle
            }
            // Resolve the alias to the key behind it, the way the key
            // service does; the same alias always yields the same key
            EncryptionDecision::ExistingManagedKeyByAlias { alias } => {
                let env = &self.env;
                state
                    .managed_keys
                    .entry(alias.clone())
                    .or_insert_with(|| KeyHandle::new(env.key_arn(&Uuid::new_v4().to_string())))
                    .clone()
            }
            EncryptionDecision::ExternalKeyByReference { reference } => {
                if reference.starts_with("arn:") {
                    KeyHandle::new(reference.clone())
                } else {
                    KeyHandle::new(self.env.key_arn(reference))
                }
            }
        };

        debug!("Resolved key {}", handle.arn);
        Ok(handle)
    }

    async fn create_bucket(&self, spec: &BucketSpec) -> Result<BucketHandle> {
        let mut state = self.state.lock().await;
        state.calls.push(format!("create_bucket({})", spec.name));

        if state.buckets.contains_key(&spec.name) {
            bail!("bucket {} already exists", spec.name);
        }
        state.buckets.insert(spec.name.clone(), spec.clone());

        debug!("Created bucket {}", spec.name);
        Ok(BucketHandle::new(
            spec.name.clone(),
            self.env.bucket_arn(&spec.name),
        ))
    }

    async fn create_registry(&self, spec: &RegistrySpec) -> Result<RegistryHandle> {
        let mut state = self.state.lock().await;
        state.calls.push(format!("create_registry({})", spec.name));

        if state.registries.contains_key(&spec.name) {
            bail!("repository {} already exists", spec.name);
        }
        state.registries.insert(spec.name.clone(), spec.clone());

        debug!("Created repository {}", spec.name);
        Ok(RegistryHandle::new(
            spec.name.clone(),
            self.env.registry_arn(&spec.name),
        ))
    }

    async fn create_role(&self, spec: &RoleSpec) -> Result<RoleHandle> {
        let mut state = self.state.lock().await;
        state.calls.push(format!("create_role({})", spec.name));

        // Two passes for the same qualifier collide here
        if state.roles.contains_key(&spec.name) {
            bail!("role {} already exists", spec.name);
        }
        state.roles.insert(spec.name.clone(), spec.clone());

        debug!("Created role {}", spec.name);
        Ok(RoleHandle::new(spec.name.clone(), self.env.role_arn(&spec.name)))
    }
}

#[async_trait]
impl CatalogClient for InMemoryProvisioner {
    async fn register_product(
        &self,
        plan: &BootstrapPlan,
        product: &ProductDefinition,
    ) -> Result<ListingEntry> {
        let mut state = self.state.lock().await;
        state
            .calls
            .push(format!("register_product({}, {})", product.name, plan.qualifier));

        let entry = ListingEntry {
            product_id: format!("prod-{}", Uuid::new_v4().simple()),
            product_name: product.name.clone(),
            version: product.version.clone(),
            registered_at: Utc::now(),
        };
        state.listings.push(entry.clone());

        debug!("Registered {} as {}", product.name, entry.product_id);
        Ok(entry)
    }
}
