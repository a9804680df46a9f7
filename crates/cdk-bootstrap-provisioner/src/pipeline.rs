//! Single-pass bootstrap pipeline
//!
//! validate -> resolve key decision -> key -> bucket + registry ->
//! role set -> roles (in build order) -> outputs
//!
//! There are no retries. A failing collaborator call ends the pass and its
//! error is returned tagged with the operation name. Resources created
//! before the failure are left in place.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use cdk_bootstrap_core::{
    BootstrapConfig, BootstrapEnvironment, Error, Naming, ResolvedHandles, RoleHandle, RoleKind,
};
use cdk_bootstrap_policy::{KeySelector, RoleSetBuilder};

use crate::error::{ProvisionError, Result};
use crate::outputs::BootstrapOutputs;
use crate::plan::BootstrapPlan;
use crate::product::{ListingEntry, ProductDefinition};
use crate::resources::{BucketSpec, RegistrySpec};
use crate::traits::{CatalogClient, ProvisioningClient};

/// Runs bootstrap passes against a provisioning collaborator
///
/// Passes for different qualifiers are independent. Two passes for the same
/// qualifier must not run at the same time.
pub struct Bootstrapper<'a, P: ProvisioningClient + ?Sized> {
    client: &'a P,
}

impl<'a, P: ProvisioningClient + ?Sized> Bootstrapper<'a, P> {
    pub fn new(client: &'a P) -> Self {
        Self { client }
    }

    /// Run one bootstrap pass
    pub async fn run(
        &self,
        config: &BootstrapConfig,
        env: &BootstrapEnvironment,
    ) -> Result<BootstrapPlan> {
        let id = Uuid::new_v4();
        let started_at = Utc::now();

        // Everything that can be rejected up front is, before any
        // collaborator call
        env.validate()?;
        config.validate_for(env)?;
        info!(
            "Starting bootstrap pass {} for qualifier '{}' in {}",
            id, config.qualifier, env
        );

        let naming = Naming::new(&config.qualifier, env);
        let encryption = KeySelector::resolve(config, env);

        let key = self
            .client
            .create_or_lookup_key(&encryption)
            .await
            .map_err(|e| ProvisionError::provider("create_or_lookup_key", e))?;
        debug!("Using key {} ({})", key.arn, encryption.mode_name());

        let bucket_spec = BucketSpec::derive(config, &naming, encryption.bucket_encryption(&key));
        let registry_spec = RegistrySpec::derive(config, &naming);

        // Bucket and registry do not depend on each other
        let (bucket, registry) = tokio::try_join!(
            async {
                self.client
                    .create_bucket(&bucket_spec)
                    .await
                    .map_err(|e| ProvisionError::provider("create_bucket", e))
            },
            async {
                self.client
                    .create_registry(&registry_spec)
                    .await
                    .map_err(|e| ProvisionError::provider("create_registry", e))
            },
        )?;
        info!("Created bucket {} and repository {}", bucket.name, registry.name);

        let handles = ResolvedHandles::new(key, bucket, registry);
        let roles = RoleSetBuilder::new(config, env).build(&handles)?;

        let mut role_handles: Vec<(RoleKind, RoleHandle)> = Vec::with_capacity(roles.len());
        for role in &roles {
            let handle = self
                .client
                .create_role(role)
                .await
                .map_err(|e| ProvisionError::provider("create_role", e))?;

            if handle.arn != role.arn {
                warn!(
                    "Role {} was created as {}, expected {}",
                    role.name, handle.arn, role.arn
                );
                return Err(Error::inconsistent_state(format!(
                    "role {} was created as {} but policies reference {}",
                    role.name, handle.arn, role.arn
                ))
                .into());
            }
            info!("Created {} role {}", role.kind, handle.arn);
            role_handles.push((role.kind, handle));
        }

        let outputs = BootstrapOutputs::new(config, &handles, &role_handles);
        let plan = BootstrapPlan {
            id,
            started_at,
            completed_at: Utc::now(),
            qualifier: config.qualifier.clone(),
            environment: env.clone(),
            encryption,
            bucket: bucket_spec,
            registry: registry_spec,
            handles,
            roles,
            role_handles,
            outputs,
        };

        info!("Bootstrap pass {} completed", plan.id);
        Ok(plan)
    }
}

/// Publish a finished plan through the catalog collaborator
pub async fn register_product<C: CatalogClient + ?Sized>(
    catalog: &C,
    plan: &BootstrapPlan,
    product: &ProductDefinition,
) -> Result<ListingEntry> {
    let entry = catalog
        .register_product(plan, product)
        .await
        .map_err(|e| ProvisionError::provider("register_product", e))?;
    info!(
        "Registered product {} {} as {}",
        entry.product_name, entry.version, entry.product_id
    );
    Ok(entry)
}
