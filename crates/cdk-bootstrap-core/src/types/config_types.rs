//! Bootstrap configuration types
//!
//! Keys mirror the bootstrap product parameters, so a config file reads:
//!
//! ```yaml
//! qualifier: abc123
//! fileAssetsBucketKmsKeyId: AWS_MANAGED_KEY
//! trustedAccounts:
//!   - "222222222222"
//! cloudFormationExecutionPolicies:
//!   - arn:aws:iam::aws:policy/AdministratorAccess
//! ```

use serde::{Deserialize, Serialize};

use super::environment::BootstrapEnvironment;
use crate::error::{Error, Result};
use crate::validation;

/// Default qualifier shared with the stock CDK bootstrap
pub const DEFAULT_QUALIFIER: &str = "hnb659fds";

/// Default access-log bucket name prefix
pub const DEFAULT_LOGGING_BUCKET: &str = "anwb-nl-s3access-lz";

/// Default permissions boundary policy name
pub const DEFAULT_BOUNDARY_POLICY: &str = "boundarypolicy";

/// Reserved key id selecting the provider-managed S3 key
pub const AWS_MANAGED_KEY: &str = "AWS_MANAGED_KEY";

/// Default bootstrap variant label
pub const DEFAULT_BOOTSTRAP_VARIANT: &str = "AWS CDK: Default Resources";

/// Input to a bootstrap pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapConfig {
    /// Disambiguates multiple bootstraps in one account/region
    #[serde(default = "default_qualifier")]
    pub qualifier: String,

    /// Absent, `AWS_MANAGED_KEY`, or an external key reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_assets_bucket_kms_key_id: Option<String>,

    /// Accounts trusted to publish assets
    #[serde(default)]
    pub trusted_accounts: Vec<String>,

    /// Accounts trusted to perform lookups
    #[serde(default)]
    pub trusted_accounts_for_lookup: Vec<String>,

    /// Managed policy ARNs attached to the deployment action role
    #[serde(default)]
    pub cloud_formation_execution_policies: Vec<String>,

    /// Override for the artifact bucket name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_assets_bucket_name: Option<String>,

    /// Override for the image repository name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_assets_repository_name: Option<String>,

    /// Access-log bucket name prefix
    #[serde(default = "default_logging_bucket")]
    pub logging_bucket_name: String,

    /// Name of the boundary policy applied to every role
    #[serde(default = "default_boundary_policy")]
    pub permissions_boundary_policy_name: String,

    /// Free-form variant label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap_variant: Option<String>,
}

fn default_qualifier() -> String {
    DEFAULT_QUALIFIER.to_string()
}

fn default_logging_bucket() -> String {
    DEFAULT_LOGGING_BUCKET.to_string()
}

fn default_boundary_policy() -> String {
    DEFAULT_BOUNDARY_POLICY.to_string()
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            qualifier: default_qualifier(),
            file_assets_bucket_kms_key_id: None,
            trusted_accounts: Vec::new(),
            trusted_accounts_for_lookup: Vec::new(),
            cloud_formation_execution_policies: Vec::new(),
            file_assets_bucket_name: None,
            container_assets_repository_name: None,
            logging_bucket_name: default_logging_bucket(),
            permissions_boundary_policy_name: default_boundary_policy(),
            bootstrap_variant: None,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl BootstrapConfig {
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = qualifier.into();
        self
    }

    pub fn with_kms_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.file_assets_bucket_kms_key_id = Some(key_id.into());
        self
    }

    pub fn with_trusted_accounts<I, S>(mut self, accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trusted_accounts = accounts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_trusted_accounts_for_lookup<I, S>(mut self, accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trusted_accounts_for_lookup = accounts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_execution_policies<I, S>(mut self, policies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cloud_formation_execution_policies = policies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_boundary_policy(mut self, name: impl Into<String>) -> Self {
        self.permissions_boundary_policy_name = name.into();
        self
    }

    pub fn with_bucket_name(mut self, name: impl Into<String>) -> Self {
        self.file_assets_bucket_name = Some(name.into());
        self
    }

    pub fn with_repository_name(mut self, name: impl Into<String>) -> Self {
        self.container_assets_repository_name = Some(name.into());
        self
    }

    pub fn with_bootstrap_variant(mut self, variant: impl Into<String>) -> Self {
        self.bootstrap_variant = Some(variant.into());
        self
    }

    /// Configured key id; an empty string counts as absent
    pub fn kms_key_id(&self) -> Option<&str> {
        non_empty(&self.file_assets_bucket_kms_key_id)
    }

    /// Bucket name override; an empty string counts as absent
    pub fn bucket_name_override(&self) -> Option<&str> {
        non_empty(&self.file_assets_bucket_name)
    }

    /// Repository name override; an empty string counts as absent
    pub fn repository_name_override(&self) -> Option<&str> {
        non_empty(&self.container_assets_repository_name)
    }

    /// Variant label, falling back to the default
    pub fn bootstrap_variant(&self) -> &str {
        non_empty(&self.bootstrap_variant).unwrap_or(DEFAULT_BOOTSTRAP_VARIANT)
    }

    /// Check every field that ends up in a generated name, principal or
    /// policy attachment
    pub fn validate(&self) -> Result<()> {
        validation::require_token("qualifier", &self.qualifier)?;
        validation::require_token(
            "permissionsBoundaryPolicyName",
            &self.permissions_boundary_policy_name,
        )?;
        validation::require_token("loggingBucketName", &self.logging_bucket_name)?;
        if let Some(key) = self.kms_key_id() {
            if key.contains(['*', '?']) {
                return Err(Error::invalid_resource_name("fileAssetsBucketKmsKeyId", key));
            }
        }
        if let Some(name) = self.bucket_name_override() {
            validation::require_bucket_name("fileAssetsBucketName", name)?;
        }
        if let Some(name) = self.repository_name_override() {
            validation::require_repository_name("containerAssetsRepositoryName", name)?;
        }
        validation::require_account_ids("trustedAccounts", &self.trusted_accounts)?;
        validation::require_account_ids(
            "trustedAccountsForLookup",
            &self.trusted_accounts_for_lookup,
        )?;
        for policy in &self.cloud_formation_execution_policies {
            if !validation::is_managed_policy_arn(policy) {
                return Err(Error::malformed_policy_arn(policy.as_str()));
            }
        }
        Ok(())
    }

    /// [`validate`](Self::validate), plus the checks that depend on the
    /// target environment
    ///
    /// Execution policies must live in the environment's partition.
    pub fn validate_for(&self, env: &BootstrapEnvironment) -> Result<()> {
        self.validate()?;
        let partition_prefix = format!("arn:{}:", env.partition);
        for policy in &self.cloud_formation_execution_policies {
            if !policy.starts_with(&partition_prefix) {
                return Err(Error::malformed_policy_arn(policy.as_str()));
            }
        }
        Ok(())
    }
}
