//! Bootstrap configuration file loading and environment overrides
//!
//! Precedence (low to high):
//! 1. Field defaults
//! 2. YAML file
//! 3. Environment variables (`CDK_BOOTSTRAP_*`)

use camino::Utf8Path;
use std::env;
use std::fs;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::BootstrapConfig;

/// Overrides `qualifier`
pub const ENV_QUALIFIER: &str = "CDK_BOOTSTRAP_QUALIFIER";

/// Overrides `fileAssetsBucketKmsKeyId`
pub const ENV_KMS_KEY_ID: &str = "CDK_BOOTSTRAP_KMS_KEY_ID";

/// Overrides `permissionsBoundaryPolicyName`
pub const ENV_BOUNDARY_POLICY: &str = "CDK_BOOTSTRAP_BOUNDARY_POLICY";

/// Overrides `trustedAccounts` (comma separated)
pub const ENV_TRUSTED_ACCOUNTS: &str = "CDK_BOOTSTRAP_TRUSTED_ACCOUNTS";

/// Overrides `trustedAccountsForLookup` (comma separated)
pub const ENV_TRUSTED_ACCOUNTS_FOR_LOOKUP: &str = "CDK_BOOTSTRAP_TRUSTED_ACCOUNTS_FOR_LOOKUP";

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl BootstrapConfig {
    /// Parse configuration from YAML content
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_not_found(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;

        debug!("Loaded bootstrap config from {}", path);
        Self::from_yaml(&content)
    }

    /// Load a file, apply environment overrides, then validate
    pub fn load_and_validate(path: &Utf8Path) -> Result<Self> {
        let config = Self::load(path)?.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `CDK_BOOTSTRAP_*` environment variable overrides
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(qualifier) = env::var(ENV_QUALIFIER) {
            debug!("Qualifier overridden from {}", ENV_QUALIFIER);
            self.qualifier = qualifier;
        }
        if let Ok(key_id) = env::var(ENV_KMS_KEY_ID) {
            debug!("KMS key id overridden from {}", ENV_KMS_KEY_ID);
            self.file_assets_bucket_kms_key_id = Some(key_id);
        }
        if let Ok(boundary) = env::var(ENV_BOUNDARY_POLICY) {
            debug!("Boundary policy overridden from {}", ENV_BOUNDARY_POLICY);
            self.permissions_boundary_policy_name = boundary;
        }
        if let Ok(accounts) = env::var(ENV_TRUSTED_ACCOUNTS) {
            self.trusted_accounts = split_list(&accounts);
        }
        if let Ok(accounts) = env::var(ENV_TRUSTED_ACCOUNTS_FOR_LOOKUP) {
            self.trusted_accounts_for_lookup = split_list(&accounts);
        }
        self
    }
}
