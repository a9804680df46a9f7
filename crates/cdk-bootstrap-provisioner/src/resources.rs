//! Artifact bucket and image registry specifications
//!
//! Both are derived from configuration alone, except for the bucket's
//! encryption which depends on the key resolved earlier in the pass.

use serde::{Deserialize, Serialize};

use cdk_bootstrap_core::naming::ACCESS_LOG_PREFIX;
use cdk_bootstrap_core::{BootstrapConfig, Naming, RemovalPolicy};
use cdk_bootstrap_policy::{BucketEncryption, ConditionOperator, PolicyStatement, Principal};

/// Days before current artifact objects expire
pub const OBJECT_EXPIRATION_DAYS: u32 = 90;

/// Days before noncurrent artifact versions expire
pub const NONCURRENT_VERSION_EXPIRATION_DAYS: u32 = 7;

/// Days before untagged images expire
pub const UNTAGGED_IMAGE_EXPIRATION_DAYS: u32 = 365;

pub const LAMBDA_PULL_POLICY_SID: &str = "LambdaECRImageRetrievalPolicy";

const LAMBDA_SERVICE_PRINCIPAL: &str = "lambda.amazonaws.com";

const LAMBDA_PULL_ACTIONS: &[&str] = &["ecr:BatchGetImage", "ecr:GetDownloadUrlForLayer"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketLifecycle {
    pub expiration_days: u32,
    pub noncurrent_version_expiration_days: u32,
}

/// Server access log destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogging {
    pub target_bucket: String,
    pub prefix: String,
}

/// Everything needed to create the artifact bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketSpec {
    pub name: String,
    pub encryption: BucketEncryption,
    pub versioned: bool,
    pub block_public_access: bool,
    pub enforce_ssl: bool,
    pub removal_policy: RemovalPolicy,
    pub lifecycle: BucketLifecycle,
    pub access_logging: AccessLogging,
}

impl BucketSpec {
    pub fn derive(config: &BootstrapConfig, naming: &Naming<'_>, encryption: BucketEncryption) -> Self {
        let name = config
            .bucket_name_override()
            .map(str::to_string)
            .unwrap_or_else(|| naming.assets_name());

        Self {
            name,
            encryption,
            versioned: true,
            block_public_access: true,
            enforce_ssl: true,
            removal_policy: RemovalPolicy::Retain,
            lifecycle: BucketLifecycle {
                expiration_days: OBJECT_EXPIRATION_DAYS,
                noncurrent_version_expiration_days: NONCURRENT_VERSION_EXPIRATION_DAYS,
            },
            access_logging: AccessLogging {
                target_bucket: naming.logging_bucket_name(&config.logging_bucket_name),
                prefix: ACCESS_LOG_PREFIX.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagMutability {
    Mutable,
    Immutable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryLifecycle {
    pub untagged_expiration_days: u32,
}

/// Everything needed to create the image registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySpec {
    pub name: String,
    pub tag_mutability: TagMutability,
    pub scan_on_push: bool,
    pub removal_policy: RemovalPolicy,
    pub lifecycle: RegistryLifecycle,
    /// Resource policy attached to the repository
    pub policy: Vec<PolicyStatement>,
}

impl RegistrySpec {
    pub fn derive(config: &BootstrapConfig, naming: &Naming<'_>) -> Self {
        let name = config
            .repository_name_override()
            .map(str::to_string)
            .unwrap_or_else(|| naming.assets_name());

        // Lambda may pull images only for functions in this account and region
        let lambda_pull = PolicyStatement::allow()
            .sid(LAMBDA_PULL_POLICY_SID)
            .principal(Principal::service(LAMBDA_SERVICE_PRINCIPAL))
            .actions(LAMBDA_PULL_ACTIONS.iter().copied())
            .condition(
                ConditionOperator::StringLike,
                "aws:sourceArn",
                naming.lambda_functions_pattern(),
            );

        Self {
            name,
            tag_mutability: TagMutability::Immutable,
            scan_on_push: true,
            removal_policy: RemovalPolicy::Retain,
            lifecycle: RegistryLifecycle {
                untagged_expiration_days: UNTAGGED_IMAGE_EXPIRATION_DAYS,
            },
            policy: vec![lambda_pull],
        }
    }
}
