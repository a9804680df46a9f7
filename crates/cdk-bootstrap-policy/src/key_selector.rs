//! Encryption key selection for the artifact bucket
//!
//! A single configuration value picks one of three modes:
//!
//! | `fileAssetsBucketKmsKeyId` | decision                     | bucket encryption |
//! |----------------------------|------------------------------|-------------------|
//! | absent or empty            | `NewManagedKey`              | KMS, new key      |
//! | `AWS_MANAGED_KEY`          | `ExistingManagedKeyByAlias`  | S3 managed        |
//! | anything else              | `ExternalKeyByReference`     | KMS, that key     |

use serde::{Deserialize, Serialize};
use tracing::info;

use cdk_bootstrap_core::naming::AWS_MANAGED_S3_KEY_ALIAS;
use cdk_bootstrap_core::types::AWS_MANAGED_KEY;
use cdk_bootstrap_core::{BootstrapConfig, BootstrapEnvironment, KeyHandle, Naming, RemovalPolicy};

use crate::iam::{ConditionOperator, PolicyStatement, Principal, WILDCARD};

/// Description attached to keys created by the bootstrap
pub const MANAGED_KEY_DESCRIPTION: &str = "KMS key for CDK assets bucket encryption";

/// Actions any in-account principal may use through S3
pub const S3_DELEGATED_KEY_ACTIONS: &[&str] = &[
    "kms:Encrypt*",
    "kms:Decrypt*",
    "kms:ReEncrypt*",
    "kms:GenerateDataKey*",
    "kms:Describe*",
];

/// Specification of a key to create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedKeySpec {
    pub alias: String,
    pub description: String,
    pub enable_key_rotation: bool,
    pub removal_policy: RemovalPolicy,
    pub policy: Vec<PolicyStatement>,
}

/// Which key backs the artifact bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncryptionDecision {
    /// Create a customer managed key
    NewManagedKey(ManagedKeySpec),
    /// Look up the provider managed key; never create one
    ExistingManagedKeyByAlias { alias: String },
    /// Use an externally managed key as-is
    ExternalKeyByReference { reference: String },
}

/// Encryption mode of the artifact bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BucketEncryption {
    /// Storage-service managed keys (SSE-S3)
    S3Managed,
    /// SSE-KMS with the given key
    Kms { key_arn: String },
}

impl BucketEncryption {
    /// Key attached to the bucket, if any
    pub fn key_arn(&self) -> Option<&str> {
        match self {
            BucketEncryption::S3Managed => None,
            BucketEncryption::Kms { key_arn } => Some(key_arn),
        }
    }
}

impl EncryptionDecision {
    /// Short label for logs and outputs
    pub fn mode_name(&self) -> &'static str {
        match self {
            EncryptionDecision::NewManagedKey(_) => "new-managed-key",
            EncryptionDecision::ExistingManagedKeyByAlias { .. } => "existing-managed-key",
            EncryptionDecision::ExternalKeyByReference { .. } => "external-key",
        }
    }

    /// Whether the provisioning collaborator must create a key
    pub fn creates_key(&self) -> bool {
        matches!(self, EncryptionDecision::NewManagedKey(_))
    }

    /// Encryption the bucket must be configured with, given the resolved key
    ///
    /// Only the provider-managed branch decouples the bucket's encryption
    /// mode from the key handle. The external-reference branch attaches its
    /// key just like a newly created one.
    pub fn bucket_encryption(&self, key: &KeyHandle) -> BucketEncryption {
        match self {
            EncryptionDecision::ExistingManagedKeyByAlias { .. } => BucketEncryption::S3Managed,
            EncryptionDecision::NewManagedKey(_)
            | EncryptionDecision::ExternalKeyByReference { .. } => BucketEncryption::Kms {
                key_arn: key.arn.clone(),
            },
        }
    }
}

/// Resolves the encryption decision for a bootstrap pass
pub struct KeySelector;

impl KeySelector {
    /// Pick the encryption mode from `config`
    pub fn resolve(config: &BootstrapConfig, env: &BootstrapEnvironment) -> EncryptionDecision {
        let decision = match config.kms_key_id() {
            None => {
                let naming = Naming::new(&config.qualifier, env);
                EncryptionDecision::NewManagedKey(Self::managed_key_spec(&naming))
            }
            Some(AWS_MANAGED_KEY) => EncryptionDecision::ExistingManagedKeyByAlias {
                alias: AWS_MANAGED_S3_KEY_ALIAS.to_string(),
            },
            Some(reference) => EncryptionDecision::ExternalKeyByReference {
                reference: reference.to_string(),
            },
        };

        info!(
            "Resolved asset bucket encryption for {}: {}",
            env,
            decision.mode_name()
        );
        decision
    }

    /// Key created when no key id is configured
    ///
    /// The account root keeps full control. Any principal may use the key
    /// only when calling from this account and only through S3 in the
    /// bootstrap region.
    pub fn managed_key_spec(naming: &Naming<'_>) -> ManagedKeySpec {
        let env = naming.env();
        let policy = vec![
            PolicyStatement::allow()
                .principal(Principal::account(env.account.clone()))
                .actions(["kms:*"])
                .resources([WILDCARD]),
            PolicyStatement::allow()
                .principal(Principal::Any)
                .actions(S3_DELEGATED_KEY_ACTIONS.iter().copied())
                .resources([WILDCARD])
                .condition(
                    ConditionOperator::StringEquals,
                    "kms:CallerAccount",
                    env.account.clone(),
                )
                .condition(
                    ConditionOperator::StringEquals,
                    "kms:ViaService",
                    naming.s3_service_endpoint(),
                ),
        ];

        ManagedKeySpec {
            alias: naming.key_alias(),
            description: MANAGED_KEY_DESCRIPTION.to_string(),
            enable_key_rotation: true,
            removal_policy: RemovalPolicy::Retain,
            policy,
        }
    }
}
