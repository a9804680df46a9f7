//! Fixed inputs for role set tests

use cdk_bootstrap_core::{
    BootstrapConfig, BootstrapEnvironment, BucketHandle, KeyHandle, RegistryHandle,
    ResolvedHandles,
};

pub const ACCOUNT: &str = "111111111111";
pub const REGION: &str = "eu-west-1";
pub const TRUSTED_ACCOUNT: &str = "222222222222";
pub const LOOKUP_ACCOUNT: &str = "333333333333";

pub const KEY_ARN: &str = "arn:aws:kms:eu-west-1:111111111111:key/0f1e2d3c";
pub const BUCKET_NAME: &str = "cdk-abc123-assets-111111111111-eu-west-1";
pub const REPOSITORY_NAME: &str = "cdk-abc123-assets-111111111111-eu-west-1";

pub fn test_env() -> BootstrapEnvironment {
    BootstrapEnvironment::new(ACCOUNT, REGION).expect("valid test environment")
}

pub fn test_config() -> BootstrapConfig {
    BootstrapConfig::default().with_qualifier("abc123")
}

/// Configuration exercising every list
pub fn full_config() -> BootstrapConfig {
    test_config()
        .with_trusted_accounts([TRUSTED_ACCOUNT])
        .with_trusted_accounts_for_lookup([LOOKUP_ACCOUNT])
        .with_execution_policies([
            "arn:aws:iam::aws:policy/AdministratorAccess",
            "arn:aws:iam::111111111111:policy/deploy/ExtraExecution",
        ])
}

pub fn test_handles() -> ResolvedHandles {
    ResolvedHandles::new(
        KeyHandle::new(KEY_ARN),
        BucketHandle::new(BUCKET_NAME, format!("arn:aws:s3:::{}", BUCKET_NAME)),
        RegistryHandle::new(
            REPOSITORY_NAME,
            format!(
                "arn:aws:ecr:eu-west-1:111111111111:repository/{}",
                REPOSITORY_NAME
            ),
        ),
    )
}
