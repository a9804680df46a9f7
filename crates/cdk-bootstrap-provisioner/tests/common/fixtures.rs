//! Fixed inputs for pipeline tests

use cdk_bootstrap_core::{BootstrapConfig, BootstrapEnvironment};

pub const ACCOUNT: &str = "111111111111";
pub const REGION: &str = "eu-west-1";
pub const TRUSTED_ACCOUNT: &str = "222222222222";

pub const KEY_ARN: &str = "arn:aws:kms:eu-west-1:111111111111:key/0f1e2d3c";

pub fn test_env() -> BootstrapEnvironment {
    BootstrapEnvironment::new(ACCOUNT, REGION).expect("valid test environment")
}

pub fn test_config() -> BootstrapConfig {
    BootstrapConfig::default()
        .with_qualifier("abc123")
        .with_trusted_accounts([TRUSTED_ACCOUNT])
}

/// Name of a role as derived for `test_config()`
pub fn role_name(slug: &str) -> String {
    format!("cdk-abc123-{}-role-{}-{}", slug, ACCOUNT, REGION)
}
