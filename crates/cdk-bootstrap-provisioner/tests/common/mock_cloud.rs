//! Mock provisioning collaborator
//!
//! `MockCloud` is generated by mockall. The `expect_*` helpers install
//! well-behaved defaults; tests override a single call to inject a fault.

use anyhow::Result;
use async_trait::async_trait;
use mockall::mock;

use cdk_bootstrap_core::{BucketHandle, KeyHandle, RegistryHandle, RoleHandle};
use cdk_bootstrap_policy::{EncryptionDecision, RoleSpec};
use cdk_bootstrap_provisioner::{BucketSpec, ProvisioningClient, RegistrySpec};

use super::fixtures::KEY_ARN;

mock! {
    pub Cloud {}

    #[async_trait]
    impl ProvisioningClient for Cloud {
        async fn create_or_lookup_key(&self, decision: &EncryptionDecision) -> Result<KeyHandle>;
        async fn create_bucket(&self, spec: &BucketSpec) -> Result<BucketHandle>;
        async fn create_registry(&self, spec: &RegistrySpec) -> Result<RegistryHandle>;
        async fn create_role(&self, spec: &RoleSpec) -> Result<RoleHandle>;
    }
}

pub fn expect_key(cloud: &mut MockCloud) {
    cloud
        .expect_create_or_lookup_key()
        .times(1)
        .returning(|_| Ok(KeyHandle::new(KEY_ARN)));
}

pub fn expect_bucket(cloud: &mut MockCloud) {
    cloud.expect_create_bucket().times(1).returning(|spec| {
        Ok(BucketHandle::new(
            spec.name.clone(),
            format!("arn:aws:s3:::{}", spec.name),
        ))
    });
}

pub fn expect_registry(cloud: &mut MockCloud) {
    cloud.expect_create_registry().times(1).returning(|spec| {
        Ok(RegistryHandle::new(
            spec.name.clone(),
            format!(
                "arn:aws:ecr:eu-west-1:111111111111:repository/{}",
                spec.name
            ),
        ))
    });
}

/// Key, bucket and registry succeed
pub fn cloud_with_resources() -> MockCloud {
    let mut cloud = MockCloud::new();
    expect_key(&mut cloud);
    expect_bucket(&mut cloud);
    expect_registry(&mut cloud);
    cloud
}

/// Every call succeeds and roles keep their derived ARN
pub fn healthy_cloud() -> MockCloud {
    let mut cloud = cloud_with_resources();
    cloud
        .expect_create_role()
        .times(4)
        .returning(|spec| Ok(RoleHandle::new(spec.name.clone(), spec.arn.clone())));
    cloud
}
