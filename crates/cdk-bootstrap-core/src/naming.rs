//! Deterministic naming scheme for bootstrap resources
//!
//! Names depend only on the qualifier and the target environment, so two
//! passes with the same inputs always agree on every identifier.

use crate::types::{BootstrapEnvironment, RoleKind};

/// Alias of the provider-managed S3 key
pub const AWS_MANAGED_S3_KEY_ALIAS: &str = "alias/aws/s3";

/// Prefix for bucket server access log objects
pub const ACCESS_LOG_PREFIX: &str = "cdk-assets-bucket-logs";

/// Name generator bound to one qualifier and environment
#[derive(Debug, Clone, Copy)]
pub struct Naming<'a> {
    qualifier: &'a str,
    env: &'a BootstrapEnvironment,
}

impl<'a> Naming<'a> {
    pub fn new(qualifier: &'a str, env: &'a BootstrapEnvironment) -> Self {
        Self { qualifier, env }
    }

    pub fn env(&self) -> &BootstrapEnvironment {
        self.env
    }

    fn suffix(&self) -> String {
        format!("{}-{}", self.env.account, self.env.region)
    }

    /// `cdk-{qualifier}-{kind}-role-{account}-{region}`
    pub fn role_name(&self, kind: RoleKind) -> String {
        format!("cdk-{}-{}-role-{}", self.qualifier, kind.slug(), self.suffix())
    }

    pub fn role_arn(&self, kind: RoleKind) -> String {
        self.env.role_arn(&self.role_name(kind))
    }

    /// `cdk-{qualifier}-{kind}-role-default-policy-{account}-{region}`
    pub fn default_policy_name(&self, kind: RoleKind) -> String {
        format!(
            "cdk-{}-{}-role-default-policy-{}",
            self.qualifier,
            kind.slug(),
            self.suffix()
        )
    }

    /// Default name for both the artifact bucket and the image repository
    pub fn assets_name(&self) -> String {
        format!("cdk-{}-assets-{}", self.qualifier, self.suffix())
    }

    pub fn key_alias(&self) -> String {
        format!("alias/cdk-{}-assets-key", self.qualifier)
    }

    pub fn logging_bucket_name(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.suffix())
    }

    /// Policy in this account, e.g. the permissions boundary
    pub fn customer_policy_arn(&self, policy_name: &str) -> String {
        format!(
            "arn:{}:iam::{}:policy/{}",
            self.env.partition, self.env.account, policy_name
        )
    }

    /// Provider-managed policy, e.g. `ReadOnlyAccess`
    pub fn aws_managed_policy_arn(&self, policy_name: &str) -> String {
        format!("arn:{}:iam::aws:policy/{}", self.env.partition, policy_name)
    }

    /// Matches every Lambda function in the bootstrap account and region
    pub fn lambda_functions_pattern(&self) -> String {
        format!(
            "arn:{}:lambda:{}:{}:function:*",
            self.env.partition, self.env.region, self.env.account
        )
    }

    /// Service endpoint used in `kms:ViaService` conditions
    pub fn s3_service_endpoint(&self) -> String {
        format!("s3.{}.amazonaws.com", self.env.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> BootstrapEnvironment {
        BootstrapEnvironment::new("111111111111", "eu-west-1").unwrap()
    }

    #[test]
    fn test_role_names() {
        let env = env();
        let naming = Naming::new("abc123", &env);
        assert_eq!(
            naming.role_name(RoleKind::FilePublishing),
            "cdk-abc123-file-publishing-role-111111111111-eu-west-1"
        );
        assert_eq!(
            naming.role_name(RoleKind::DeploymentAction),
            "cdk-abc123-deployment-action-role-111111111111-eu-west-1"
        );
        assert_eq!(
            naming.role_arn(RoleKind::Lookup),
            "arn:aws:iam::111111111111:role/cdk-abc123-lookup-role-111111111111-eu-west-1"
        );
    }

    #[test]
    fn test_resource_names() {
        let env = env();
        let naming = Naming::new("abc123", &env);
        assert_eq!(naming.assets_name(), "cdk-abc123-assets-111111111111-eu-west-1");
        assert_eq!(naming.key_alias(), "alias/cdk-abc123-assets-key");
        assert_eq!(
            naming.default_policy_name(RoleKind::ImagePublishing),
            "cdk-abc123-image-publishing-role-default-policy-111111111111-eu-west-1"
        );
        assert_eq!(
            naming.logging_bucket_name("logs"),
            "logs-111111111111-eu-west-1"
        );
        assert_eq!(naming.s3_service_endpoint(), "s3.eu-west-1.amazonaws.com");
    }

    #[test]
    fn test_partition_is_threaded_through_arns() {
        let env = BootstrapEnvironment::new("111111111111", "cn-north-1")
            .unwrap()
            .with_partition("aws-cn")
            .unwrap();
        let naming = Naming::new("abc123", &env);
        assert_eq!(env.bucket_arn("b"), "arn:aws-cn:s3:::b");
        assert_eq!(
            naming.aws_managed_policy_arn("ReadOnlyAccess"),
            "arn:aws-cn:iam::aws:policy/ReadOnlyAccess"
        );
        assert_eq!(
            naming.customer_policy_arn("boundarypolicy"),
            "arn:aws-cn:iam::111111111111:policy/boundarypolicy"
        );
    }
}
