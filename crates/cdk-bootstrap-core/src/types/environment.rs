//! Target environment of a bootstrap pass

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::validation;

/// Default partition for ARNs
pub const DEFAULT_PARTITION: &str = "aws";

/// Account, region and partition being bootstrapped
///
/// Every generated name and ARN is derived from this plus the
/// [`BootstrapConfig`](crate::BootstrapConfig).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BootstrapEnvironment {
    pub account: String,
    pub region: String,
    #[serde(default = "default_partition")]
    pub partition: String,
}

fn default_partition() -> String {
    DEFAULT_PARTITION.to_string()
}

impl BootstrapEnvironment {
    /// Create a validated environment in the default partition
    pub fn new(account: impl Into<String>, region: impl Into<String>) -> Result<Self> {
        let env = Self {
            account: account.into(),
            region: region.into(),
            partition: default_partition(),
        };
        env.validate()?;
        Ok(env)
    }

    /// Switch to another partition (`aws-cn`, `aws-us-gov`)
    pub fn with_partition(mut self, partition: impl Into<String>) -> Result<Self> {
        self.partition = partition.into();
        self.validate()?;
        Ok(self)
    }

    /// Check account, region and partition formats
    pub fn validate(&self) -> Result<()> {
        if !validation::is_account_id(&self.account) {
            return Err(Error::invalid_environment("account", &self.account));
        }
        if !validation::is_region(&self.region) {
            return Err(Error::invalid_environment("region", &self.region));
        }
        if !validation::is_partition(&self.partition) {
            return Err(Error::invalid_environment("partition", &self.partition));
        }
        Ok(())
    }

    pub fn bucket_arn(&self, bucket_name: &str) -> String {
        format!("arn:{}:s3:::{}", self.partition, bucket_name)
    }

    pub fn registry_arn(&self, repository_name: &str) -> String {
        format!(
            "arn:{}:ecr:{}:{}:repository/{}",
            self.partition, self.region, self.account, repository_name
        )
    }

    pub fn key_arn(&self, key_id: &str) -> String {
        format!(
            "arn:{}:kms:{}:{}:key/{}",
            self.partition, self.region, self.account, key_id
        )
    }

    pub fn role_arn(&self, role_name: &str) -> String {
        format!("arn:{}:iam::{}:role/{}", self.partition, self.account, role_name)
    }
}

impl std::fmt::Display for BootstrapEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.account, self.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_partition() {
        let env = BootstrapEnvironment::new("111111111111", "eu-west-1").unwrap();
        assert_eq!(env.partition, "aws");
        assert_eq!(env.to_string(), "111111111111/eu-west-1");
    }

    #[test]
    fn test_rejects_bad_account() {
        let err = BootstrapEnvironment::new("1111", "eu-west-1").unwrap_err();
        assert!(matches!(err, Error::InvalidEnvironment { ref field, .. } if field == "account"));
    }

    #[test]
    fn test_rejects_bad_partition() {
        let err = BootstrapEnvironment::new("111111111111", "cn-north-1")
            .unwrap()
            .with_partition("china")
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_resource_arns() {
        let env = BootstrapEnvironment::new("111111111111", "eu-west-1").unwrap();
        assert_eq!(
            env.registry_arn("images"),
            "arn:aws:ecr:eu-west-1:111111111111:repository/images"
        );
        assert_eq!(env.key_arn("k-1"), "arn:aws:kms:eu-west-1:111111111111:key/k-1");
        assert_eq!(env.role_arn("r"), "arn:aws:iam::111111111111:role/r");
    }
}
