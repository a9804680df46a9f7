//! Token and identifier validation
//!
//! Every value checked here ends up interpolated into a resource name or an
//! ARN, so the rules are deliberately narrow.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("static regex"));

static ACCOUNT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{12}$").expect("static regex"));

static REGION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}(-[a-z]+)+-[0-9]+$").expect("static regex"));

static PARTITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^aws(-[a-z]+)*$").expect("static regex"));

// S3 bucket names: 3-63 chars, lowercase letters, digits, dots and hyphens,
// starting and ending with a letter or digit.
static BUCKET_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$").expect("static regex")
});

// ECR repository names: slash-separated lowercase components joined by
// single '.', '_' or '-' separators.
static REPOSITORY_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+([._-][a-z0-9]+)*(/[a-z0-9]+([._-][a-z0-9]+)*)*$")
        .expect("static regex")
});

const MAX_REPOSITORY_NAME_LEN: usize = 256;

// Customer managed (account id) or provider managed (`aws`) policies, with an
// optional path before the policy name.
static MANAGED_POLICY_ARN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^arn:aws(-[a-z]+)*:iam::([0-9]{12}|aws):policy/([\w+=,.@-]+/)*[\w+=,.@-]+$")
        .expect("static regex")
});

/// Whether `value` is a non-empty token of ASCII letters, digits and hyphens
pub fn is_token(value: &str) -> bool {
    TOKEN.is_match(value)
}

/// Whether `value` is a 12-digit account id
pub fn is_account_id(value: &str) -> bool {
    ACCOUNT_ID.is_match(value)
}

/// Whether `value` looks like a region name (`eu-west-1`, `us-gov-east-1`)
pub fn is_region(value: &str) -> bool {
    REGION.is_match(value)
}

/// Whether `value` is a partition name (`aws`, `aws-cn`, `aws-us-gov`)
pub fn is_partition(value: &str) -> bool {
    PARTITION.is_match(value)
}

/// Whether `value` is a valid S3 bucket name
///
/// Names shaped like an IPv4 address and names with adjacent dots are
/// rejected as well.
pub fn is_bucket_name(value: &str) -> bool {
    BUCKET_NAME.is_match(value)
        && !value.contains("..")
        && value.parse::<std::net::Ipv4Addr>().is_err()
}

/// Whether `value` is a valid ECR repository name
pub fn is_repository_name(value: &str) -> bool {
    (2..=MAX_REPOSITORY_NAME_LEN).contains(&value.len()) && REPOSITORY_NAME.is_match(value)
}

/// Whether `value` is a well-formed managed policy ARN
pub fn is_managed_policy_arn(value: &str) -> bool {
    MANAGED_POLICY_ARN.is_match(value)
}

/// Require `value` to be a non-empty token, naming `field` in the error
pub fn require_token(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::empty_field(field));
    }
    if !is_token(value) {
        return Err(Error::invalid_token(field, value));
    }
    Ok(())
}

/// Require `value` to be a usable bucket name, naming `field` in the error
pub fn require_bucket_name(field: &str, value: &str) -> Result<()> {
    if !is_bucket_name(value) {
        return Err(Error::invalid_resource_name(field, value));
    }
    Ok(())
}

/// Require `value` to be a usable repository name, naming `field` in the error
pub fn require_repository_name(field: &str, value: &str) -> Result<()> {
    if !is_repository_name(value) {
        return Err(Error::invalid_resource_name(field, value));
    }
    Ok(())
}

/// Require every entry of a trusted principal list to be an account id
pub fn require_account_ids(list: &str, values: &[String]) -> Result<()> {
    for value in values {
        if !is_account_id(value) {
            return Err(Error::malformed_principal(list, value.as_str()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        assert!(is_token("hnb659fds"));
        assert!(is_token("team-a-01"));
        assert!(!is_token(""));
        assert!(!is_token("has space"));
        assert!(!is_token("under_score"));
        assert!(!is_token("slash/name"));
    }

    #[test]
    fn test_account_ids() {
        assert!(is_account_id("111111111111"));
        assert!(!is_account_id("11111111111"));
        assert!(!is_account_id("1111111111112"));
        assert!(!is_account_id("11111111111a"));
        assert!(!is_account_id(" 111111111111"));
    }

    #[test]
    fn test_regions_and_partitions() {
        assert!(is_region("eu-west-1"));
        assert!(is_region("us-gov-east-1"));
        assert!(!is_region("EU-WEST-1"));
        assert!(!is_region("eu-west"));
        assert!(is_partition("aws"));
        assert!(is_partition("aws-cn"));
        assert!(is_partition("aws-us-gov"));
        assert!(!is_partition("azure"));
    }

    #[test]
    fn test_managed_policy_arns() {
        assert!(is_managed_policy_arn(
            "arn:aws:iam::aws:policy/AdministratorAccess"
        ));
        assert!(is_managed_policy_arn(
            "arn:aws:iam::123456789012:policy/deploy/ExecutionPolicy"
        ));
        assert!(is_managed_policy_arn(
            "arn:aws-cn:iam::123456789012:policy/exec"
        ));
        assert!(!is_managed_policy_arn("AdministratorAccess"));
        assert!(!is_managed_policy_arn(
            "arn:aws:iam::123456789012:role/not-a-policy"
        ));
        assert!(!is_managed_policy_arn("arn:aws:iam::123:policy/short-account"));
        assert!(!is_managed_policy_arn("arn:aws:iam::aws:policy/"));
    }

    #[test]
    fn test_bucket_names() {
        assert!(is_bucket_name("cdk-abc123-assets-111111111111-eu-west-1"));
        assert!(is_bucket_name("my.assets.bucket"));
        assert!(!is_bucket_name("*"));
        assert!(!is_bucket_name("assets-*"));
        assert!(!is_bucket_name("assets?"));
        assert!(!is_bucket_name("ab"));
        assert!(!is_bucket_name("Assets"));
        assert!(!is_bucket_name("-assets"));
        assert!(!is_bucket_name("my..bucket"));
        assert!(!is_bucket_name("192.168.1.10"));
        assert!(!is_bucket_name(&"a".repeat(64)));
    }

    #[test]
    fn test_repository_names() {
        assert!(is_repository_name("cdk-abc123-container-assets-111111111111-eu-west-1"));
        assert!(is_repository_name("team/images_v2"));
        assert!(!is_repository_name("*"));
        assert!(!is_repository_name("images*"));
        assert!(!is_repository_name("Images"));
        assert!(!is_repository_name("/images"));
        assert!(!is_repository_name("images//v2"));
        assert!(!is_repository_name("images--v2"));
        assert!(!is_repository_name(&"a".repeat(257)));
    }

    #[test]
    fn test_require_resource_names_name_the_field() {
        match require_bucket_name("fileAssetsBucketName", "*") {
            Err(Error::InvalidResourceName { field, value }) => {
                assert_eq!(field, "fileAssetsBucketName");
                assert_eq!(value, "*");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            require_repository_name("containerAssetsRepositoryName", "repo?"),
            Err(Error::InvalidResourceName { .. })
        ));
        assert!(require_bucket_name("fileAssetsBucketName", "assets-bucket").is_ok());
        assert!(require_repository_name("containerAssetsRepositoryName", "images").is_ok());
    }

    #[test]
    fn test_require_token_distinguishes_empty() {
        assert!(matches!(
            require_token("qualifier", ""),
            Err(Error::EmptyField { .. })
        ));
        assert!(matches!(
            require_token("qualifier", "a b"),
            Err(Error::InvalidToken { .. })
        ));
        assert!(require_token("qualifier", "abc123").is_ok());
    }

    #[test]
    fn test_require_account_ids_reports_first_bad_entry() {
        let values = vec![
            "111111111111".to_string(),
            String::new(),
            "bad".to_string(),
        ];
        match require_account_ids("trustedAccounts", &values) {
            Err(Error::MalformedPrincipal { list, value }) => {
                assert_eq!(list, "trustedAccounts");
                assert_eq!(value, "");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
