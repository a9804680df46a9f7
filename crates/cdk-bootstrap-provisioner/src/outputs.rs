//! Named outputs of a finished bootstrap pass

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use cdk_bootstrap_core::{BootstrapConfig, ResolvedHandles, RoleHandle, RoleKind};

/// Tag carrying the bootstrap variant label
pub const BOOTSTRAP_VARIANT_TAG: &str = "BootstrapVariant";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedOutput {
    pub name: String,
    pub value: String,
    pub description: String,
}

/// Role ARNs, resource identifiers and tags exposed to deployers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapOutputs {
    pub outputs: Vec<NamedOutput>,
    pub bucket_name: String,
    pub repository_name: String,
    pub key_arn: String,
    pub tags: BTreeMap<String, String>,
}

impl BootstrapOutputs {
    /// `roles` must be in build order, one per [`RoleKind`]
    pub fn new(
        config: &BootstrapConfig,
        handles: &ResolvedHandles,
        roles: &[(RoleKind, RoleHandle)],
    ) -> Self {
        let outputs = roles
            .iter()
            .map(|(kind, handle)| NamedOutput {
                name: kind.output_name().to_string(),
                value: handle.arn.clone(),
                description: kind.output_description(),
            })
            .collect();

        let mut tags = BTreeMap::new();
        tags.insert(
            BOOTSTRAP_VARIANT_TAG.to_string(),
            config.bootstrap_variant().to_string(),
        );

        Self {
            outputs,
            bucket_name: handles.bucket.name.clone(),
            repository_name: handles.registry.name.clone(),
            key_arn: handles.key.arn.clone(),
            tags,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.value.as_str())
    }

    pub fn role_arn(&self, kind: RoleKind) -> Option<&str> {
        self.get(kind.output_name())
    }

    pub fn bootstrap_variant(&self) -> Option<&str> {
        self.tags.get(BOOTSTRAP_VARIANT_TAG).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdk_bootstrap_core::{BucketHandle, KeyHandle, RegistryHandle};

    fn handles() -> ResolvedHandles {
        ResolvedHandles::new(
            KeyHandle::new("arn:aws:kms:eu-west-1:111111111111:key/k-1"),
            BucketHandle::new("assets", "arn:aws:s3:::assets"),
            RegistryHandle::new("images", "arn:aws:ecr:eu-west-1:111111111111:repository/images"),
        )
    }

    fn roles() -> Vec<(RoleKind, RoleHandle)> {
        RoleKind::ALL
            .iter()
            .map(|kind| {
                (
                    *kind,
                    RoleHandle::new(kind.slug(), format!("arn:aws:iam::111111111111:role/{}", kind.slug())),
                )
            })
            .collect()
    }

    #[test]
    fn test_role_outputs_are_named_and_described() {
        let outputs = BootstrapOutputs::new(&BootstrapConfig::default(), &handles(), &roles());

        let names: Vec<&str> = outputs.outputs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "FilePublishingRoleArn",
                "ImagePublishingRoleArn",
                "LookupRoleArn",
                "DeploymentActionRoleArn",
            ]
        );
        assert_eq!(
            outputs.outputs[2].description,
            "The ARN of the lookup role"
        );
        assert_eq!(
            outputs.role_arn(RoleKind::Lookup),
            Some("arn:aws:iam::111111111111:role/lookup")
        );
        assert_eq!(outputs.bucket_name, "assets");
        assert_eq!(outputs.repository_name, "images");
    }

    #[test]
    fn test_variant_tag_defaults_and_overrides() {
        let outputs = BootstrapOutputs::new(&BootstrapConfig::default(), &handles(), &roles());
        assert_eq!(outputs.bootstrap_variant(), Some("AWS CDK: Default Resources"));

        let config = BootstrapConfig::default().with_bootstrap_variant("Team Edition");
        let outputs = BootstrapOutputs::new(&config, &handles(), &roles());
        assert_eq!(outputs.bootstrap_variant(), Some("Team Edition"));
    }
}
