//! The four bootstrap roles

use serde::{Deserialize, Serialize};

/// Kind of role generated by a bootstrap pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleKind {
    FilePublishing,
    ImagePublishing,
    Lookup,
    DeploymentAction,
}

impl RoleKind {
    /// All kinds, in build order
    pub const ALL: [RoleKind; 4] = [
        RoleKind::FilePublishing,
        RoleKind::ImagePublishing,
        RoleKind::Lookup,
        RoleKind::DeploymentAction,
    ];

    /// Slug used inside generated names
    pub fn slug(&self) -> &'static str {
        match self {
            RoleKind::FilePublishing => "file-publishing",
            RoleKind::ImagePublishing => "image-publishing",
            RoleKind::Lookup => "lookup",
            RoleKind::DeploymentAction => "deployment-action",
        }
    }

    /// Name of the output exposing this role's ARN
    pub fn output_name(&self) -> &'static str {
        match self {
            RoleKind::FilePublishing => "FilePublishingRoleArn",
            RoleKind::ImagePublishing => "ImagePublishingRoleArn",
            RoleKind::Lookup => "LookupRoleArn",
            RoleKind::DeploymentAction => "DeploymentActionRoleArn",
        }
    }

    /// Human readable description of the output
    pub fn output_description(&self) -> String {
        format!("The ARN of the {} role", self.slug().replace('-', " "))
    }
}

impl std::fmt::Display for RoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}
