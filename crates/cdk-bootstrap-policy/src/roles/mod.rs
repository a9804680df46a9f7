//! Bootstrap role specifications
//!
//! A [`RoleSet`] always holds the four roles in build order:
//! file publishing, image publishing, lookup, deployment action.

use serde::{Deserialize, Serialize};

use cdk_bootstrap_core::{Result, RoleKind};

use crate::iam::{evaluate, AccessRequest, Decision, InlinePolicy, PolicyStatement, Principal};

mod builder;
mod consistency;

pub use builder::{
    RoleSetBuilder, ACCOUNT_LEVEL_ACTIONS, DEPLOYMENT_SERVICE_PRINCIPAL, LOOKUP_DENY_POLICY_NAME,
    PASS_ROLE_ACTION, PASS_ROLES_POLICY_NAME,
};
pub use consistency::verify_role_set;

/// Who may assume a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustPolicy {
    pub principals: Vec<Principal>,
}

impl TrustPolicy {
    /// The `sts:AssumeRole` statement this trust policy stands for
    pub fn statement(&self) -> PolicyStatement {
        self.principals
            .iter()
            .cloned()
            .fold(PolicyStatement::allow(), PolicyStatement::principal)
            .actions(["sts:AssumeRole"])
    }

    /// Account ids trusted by this policy, in order
    pub fn accounts(&self) -> Vec<&str> {
        self.principals
            .iter()
            .filter_map(|p| match p {
                Principal::Account(id) => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn trusts(&self, principal: &Principal) -> bool {
        self.principals.iter().any(|p| p.covers(principal))
    }
}

/// Everything needed to create one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSpec {
    pub kind: RoleKind,
    pub name: String,
    pub arn: String,
    pub trust: TrustPolicy,
    pub inline_policies: Vec<InlinePolicy>,
    /// Attached by reference, in order
    pub managed_policy_arns: Vec<String>,
    pub permissions_boundary_arn: String,
}

impl RoleSpec {
    /// All inline statements, in policy order
    pub fn statements(&self) -> impl Iterator<Item = &PolicyStatement> {
        self.inline_policies.iter().flat_map(|p| p.statements.iter())
    }

    pub fn inline_policy(&self, name: &str) -> Option<&InlinePolicy> {
        self.inline_policies.iter().find(|p| p.name == name)
    }

    /// Evaluate `request` against the inline statements
    ///
    /// Managed policies are referenced by ARN only and are not part of the
    /// evaluation.
    pub fn evaluate(&self, request: &AccessRequest) -> Decision {
        evaluate(self.statements(), request)
    }

    /// Resources this role may pass to a service
    pub fn pass_role_resources(&self) -> Vec<&str> {
        self.statements()
            .filter(|s| !s.is_deny())
            .filter(|s| s.actions.iter().any(|a| a == PASS_ROLE_ACTION))
            .flat_map(|s| s.resources.iter().map(String::as_str))
            .collect()
    }
}

/// The four roles derived in one bootstrap pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet {
    roles: Vec<RoleSpec>,
}

impl RoleSet {
    pub(crate) fn new(roles: Vec<RoleSpec>) -> Self {
        Self { roles }
    }

    pub fn get(&self, kind: RoleKind) -> Option<&RoleSpec> {
        self.roles.iter().find(|r| r.kind == kind)
    }

    pub fn file_publishing(&self) -> Option<&RoleSpec> {
        self.get(RoleKind::FilePublishing)
    }

    pub fn image_publishing(&self) -> Option<&RoleSpec> {
        self.get(RoleKind::ImagePublishing)
    }

    pub fn lookup(&self) -> Option<&RoleSpec> {
        self.get(RoleKind::Lookup)
    }

    pub fn deployment_action(&self) -> Option<&RoleSpec> {
        self.get(RoleKind::DeploymentAction)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleSpec> {
        self.roles.iter()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn into_vec(self) -> Vec<RoleSpec> {
        self.roles
    }

    /// Canonical JSON rendering; identical inputs give identical bytes
    pub fn to_canonical_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<'a> IntoIterator for &'a RoleSet {
    type Item = &'a RoleSpec;
    type IntoIter = std::slice::Iter<'a, RoleSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.roles.iter()
    }
}
