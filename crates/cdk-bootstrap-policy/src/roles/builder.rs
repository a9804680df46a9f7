//! Derives the four bootstrap roles from configuration and resolved handles

use tracing::{debug, info};

use cdk_bootstrap_core::{
    BootstrapConfig, BootstrapEnvironment, Naming, ResolvedHandles, Result, RoleKind,
};

use super::consistency::verify_role_set;
use super::{RoleSet, RoleSpec, TrustPolicy};
use crate::iam::{ConditionOperator, InlinePolicy, PolicyStatement, Principal, WILDCARD};

/// Service allowed to assume the deployment action role
pub const DEPLOYMENT_SERVICE_PRINCIPAL: &str = "cloudformation.amazonaws.com";

/// Inline policy name on the lookup role
pub const LOOKUP_DENY_POLICY_NAME: &str = "DontReadSecrets";

/// Inline policy name on the deployment action role
pub const PASS_ROLES_POLICY_NAME: &str = "PassRoles";

pub const PASS_ROLE_ACTION: &str = "iam:PassRole";

/// Actions that cannot be scoped to a resource ARN
pub const ACCOUNT_LEVEL_ACTIONS: &[&str] = &["ecr:GetAuthorizationToken"];

const BUCKET_ACTIONS: &[&str] = &[
    "s3:GetObject*",
    "s3:GetBucket*",
    "s3:GetEncryptionConfiguration",
    "s3:List*",
    "s3:DeleteObject*",
    "s3:PutObject",
    "s3:Abort*",
];

const KEY_ACTIONS: &[&str] = &[
    "kms:Decrypt",
    "kms:DescribeKey",
    "kms:Encrypt",
    "kms:ReEncrypt*",
    "kms:GenerateDataKey*",
];

const IMAGE_ACTIONS: &[&str] = &[
    "ecr:PutImage",
    "ecr:InitiateLayerUpload",
    "ecr:UploadLayerPart",
    "ecr:CompleteLayerUpload",
    "ecr:BatchCheckLayerAvailability",
    "ecr:DescribeRepositories",
    "ecr:DescribeImages",
    "ecr:BatchGetImage",
    "ecr:GetDownloadUrlForLayer",
];

const LOOKUP_MANAGED_POLICY: &str = "ReadOnlyAccess";

const DEPLOYMENT_MANAGED_POLICY: &str = "service-role/AWSLambdaBasicExecutionRole";

/// Builds a [`RoleSet`] for one qualifier and environment
///
/// Building is pure: the same configuration, environment and handles always
/// produce the same role set. Callers must not run two passes for the same
/// qualifier concurrently; the provisioning side has no protection against
/// that.
pub struct RoleSetBuilder<'a> {
    config: &'a BootstrapConfig,
    naming: Naming<'a>,
}

impl<'a> RoleSetBuilder<'a> {
    pub fn new(config: &'a BootstrapConfig, env: &'a BootstrapEnvironment) -> Self {
        Self {
            config,
            naming: Naming::new(&config.qualifier, env),
        }
    }

    /// Derive the four roles
    ///
    /// Fails with a configuration error on invalid input, and with an
    /// inconsistent-state error if the derived set breaks one of its
    /// invariants.
    pub fn build(&self, handles: &ResolvedHandles) -> Result<RoleSet> {
        self.naming.env().validate()?;
        self.config.validate_for(self.naming.env())?;

        let boundary_arn = self.boundary_arn();
        let roles = vec![
            self.file_publishing(handles, &boundary_arn),
            self.image_publishing(handles, &boundary_arn),
            self.lookup(&boundary_arn),
            self.deployment_action(&boundary_arn),
        ];
        let set = RoleSet::new(roles);

        verify_role_set(&set, handles, &boundary_arn)?;
        info!(
            "Derived {} bootstrap roles for qualifier '{}' in {}",
            set.len(),
            self.config.qualifier,
            self.naming.env()
        );
        Ok(set)
    }

    /// Permissions boundary ARN shared by every role
    pub fn boundary_arn(&self) -> String {
        self.naming
            .customer_policy_arn(&self.config.permissions_boundary_policy_name)
    }

    /// Bootstrap account first, then each extra account once
    fn account_trust(&self, extra: &[String]) -> TrustPolicy {
        let mut accounts: Vec<&str> = vec![self.naming.env().account.as_str()];
        for account in extra {
            if !accounts.contains(&account.as_str()) {
                accounts.push(account.as_str());
            }
        }
        TrustPolicy {
            principals: accounts.into_iter().map(Principal::account).collect(),
        }
    }

    fn role(&self, kind: RoleKind, trust: TrustPolicy, boundary_arn: &str) -> RoleSpec {
        RoleSpec {
            kind,
            name: self.naming.role_name(kind),
            arn: self.naming.role_arn(kind),
            trust,
            inline_policies: Vec::new(),
            managed_policy_arns: Vec::new(),
            permissions_boundary_arn: boundary_arn.to_string(),
        }
    }

    fn file_publishing(&self, handles: &ResolvedHandles, boundary_arn: &str) -> RoleSpec {
        let kind = RoleKind::FilePublishing;
        let account = &self.naming.env().account;

        let statements = vec![
            // Guards against a same-named bucket owned by another account
            PolicyStatement::allow()
                .actions(BUCKET_ACTIONS.iter().copied())
                .resources([handles.bucket.arn.clone(), handles.bucket.objects_arn()])
                .condition(
                    ConditionOperator::StringEquals,
                    "aws:ResourceAccount",
                    account.clone(),
                ),
            PolicyStatement::allow()
                .actions(KEY_ACTIONS.iter().copied())
                .resources([handles.key.arn.clone()]),
        ];

        let mut role = self.role(
            kind,
            self.account_trust(&self.config.trusted_accounts),
            boundary_arn,
        );
        role.inline_policies
            .push(InlinePolicy::new(self.naming.default_policy_name(kind), statements));
        debug!("Derived {} role {}", kind, role.name);
        role
    }

    fn image_publishing(&self, handles: &ResolvedHandles, boundary_arn: &str) -> RoleSpec {
        let kind = RoleKind::ImagePublishing;

        let statements = vec![
            PolicyStatement::allow()
                .actions(IMAGE_ACTIONS.iter().copied())
                .resources([handles.registry.arn.clone()]),
            // Registry tokens are issued per account; the action has no
            // resource-level permissions
            PolicyStatement::allow()
                .actions(ACCOUNT_LEVEL_ACTIONS.iter().copied())
                .resources([WILDCARD]),
        ];

        let mut role = self.role(
            kind,
            self.account_trust(&self.config.trusted_accounts),
            boundary_arn,
        );
        role.inline_policies
            .push(InlinePolicy::new(self.naming.default_policy_name(kind), statements));
        debug!("Derived {} role {}", kind, role.name);
        role
    }

    fn lookup(&self, boundary_arn: &str) -> RoleSpec {
        let kind = RoleKind::Lookup;

        let mut role = self.role(
            kind,
            self.account_trust(&self.config.trusted_accounts_for_lookup),
            boundary_arn,
        );
        role.managed_policy_arns
            .push(self.naming.aws_managed_policy_arn(LOOKUP_MANAGED_POLICY));
        // Must stay the only statement so nothing can re-allow decryption
        role.inline_policies.push(InlinePolicy::new(
            LOOKUP_DENY_POLICY_NAME,
            vec![PolicyStatement::deny()
                .actions(["kms:Decrypt"])
                .resources([WILDCARD])],
        ));
        debug!("Derived {} role {}", kind, role.name);
        role
    }

    fn deployment_action(&self, boundary_arn: &str) -> RoleSpec {
        let kind = RoleKind::DeploymentAction;

        let trust = TrustPolicy {
            principals: vec![Principal::service(DEPLOYMENT_SERVICE_PRINCIPAL)],
        };
        let mut role = self.role(kind, trust, boundary_arn);

        let passable = [
            RoleKind::FilePublishing,
            RoleKind::ImagePublishing,
            RoleKind::Lookup,
        ];
        role.inline_policies.push(InlinePolicy::new(
            PASS_ROLES_POLICY_NAME,
            vec![PolicyStatement::allow()
                .actions([PASS_ROLE_ACTION])
                .resources(passable.iter().map(|k| self.naming.role_arn(*k)))],
        ));

        role.managed_policy_arns
            .push(self.naming.aws_managed_policy_arn(DEPLOYMENT_MANAGED_POLICY));
        role.managed_policy_arns
            .extend(self.config.cloud_formation_execution_policies.iter().cloned());

        debug!(
            "Derived {} role {} with {} execution policies",
            kind,
            role.name,
            self.config.cloud_formation_execution_policies.len()
        );
        role
    }
}
