//! Cross-entity checks on a derived role set
//!
//! Every failure here is a broken builder contract, never a user input
//! problem, so it is reported as an inconsistent-state error.

use std::collections::BTreeSet;
use tracing::warn;

use cdk_bootstrap_core::{Error, ResolvedHandles, Result, RoleKind};

use super::builder::{ACCOUNT_LEVEL_ACTIONS, PASS_ROLE_ACTION};
use super::{RoleSet, RoleSpec};
use crate::iam::eval::action_matches;
use crate::iam::{Effect, Principal, WILDCARD};

fn fail(message: String) -> Error {
    warn!("Role set consistency check failed: {}", message);
    Error::inconsistent_state(message)
}

/// Check the invariants of `set` against the handles of the same pass
pub fn verify_role_set(set: &RoleSet, handles: &ResolvedHandles, boundary_arn: &str) -> Result<()> {
    check_shape(set)?;

    for role in set {
        if role.permissions_boundary_arn != boundary_arn {
            return Err(fail(format!(
                "role {} has boundary {} instead of {}",
                role.name, role.permissions_boundary_arn, boundary_arn
            )));
        }
        for statement in role.statements() {
            statement.validate()?;
        }
    }

    check_references(set, handles)?;
    check_lookup(set)?;
    check_deployment_action(set)?;
    Ok(())
}

fn require(set: &RoleSet, kind: RoleKind) -> Result<&RoleSpec> {
    set.get(kind)
        .ok_or_else(|| fail(format!("role set has no {} role", kind)))
}

fn check_shape(set: &RoleSet) -> Result<()> {
    let kinds: Vec<RoleKind> = set.iter().map(|r| r.kind).collect();
    if kinds != RoleKind::ALL {
        return Err(fail(format!("unexpected role kinds {:?}", kinds)));
    }
    let arns: BTreeSet<&str> = set.iter().map(|r| r.arn.as_str()).collect();
    if arns.len() != set.len() {
        return Err(fail("role ARNs are not unique".to_string()));
    }
    Ok(())
}

fn has_pattern(resource: &str) -> bool {
    resource.contains(['*', '?'])
}

/// Non-wildcard resources must come from this pass; wildcards are only
/// allowed on denies and on account-level actions
///
/// The bucket objects pattern is the only other resource allowed to carry
/// `*` or `?`, and only when the handles themselves are literal.
fn check_references(set: &RoleSet, handles: &ResolvedHandles) -> Result<()> {
    for arn in [&handles.key.arn, &handles.bucket.arn, &handles.registry.arn] {
        if has_pattern(arn) {
            return Err(fail(format!("resolved handle {} is not a literal ARN", arn)));
        }
    }
    let objects_arn = handles.bucket.objects_arn();

    let mut known: BTreeSet<String> = handles.resource_references().into_iter().collect();
    known.extend(set.iter().map(|r| r.arn.clone()));

    for role in set {
        for statement in role.statements() {
            for resource in &statement.resources {
                if resource == WILDCARD {
                    let account_level = statement
                        .actions
                        .iter()
                        .all(|a| ACCOUNT_LEVEL_ACTIONS.contains(&a.as_str()));
                    if statement.effect == Effect::Allow && !account_level {
                        return Err(fail(format!(
                            "role {} allows {:?} on every resource",
                            role.name, statement.actions
                        )));
                    }
                } else if has_pattern(resource) && *resource != objects_arn {
                    return Err(fail(format!(
                        "role {} uses pattern resource {}",
                        role.name, resource
                    )));
                } else if !known.contains(resource) {
                    return Err(fail(format!(
                        "role {} references {} which was not produced in this pass",
                        role.name, resource
                    )));
                }
            }
        }
    }
    Ok(())
}

fn check_lookup(set: &RoleSet) -> Result<()> {
    let lookup = require(set, RoleKind::Lookup)?;

    let denies: Vec<_> = lookup.statements().filter(|s| s.is_deny()).collect();
    let [deny] = denies.as_slice() else {
        return Err(fail(format!(
            "lookup role has {} deny statements, expected exactly one",
            denies.len()
        )));
    };
    if deny.actions != ["kms:Decrypt"] || deny.resources != [WILDCARD] || !deny.is_unconditional()
    {
        return Err(fail(
            "lookup deny must be an unconditional kms:Decrypt on *".to_string(),
        ));
    }

    if lookup
        .statements()
        .filter(|s| !s.is_deny())
        .any(|s| s.actions.iter().any(|a| action_matches(a, "kms:Decrypt")))
    {
        return Err(fail(
            "lookup role allows an action that covers kms:Decrypt".to_string(),
        ));
    }
    Ok(())
}

fn check_deployment_action(set: &RoleSet) -> Result<()> {
    let deploy = require(set, RoleKind::DeploymentAction)?;

    if deploy
        .trust
        .principals
        .iter()
        .any(|p| !matches!(p, Principal::Service(_)))
    {
        return Err(fail(
            "deployment action role must only trust a service principal".to_string(),
        ));
    }

    let expected: BTreeSet<&str> = set
        .iter()
        .filter(|r| r.kind != RoleKind::DeploymentAction)
        .map(|r| r.arn.as_str())
        .collect();
    let passable: BTreeSet<&str> = deploy.pass_role_resources().into_iter().collect();
    if passable != expected {
        return Err(fail(format!(
            "deployment action may pass {:?}, expected {:?}",
            passable, expected
        )));
    }

    // Nothing else on the role may grant pass-role through a wildcard action
    if deploy.statements().filter(|s| !s.is_deny()).any(|s| {
        s.actions
            .iter()
            .any(|a| a != PASS_ROLE_ACTION && action_matches(a, PASS_ROLE_ACTION))
    }) {
        return Err(fail(
            "deployment action role grants iam:PassRole through a wildcard".to_string(),
        ));
    }
    Ok(())
}
