//! Assertion helpers for role sets

use cdk_bootstrap_core::RoleKind;
use cdk_bootstrap_policy::{Effect, Principal, RoleSet, RoleSpec, WILDCARD};

pub fn role<'a>(set: &'a RoleSet, kind: RoleKind) -> &'a RoleSpec {
    set.get(kind)
        .unwrap_or_else(|| panic!("role set is missing the {} role", kind))
}

/// Assert that every role carries `boundary`
pub fn assert_shared_boundary(set: &RoleSet, boundary: &str) {
    assert_eq!(set.len(), 4, "expected exactly four roles");
    for role in set {
        assert_eq!(
            role.permissions_boundary_arn, boundary,
            "role {} has the wrong boundary",
            role.name
        );
    }
}

/// Assert the account principals of a role's trust policy, in order
pub fn assert_trusted_accounts(role: &RoleSpec, expected: &[&str]) {
    assert_eq!(
        role.trust.accounts(),
        expected,
        "unexpected trusted accounts on {}",
        role.name
    );
}

/// Assert the lookup role has exactly one deny: kms:Decrypt on *
pub fn assert_single_decrypt_deny(role: &RoleSpec) {
    let denies: Vec<_> = role
        .statements()
        .filter(|s| s.effect == Effect::Deny)
        .collect();
    assert_eq!(denies.len(), 1, "expected exactly one deny on {}", role.name);
    assert_eq!(denies[0].actions, vec!["kms:Decrypt"]);
    assert_eq!(denies[0].resources, vec![WILDCARD]);
    assert!(denies[0].conditions.is_empty());
}

/// Assert that no account principal can assume `role`
pub fn assert_service_only_trust(role: &RoleSpec, service: &str) {
    assert_eq!(role.trust.principals, vec![Principal::service(service)]);
}
