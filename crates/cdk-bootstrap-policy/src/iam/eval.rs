//! Deny-overrides evaluation of policy statements
//!
//! An explicit `Deny` that matches a request always wins, regardless of how
//! many `Allow` statements also match. Without any matching statement the
//! request is implicitly denied.

use globset::GlobBuilder;
use std::collections::BTreeMap;

use super::{ConditionOperator, PolicyStatement, Principal};

/// Outcome of evaluating a request against a set of statements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    ExplicitDeny,
    ImplicitDeny,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// A single action on a single resource
#[derive(Debug, Clone, Default)]
pub struct AccessRequest {
    pub action: String,
    pub resource: String,
    /// Caller, when evaluating a resource policy
    pub principal: Option<Principal>,
    /// Condition keys available to the request (`aws:ResourceAccount`, ...)
    pub context: BTreeMap<String, String>,
}

impl AccessRequest {
    pub fn new(action: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            resource: resource.into(),
            principal: None,
            context: BTreeMap::new(),
        }
    }

    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// IAM-style wildcard match: `*` spans any run of characters, `?` one
fn wildcard_match(pattern: &str, value: &str, case_insensitive: bool) -> bool {
    if !pattern.contains(['*', '?']) {
        return if case_insensitive {
            pattern.eq_ignore_ascii_case(value)
        } else {
            pattern == value
        };
    }

    match GlobBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .literal_separator(false)
        .build()
    {
        Ok(glob) => glob.compile_matcher().is_match(value),
        // Patterns globset cannot parse (stray brackets) only match literally
        Err(_) => pattern == value,
    }
}

/// Whether an action pattern (`kms:Decrypt*`) covers a concrete action
pub fn action_matches(pattern: &str, action: &str) -> bool {
    wildcard_match(pattern, action, true)
}

/// Whether a resource pattern covers a concrete resource
pub fn resource_matches(pattern: &str, resource: &str) -> bool {
    wildcard_match(pattern, resource, false)
}

fn conditions_hold(statement: &PolicyStatement, request: &AccessRequest) -> bool {
    statement.conditions.iter().all(|(operator, entries)| {
        entries.iter().all(|(key, expected)| {
            let Some(actual) = request.context.get(key) else {
                return false;
            };
            match operator {
                ConditionOperator::StringEquals => actual == expected,
                ConditionOperator::StringLike => wildcard_match(expected, actual, false),
            }
        })
    })
}

/// Whether `statement` applies to `request`, ignoring its effect
pub fn statement_matches(statement: &PolicyStatement, request: &AccessRequest) -> bool {
    if !statement
        .actions
        .iter()
        .any(|a| action_matches(a, &request.action))
    {
        return false;
    }

    // Resource policies with no resource list apply to their own resource
    if !statement.resources.is_empty()
        && !statement
            .resources
            .iter()
            .any(|r| resource_matches(r, &request.resource))
    {
        return false;
    }

    if !statement.principals.is_empty() {
        let Some(caller) = &request.principal else {
            return false;
        };
        if !statement.principals.iter().any(|p| p.covers(caller)) {
            return false;
        }
    }

    conditions_hold(statement, request)
}

/// Evaluate `request` with deny-overrides semantics
pub fn evaluate<'a, I>(statements: I, request: &AccessRequest) -> Decision
where
    I: IntoIterator<Item = &'a PolicyStatement>,
{
    let mut allowed = false;
    for statement in statements {
        if !statement_matches(statement, request) {
            continue;
        }
        if statement.is_deny() {
            return Decision::ExplicitDeny;
        }
        allowed = true;
    }

    if allowed {
        Decision::Allow
    } else {
        Decision::ImplicitDeny
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iam::WILDCARD;

    #[test]
    fn test_action_wildcards_are_case_insensitive() {
        assert!(action_matches("kms:Decrypt*", "kms:Decrypt"));
        assert!(action_matches("kms:decrypt", "KMS:Decrypt"));
        assert!(action_matches("s3:GetObject*", "s3:GetObjectVersion"));
        assert!(action_matches("*", "iam:PassRole"));
        assert!(!action_matches("kms:Encrypt*", "kms:Decrypt"));
    }

    #[test]
    fn test_resource_wildcards_span_slashes() {
        assert!(resource_matches("arn:aws:s3:::bucket/*", "arn:aws:s3:::bucket/a/b/c"));
        assert!(!resource_matches("arn:aws:s3:::bucket/*", "arn:aws:s3:::bucket"));
        assert!(!resource_matches("arn:aws:s3:::Bucket", "arn:aws:s3:::bucket"));
    }

    #[test]
    fn test_deny_overrides_later_allow() {
        let statements = vec![
            PolicyStatement::deny()
                .actions(["kms:Decrypt"])
                .resources([WILDCARD]),
            PolicyStatement::allow()
                .actions(["kms:*"])
                .resources(["arn:aws:kms:eu-west-1:111111111111:key/k"]),
        ];
        let request = AccessRequest::new("kms:Decrypt", "arn:aws:kms:eu-west-1:111111111111:key/k");
        assert_eq!(evaluate(&statements, &request), Decision::ExplicitDeny);

        let request = AccessRequest::new("kms:Encrypt", "arn:aws:kms:eu-west-1:111111111111:key/k");
        assert_eq!(evaluate(&statements, &request), Decision::Allow);
    }

    #[test]
    fn test_implicit_deny_without_match() {
        let statements = vec![PolicyStatement::allow()
            .actions(["s3:GetObject"])
            .resources(["arn:aws:s3:::b/*"])];
        let request = AccessRequest::new("s3:PutObject", "arn:aws:s3:::b/key");
        assert_eq!(evaluate(&statements, &request), Decision::ImplicitDeny);
    }

    #[test]
    fn test_conditions_must_all_hold() {
        let statements = vec![PolicyStatement::allow()
            .actions(["s3:GetObject"])
            .resources(["arn:aws:s3:::b/*"])
            .condition(ConditionOperator::StringEquals, "aws:ResourceAccount", "111111111111")];

        let missing = AccessRequest::new("s3:GetObject", "arn:aws:s3:::b/k");
        assert_eq!(evaluate(&statements, &missing), Decision::ImplicitDeny);

        let other_account = AccessRequest::new("s3:GetObject", "arn:aws:s3:::b/k")
            .with_context("aws:ResourceAccount", "999999999999");
        assert_eq!(evaluate(&statements, &other_account), Decision::ImplicitDeny);

        let same_account = AccessRequest::new("s3:GetObject", "arn:aws:s3:::b/k")
            .with_context("aws:ResourceAccount", "111111111111");
        assert!(evaluate(&statements, &same_account).is_allowed());
    }

    #[test]
    fn test_string_like_condition() {
        let statements = vec![PolicyStatement::allow()
            .principal(Principal::service("lambda.amazonaws.com"))
            .actions(["ecr:BatchGetImage"])
            .condition(
                ConditionOperator::StringLike,
                "aws:sourceArn",
                "arn:aws:lambda:eu-west-1:111111111111:function:*",
            )];

        let request = AccessRequest::new("ecr:BatchGetImage", "repo")
            .with_principal(Principal::service("lambda.amazonaws.com"))
            .with_context("aws:sourceArn", "arn:aws:lambda:eu-west-1:111111111111:function:fn");
        assert!(evaluate(&statements, &request).is_allowed());

        let foreign = AccessRequest::new("ecr:BatchGetImage", "repo")
            .with_principal(Principal::service("lambda.amazonaws.com"))
            .with_context("aws:sourceArn", "arn:aws:lambda:eu-west-1:222222222222:function:fn");
        assert_eq!(evaluate(&statements, &foreign), Decision::ImplicitDeny);
    }

    #[test]
    fn test_principal_statement_requires_caller() {
        let statements = vec![PolicyStatement::allow()
            .principal(Principal::account("111111111111"))
            .actions(["kms:*"])
            .resources([WILDCARD])];
        let anonymous = AccessRequest::new("kms:Decrypt", "k");
        assert_eq!(evaluate(&statements, &anonymous), Decision::ImplicitDeny);

        let root = anonymous.with_principal(Principal::account("111111111111"));
        assert!(evaluate(&statements, &root).is_allowed());
    }
}
