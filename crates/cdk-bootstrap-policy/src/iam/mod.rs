//! IAM policy statement model
//!
//! Statements are plain data. Conditions are kept in ordered maps so that a
//! serialized statement is byte-for-byte stable across runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use cdk_bootstrap_core::{Error, Result};

pub mod eval;

pub use eval::{evaluate, AccessRequest, Decision};

/// Resource wildcard
pub const WILDCARD: &str = "*";

/// Statement effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::Allow => write!(f, "Allow"),
            Effect::Deny => write!(f, "Deny"),
        }
    }
}

/// Principal in a trust policy or resource policy statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Principal {
    /// Every identity in an account (the account root)
    Account(String),
    /// A service principal such as `cloudformation.amazonaws.com`
    Service(String),
    /// `*`
    Any,
}

impl Principal {
    pub fn account(id: impl Into<String>) -> Self {
        Principal::Account(id.into())
    }

    pub fn service(name: impl Into<String>) -> Self {
        Principal::Service(name.into())
    }

    /// Whether this principal (from a statement) covers `other` (from a request)
    pub fn covers(&self, other: &Principal) -> bool {
        matches!(self, Principal::Any) || self == other
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Principal::Account(id) => write!(f, "account:{}", id),
            Principal::Service(name) => write!(f, "service:{}", name),
            Principal::Any => write!(f, "*"),
        }
    }
}

/// Condition operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConditionOperator {
    StringEquals,
    StringLike,
}

/// Conditions grouped by operator, then by condition key
pub type Conditions = BTreeMap<ConditionOperator, BTreeMap<String, String>>;

/// A single policy statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,

    pub effect: Effect,

    /// Only set on resource policies and trust policies
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub principals: Vec<Principal>,

    pub actions: Vec<String>,

    /// May be empty only when `principals` is set; the statement then applies
    /// to the resource the policy is attached to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub conditions: Conditions,
}

impl PolicyStatement {
    fn with_effect(effect: Effect) -> Self {
        Self {
            sid: None,
            effect,
            principals: Vec::new(),
            actions: Vec::new(),
            resources: Vec::new(),
            conditions: BTreeMap::new(),
        }
    }

    /// Start an `Allow` statement
    pub fn allow() -> Self {
        Self::with_effect(Effect::Allow)
    }

    /// Start a `Deny` statement
    pub fn deny() -> Self {
        Self::with_effect(Effect::Deny)
    }

    pub fn sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    pub fn principal(mut self, principal: Principal) -> Self {
        self.principals.push(principal);
        self
    }

    pub fn actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions.extend(actions.into_iter().map(Into::into));
        self
    }

    pub fn resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources.extend(resources.into_iter().map(Into::into));
        self
    }

    pub fn condition(
        mut self,
        operator: ConditionOperator,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.conditions
            .entry(operator)
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    pub fn is_deny(&self) -> bool {
        self.effect == Effect::Deny
    }

    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Whether any resource entry is the bare wildcard
    pub fn has_wildcard_resource(&self) -> bool {
        self.resources.iter().any(|r| r == WILDCARD)
    }

    /// Check the structural rules of a statement
    pub fn validate(&self) -> Result<()> {
        if self.actions.is_empty() || self.actions.iter().any(|a| a.is_empty()) {
            return Err(Error::inconsistent_state(format!(
                "statement {:?} has an empty action list or entry",
                self.sid
            )));
        }
        if self.resources.is_empty() && self.principals.is_empty() {
            return Err(Error::inconsistent_state(format!(
                "statement {:?} has neither resources nor principals",
                self.sid
            )));
        }
        if self.resources.iter().any(|r| r.is_empty()) {
            return Err(Error::inconsistent_state(format!(
                "statement {:?} has an empty resource entry",
                self.sid
            )));
        }
        Ok(())
    }
}

/// Named policy embedded in a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlinePolicy {
    pub name: String,
    pub statements: Vec<PolicyStatement>,
}

impl InlinePolicy {
    pub fn new(name: impl Into<String>, statements: Vec<PolicyStatement>) -> Self {
        Self {
            name: name.into(),
            statements,
        }
    }
}
