//! Bootstrap policy construction
//!
//! This crate holds the decision logic of a bootstrap pass:
//!
//! - **KeySelector** - picks one of three encryption modes for the artifact
//!   bucket from a single configuration value
//! - **RoleSetBuilder** - derives the file publishing, image publishing,
//!   lookup and deployment action roles with their trust and permission
//!   policies, all capped by the same permissions boundary
//! - **iam** - the statement model and a deny-overrides evaluator used to
//!   check what a derived role can and cannot do
//!
//! Everything here is synchronous and pure. Creating the resources is the
//! job of a provisioning client (see `cdk-bootstrap-provisioner`).
//!
//! # Usage
//!
//! ```rust,ignore
//! let decision = KeySelector::resolve(&config, &env);
//! let key = client.create_or_lookup_key(&decision).await?;
//! // ... create bucket and registry ...
//! let roles = RoleSetBuilder::new(&config, &env).build(&handles)?;
//! ```

pub mod iam;
pub mod key_selector;
pub mod roles;

pub use iam::{
    evaluate, AccessRequest, ConditionOperator, Decision, Effect, InlinePolicy, PolicyStatement,
    Principal, WILDCARD,
};
pub use key_selector::{BucketEncryption, EncryptionDecision, KeySelector, ManagedKeySpec};
pub use roles::{verify_role_set, RoleSet, RoleSetBuilder, RoleSpec, TrustPolicy};
