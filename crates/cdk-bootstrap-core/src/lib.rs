//! # cdk-bootstrap-core
//!
//! Core library for the CDK bootstrap product providing:
//! - Bootstrap configuration model and YAML loading with env overrides
//! - Target environment (account, region, partition)
//! - The deterministic naming scheme shared by every generated resource
//! - Handles to resources produced by the provisioning collaborator
//! - The error taxonomy (configuration vs inconsistent state)

pub mod config;
pub mod error;
pub mod naming;
pub mod types;
pub mod validation;

pub use error::{Error, ErrorKind, Result};
pub use naming::Naming;
pub use types::{
    BootstrapConfig, BootstrapEnvironment, BucketHandle, KeyHandle, RegistryHandle,
    RemovalPolicy, ResolvedHandles, RoleHandle, RoleKind,
};
