//! Common test utilities for cdk-bootstrap-provisioner
//!
//! Provides shared test infrastructure including:
//! - Fixed environments and configurations
//! - A mockall-based provisioning collaborator
//! - Assertion helpers for plans and pipeline errors

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod assertions;
pub mod fixtures;
pub mod mock_cloud;

pub use assertions::*;
pub use fixtures::*;
pub use mock_cloud::*;
