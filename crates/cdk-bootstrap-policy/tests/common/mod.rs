//! Common test utilities for cdk-bootstrap-policy
//!
//! Provides shared test infrastructure including:
//! - Fixed environments, configurations and resolved handles
//! - Assertion helpers for role sets

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
