//! Handles to live resources returned by the provisioning collaborator

use serde::{Deserialize, Serialize};

/// Encryption key handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyHandle {
    pub arn: String,
}

impl KeyHandle {
    pub fn new(arn: impl Into<String>) -> Self {
        Self { arn: arn.into() }
    }
}

/// Artifact bucket handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BucketHandle {
    pub name: String,
    pub arn: String,
}

impl BucketHandle {
    pub fn new(name: impl Into<String>, arn: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arn: arn.into(),
        }
    }

    /// Resource pattern covering every object in the bucket
    pub fn objects_arn(&self) -> String {
        format!("{}/*", self.arn)
    }
}

/// Container image registry handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistryHandle {
    pub name: String,
    pub arn: String,
}

impl RegistryHandle {
    pub fn new(name: impl Into<String>, arn: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arn: arn.into(),
        }
    }
}

/// Created role handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleHandle {
    pub name: String,
    pub arn: String,
}

impl RoleHandle {
    pub fn new(name: impl Into<String>, arn: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arn: arn.into(),
        }
    }
}

/// Handles resolved earlier in the same bootstrap pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedHandles {
    pub key: KeyHandle,
    pub bucket: BucketHandle,
    pub registry: RegistryHandle,
}

impl ResolvedHandles {
    pub fn new(key: KeyHandle, bucket: BucketHandle, registry: RegistryHandle) -> Self {
        Self {
            key,
            bucket,
            registry,
        }
    }

    /// Every resource reference a role policy may use from this pass
    pub fn resource_references(&self) -> Vec<String> {
        vec![
            self.key.arn.clone(),
            self.bucket.arn.clone(),
            self.bucket.objects_arn(),
            self.registry.arn.clone(),
        ]
    }
}
