//! Record of a completed bootstrap pass

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cdk_bootstrap_core::{BootstrapEnvironment, ResolvedHandles, RoleHandle, RoleKind};
use cdk_bootstrap_policy::{EncryptionDecision, RoleSet};

use crate::error::Result;
use crate::outputs::BootstrapOutputs;
use crate::resources::{BucketSpec, RegistrySpec};

/// Everything decided and created in one pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapPlan {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub qualifier: String,
    pub environment: BootstrapEnvironment,
    pub encryption: EncryptionDecision,
    pub bucket: BucketSpec,
    pub registry: RegistrySpec,
    pub handles: ResolvedHandles,
    pub roles: RoleSet,
    /// Created roles, in creation order
    pub role_handles: Vec<(RoleKind, RoleHandle)>,
    pub outputs: BootstrapOutputs,
}

impl BootstrapPlan {
    pub fn role_handle(&self, kind: RoleKind) -> Option<&RoleHandle> {
        self.role_handles
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, handle)| handle)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| cdk_bootstrap_core::Error::from(e).into())
    }
}
