//! Resource lifecycle on stack deletion

use serde::{Deserialize, Serialize};

/// What happens to a resource when the bootstrap is torn down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalPolicy {
    /// Keep the resource (bootstrap default; assets and keys outlive the stack)
    #[default]
    Retain,
    Destroy,
}
