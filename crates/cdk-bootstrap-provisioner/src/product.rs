//! Self-service catalog product

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const PRODUCT_NAME: &str = "CDKBootstrap";
pub const PRODUCT_OWNER: &str = "CCOE";
pub const PRODUCT_VERSION: &str = "v1.0";
pub const PRODUCT_DESCRIPTION: &str = "CDKBootstrap is a product that deploys CDKBootstrap";

/// Catalog product wrapping the bootstrap template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDefinition {
    pub name: String,
    pub owner: String,
    pub distributor: String,
    pub version: String,
    pub description: String,
    /// Description of the single product version
    pub version_description: String,
}

impl Default for ProductDefinition {
    fn default() -> Self {
        Self {
            name: PRODUCT_NAME.to_string(),
            owner: PRODUCT_OWNER.to_string(),
            distributor: PRODUCT_OWNER.to_string(),
            version: PRODUCT_VERSION.to_string(),
            description: PRODUCT_DESCRIPTION.to_string(),
            version_description: PRODUCT_DESCRIPTION.to_string(),
        }
    }
}

/// Entry returned by the catalog after registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    pub product_id: String,
    pub product_name: String,
    pub version: String,
    pub registered_at: DateTime<Utc>,
}
