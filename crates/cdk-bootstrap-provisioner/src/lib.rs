//! Bootstrap pipeline for the CDK bootstrap product
//!
//! Drives a [`ProvisioningClient`] through one bootstrap pass: resolve the
//! encryption key, create the artifact bucket and image registry, derive
//! and create the four bootstrap roles, and collect the named outputs. A
//! finished [`BootstrapPlan`] can be published through a [`CatalogClient`].
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = BootstrapConfig::load_and_validate(path)?;
//! let env = BootstrapEnvironment::new("111111111111", "eu-west-1")?;
//! let client = InMemoryProvisioner::new(env.clone());
//!
//! let plan = Bootstrapper::new(&client).run(&config, &env).await?;
//! let entry = register_product(&client, &plan, &ProductDefinition::default()).await?;
//! ```

pub mod error;
pub mod memory;
pub mod outputs;
pub mod pipeline;
pub mod plan;
pub mod product;
pub mod resources;
pub mod traits;

pub use error::{ProvisionError, Result};
pub use memory::InMemoryProvisioner;
pub use outputs::{BootstrapOutputs, NamedOutput};
pub use pipeline::{register_product, Bootstrapper};
pub use plan::BootstrapPlan;
pub use product::{ListingEntry, ProductDefinition};
pub use resources::{BucketSpec, RegistrySpec};
pub use traits::{CatalogClient, ProvisioningClient};
