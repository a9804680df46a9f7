//! Configuration loading

mod loader;

pub use loader::{
    ENV_BOUNDARY_POLICY, ENV_KMS_KEY_ID, ENV_QUALIFIER, ENV_TRUSTED_ACCOUNTS,
    ENV_TRUSTED_ACCOUNTS_FOR_LOOKUP,
};
