//! Type definitions for bootstrap configuration, environments and handles

mod config_types;
mod environment;
mod handles;
mod retention;
mod role_kind;

pub use config_types::*;
pub use environment::*;
pub use handles::*;
pub use retention::*;
pub use role_kind::*;
