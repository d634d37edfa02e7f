//! Mapping configuration
//!
//! - `types`: build-time constants and the runtime mapping
//! - `store`: versioned postcard persistence
//! - `toml`: text mapping files

pub mod store;
pub mod toml;
pub mod types;

pub use types::*;
