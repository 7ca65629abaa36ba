//! Application layer: manifests, lookups and services
//!
//! This layer orchestrates domain logic and owns file access.

pub mod error;
pub mod error_ext;
pub mod manifest;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use manifest::{Manifest, MapLookup};
pub use services::TreeService;
