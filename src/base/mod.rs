//! Foundation types for the declaration model.
//!
//! - [`SourceInfo`] - File and line where something was declared
//! - [`RegistryId`] - Identity of a framework registry
//!
//! This module has NO dependencies on the model.

mod registry_id;
mod source_info;

pub use registry_id::RegistryId;
pub use source_info::SourceInfo;
