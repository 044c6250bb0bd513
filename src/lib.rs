//! # docmodel
//!
//! Declaration model for documentation generation: the registries that track
//! which frameworks a documented declaration belongs to.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! model     → Declarations, framework registries (register, merge, replace)
//!   ↓
//! base      → Primitives (SourceInfo, RegistryId)
//!   ↓
//! error     → RegistryError, Result
//! ```
//!
//! The model is single-threaded: frameworks are shared between registries
//! with `Rc`, and a registry is mutated only through `&mut` access by its
//! owning declaration.

/// Contract violations reported by the model
pub mod error;

/// Foundation types: SourceInfo, RegistryId
pub mod base;

/// Declarations and framework registries
pub mod model;

pub use base::{RegistryId, SourceInfo};
pub use error::{RegistryError, Result};
pub use model::{
    DeclarationKind, DeclarationRef, Documentable, EntityState, FrameworkData, FrameworkRegistry,
    NameOrdering, RegistryOptions, SortedByName,
};
