//! Documented declarations and the framework registries they own.

mod declaration;
pub mod frameworks;

pub use declaration::{DeclarationKind, DeclarationRef, Documentable};
pub use frameworks::{
    EntityState, FrameworkData, FrameworkRegistry, NameOrdering, RegistryOptions, SortedByName,
};
