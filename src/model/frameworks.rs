/// Per-declaration registries of uniquely named frameworks
mod data;
mod merge;
mod nesting;
mod ordering;
mod registry;
#[cfg(feature = "serde")]
mod serialize;

pub use data::{EntityState, FrameworkData};
pub use ordering::{NameOrdering, RegistryOptions};
pub use registry::{FrameworkRegistry, SortedByName};
