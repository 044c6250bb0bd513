//! Error types for registry operations.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::RegistryId;

/// Result alias used throughout the model.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Contract violations reported by the declaration model.
///
/// None of these are transient: each one means the caller (usually the
/// parser or resolver) handed the model something inconsistent, and the
/// enclosing operation should be abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A required input was missing or empty.
    #[error("Invalid {what}: {reason}")]
    InvalidArgument { what: &'static str, reason: String },

    /// A different instance already claims this name.
    #[error("Framework '{name}' is already registered in registry {registry} by another instance")]
    DuplicateEntity { name: SmolStr, registry: RegistryId },

    /// The framework is not a member of the registry.
    #[error("Framework '{name}' is not registered in registry {registry}")]
    NotFound { name: SmolStr, registry: RegistryId },
}

impl RegistryError {
    /// Create an invalid argument error.
    pub fn invalid_argument(what: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            what,
            reason: reason.into(),
        }
    }

    /// Create a duplicate entity error.
    pub fn duplicate(name: impl Into<SmolStr>, registry: RegistryId) -> Self {
        Self::DuplicateEntity {
            name: name.into(),
            registry,
        }
    }

    /// Create a not found error.
    pub fn not_found(name: impl Into<SmolStr>, registry: RegistryId) -> Self {
        Self::NotFound {
            name: name.into(),
            registry,
        }
    }
}
