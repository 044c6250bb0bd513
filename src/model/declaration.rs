use std::fmt;

use smol_str::SmolStr;

use crate::error::{RegistryError, Result};

/// The kind of declaration a registry is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DeclarationKind {
    Class,
    Category,
    Extension,
    Protocol,
    Framework,
}

impl DeclarationKind {
    /// Get a display string for this kind.
    pub fn display(self) -> &'static str {
        match self {
            DeclarationKind::Class => "class",
            DeclarationKind::Category => "category",
            DeclarationKind::Extension => "extension",
            DeclarationKind::Protocol => "protocol",
            DeclarationKind::Framework => "framework",
        }
    }
}

/// Handle naming the declaration that owns a registry.
///
/// Registries only hold on to this association; they never call back into
/// the declaration, so a name and kind are all that is kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeclarationRef {
    kind: DeclarationKind,
    name: SmolStr,
}

impl DeclarationRef {
    pub fn new(kind: DeclarationKind, name: impl Into<SmolStr>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RegistryError::invalid_argument(
                "parent",
                format!("{} name must not be empty", kind.display()),
            ));
        }
        Ok(Self { kind, name })
    }

    pub fn class(name: impl Into<SmolStr>) -> Result<Self> {
        Self::new(DeclarationKind::Class, name)
    }

    pub fn protocol(name: impl Into<SmolStr>) -> Result<Self> {
        Self::new(DeclarationKind::Protocol, name)
    }

    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for DeclarationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.display(), self.name)
    }
}

/// Anything that can own a registry: a documentable declaration.
pub trait Documentable {
    fn declaration(&self) -> DeclarationRef;
}

impl Documentable for DeclarationRef {
    fn declaration(&self) -> DeclarationRef {
        self.clone()
    }
}
