/// Source location tracking for declarations
///
/// Records where a declaration or framework reference was encountered so the
/// renderer can point back at the documented source.
use std::fmt;

use smol_str::SmolStr;

use crate::error::{RegistryError, Result};

/// A file and 1-based line in documented source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceInfo {
    file: SmolStr,
    line: usize,
}

impl SourceInfo {
    pub fn new(file: impl Into<SmolStr>, line: usize) -> Result<Self> {
        let file = file.into();
        if file.is_empty() {
            return Err(RegistryError::invalid_argument(
                "file",
                "source file path must not be empty",
            ));
        }
        Ok(Self { file, line })
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

impl fmt::Display for SourceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
