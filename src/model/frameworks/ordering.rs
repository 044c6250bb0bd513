use std::cmp::Ordering;

/// How registry names are compared when producing sorted output.
///
/// Both variants are locale-independent. Equal keys keep insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NameOrdering {
    /// Byte-wise `str` ordering.
    #[default]
    Ordinal,
    /// ASCII case folded before comparing.
    CaseInsensitive,
}

impl NameOrdering {
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            NameOrdering::Ordinal => a.cmp(b),
            NameOrdering::CaseInsensitive => a
                .bytes()
                .map(|c| c.to_ascii_lowercase())
                .cmp(b.bytes().map(|c| c.to_ascii_lowercase())),
        }
    }
}

/// Construction options for a [`FrameworkRegistry`](super::FrameworkRegistry).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryOptions {
    pub ordering: NameOrdering,
}

impl RegistryOptions {
    pub fn with_ordering(mut self, ordering: NameOrdering) -> Self {
        self.ordering = ordering;
        self
    }
}
