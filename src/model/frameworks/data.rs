use std::cell::{Cell, Ref, RefCell, RefMut};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::{Rc, Weak};

use smol_str::SmolStr;

use crate::base::{RegistryId, SourceInfo};
use crate::error::{RegistryError, Result};
use crate::model::{DeclarationKind, DeclarationRef, Documentable};

use super::registry::FrameworkRegistry;

/// Resolution state of a framework as seen by the registries holding it.
///
/// A framework only ever moves from `Provisional` to `Resolved`, and only by
/// being swapped out through [`FrameworkRegistry::replace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EntityState {
    /// Placeholder: only the name is known so far.
    Provisional,
    Resolved,
}

/// A framework a declaration is associated with.
///
/// Frameworks are shared between registries by reference (`Rc`), and their
/// identity is the allocation, not the name. The name never changes after
/// construction; uniqueness of names is enforced by each registry. Nesting
/// never forms a cycle, so a framework is freed once no registry or handle
/// refers to it.
pub struct FrameworkData {
    declaration: DeclarationRef,
    state: EntityState,
    /// Registry that most recently registered this framework. Not an owner.
    owner: Cell<Option<RegistryId>>,
    source_infos: RefCell<BTreeSet<SourceInfo>>,
    /// Frameworks this framework is itself included in.
    frameworks: RefCell<FrameworkRegistry>,
}

impl FrameworkData {
    /// Create a resolved framework.
    pub fn new(name: impl Into<SmolStr>) -> Result<Rc<Self>> {
        Self::with_state(name.into(), EntityState::Resolved)
    }

    /// Create a placeholder for a framework whose definition has not been seen yet.
    pub fn placeholder(name: impl Into<SmolStr>) -> Result<Rc<Self>> {
        Self::with_state(name.into(), EntityState::Provisional)
    }

    fn with_state(name: SmolStr, state: EntityState) -> Result<Rc<Self>> {
        if name.trim().is_empty() {
            return Err(RegistryError::invalid_argument(
                "name",
                "framework name must not be empty",
            ));
        }
        let declaration = DeclarationRef::new(DeclarationKind::Framework, name)?;
        Ok(Rc::new_cyclic(|this| {
            let frameworks = FrameworkRegistry::nested(&declaration, Weak::clone(this));
            Self {
                declaration,
                state,
                owner: Cell::new(None),
                source_infos: RefCell::new(BTreeSet::new()),
                frameworks: RefCell::new(frameworks),
            }
        }))
    }

    pub fn name(&self) -> &str {
        self.declaration.name()
    }

    pub(super) fn key(&self) -> SmolStr {
        SmolStr::from(self.declaration.name())
    }

    pub fn state(&self) -> EntityState {
        self.state
    }

    pub fn is_provisional(&self) -> bool {
        self.state == EntityState::Provisional
    }

    /// The registry that last registered this framework, if any.
    ///
    /// Set by `register` and `replace` only. A framework merged into another
    /// registry keeps the owner it had, and one replaced out of a registry
    /// loses it, so this is context for diagnostics rather than a way to find
    /// every registry holding the framework.
    pub fn owner(&self) -> Option<RegistryId> {
        self.owner.get()
    }

    pub(super) fn set_owner(&self, registry: RegistryId) {
        self.owner.set(Some(registry));
    }

    pub(super) fn clear_owner(&self, registry: RegistryId) {
        if self.owner.get() == Some(registry) {
            self.owner.set(None);
        }
    }

    /// Whether two handles point at the very same framework instance.
    pub fn same(a: &Rc<Self>, b: &Rc<Self>) -> bool {
        Rc::ptr_eq(a, b)
    }

    pub fn add_source_info(&self, info: SourceInfo) {
        self.source_infos.borrow_mut().insert(info);
    }

    /// All locations this framework was seen at, ordered by file then line.
    pub fn source_infos(&self) -> Ref<'_, BTreeSet<SourceInfo>> {
        self.source_infos.borrow()
    }

    /// The location to show first when rendering.
    pub fn prefers_source_info(&self) -> Option<SourceInfo> {
        self.source_infos.borrow().first().cloned()
    }

    /// Frameworks this framework is included in.
    ///
    /// Panics if the nested registry is currently borrowed mutably.
    pub fn frameworks(&self) -> Ref<'_, FrameworkRegistry> {
        self.frameworks.borrow()
    }

    /// Mutable access to the nested registry, for parsers populating it.
    ///
    /// Panics if the nested registry is currently borrowed.
    pub fn frameworks_mut(&self) -> RefMut<'_, FrameworkRegistry> {
        self.frameworks.borrow_mut()
    }

    /// Nested registry for read-only graph walks, failing instead of
    /// panicking when it is mutably borrowed.
    pub(super) fn try_frameworks(&self) -> Result<Ref<'_, FrameworkRegistry>> {
        self.frameworks
            .try_borrow()
            .map_err(|_| in_use(self.name(), "frameworks"))
    }

    pub(super) fn ensure_frameworks_writable(&self) -> Result<()> {
        self.frameworks
            .try_borrow_mut()
            .map(drop)
            .map_err(|_| in_use(self.name(), "frameworks"))
    }

    pub(super) fn ensure_source_infos_writable(&self) -> Result<()> {
        self.source_infos
            .try_borrow_mut()
            .map(drop)
            .map_err(|_| in_use(self.name(), "source locations"))
    }

    pub(super) fn union_source_infos(&self, source: &FrameworkData) {
        let infos: Vec<SourceInfo> = source.source_infos.borrow().iter().cloned().collect();
        self.source_infos.borrow_mut().extend(infos);
    }
}

fn in_use(name: &str, part: &str) -> RegistryError {
    RegistryError::invalid_argument(
        "framework",
        format!("{part} of framework '{name}' are borrowed elsewhere"),
    )
}

impl Documentable for FrameworkData {
    fn declaration(&self) -> DeclarationRef {
        self.declaration.clone()
    }
}

impl fmt::Display for FrameworkData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Nested registries are printed by name only.
impl fmt::Debug for FrameworkData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nested: Vec<SmolStr> = match self.frameworks.try_borrow() {
            Ok(registry) => registry.names().cloned().collect(),
            Err(_) => Vec::new(),
        };
        f.debug_struct("FrameworkData")
            .field("name", &self.name())
            .field("state", &self.state)
            .field("owner", &self.owner.get())
            .field("source_infos", &self.source_infos)
            .field("frameworks", &nested)
            .finish()
    }
}
