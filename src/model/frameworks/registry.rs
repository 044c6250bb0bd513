use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::{debug, trace, warn};

use crate::base::RegistryId;
use crate::error::{RegistryError, Result};
use crate::model::{DeclarationRef, Documentable};

use super::data::FrameworkData;
use super::merge::MergePlan;
use super::nesting::NestingGraph;
use super::ordering::{NameOrdering, RegistryOptions};

/// The frameworks a single declaration is associated with.
///
/// The name index is the single source of truth for membership; the set of
/// all frameworks is derived from its values. Insertion order is preserved
/// and used as the tiebreak for sorted output.
#[derive(Debug)]
pub struct FrameworkRegistry {
    id: RegistryId,
    parent: DeclarationRef,
    options: RegistryOptions,
    by_name: IndexMap<SmolStr, Rc<FrameworkData>>,
    /// Set when this is a framework's own nested registry.
    framework: Option<Weak<FrameworkData>>,
}

impl FrameworkRegistry {
    pub fn new<P: Documentable + ?Sized>(parent: &P) -> Self {
        Self::with_options(parent, RegistryOptions::default())
    }

    pub fn with_options<P: Documentable + ?Sized>(parent: &P, options: RegistryOptions) -> Self {
        Self {
            id: RegistryId::fresh(),
            parent: parent.declaration(),
            options,
            by_name: IndexMap::new(),
            framework: None,
        }
    }

    pub(super) fn nested(parent: &DeclarationRef, framework: Weak<FrameworkData>) -> Self {
        Self {
            framework: Some(framework),
            ..Self::new(parent)
        }
    }

    /// The framework this registry is nested in, if any.
    pub(super) fn nested_in(&self) -> Option<Rc<FrameworkData>> {
        self.framework.as_ref().and_then(Weak::upgrade)
    }

    /// Build a registry for a parent that may be missing.
    pub fn try_new(parent: Option<&dyn Documentable>) -> Result<Self> {
        match parent {
            Some(parent) => Ok(Self::new(parent)),
            None => Err(RegistryError::invalid_argument(
                "parent",
                "a framework registry requires a parent declaration",
            )),
        }
    }

    pub fn id(&self) -> RegistryId {
        self.id
    }

    /// The declaration this registry belongs to.
    pub fn parent(&self) -> &DeclarationRef {
        &self.parent
    }

    pub fn options(&self) -> RegistryOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Look up a framework by its exact name (O(1)).
    pub fn get(&self, name: &str) -> Option<&Rc<FrameworkData>> {
        self.by_name.get(name)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Whether this exact instance is a member.
    pub fn contains(&self, framework: &Rc<FrameworkData>) -> bool {
        self.index_of(framework).is_some()
    }

    /// All frameworks, in insertion order.
    pub fn entities(&self) -> impl ExactSizeIterator<Item = &Rc<FrameworkData>> + Clone + '_ {
        self.by_name.values()
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &SmolStr> + Clone + '_ {
        self.by_name.keys()
    }

    /// Placeholders still waiting for their real definition.
    pub fn provisional(&self) -> impl Iterator<Item = &Rc<FrameworkData>> + '_ {
        self.by_name.values().filter(|framework| framework.is_provisional())
    }

    /// Register a framework.
    ///
    /// Registering the same instance again is a no-op. A different instance
    /// under an already claimed name is rejected and leaves the registry as
    /// it was. In a framework's nested registry, a framework that would end
    /// up including itself is rejected with `InvalidArgument`.
    pub fn register(&mut self, framework: &Rc<FrameworkData>) -> Result<()> {
        if let Some(existing) = self.by_name.get(framework.name()) {
            if Rc::ptr_eq(existing, framework) {
                trace!(registry = %self.id, name = %framework.name(), "[FRAMEWORKS] already registered");
                return Ok(());
            }
            warn!(
                registry = %self.id,
                parent = %self.parent,
                name = %framework.name(),
                "[FRAMEWORKS] rejected duplicate framework"
            );
            return Err(RegistryError::duplicate(framework.key(), self.id));
        }
        self.check_nesting(framework)?;

        framework.set_owner(self.id);
        self.insert(Rc::clone(framework));
        trace!(registry = %self.id, name = %framework.name(), "[FRAMEWORKS] registered");
        Ok(())
    }

    /// Return the framework registered under `name`, registering a
    /// placeholder for it first if the name is new.
    pub fn register_name(&mut self, name: &str) -> Result<Rc<FrameworkData>> {
        if let Some(existing) = self.by_name.get(name) {
            return Ok(Rc::clone(existing));
        }
        let placeholder = FrameworkData::placeholder(name)?;
        self.register(&placeholder)?;
        Ok(placeholder)
    }

    /// Merge frameworks from `source` into this registry.
    ///
    /// Unknown frameworks are added by reference. Frameworks known under the
    /// same name on both sides have their data merged; the instance held here
    /// stays. `source` is not modified, and shared instances keep their
    /// owner. On error nothing has changed on either side.
    pub fn merge(&mut self, source: &FrameworkRegistry) -> Result<()> {
        let plan = MergePlan::build(self, source)?;
        let (added, merged) = plan.apply(self);

        debug!(
            registry = %self.id,
            source = %source.id,
            added,
            merged,
            "[FRAMEWORKS] merged registry"
        );
        Ok(())
    }

    /// Insert without checks; callers have validated name and nesting.
    pub(super) fn insert(&mut self, framework: Rc<FrameworkData>) {
        self.by_name.insert(framework.key(), framework);
    }

    fn check_nesting(&self, framework: &Rc<FrameworkData>) -> Result<()> {
        let Some(owner) = self.nested_in() else {
            return Ok(());
        };
        NestingGraph::new(Some(&owner), self.by_name.values().cloned()).check_nest(&owner, framework)
    }

    /// Swap `original` for `replacement`, keeping its position.
    ///
    /// This is how placeholders get promoted once the real framework has been
    /// parsed. The replacement may carry a different name than the original.
    pub fn replace(
        &mut self,
        original: &Rc<FrameworkData>,
        replacement: &Rc<FrameworkData>,
    ) -> Result<()> {
        let Some(index) = self.index_of(original) else {
            return Err(RegistryError::not_found(original.key(), self.id));
        };
        if Rc::ptr_eq(original, replacement) {
            return Ok(());
        }
        if replacement.is_provisional() && !original.is_provisional() {
            return Err(RegistryError::invalid_argument(
                "replacement",
                format!(
                    "cannot replace resolved framework '{}' with a placeholder",
                    original.name()
                ),
            ));
        }

        let renamed = replacement.name() != original.name();
        let mut already_held = false;
        if renamed {
            if let Some(holder) = self.by_name.get(replacement.name()) {
                if !Rc::ptr_eq(holder, replacement) {
                    return Err(RegistryError::duplicate(replacement.key(), self.id));
                }
                already_held = true;
            }
        }
        if !already_held {
            self.check_nesting(replacement)?;
        }

        if !renamed {
            if let Some((_, slot)) = self.by_name.get_index_mut(index) {
                *slot = Rc::clone(replacement);
            }
        } else {
            self.by_name.shift_remove_index(index);
            if !already_held {
                self.by_name
                    .shift_insert(index, replacement.key(), Rc::clone(replacement));
            }
        }
        original.clear_owner(self.id);
        replacement.set_owner(self.id);

        debug!(
            registry = %self.id,
            original = %original.name(),
            replacement = %replacement.name(),
            "[FRAMEWORKS] replaced framework"
        );
        Ok(())
    }

    /// Frameworks ordered by name according to this registry's
    /// [`NameOrdering`]. Equal keys keep insertion order. Sorting happens on
    /// the first call to `next`.
    pub fn sorted_by_name(&self) -> SortedByName<'_> {
        SortedByName {
            frameworks: self.by_name.values(),
            ordering: self.options.ordering,
            sorted: None,
        }
    }

    fn index_of(&self, framework: &Rc<FrameworkData>) -> Option<usize> {
        let (index, _, held) = self.by_name.get_full(framework.name())?;
        Rc::ptr_eq(held, framework).then_some(index)
    }
}

/// Name-ordered iterator over a registry. Clone it to restart.
#[derive(Debug, Clone)]
pub struct SortedByName<'a> {
    frameworks: indexmap::map::Values<'a, SmolStr, Rc<FrameworkData>>,
    ordering: NameOrdering,
    sorted: Option<std::vec::IntoIter<&'a Rc<FrameworkData>>>,
}

impl SortedByName<'_> {
    /// Whether the sort has run yet.
    pub fn is_sorted(&self) -> bool {
        self.sorted.is_some()
    }
}

impl<'a> Iterator for SortedByName<'a> {
    type Item = &'a Rc<FrameworkData>;

    fn next(&mut self) -> Option<Self::Item> {
        let ordering = self.ordering;
        let frameworks = &self.frameworks;
        self.sorted
            .get_or_insert_with(|| {
                let mut sorted: Vec<_> = frameworks.clone().collect();
                sorted.sort_by(|a, b| ordering.compare(a.name(), b.name()));
                sorted.into_iter()
            })
            .next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.sorted {
            Some(sorted) => sorted.size_hint(),
            None => self.frameworks.size_hint(),
        }
    }
}

impl ExactSizeIterator for SortedByName<'_> {}
