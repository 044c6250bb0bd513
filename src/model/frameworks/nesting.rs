//! Framework nesting graph.
//!
//! A framework's nested registry may hold other frameworks, which hold their
//! own, and so on. Every operation that adds a framework to a nested registry
//! goes through [`NestingGraph::check_nest`] so the graph stays acyclic.

use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{RegistryError, Result};

use super::data::FrameworkData;

fn key(framework: &Rc<FrameworkData>) -> usize {
    Rc::as_ptr(framework) as usize
}

/// Read-only view of the nesting graph while one registry is mutated.
///
/// The registry under mutation may be borrowed out of its framework's
/// `RefCell`, so its members are captured up front. Edges a pending merge
/// is about to add are tracked in `planned`.
pub(super) struct NestingGraph {
    root: Option<(usize, Vec<Rc<FrameworkData>>)>,
    planned: FxHashMap<usize, Vec<Rc<FrameworkData>>>,
}

impl NestingGraph {
    pub(super) fn new(
        owner: Option<&Rc<FrameworkData>>,
        members: impl Iterator<Item = Rc<FrameworkData>>,
    ) -> Self {
        Self {
            root: owner.map(|owner| (key(owner), members.collect())),
            planned: FxHashMap::default(),
        }
    }

    /// Frameworks currently nested in `node`, ignoring planned edges.
    pub(super) fn existing_children(
        &self,
        node: &Rc<FrameworkData>,
    ) -> Result<Vec<Rc<FrameworkData>>> {
        match &self.root {
            Some((owner, members)) if *owner == key(node) => Ok(members.clone()),
            _ => Ok(node.try_frameworks()?.entities().cloned().collect()),
        }
    }

    fn children(&self, node: &Rc<FrameworkData>) -> Result<Vec<Rc<FrameworkData>>> {
        let mut children = self.existing_children(node)?;
        if let Some(planned) = self.planned.get(&key(node)) {
            children.extend(planned.iter().cloned());
        }
        Ok(children)
    }

    /// The framework nested in `parent` under `name`, including planned edges.
    pub(super) fn find_child(
        &self,
        parent: &Rc<FrameworkData>,
        name: &str,
    ) -> Result<Option<Rc<FrameworkData>>> {
        Ok(self
            .children(parent)?
            .into_iter()
            .find(|child| child.name() == name))
    }

    /// Whether `target` is `from` or nested somewhere below it.
    fn reaches(&self, from: &Rc<FrameworkData>, target: usize) -> Result<bool> {
        let mut seen = FxHashSet::default();
        let mut stack = vec![Rc::clone(from)];
        while let Some(node) = stack.pop() {
            let node_key = key(&node);
            if node_key == target {
                return Ok(true);
            }
            if seen.insert(node_key) {
                stack.extend(self.children(&node)?);
            }
        }
        Ok(false)
    }

    /// Fails if nesting `child` in `parent` would make `parent` contain itself.
    pub(super) fn check_nest(
        &self,
        parent: &Rc<FrameworkData>,
        child: &Rc<FrameworkData>,
    ) -> Result<()> {
        if self.reaches(child, key(parent))? {
            return Err(RegistryError::invalid_argument(
                "framework",
                format!(
                    "nesting '{}' in '{}' would make '{}' include itself",
                    child.name(),
                    parent.name(),
                    parent.name()
                ),
            ));
        }
        Ok(())
    }

    pub(super) fn plan_edge(&mut self, parent: &Rc<FrameworkData>, child: Rc<FrameworkData>) {
        self.planned.entry(key(parent)).or_default().push(child);
    }
}
