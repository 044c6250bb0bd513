//! Two-phase registry merge.
//!
//! The whole merge, nested registries included, is planned against read-only
//! borrows first. Any failure surfaces before anything is touched; applying
//! the plan cannot fail.

use std::rc::Rc;

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::error::Result;

use super::data::FrameworkData;
use super::nesting::NestingGraph;
use super::registry::FrameworkRegistry;

type Pair = (Rc<FrameworkData>, Rc<FrameworkData>);

#[derive(Default)]
pub(super) struct MergePlan {
    /// Unknown frameworks added to the registry being merged into.
    root_inserts: Vec<Rc<FrameworkData>>,
    /// Unknown frameworks added to a nested registry: (framework, nested).
    nested_inserts: Vec<Pair>,
    /// Same-named (target, source) frameworks whose source locations are unioned.
    pairs: Vec<Pair>,
}

impl MergePlan {
    pub(super) fn build(target: &FrameworkRegistry, source: &FrameworkRegistry) -> Result<Self> {
        let owner = target.nested_in();
        let mut graph = NestingGraph::new(owner.as_ref(), target.entities().cloned());
        let mut plan = Self::default();
        let mut stack: Vec<Pair> = Vec::new();

        for incoming in source.entities() {
            match target.get(incoming.name()) {
                Some(existing) => stack.push((Rc::clone(existing), Rc::clone(incoming))),
                None => {
                    if let Some(owner) = &owner {
                        graph.check_nest(owner, incoming)?;
                        graph.plan_edge(owner, Rc::clone(incoming));
                    }
                    plan.root_inserts.push(Rc::clone(incoming));
                }
            }
        }

        let mut visited = FxHashSet::default();
        while let Some((existing, incoming)) = stack.pop() {
            if Rc::ptr_eq(&existing, &incoming) {
                continue;
            }
            let pair_key = (Rc::as_ptr(&existing) as usize, Rc::as_ptr(&incoming) as usize);
            if !visited.insert(pair_key) {
                continue;
            }
            existing.ensure_source_infos_writable()?;

            for nested in graph.existing_children(&incoming)? {
                match graph.find_child(&existing, nested.name())? {
                    Some(held) => stack.push((held, nested)),
                    None => {
                        existing.ensure_frameworks_writable()?;
                        graph.check_nest(&existing, &nested)?;
                        graph.plan_edge(&existing, Rc::clone(&nested));
                        plan.nested_inserts.push((Rc::clone(&existing), nested));
                    }
                }
            }
            plan.pairs.push((existing, incoming));
        }
        Ok(plan)
    }

    /// Apply the plan; returns (frameworks added at the top level, pairs merged).
    pub(super) fn apply(self, target: &mut FrameworkRegistry) -> (usize, usize) {
        let added = self.root_inserts.len();
        let merged = self.pairs.len();

        for framework in self.root_inserts {
            trace!(registry = %target.id(), name = %framework.name(), "[FRAMEWORKS] merged in");
            target.insert(framework);
        }
        for (parent, nested) in self.nested_inserts {
            trace!(framework = %parent.name(), name = %nested.name(), "[FRAMEWORKS] merged in nested");
            parent.frameworks_mut().insert(nested);
        }
        for (existing, incoming) in &self.pairs {
            existing.union_source_infos(incoming);
        }
        (added, merged)
    }
}
