//! Registry assertion helpers for model tests.

use std::collections::HashSet;
use std::rc::Rc;

use docmodel::{DeclarationRef, FrameworkData, FrameworkRegistry};

/// Build a registry for a class with resolved frameworks of the given names.
pub fn class_registry(class: &str, frameworks: &[&str]) -> FrameworkRegistry {
    let parent = DeclarationRef::class(class).unwrap_or_else(|e| panic!("bad class name: {e}"));
    let mut registry = FrameworkRegistry::new(&parent);
    for name in frameworks {
        let framework =
            FrameworkData::new(*name).unwrap_or_else(|e| panic!("bad framework name: {e}"));
        registry
            .register(&framework)
            .unwrap_or_else(|e| panic!("failed to register '{name}': {e}"));
    }
    registry
}

/// Assert a framework is registered and return it for further assertions.
pub fn get_framework<'a>(registry: &'a FrameworkRegistry, name: &str) -> &'a Rc<FrameworkData> {
    registry
        .get(name)
        .unwrap_or_else(|| panic!("Expected framework '{}' in {}", name, registry.parent()))
}

/// Names in sorted order.
pub fn sorted_names(registry: &FrameworkRegistry) -> Vec<String> {
    registry
        .sorted_by_name()
        .map(|framework| framework.name().to_string())
        .collect()
}

/// Assert no two distinct instances share a name.
pub fn assert_unique_names(registry: &FrameworkRegistry) {
    let mut seen = HashSet::new();
    for framework in registry.entities() {
        if !seen.insert(framework.name().to_string()) {
            panic!(
                "Duplicate framework found: {} in {}",
                framework.name(),
                registry.parent()
            );
        }
        assert!(
            Rc::ptr_eq(get_framework(registry, framework.name()), framework),
            "Name index out of sync for '{}'",
            framework.name()
        );
    }
}
