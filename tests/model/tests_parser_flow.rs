#![allow(clippy::unwrap_used)]

//! Multi-pass flow as driven by a parser: placeholders recorded on first
//! sighting, partial declarations merged, placeholders resolved at the end.

use std::rc::Rc;

use docmodel::{
    DeclarationKind, DeclarationRef, FrameworkData, FrameworkRegistry, SourceInfo,
};

use crate::helpers::registry_assertions::{assert_unique_names, sorted_names};

#[test]
fn test_class_and_category_are_consolidated() {
    let class = DeclarationRef::class("NSView").unwrap();
    let category = DeclarationRef::new(DeclarationKind::Category, "NSView(Layout)").unwrap();

    // First pass: the class header mentions AppKit and an unresolved framework.
    let mut class_frameworks = FrameworkRegistry::new(&class);
    let appkit = class_frameworks.register_name("AppKit").unwrap();
    appkit.add_source_info(SourceInfo::new("NSView.h", 1).unwrap());
    class_frameworks.register_name("QuartzCore").unwrap();

    // The category header mentions AppKit again plus Foundation.
    let mut category_frameworks = FrameworkRegistry::new(&category);
    let appkit_again = category_frameworks.register_name("AppKit").unwrap();
    appkit_again.add_source_info(SourceInfo::new("NSView+Layout.h", 1).unwrap());
    category_frameworks.register_name("Foundation").unwrap();

    class_frameworks.merge(&category_frameworks).unwrap();

    assert_eq!(
        sorted_names(&class_frameworks),
        vec!["AppKit", "Foundation", "QuartzCore"]
    );
    assert!(Rc::ptr_eq(class_frameworks.get("AppKit").unwrap(), &appkit));
    assert_eq!(appkit.source_infos().len(), 2);
    assert_eq!(appkit_again.source_infos().len(), 1);
    assert_eq!(category_frameworks.len(), 2);

    // Resolution pass: every placeholder gets its real definition.
    let pending: Vec<_> = class_frameworks.provisional().cloned().collect();
    assert_eq!(pending.len(), 3);
    for placeholder in pending {
        let resolved = FrameworkData::new(placeholder.name()).unwrap();
        for info in placeholder.source_infos().iter() {
            resolved.add_source_info(info.clone());
        }
        class_frameworks.replace(&placeholder, &resolved).unwrap();
    }

    assert_eq!(class_frameworks.provisional().count(), 0);
    assert_eq!(class_frameworks.len(), 3);
    assert_eq!(
        class_frameworks.get("AppKit").unwrap().source_infos().len(),
        2
    );
    assert!(
        class_frameworks
            .entities()
            .all(|framework| framework.owner() == Some(class_frameworks.id()))
    );
    assert_unique_names(&class_frameworks);
}

#[test]
fn test_nested_frameworks_follow_their_framework() {
    let mut protocol = FrameworkRegistry::new(&DeclarationRef::protocol("NSCoding").unwrap());
    let foundation = FrameworkData::new("Foundation").unwrap();
    foundation
        .frameworks_mut()
        .register_name("CoreFoundation")
        .unwrap();
    protocol.register(&foundation).unwrap();

    let nested = foundation.frameworks();
    assert_eq!(nested.parent().kind(), DeclarationKind::Framework);
    assert_eq!(nested.parent().name(), "Foundation");
    assert_eq!(sorted_names(&nested), vec!["CoreFoundation"]);
}
