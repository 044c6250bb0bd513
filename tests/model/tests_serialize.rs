#![allow(clippy::unwrap_used)]

use serde_json::json;

use docmodel::{FrameworkData, SourceInfo};

use crate::helpers::registry_assertions::class_registry;

#[test]
fn test_registry_serializes_sorted_for_renderer() {
    let mut registry = class_registry("GBClass", &["UIKit"]);
    let foundation = registry.register_name("Foundation").unwrap();
    foundation.add_source_info(SourceInfo::new("GBClass.h", 3).unwrap());
    foundation
        .frameworks_mut()
        .register(&FrameworkData::new("CoreFoundation").unwrap())
        .unwrap();

    let value = serde_json::to_value(&registry).unwrap();

    assert_eq!(
        value,
        json!([
            {
                "name": "Foundation",
                "state": "Provisional",
                "source_infos": [{ "file": "GBClass.h", "line": 3 }],
                "frameworks": ["CoreFoundation"]
            },
            {
                "name": "UIKit",
                "state": "Resolved",
                "source_infos": [],
                "frameworks": []
            }
        ])
    );
}
