//! Renderer-facing serialization of framework registries.
//!
//! Registries serialize as a name-sorted sequence. Nested registries are
//! written as sorted name lists since they may refer back to their owner.

use serde::ser::{Serialize, SerializeSeq, SerializeStruct, Serializer};

use super::data::FrameworkData;
use super::registry::FrameworkRegistry;

impl Serialize for FrameworkData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let nested: Vec<String> = self
            .frameworks()
            .sorted_by_name()
            .map(|framework| framework.name().to_string())
            .collect();

        let mut state = serializer.serialize_struct("FrameworkData", 4)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("state", &self.state())?;
        state.serialize_field("source_infos", &*self.source_infos())?;
        state.serialize_field("frameworks", &nested)?;
        state.end()
    }
}

impl Serialize for FrameworkRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for framework in self.sorted_by_name() {
            seq.serialize_element(framework.as_ref())?;
        }
        seq.end()
    }
}
