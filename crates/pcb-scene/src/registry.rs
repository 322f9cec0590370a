use std::collections::HashMap;

use crate::model::Component;
use crate::scene::PrimitiveId;

/// Primitive identity -> frozen component metadata, captured at build time.
///
/// Entries are snapshot clones: mutating the source board after a build does
/// not affect them. There is no per-entry removal; the registry is cleared and
/// repopulated wholesale on load and on offset re-layout.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<PrimitiveId, Component>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: PrimitiveId, snapshot: Component) {
        self.entries.insert(id, snapshot);
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&Component> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: PrimitiveId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = PrimitiveId> + '_ {
        self.entries.keys().copied()
    }
}
