use std::collections::HashMap;
use std::sync::Arc;

/// Append-only store of cluster members.
///
/// Members keep the slot they were inserted at for their whole life, and a
/// key index gives O(1) lookup. When two members share a key the index keeps
/// the first one inserted.
#[derive(Debug)]
pub(crate) struct MemberArena<T> {
    slots: Vec<Arc<T>>,
    index: HashMap<String, usize>,
}

impl<T> MemberArena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Appends a member and returns its slot.
    pub(crate) fn insert(&mut self, key: impl Into<String>, member: Arc<T>) -> usize {
        let slot = self.slots.len();
        self.slots.push(member);
        self.index.entry(key.into()).or_insert(slot);
        slot
    }

    pub(crate) fn get(&self, key: &str) -> Option<&Arc<T>> {
        self.index.get(key).map(|slot| &self.slots[*slot])
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn slot(&self, slot: usize) -> Option<&Arc<T>> {
        self.slots.get(slot)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.slots.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}
