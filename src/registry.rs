//! Running animation registry
//!
//! Concurrent map from instance id to handle: the single source of truth for
//! what is currently animating. Instances register when they are created and
//! remove themselves when they reach a terminal state.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use parking_lot::RwLock;

use crate::engine::AnimationHandle;
use crate::error::{StripError, StripResult};

#[derive(Default)]
pub struct AnimationRegistry {
    map: RwLock<HashMap<String, AnimationHandle>>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `id` to `handle`.
    ///
    /// Fails with [`StripError::DuplicateId`] while another live instance
    /// holds the id; a terminal instance under the same id is replaced.
    pub fn register(&self, id: impl Into<String>, handle: AnimationHandle) -> StripResult<()> {
        let id = id.into();
        let mut map = self.map.write();
        match map.entry(id) {
            Entry::Occupied(entry) if !entry.get().is_terminal() => {
                Err(StripError::DuplicateId(entry.key().clone()))
            }
            Entry::Occupied(mut entry) => {
                entry.insert(handle);
                Ok(())
            }
            Entry::Vacant(entry) => {
                entry.insert(handle);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<AnimationHandle> {
        self.map.read().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.map.read().contains_key(id)
    }

    pub fn remove(&self, id: &str) -> Option<AnimationHandle> {
        self.map.write().remove(id)
    }

    /// Remove `handle` only if it is still the instance bound to its id
    pub(crate) fn remove_instance(&self, handle: &AnimationHandle) -> bool {
        let mut map = self.map.write();
        let same = map
            .get(handle.id())
            .is_some_and(|current| current.same_instance(handle));
        if same {
            map.remove(handle.id());
        }
        same
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.map.read().keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Registered `(id, handle)` pairs, sorted by id
    pub fn entries(&self) -> Vec<(String, AnimationHandle)> {
        let mut entries: Vec<(String, AnimationHandle)> = self
            .map
            .read()
            .iter()
            .map(|(id, handle)| (id.clone(), handle.clone()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn handles(&self) -> Vec<AnimationHandle> {
        self.entries().into_iter().map(|(_, handle)| handle).collect()
    }

    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    /// Cancel every registered instance and clear the map
    pub fn remove_all(&self) -> Vec<AnimationHandle> {
        let drained: Vec<AnimationHandle> = self.map.write().drain().map(|(_, h)| h).collect();
        for handle in &drained {
            handle.cancel();
        }
        drained
    }
}

impl core::fmt::Debug for AnimationRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnimationRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
