use std::collections::HashMap;

use crate::animation::{AnimationDefinition, predefined};
use crate::error::{StripError, StripResult};

/// Animations known to an engine, looked up by name or abbreviation.
///
/// Lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct AnimationCatalog {
    definitions: HashMap<String, AnimationDefinition>,
    abbreviations: HashMap<String, String>,
}

impl AnimationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding every built-in animation
    pub fn predefined() -> Self {
        let mut catalog = Self::new();
        for definition in predefined::all() {
            catalog.register(definition);
        }
        catalog
    }

    /// Add `definition`, replacing any animation with the same name.
    ///
    /// Returns the replaced definition.
    pub fn register(&mut self, definition: AnimationDefinition) -> Option<AnimationDefinition> {
        let key = definition.name().to_lowercase();
        let abbreviation = definition.info().abbreviation.to_lowercase();
        let replaced = self.definitions.insert(key.clone(), definition);
        if let Some(old) = &replaced {
            let old_abbreviation = old.info().abbreviation.to_lowercase();
            if self.abbreviations.get(&old_abbreviation) == Some(&key) {
                self.abbreviations.remove(&old_abbreviation);
            }
        }
        if !abbreviation.is_empty() {
            self.abbreviations.insert(abbreviation, key);
        }
        replaced
    }

    pub fn get(&self, name: &str) -> StripResult<&AnimationDefinition> {
        let key = name.to_lowercase();
        self.definitions
            .get(&key)
            .or_else(|| {
                self.abbreviations
                    .get(&key)
                    .and_then(|full| self.definitions.get(full))
            })
            .ok_or_else(|| StripError::UnknownAnimation(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// Display names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.values().map(AnimationDefinition::name).collect();
        names.sort_unstable();
        names
    }

    /// Definitions sorted by name
    pub fn definitions(&self) -> Vec<&AnimationDefinition> {
        let mut definitions: Vec<&AnimationDefinition> = self.definitions.values().collect();
        definitions.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
