use std::collections::HashMap;

use anchor_core::AnchorToken;

use crate::{AnchorPolicy, EntityId, OpsError};

/// Persistence boundary for anchors. Implementations sanitize exactly once,
/// inside [`AnchorStore::save`]; stored values are canonical and are
/// trusted on read.
pub trait AnchorStore {
    /// Persist the anchor for `entity`. Raw input that sanitizes to
    /// nothing (or an explicit `None`) deletes any stored anchor.
    fn save(&mut self, entity: EntityId, raw: Option<&str>) -> Result<SaveOutcome, OpsError>;

    /// The stored anchor for `entity`, if any.
    fn load(&self, entity: EntityId) -> Option<AnchorToken>;
}

/// Result of a save operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A canonical value was written.
    Stored(String),
    /// A previously stored anchor was removed.
    Deleted,
    /// Nothing changed: the value already matched, or there was nothing
    /// to delete.
    Unchanged,
}

/// In-memory store used by tests and the CLI. Real deployments supply
/// their own [`AnchorStore`] over the host system's metadata storage.
#[derive(Debug, Default)]
pub struct MemoryAnchorStore {
    policy: AnchorPolicy,
    entries: HashMap<EntityId, String>,
}

impl MemoryAnchorStore {
    pub fn new() -> Self {
        MemoryAnchorStore::default()
    }

    pub fn with_policy(policy: AnchorPolicy) -> Self {
        MemoryAnchorStore {
            policy,
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AnchorStore for MemoryAnchorStore {
    fn save(&mut self, entity: EntityId, raw: Option<&str>) -> Result<SaveOutcome, OpsError> {
        match raw.and_then(|raw| self.policy.apply(raw)) {
            Some(value) => {
                if self.entries.get(&entity).map(String::as_str) == Some(value.as_str()) {
                    return Ok(SaveOutcome::Unchanged);
                }
                self.entries.insert(entity, value.clone());
                Ok(SaveOutcome::Stored(value))
            }
            None => {
                if self.entries.remove(&entity).is_some() {
                    Ok(SaveOutcome::Deleted)
                } else {
                    Ok(SaveOutcome::Unchanged)
                }
            }
        }
    }

    fn load(&self, entity: EntityId) -> Option<AnchorToken> {
        self.entries
            .get(&entity)
            .map(|value| AnchorToken::from_stored(value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_sanitizes_before_storing() {
        let mut store = MemoryAnchorStore::new();
        let outcome = store.save(7, Some("  Contact  Us ")).unwrap();
        assert_eq!(outcome, SaveOutcome::Stored("Contact-Us".into()));
        assert_eq!(store.load(7).unwrap().value(), Some("Contact-Us"));
    }

    #[test]
    fn unusable_input_deletes_stored_anchor() {
        let mut store = MemoryAnchorStore::new();
        store.save(7, Some("top")).unwrap();
        let outcome = store.save(7, Some("???")).unwrap();
        assert_eq!(outcome, SaveOutcome::Deleted);
        assert!(store.load(7).is_none());
    }

    #[test]
    fn deleting_an_absent_anchor_is_unchanged() {
        let mut store = MemoryAnchorStore::new();
        assert_eq!(store.save(1, None).unwrap(), SaveOutcome::Unchanged);
    }

    #[test]
    fn resaving_the_same_value_is_unchanged() {
        let mut store = MemoryAnchorStore::new();
        store.save(4, Some("top")).unwrap();
        assert_eq!(store.save(4, Some("top ")).unwrap(), SaveOutcome::Unchanged);
    }

    #[test]
    fn store_policy_applies_length_cap() {
        let policy = AnchorPolicy::default().with_max_length(4);
        let mut store = MemoryAnchorStore::with_policy(policy);
        let outcome = store.save(2, Some("abcdefgh")).unwrap();
        assert_eq!(outcome, SaveOutcome::Stored("abcd".into()));
    }
}
