//! Storage entity traits and types

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be used as storage keys
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the key as a string for storage backends that require string keys
    fn as_str(&self) -> &str;
}

/// Trait for types that can be stored
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The key type for this entity
    type Key: StorageKey;

    /// Returns the entity's key
    fn key(&self) -> &Self::Key;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    struct SlotKey(String);

    impl StorageKey for SlotKey {
        fn as_str(&self) -> &str {
            &self.0
        }
    }

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    struct Slot {
        key: SlotKey,
        members: Vec<String>,
    }

    impl StorageEntity for Slot {
        type Key = SlotKey;

        fn key(&self) -> &Self::Key {
            &self.key
        }
    }

    #[test]
    fn test_entity_key_round_trips_through_as_str() {
        let slot = Slot {
            key: SlotKey("slot-1".to_string()),
            members: vec!["a@example.com".to_string()],
        };

        assert_eq!(slot.key().as_str(), "slot-1");
        assert_eq!(slot.members.len(), 1);
    }
}
