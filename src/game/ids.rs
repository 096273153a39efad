// Generational handles for zombies and power-ups
//
// Fixture tags carry an entity key as a raw `u64`. Keys are generational,
// so a tag left behind by a removed entity never resolves to whatever
// later takes over its slot.

use slotmap::{new_key_type, Key, KeyData};

new_key_type! {
    /// Handle of a zombie in the simulation
    pub struct ZombieId;
    /// Handle of a power-up in the simulation
    pub struct PowerUpId;
}

/// Pack a key into a fixture tag owner
pub fn to_owner<K: Key>(key: K) -> u64 {
    key.data().as_ffi()
}

/// Rebuild a key from a fixture tag owner
pub fn from_owner<K: Key>(owner: u64) -> K {
    K::from(KeyData::from_ffi(owner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_owner_roundtrip() {
        let mut zombies: SlotMap<ZombieId, ()> = SlotMap::with_key();
        let id = zombies.insert(());
        assert_eq!(from_owner::<ZombieId>(to_owner(id)), id);
    }

    #[test]
    fn test_stale_owner_does_not_alias_reused_slot() {
        let mut zombies: SlotMap<ZombieId, &str> = SlotMap::with_key();
        let old = zombies.insert("first");
        let owner = to_owner(old);
        zombies.remove(old);
        let new = zombies.insert("second");

        let stale: ZombieId = from_owner(owner);
        assert_ne!(stale, new);
        assert_eq!(zombies.get(stale), None);
        assert_eq!(zombies.get(new), Some(&"second"));
    }
}
