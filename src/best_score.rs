//! Best score persistence
//!
//! A single integer under `bestScore`, stored as plain decimal text.

use crate::persistence::KeyValueStore;

/// Storage key
pub const STORAGE_KEY: &str = "bestScore";

/// Read the stored best score; missing or garbage reads as zero
pub fn load(store: &impl KeyValueStore) -> u64 {
    let Some(raw) = store.get_item(STORAGE_KEY) else {
        log::info!("No best score found, starting fresh");
        return 0;
    };

    match serde_json::from_str::<u64>(raw.trim()) {
        Ok(best) => {
            log::info!("Loaded best score {}", best);
            best
        }
        Err(e) => {
            log::warn!("Ignoring unreadable best score {:?}: {}", raw, e);
            0
        }
    }
}

/// Write the best score
pub fn save(store: &mut impl KeyValueStore, best: u64) {
    match serde_json::to_string(&best) {
        Ok(text) => {
            store.set_item(STORAGE_KEY, &text);
            log::debug!("Best score saved ({})", best);
        }
        Err(e) => log::warn!("Failed to encode best score: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_missing_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(load(&store), 0);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        save(&mut store, 57);
        assert_eq!(store.get_item(STORAGE_KEY).as_deref(), Some("57"));
        assert_eq!(load(&store), 57);
    }

    #[test]
    fn test_garbage_is_zero() {
        let mut store = MemoryStore::new();
        store.set_item(STORAGE_KEY, "lots");
        assert_eq!(load(&store), 0);
        store.set_item(STORAGE_KEY, "-3");
        assert_eq!(load(&store), 0);
    }

    #[test]
    fn test_tolerates_whitespace() {
        let mut store = MemoryStore::new();
        store.set_item(STORAGE_KEY, " 12\n");
        assert_eq!(load(&store), 12);
    }
}
