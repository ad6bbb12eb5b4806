//! PartyStore - in-memory party state keyed by code
//!
//! An explicit store object handed by reference to callers, replacing
//! any notion of process-global session state. The backing map lives
//! behind one `RwLock`, which serializes mutations to a party's guest
//! roster and seating result across concurrent callers.
//!
//! There is no durability guarantee. A flat-file snapshot (one JSON
//! object keyed by code) can be written and re-read on demand; the
//! write is non-atomic and last-writer-wins.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use tracing::{debug, info, warn};

use crate::party::{Guest, Party, SeatingPlan};

/// Errors from store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid party code: {0}")]
    InvalidCode(String),

    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// In-memory map of party code to Party
#[derive(Debug, Default)]
pub struct PartyStore {
    parties: RwLock<HashMap<String, Party>>,
}

impl PartyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a party under its code.
    ///
    /// No collision check: if the code already exists the earlier party
    /// is silently overwritten. The code space (36^6) makes this
    /// unlikely but not impossible.
    pub fn insert(&self, party: Party) {
        let code = party.code.clone();
        debug!(%code, "insert: called");
        let previous = self
            .parties
            .write()
            .expect("party map lock poisoned")
            .insert(code.clone(), party);
        if previous.is_some() {
            warn!(%code, "insert: code collision, previous party overwritten");
        }
    }

    /// Look up a party by code, cloning it out
    pub fn get(&self, code: &str) -> Result<Party, StoreError> {
        self.parties
            .read()
            .expect("party map lock poisoned")
            .get(code)
            .cloned()
            .ok_or_else(|| StoreError::InvalidCode(code.to_string()))
    }

    /// Whether a party exists under this code
    pub fn contains(&self, code: &str) -> bool {
        self.parties
            .read()
            .expect("party map lock poisoned")
            .contains_key(code)
    }

    /// Number of parties in the store
    pub fn len(&self) -> usize {
        self.parties.read().expect("party map lock poisoned").len()
    }

    /// Whether the store holds no parties
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a guest to a party's roster
    pub fn add_guest(&self, code: &str, guest: Guest) -> Result<(), StoreError> {
        debug!(%code, guest = %guest.name, "add_guest: called");
        let mut parties = self.parties.write().expect("party map lock poisoned");
        let party = parties
            .get_mut(code)
            .ok_or_else(|| StoreError::InvalidCode(code.to_string()))?;
        party.guests.push(guest);
        Ok(())
    }

    /// Set (or overwrite) a party's seating plan
    pub fn set_seating(&self, code: &str, plan: SeatingPlan) -> Result<(), StoreError> {
        debug!(%code, table_count = plan.tables.len(), "set_seating: called");
        let mut parties = self.parties.write().expect("party map lock poisoned");
        let party = parties
            .get_mut(code)
            .ok_or_else(|| StoreError::InvalidCode(code.to_string()))?;
        party.seating = Some(plan);
        Ok(())
    }

    /// Write the whole map to a JSON snapshot file.
    ///
    /// Non-atomic, last-writer-wins. A crash mid-write can leave a
    /// truncated file; `load_snapshot` reports that as an error.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let parties = self.parties.read().expect("party map lock poisoned");
        let text = serde_json::to_string_pretty(&*parties)?;
        std::fs::write(path, text)?;
        info!(path = %path.display(), count = parties.len(), "save_snapshot: wrote snapshot");
        Ok(())
    }

    /// Replace the store contents from a JSON snapshot file
    pub fn load_snapshot(&self, path: impl AsRef<Path>) -> Result<usize, StoreError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let loaded: HashMap<String, Party> = serde_json::from_str(&text)?;
        let count = loaded.len();
        *self.parties.write().expect("party map lock poisoned") = loaded;
        info!(path = %path.display(), count, "load_snapshot: loaded snapshot");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::party::Party;

    fn party(code: &str) -> Party {
        Party::new(code, 2, 4, None, vec!["Music".to_string()])
    }

    #[test]
    fn test_insert_and_get() {
        let store = PartyStore::new();
        store.insert(party("AB12CD"));
        assert!(store.contains("AB12CD"));
        assert_eq!(store.get("AB12CD").unwrap().table_count, 2);
    }

    #[test]
    fn test_get_unknown_code() {
        let store = PartyStore::new();
        assert!(matches!(
            store.get("NOPE99"),
            Err(StoreError::InvalidCode(code)) if code == "NOPE99"
        ));
    }

    #[test]
    fn test_collision_overwrites() {
        // Documents existing behavior: a forced collision silently
        // replaces the earlier party
        let store = PartyStore::new();
        let mut first = party("SAME00");
        first.table_count = 1;
        let mut second = party("SAME00");
        second.table_count = 7;

        store.insert(first);
        store.insert(second);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("SAME00").unwrap().table_count, 7);
    }

    #[test]
    fn test_add_guest() {
        let store = PartyStore::new();
        store.insert(party("AB12CD"));
        let guest = Guest::new("Alice", 25, vec!["Music".to_string()]).unwrap();
        store.add_guest("AB12CD", guest).unwrap();
        assert_eq!(store.get("AB12CD").unwrap().guests.len(), 1);
    }

    #[test]
    fn test_add_guest_invalid_code() {
        let store = PartyStore::new();
        let guest = Guest::new("Alice", 25, vec!["Music".to_string()]).unwrap();
        assert!(store.add_guest("NOPE99", guest).is_err());
    }

    #[test]
    fn test_set_seating_overwrites_on_rerun() {
        let store = PartyStore::new();
        store.insert(party("AB12CD"));

        let first = SeatingPlan::from_value(&serde_json::json!({
            "tables": [{"table_number": 1, "guests": []}]
        }));
        let second = SeatingPlan::from_value(&serde_json::json!({
            "tables": [{"table_number": 1, "guests": []}, {"table_number": 2, "guests": []}]
        }));

        store.set_seating("AB12CD", first).unwrap();
        store.set_seating("AB12CD", second).unwrap();
        assert_eq!(store.get("AB12CD").unwrap().seating.unwrap().tables.len(), 2);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parties.json");

        let store = PartyStore::new();
        store.insert(party("AB12CD"));
        store.insert(party("XY99ZZ"));
        store.save_snapshot(&path).unwrap();

        let restored = PartyStore::new();
        let count = restored.load_snapshot(&path).unwrap();
        assert_eq!(count, 2);
        assert!(restored.contains("AB12CD"));
        assert!(restored.contains("XY99ZZ"));
    }

    #[test]
    fn test_load_snapshot_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parties.json");
        std::fs::write(&path, "{\"AB12CD\": {\"code\":").unwrap();

        let store = PartyStore::new();
        assert!(matches!(store.load_snapshot(&path), Err(StoreError::Json(_))));
    }
}
