use super::KeyValueStore;
use crate::error::{DiaryError, Result};
use std::cell::Cell;
use std::collections::HashMap;

/// In-memory store for testing.
///
/// The failure switch uses `Cell` so a test can flip it through a shared
/// reference while the store is owned by the API.
#[derive(Default)]
pub struct InMemoryStore {
    records: HashMap<String, String>,
    simulate_write_error: Cell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing the failure switch.
    pub fn with_record(mut self, key: &str, value: &str) -> Self {
        self.records.insert(key.to_string(), value.to_string());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(DiaryError::Store("Simulated write error".to_string()));
        }
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_failure_keeps_previous_value() {
        let mut store = InMemoryStore::new().with_record("k", "before");
        store.set_simulate_write_error(true);

        assert!(matches!(store.set("k", "after"), Err(DiaryError::Store(_))));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("before"));

        store.set_simulate_write_error(false);
        store.set("k", "after").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("after"));
    }
}
