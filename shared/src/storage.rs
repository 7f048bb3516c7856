//! Client-side key-value storage capability

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::{DEFAULT_DISPLAY_NAME, DISPLAY_NAME_KEY};

/// Minimal string store, shaped after browser local storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str) -> Result<(), String>;
}

/// Process-local store, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

/// Stored display name, if any
pub fn display_name(store: &(impl KeyValueStore + ?Sized)) -> Option<String> {
    store
        .get(DISPLAY_NAME_KEY)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Upper-cased first letter of the stored display name for the avatar
pub fn avatar_initial(store: &(impl KeyValueStore + ?Sized)) -> String {
    let name = display_name(store).unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "U".to_string())
}
