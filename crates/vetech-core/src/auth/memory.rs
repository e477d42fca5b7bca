use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{AuthError, AuthResult, SessionPersistence};

/// Process-local session store.
///
/// Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStore {
    fn with_entries<T>(
        &self,
        operation: impl FnOnce(&mut HashMap<String, String>) -> T,
    ) -> AuthResult<T> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        Ok(operation(&mut guard))
    }
}

impl SessionPersistence for MemorySessionStore {
    fn read_entry(&self, key: &str) -> AuthResult<Option<String>> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    fn write_entry(&self, key: &str, value: &str) -> AuthResult<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_entry(&self, key: &str) -> AuthResult<()> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }
}
