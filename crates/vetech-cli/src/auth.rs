//! Session entries kept in the OS keychain, one set per CLI profile.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(not(test))]
use keyring::Entry;

use vetech_core::auth::{AuthError, AuthResult};
use vetech_core::SessionPersistence;

#[cfg(not(test))]
const KEYRING_SERVICE_NAME: &str = "vetech-cli";

#[derive(Debug, Clone)]
pub struct KeyringSessionStore {
    profile_name: String,
}

impl KeyringSessionStore {
    pub fn new(profile_name: &str) -> Self {
        Self {
            profile_name: profile_name.to_string(),
        }
    }

    fn username(&self, key: &str) -> String {
        format!("{key}:{}", self.profile_name)
    }

    #[cfg(test)]
    fn test_store() -> &'static Mutex<HashMap<String, String>> {
        static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    #[cfg(not(test))]
    fn entry(&self, key: &str) -> AuthResult<Entry> {
        Entry::new(KEYRING_SERVICE_NAME, &self.username(key))
            .map_err(|error| AuthError::SecureStorage(error.to_string()))
    }
}

impl SessionPersistence for KeyringSessionStore {
    #[cfg(not(test))]
    fn read_entry(&self, key: &str) -> AuthResult<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(raw) => Ok(Some(raw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(AuthError::SecureStorage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn read_entry(&self, key: &str) -> AuthResult<Option<String>> {
        let guard = Self::test_store()
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        Ok(guard.get(&self.username(key)).cloned())
    }

    #[cfg(not(test))]
    fn write_entry(&self, key: &str, value: &str) -> AuthResult<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(|error| AuthError::SecureStorage(error.to_string()))
    }

    #[cfg(test)]
    fn write_entry(&self, key: &str, value: &str) -> AuthResult<()> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        guard.insert(self.username(key), value.to_string());
        Ok(())
    }

    #[cfg(not(test))]
    fn remove_entry(&self, key: &str) -> AuthResult<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(AuthError::SecureStorage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn remove_entry(&self, key: &str) -> AuthResult<()> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        guard.remove(&self.username(key));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use vetech_core::auth::TOKEN_KEY;

    use super::*;

    #[test]
    fn profiles_do_not_share_entries() {
        let work = KeyringSessionStore::new("auth-test-work");
        let home = KeyringSessionStore::new("auth-test-home");

        work.write_entry(TOKEN_KEY, "work-token").unwrap();

        assert_eq!(work.load_token().unwrap().as_deref(), Some("work-token"));
        assert_eq!(home.load_token().unwrap(), None);

        work.clear_session().unwrap();
        assert_eq!(work.load_token().unwrap(), None);
    }
}
