//! This module provides a local key/value storage, persisted as a JSON file
//!
//! It holds what the dashboard remembers between sessions: the bearer token and the preferences.

use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Key of the bearer token
pub const TOKEN_KEY: &str = "token";


/// Flat string key/value pairs, backed by a file
#[derive(Debug, PartialEq)]
pub struct LocalStorage {
    backing_file: PathBuf,
    data: BTreeMap<String, String>,
}

impl LocalStorage {
    /// Initialize a storage from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let data = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self{
            backing_file: PathBuf::from(path),
            data,
        })
    }

    /// Initialize an empty storage
    pub fn new(path: &Path) -> Self {
        Self{
            backing_file: PathBuf::from(path),
            data: BTreeMap::new(),
        }
    }

    /// Load the storage from its file, or start an empty one if the file is missing or invalid
    pub fn open(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("Invalid storage file: {}. Using an empty storage", err);
                Self::new(path)
            },
        }
    }

    pub fn backing_file(&self) -> &Path {
        &self.backing_file
    }

    /// Store the current content to its backing file
    pub fn save_to_file(&self) -> Result<(), Box<dyn Error>> {
        let path = &self.backing_file;
        if let Some(parent) = path.parent() {
            if parent.as_os_str().is_empty() == false {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::File::create(path)
            .map_err(|err| format!("Unable to save file {:?}: {}", path, err))?;
        serde_json::to_writer_pretty(file, &self.data)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(|v| v.as_str())
    }

    /// Set a value, and write the storage to its file
    ///
    /// The value is kept in memory even if the file cannot be written.
    pub fn set<S: ToString>(&mut self, key: &str, value: S) -> Result<(), Box<dyn Error>> {
        self.data.insert(key.to_string(), value.to_string());
        self.save_to_file()
    }

    /// Remove a value, and write the storage to its file
    pub fn remove(&mut self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let previous = self.data.remove(key);
        if previous.is_some() {
            self.save_to_file()?;
        }
        Ok(previous)
    }

    /// The persisted bearer token, if the user is signed in
    pub fn auth_token(&self) -> Option<&str> {
        self.get(TOKEN_KEY).filter(|t| t.trim().is_empty() == false)
    }

    pub fn set_auth_token<S: ToString>(&mut self, token: S) -> Result<(), Box<dyn Error>> {
        self.set(TOKEN_KEY, token)
    }

    pub fn clear_auth_token(&mut self) -> Result<(), Box<dyn Error>> {
        self.remove(TOKEN_KEY).map(|_| ())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut storage = LocalStorage::new(&path);
        storage.set("theme", "dark").unwrap();
        storage.set_auth_token("abc").unwrap();

        let retrieved = LocalStorage::from_file(&path).unwrap();
        assert_eq!(storage, retrieved);
        assert_eq!(retrieved.auth_token(), Some("abc"));
        assert_eq!(retrieved.get("theme"), Some("dark"));
    }

    #[test]
    fn token_removal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut storage = LocalStorage::new(&path);
        storage.set_auth_token("  ").unwrap();
        assert_eq!(storage.auth_token(), None);
        storage.set_auth_token("abc").unwrap();
        storage.clear_auth_token().unwrap();
        assert_eq!(storage.remove(TOKEN_KEY).unwrap(), None);
        assert_eq!(LocalStorage::open(&path).auth_token(), None);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(LocalStorage::from_file(&path).is_err());
        assert_eq!(LocalStorage::open(&path), LocalStorage::new(&path));
    }

    #[test]
    fn write_failures_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("plain_file");
        std::fs::write(&not_a_dir, "").unwrap();
        let path = not_a_dir.join("storage.json");

        let mut storage = LocalStorage::new(&path);
        assert!(storage.set_auth_token("abc").is_err());
        assert_eq!(storage.auth_token(), Some("abc"));
        assert!(storage.clear_auth_token().is_err());
        assert!(path.exists() == false);
    }
}
