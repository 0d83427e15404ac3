//! Durable key-value substrates
//!
//! Both the current obfuscated records and the legacy plaintext cookie sit
//! behind [`KeyValueStore`]; only the key format differs.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use thiserror::Error;

/// Substrate write failures
#[derive(Debug, Error)]
pub enum StorageError {
    /// No storage available (private browsing, sandboxed iframe, ...)
    #[error("storage backend unavailable")]
    Unavailable,
    /// The backend refused the write (quota exceeded, disabled cookies, ...)
    #[error("write rejected for key `{key}`")]
    WriteRejected { key: String },
}

/// Minimal string key-value capability
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory store. Clones share the same map, like browser storage does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Find `key` in a `k1=v1; k2=v2` cookie header
pub fn cookie_value(header: &str, key: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == key)
        .map(|(_, value)| value.to_string())
}

/// Cookie header held in memory (the legacy high-score substrate).
///
/// Clones share the same header.
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    header: Rc<RefCell<String>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing `document.cookie`-style header
    pub fn from_header(header: &str) -> Self {
        Self {
            header: Rc::new(RefCell::new(header.to_string())),
        }
    }

    /// Current header, `; `-separated
    pub fn header(&self) -> String {
        self.header.borrow().clone()
    }

    fn pairs_without(&self, key: &str) -> Vec<String> {
        self.header
            .borrow()
            .split(';')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .filter(|pair| pair.split_once('=').map(|(name, _)| name) != Some(key))
            .map(str::to_string)
            .collect()
    }
}

impl KeyValueStore for CookieJar {
    fn get(&self, key: &str) -> Option<String> {
        cookie_value(&self.header.borrow(), key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut pairs = self.pairs_without(key);
        pairs.push(format!("{key}={value}"));
        *self.header.borrow_mut() = pairs.join("; ");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let pairs = self.pairs_without(key);
        *self.header.borrow_mut() = pairs.join("; ");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clones_share_items() {
        let mut a = MemoryStorage::new();
        let b = a.clone();
        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").as_deref(), Some("v"));
        a.remove("k").unwrap();
        assert!(b.is_empty());
    }

    #[test]
    fn test_cookie_value_lookup() {
        let header = "theme=dark; snakeHighScore=42; other=x=y";
        assert_eq!(cookie_value(header, "snakeHighScore").as_deref(), Some("42"));
        assert_eq!(cookie_value(header, "other").as_deref(), Some("x=y"));
        assert_eq!(cookie_value(header, "snake"), None);
        assert_eq!(cookie_value("", "snakeHighScore"), None);
    }

    #[test]
    fn test_cookie_jar_set_and_remove() {
        let mut jar = CookieJar::from_header("theme=dark; snakeHighScore=42");
        jar.set("snakeHighScore", "7").unwrap();
        assert_eq!(jar.get("snakeHighScore").as_deref(), Some("7"));
        assert_eq!(jar.get("theme").as_deref(), Some("dark"));

        jar.remove("snakeHighScore").unwrap();
        assert_eq!(jar.get("snakeHighScore"), None);
        assert_eq!(jar.header(), "theme=dark");
    }

    #[test]
    fn test_cookie_jar_prefix_keys_are_distinct() {
        let jar = CookieJar::from_header("snakeHighScoreOld=1");
        assert_eq!(jar.get("snakeHighScore"), None);
    }
}
