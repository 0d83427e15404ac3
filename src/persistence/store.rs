//! Typed get/set over an obfuscated key-value substrate

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::codec::{Codec, XorHexCodec};
use crate::platform::KeyValueStore;

/// Obfuscated record store.
///
/// Reads never fail: a missing, corrupt or mistyped record yields the
/// caller's default. Writes are synchronous; substrate errors are logged.
pub struct PersistenceStore {
    backend: Box<dyn KeyValueStore>,
    codec: Box<dyn Codec>,
}

impl PersistenceStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self::with_codec(backend, XorHexCodec::default())
    }

    pub fn with_codec(backend: impl KeyValueStore + 'static, codec: impl Codec + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            codec: Box::new(codec),
        }
    }

    /// Whether a (possibly corrupt) record exists under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.backend
            .get(key)
            .is_some_and(|encoded| !encoded.is_empty())
    }

    /// Decoded JSON under `key`, or `default`
    pub fn get_value(&self, key: &str, default: Value) -> Value {
        let Some(encoded) = self.backend.get(key).filter(|e| !e.is_empty()) else {
            return default;
        };
        match self.codec.decode(&encoded) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Discarding unreadable record `{key}`: {err}");
                default
            }
        }
    }

    /// Typed read; a record of the wrong shape also yields `default`
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let value = self.get_value(key, Value::Null);
        if value.is_null() {
            return default;
        }
        match serde_json::from_value(value) {
            Ok(typed) => typed,
            Err(err) => {
                log::warn!("Record `{key}` has unexpected shape: {err}");
                default
            }
        }
    }

    pub fn set_value(&mut self, key: &str, value: &Value) {
        let encoded = self.codec.encode(value);
        if let Err(err) = self.backend.set(key, &encoded) {
            log::warn!("Failed to persist `{key}`: {err}");
        }
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => self.set_value(key, &json),
            Err(err) => log::warn!("Failed to serialize `{key}`: {err}"),
        }
    }

    pub fn remove(&mut self, key: &str) {
        if let Err(err) = self.backend.remove(key) {
            log::warn!("Failed to remove `{key}`: {err}");
        }
    }
}
