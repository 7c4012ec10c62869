//! Session scratch storage
//!
//! Every container entry gets a small mutable JSON record it can use to keep
//! per-window UI state (collapsed groups, scroll positions and the like).
//! Records are created empty on first access and are never pruned here; the
//! caller owns persistence and cleanup.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Map, Value};

use crate::error::{Result, SidebarError};

/// Reserved key for the temporary containers group
pub const TEMPORARY_CONTAINER_KEY: &str = "temporary_container";

/// A shared handle to one scratch record
#[derive(Debug, Clone, Default)]
pub struct ScratchRecord {
    inner: Arc<Mutex<Map<String, Value>>>,
}

impl ScratchRecord {
    fn lock(&self) -> MutexGuard<'_, Map<String, Value>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Read a value from the record
    pub fn get(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    /// Store a value, returning the previous one
    pub fn set(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.lock().insert(key.into(), value)
    }

    /// Remove a value from the record
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.lock().remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current record contents
    pub fn to_map(&self) -> Map<String, Value> {
        self.lock().clone()
    }

    /// Whether two handles point at the same record
    pub fn same_record(&self, other: &ScratchRecord) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Per-container scratch space keyed by identity id
///
/// Cloning the storage yields another handle to the same records, so the
/// caller can keep one for persistence while the engine holds another.
#[derive(Debug, Clone, Default)]
pub struct SessionStorage {
    records: Arc<Mutex<HashMap<String, ScratchRecord>>>,
}

impl SessionStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ScratchRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get the record for `id`, creating an empty one on first access
    pub fn record(&self, id: &str) -> ScratchRecord {
        self.lock().entry(id.to_string()).or_default().clone()
    }

    /// Check whether a record was ever created for `id`
    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Restore storage from a JSON object of objects
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(entries) = value else {
            return Err(SidebarError::Config(
                "session storage must be a JSON object".to_string(),
            ));
        };

        let storage = Self::new();
        {
            let mut records = storage.lock();
            for (id, record) in entries {
                let Value::Object(map) = record else {
                    return Err(SidebarError::Config(format!(
                        "session record '{}' must be a JSON object",
                        id
                    )));
                };
                records.insert(
                    id,
                    ScratchRecord {
                        inner: Arc::new(Mutex::new(map)),
                    },
                );
            }
        }
        Ok(storage)
    }

    /// Serialize all records for persistence by the caller
    pub fn to_value(&self) -> Value {
        let records = self.lock();
        let map: Map<String, Value> = records
            .iter()
            .map(|(id, record)| (id.clone(), Value::Object(record.to_map())))
            .collect();
        Value::Object(map)
    }
}
