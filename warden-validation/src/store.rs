// Persistent store boundary for uniqueness checks

use crate::RecordId;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Read access to the persisted values of one record type.
///
/// The check is a plain read at validation time, not part of a
/// transaction: two records created concurrently with the same value can
/// both pass.
pub trait UniquenessStore: Send + Sync {
    /// Count persisted records whose `field` equals `value`, skipping the
    /// record identified by `excluding`
    fn count_where(
        &self,
        field: &str,
        value: &str,
        case_insensitive: bool,
        excluding: Option<RecordId>,
    ) -> usize;
}

/// In-memory [`UniquenessStore`] keyed by record id
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<HashMap<RecordId, HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `field` for record `id`
    pub fn put(&self, id: RecordId, field: impl Into<String>, value: impl Into<String>) {
        self.rows
            .write()
            .entry(id)
            .or_default()
            .insert(field.into(), value.into());
    }

    /// Forget record `id`
    pub fn delete(&self, id: RecordId) -> bool {
        self.rows.write().remove(&id).is_some()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Whether the store holds no record
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl UniquenessStore for MemoryStore {
    fn count_where(
        &self,
        field: &str,
        value: &str,
        case_insensitive: bool,
        excluding: Option<RecordId>,
    ) -> usize {
        let rows = self.rows.read();
        rows.iter()
            .filter(|(id, _)| Some(**id) != excluding)
            .filter_map(|(_, row)| row.get(field))
            .filter(|stored| {
                if case_insensitive {
                    stored.to_lowercase() == value.to_lowercase()
                } else {
                    stored.as_str() == value
                }
            })
            .count()
    }
}
