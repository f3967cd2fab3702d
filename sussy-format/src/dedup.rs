//! Insertion-ordered deduplication table
//!
//! Maps an exact attribute value to a densely assigned u16 index. Entries
//! enumerate in first-seen order, which is the order they are written to the
//! file, so two encodes of the same corner stream produce identical bytes.

use std::hash::Hash;

use hashbrown::HashMap;

use crate::error::{SussyError, SussyResult, TableKind};
use crate::mesh::{PositionNormal, Vec2, Vec3};
use crate::MAX_ENTRIES;

/// Exact-value key for table deduplication
///
/// Float attributes compare by bit pattern: no tolerance, `0.0` and `-0.0`
/// are distinct, and a NaN matches only the identical NaN.
pub trait DedupKey {
    type Key: Hash + Eq;

    fn dedup_key(&self) -> Self::Key;
}

impl DedupKey for Vec2 {
    type Key = [u32; 2];

    fn dedup_key(&self) -> Self::Key {
        self.map(f32::to_bits)
    }
}

impl DedupKey for Vec3 {
    type Key = [u32; 3];

    fn dedup_key(&self) -> Self::Key {
        self.map(f32::to_bits)
    }
}

impl DedupKey for PositionNormal {
    type Key = [u32; 6];

    fn dedup_key(&self) -> Self::Key {
        let [px, py, pz] = self.position.dedup_key();
        let [nx, ny, nz] = self.normal.dedup_key();
        [px, py, pz, nx, ny, nz]
    }
}

/// Ordered value -> index map with at most [`MAX_ENTRIES`] entries
#[derive(Debug, Clone)]
pub struct DedupTable<T: DedupKey> {
    kind: TableKind,
    entries: Vec<T>,
    index: HashMap<T::Key, u16>,
}

impl<T: DedupKey> DedupTable<T> {
    /// Create an empty table; `kind` names it in capacity errors
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Return the index of `value`, appending it if not seen before
    pub fn insert_or_get(&mut self, value: T) -> SussyResult<u16> {
        let key = value.dedup_key();
        if let Some(&existing) = self.index.get(&key) {
            return Ok(existing);
        }

        if self.entries.len() >= MAX_ENTRIES {
            return Err(SussyError::CapacityExceeded { table: self.kind });
        }

        let idx = self.entries.len() as u16;
        self.entries.push(value);
        self.index.insert(key, idx);
        Ok(idx)
    }

    /// All entries in first-seen order
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been inserted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the table, keeping entries in first-seen order
    pub fn into_entries(self) -> Vec<T> {
        self.entries
    }
}
