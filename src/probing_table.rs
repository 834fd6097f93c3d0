use std::fmt;

use log::{debug, trace, warn};

use crate::{Entry, TableError, entry, key, util};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Empty,
    Occupied(Entry),
    /// Deleted entry, kept around so probe chains running through it stay intact
    Tombstone(Entry),
}

impl Slot {
    /// Turns an occupied slot into a tombstone, returning the buried value
    fn bury(&mut self) -> Option<String> {
        match std::mem::replace(self, Slot::Empty) {
            Slot::Occupied(entry) => {
                let value = entry.value.clone();
                *self = Slot::Tombstone(entry);
                Some(value)
            }
            other => {
                *self = other;
                None
            }
        }
    }
}

/// Settings a [`ProbingTable`] is created with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub capacity: usize,
    pub load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            capacity: ProbingTable::DEFAULT_CAPACITY,
            load_factor: ProbingTable::DEFAULT_LOAD_FACTOR,
        }
    }
}

/// Open addressing hash table from book codes to strings,
/// resolving collisions with linear probing.
///
/// Deleting leaves a tombstone behind. Tombstones are never reused for
/// insertion, they are purged when they make up more than half of the
/// used slots, or when the table grows.
#[derive(Debug, Clone)]
pub struct ProbingTable {
    slots: Vec<Slot>,
    max_load: f64,
    live: usize,
    deleted: usize,
}

#[derive(Debug, Clone)]
pub struct Iter<'a> {
    slots: std::slice::Iter<'a, Slot>,
}

impl Default for ProbingTable {
    fn default() -> Self {
        Self {
            slots: empty_slots(Self::DEFAULT_CAPACITY),
            max_load: Self::DEFAULT_LOAD_FACTOR,
            live: 0,
            deleted: 0,
        }
    }
}

impl ProbingTable {
    pub const DEFAULT_CAPACITY: usize = 11;
    pub const DEFAULT_LOAD_FACTOR: f64 = 0.7;
    /// Load factors above this fall back to [`Self::DEFAULT_LOAD_FACTOR`]
    pub const MAX_LOAD_FACTOR: f64 = 0.99;
    /// Compact once more than this portion of the used slots are tombstones
    pub const MAX_DELETED_FACTOR: f64 = 0.5;
    pub const EMPTY_MESSAGE: &str = "The hash table is empty";

    /// Creates a table with `capacity` empty slots.
    ///
    /// A `load_factor` outside of `(0, 0.99]` silently falls back to
    /// [`Self::DEFAULT_LOAD_FACTOR`].
    pub fn new(capacity: usize, load_factor: f64) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }

        let max_load = if load_factor > 0.0 && load_factor <= Self::MAX_LOAD_FACTOR {
            load_factor
        } else {
            warn!(
                target: "config",
                "load factor {load_factor} out of range, using {}",
                Self::DEFAULT_LOAD_FACTOR
            );
            Self::DEFAULT_LOAD_FACTOR
        };

        Ok(Self {
            slots: empty_slots(capacity),
            max_load,
            live: 0,
            deleted: 0,
        })
    }

    /// Shorthand for `ProbingTable::new(capacity, DEFAULT_LOAD_FACTOR)`
    pub fn with_capacity(capacity: usize) -> Result<Self, TableError> {
        Self::new(capacity, Self::DEFAULT_LOAD_FACTOR)
    }

    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        Self::new(config.capacity, config.load_factor)
    }

    /// Inserts a key-value pair into the table,
    /// returning the previous value if the key was already present
    pub fn put(&mut self, key: &str, value: &str) -> Result<Option<String>, TableError> {
        key::validate(key)?;

        if let Some(i) = self.find(key) {
            if let Slot::Occupied(entry) = &mut self.slots[i] {
                let old = std::mem::replace(&mut entry.value, value.into());
                return Ok(Some(old));
            }
        }

        if self.load_factor() > self.max_load {
            self.grow();
        }

        self.place(entry!(key, value))?;
        Ok(None)
    }

    /// Removes the entry for `key`, leaving a tombstone in its slot,
    /// and returns its value
    pub fn remove(&mut self, key: &str) -> Result<String, TableError> {
        key::validate(key)?;

        let value = self
            .find(key)
            .and_then(|i| self.slots[i].bury())
            .ok_or_else(|| TableError::NoSuchKey { key: key.into() })?;

        self.live -= 1;
        self.deleted += 1;

        if self.deleted_factor() > Self::MAX_DELETED_FACTOR {
            self.compact();
        }

        Ok(value)
    }

    pub fn get(&self, key: &str) -> Result<Option<&Entry>, TableError> {
        key::validate(key)?;
        Ok(self.find(key).and_then(|i| match &self.slots[i] {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }))
    }

    pub fn get_value(&self, key: &str) -> Result<&str, TableError> {
        match self.get(key)? {
            Some(entry) => Ok(entry.value.as_str()),
            None => Err(TableError::NoSuchKey { key: key.into() }),
        }
    }

    pub fn contains_key(&self, key: &str) -> Result<bool, TableError> {
        Ok(self.get(key)?.is_some())
    }

    /// Linear search through every slot.
    ///
    /// # Note
    ///
    /// Values still held by tombstones count as well
    pub fn contains_value(&self, value: &str) -> bool {
        self.slots.iter().any(|slot| match slot {
            Slot::Occupied(entry) | Slot::Tombstone(entry) => entry.value == value,
            Slot::Empty => false,
        })
    }

    /// Number of used slots, tombstones included
    pub fn size(&self) -> usize {
        self.live + self.deleted
    }

    /// Shorthand for `self.size() == 0`, so a table with only tombstones is not empty
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns the number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn number_of_values(&self) -> usize {
        self.live
    }

    pub fn number_of_deleted(&self) -> usize {
        self.deleted
    }

    /// Returns the load factor of the table
    /// computed as used slots / capacity
    pub fn load_factor(&self) -> f64 {
        self.size() as f64 / self.capacity() as f64
    }

    /// The threshold that triggers growing the table
    pub fn max_load_factor(&self) -> f64 {
        self.max_load
    }

    /// Empties every slot, keeping the capacity
    pub fn clear(&mut self) {
        self.slots = empty_slots(self.capacity());
        self.live = 0;
        self.deleted = 0;
    }

    // [adapters]

    /// Iterates over the live entries in slot order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    // [private]

    fn idx(&self, key: &str) -> usize {
        key::hash_suffix(key) % self.capacity()
    }

    /// Index of the live entry for `key`, skipping over tombstones
    /// and stopping at the first empty slot
    fn find(&self, key: &str) -> Option<usize> {
        let cap = self.capacity();
        let mut i = self.idx(key);

        for _ in 0..cap {
            match &self.slots[i] {
                Slot::Empty => return None,
                Slot::Occupied(entry) if entry.key == key => return Some(i),
                _ => trace!(target: "probe", "{key}: skipping slot {i}"),
            }
            i = (i + 1) % cap;
        }

        None
    }

    /// Puts `entry` into the first empty slot of its probe sequence.
    /// Does not look at the load factor.
    fn place(&mut self, entry: Entry) -> Result<usize, TableError> {
        let cap = self.capacity();
        let start = self.idx(&entry.key);

        let i = (0..cap)
            .map(|step| (start + step) % cap)
            .find(|&i| matches!(self.slots[i], Slot::Empty))
            .ok_or(TableError::TableFull { capacity: cap })?;

        if i != start {
            trace!(target: "probe", "{}: slot {start} taken, placed at {i}", entry.key);
        }

        self.slots[i] = Slot::Occupied(entry);
        self.live += 1;
        Ok(i)
    }

    fn deleted_factor(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.deleted as f64 / self.size() as f64
        }
    }

    /// Rebuilds the table at the next prime that is at least twice as large
    fn grow(&mut self) {
        let new_cap = util::next_prime(self.capacity() * 2);
        debug!(
            target: "grow",
            "load factor {:.2} above {:.2}, growing {} -> {}",
            self.load_factor(),
            self.max_load,
            self.capacity(),
            new_cap
        );
        self.rebuild(new_cap);
    }

    /// Rebuilds the table at the same capacity, dropping the tombstones
    fn compact(&mut self) {
        debug!(
            target: "compact",
            "dropping {} tombstones, keeping {} values",
            self.deleted,
            self.live
        );
        self.rebuild(self.capacity());
    }

    fn rebuild(&mut self, capacity: usize) {
        let old = std::mem::replace(&mut self.slots, empty_slots(capacity));
        self.live = 0;
        self.deleted = 0;

        for slot in old {
            if let Slot::Occupied(entry) = slot {
                // never more live entries than the old capacity, so this always finds room
                let placed = self.place(entry);
                debug_assert!(placed.is_ok(), "rebuild ran out of slots");
            }
        }
    }
}

fn empty_slots(size: usize) -> Vec<Slot> {
    (0..size).map(|_| Slot::Empty).collect()
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Slot::Occupied(entry) = self.slots.next()? {
                return Some(entry);
            }
        }
    }
}

impl<'a> IntoIterator for &'a ProbingTable {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for ProbingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(Self::EMPTY_MESSAGE);
        }

        for (i, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied(entry) = slot {
                writeln!(f, "Index: {i}\tKey: {}\t\tValue: {}", entry.key, entry.value)?;
            }
        }
        Ok(())
    }
}
