//! ProbedMap: open-addressing `u32 -> i32` map with triangular probing,
//! tombstone deletion and doubling growth.

use crate::invariants;
use crate::probe::{find_slot, Probe};
use crate::slot::Slot;
use core::fmt;
use std::collections::TryReserveError;

/// Capacity allocated on construction and the floor for every growth.
pub const MIN_CAPACITY: usize = 8;

// Maximum load factor 0.6 as an exact ratio. Occupied slots (Filled and
// Tombstone) count against it.
pub(crate) const MAX_LOAD_NUM: usize = 3;
pub(crate) const MAX_LOAD_DEN: usize = 5;

/// How an insert landed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum InsertOutcome {
    /// The key was absent and was written into a never-used slot.
    InsertedNew,
    /// The key was absent and was written over a tombstone.
    InsertedReusedSlot,
    /// The key was present; its value was replaced.
    Overwrote,
}

impl InsertOutcome {
    /// True unless an existing entry was overwritten.
    #[inline]
    pub fn added_key(&self) -> bool {
        !matches!(self, InsertOutcome::Overwrote)
    }
}

/// Growth could not allocate the next backing array.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GrowError {
    /// Doubling the capacity overflows `usize`.
    CapacityOverflow,
    /// The allocator refused `capacity` slots.
    AllocFailed {
        capacity: usize,
        source: TryReserveError,
    },
}

impl fmt::Display for GrowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowError::CapacityOverflow => f.write_str("capacity overflow while growing map"),
            GrowError::AllocFailed { capacity, .. } => {
                write!(f, "failed to allocate {} slots while growing map", capacity)
            }
        }
    }
}

impl std::error::Error for GrowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GrowError::CapacityOverflow => None,
            GrowError::AllocFailed { source, .. } => Some(source),
        }
    }
}

/// Map from `u32` keys to `i32` values.
///
/// Keys are unsigned on every operation. A caller holding a signed key
/// converts it with `key as u32`; the two's-complement bits become the key,
/// so `-1i32` and `u32::MAX` address the same entry.
///
/// Removing an entry leaves a tombstone. Tombstones keep counting toward the
/// load factor until the next growth discards them, so the map never
/// shrinks and delete/insert churn still triggers growth.
#[derive(Clone)]
pub struct ProbedMap {
    slots: Vec<Slot>,
    // Filled + Tombstone slots since the last growth.
    occupied: usize,
    // Filled slots.
    filled: usize,
}

impl ProbedMap {
    /// Creates a map with `MIN_CAPACITY` slots.
    pub fn new() -> Self {
        let mut map = Self {
            slots: Vec::new(),
            occupied: 0,
            filled: 0,
        };
        map.grow();
        map
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.filled
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Number of slots in the backing array. Always a power of two.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of Filled plus Tombstone slots. Only growth lowers it.
    #[inline]
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    /// The backing array, for diagnostics.
    ///
    /// Indices into this slice are only valid until the next insert, which
    /// may reuse a tombstone or replace the whole array on growth.
    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Inserts or overwrites `key`.
    ///
    /// Grows first when one more occupied slot would reach the load factor.
    /// Allocation failure during growth is fatal, as for `Vec`; use
    /// [`ProbedMap::try_insert`] to observe it instead.
    pub fn insert(&mut self, key: u32, value: i32) -> InsertOutcome {
        if self.needs_grow() {
            self.grow();
        }
        self.place(key, value)
    }

    /// Like [`ProbedMap::insert`], but reports allocation failure. The map is
    /// unchanged when an error is returned.
    pub fn try_insert(&mut self, key: u32, value: i32) -> Result<InsertOutcome, GrowError> {
        if self.needs_grow() {
            self.try_grow()?;
        }
        Ok(self.place(key, value))
    }

    pub fn get(&self, key: u32) -> Option<i32> {
        let idx = self.find(key)?;
        self.slots[idx].entry().map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: u32) -> Option<&mut i32> {
        let idx = self.find(key)?;
        match &mut self.slots[idx] {
            Slot::Filled { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: u32) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key`, returning its value. The slot becomes a tombstone and
    /// stays occupied until the next growth.
    pub fn remove(&mut self, key: u32) -> Option<i32> {
        let idx = self.find(key)?;
        let removed = core::mem::replace(&mut self.slots[idx], Slot::Tombstone);
        self.filled -= 1;
        invariants::debug_check(self);
        removed.entry().map(|(_, v)| v)
    }

    /// Live entries in slot order. The order is unspecified and changes on
    /// growth.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            it: self.slots.iter(),
            remaining: self.filled,
        }
    }

    fn find(&self, key: u32) -> Option<usize> {
        if self.filled == 0 {
            return None;
        }
        match find_slot(&self.slots, key) {
            Probe::Occupied(idx) => Some(idx),
            Probe::Vacant(_) => None,
        }
    }

    fn place(&mut self, key: u32, value: i32) -> InsertOutcome {
        let (idx, outcome) = match find_slot(&self.slots, key) {
            Probe::Occupied(idx) => (idx, InsertOutcome::Overwrote),
            Probe::Vacant(idx) => {
                let outcome = if self.slots[idx].is_tombstone() {
                    InsertOutcome::InsertedReusedSlot
                } else {
                    self.occupied += 1;
                    InsertOutcome::InsertedNew
                };
                self.filled += 1;
                (idx, outcome)
            }
        };
        self.slots[idx] = Slot::Filled { key, value };
        invariants::debug_check(self);
        outcome
    }

    #[inline]
    fn needs_grow(&self) -> bool {
        (self.occupied + 1) * MAX_LOAD_DEN >= self.slots.len() * MAX_LOAD_NUM
    }

    fn next_capacity(&self) -> Option<usize> {
        if self.slots.len() < MIN_CAPACITY {
            Some(MIN_CAPACITY)
        } else {
            self.slots.len().checked_mul(2)
        }
    }

    fn grow(&mut self) {
        let capacity = match self.next_capacity() {
            Some(c) => c,
            None => panic!("capacity overflow while growing map"),
        };
        self.rehash_into(vec![Slot::Empty; capacity]);
    }

    fn try_grow(&mut self) -> Result<(), GrowError> {
        let capacity = self.next_capacity().ok_or(GrowError::CapacityOverflow)?;
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(capacity)
            .map_err(|source| GrowError::AllocFailed { capacity, source })?;
        fresh.resize(capacity, Slot::Empty);
        self.rehash_into(fresh);
        Ok(())
    }

    // Moves every live entry into `fresh` (all Empty) and drops tombstones.
    fn rehash_into(&mut self, mut fresh: Vec<Slot>) {
        let old = core::mem::replace(&mut self.slots, Vec::new());
        let mut filled = 0;
        for (key, value) in old.iter().filter_map(Slot::entry) {
            match find_slot(&fresh, key) {
                Probe::Vacant(idx) => fresh[idx] = Slot::Filled { key, value },
                Probe::Occupied(_) => unreachable!("duplicate key {} during rehash", key),
            }
            filled += 1;
        }
        debug_assert_eq!(filled, self.filled);
        self.slots = fresh;
        self.filled = filled;
        self.occupied = filled;
        invariants::debug_check(self);
    }
}

impl Default for ProbedMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over live `(key, value)` pairs of a `ProbedMap`.
#[derive(Clone)]
pub struct Iter<'a> {
    it: core::slice::Iter<'a, Slot>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (u32, i32);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.it.find_map(|s| s.entry())?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a ProbedMap {
    type Item = (u32, i32);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl Extend<(u32, i32)> for ProbedMap {
    fn extend<T: IntoIterator<Item = (u32, i32)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a> Extend<&'a (u32, i32)> for ProbedMap {
    fn extend<T: IntoIterator<Item = &'a (u32, i32)>>(&mut self, iter: T) {
        for &(k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl FromIterator<(u32, i32)> for ProbedMap {
    fn from_iter<T: IntoIterator<Item = (u32, i32)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

// Equal when both hold the same entries, whatever their slot layout.
impl PartialEq for ProbedMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for ProbedMap {}

impl fmt::Debug for ProbedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
