//! Structural checks for `ProbedMap`.
//!
//! `debug_check` runs at the end of every mutating operation in debug
//! builds and compiles to nothing in release builds. It only checks what is
//! O(1) to check. `validate` (tests only) scans the whole table.

use crate::probed_map::ProbedMap;
#[cfg(any(debug_assertions, test))]
use crate::probed_map::{MAX_LOAD_DEN, MAX_LOAD_NUM, MIN_CAPACITY};

#[inline]
pub(crate) fn debug_check(map: &ProbedMap) {
    #[cfg(debug_assertions)]
    {
        let cap = map.capacity();
        assert!(
            cap >= MIN_CAPACITY && cap.is_power_of_two(),
            "capacity {} is not a power of two >= {}",
            cap,
            MIN_CAPACITY
        );
        assert!(
            map.len() <= map.occupied() && map.occupied() <= cap,
            "counter order violated: len {} occupied {} capacity {}",
            map.len(),
            map.occupied(),
            cap
        );
        // Keeps at least one Empty slot so every probe chain terminates.
        assert!(
            map.occupied() * MAX_LOAD_DEN < cap * MAX_LOAD_NUM,
            "load factor exceeded: occupied {} capacity {}",
            map.occupied(),
            cap
        );
    }
    #[cfg(not(debug_assertions))]
    {
        let _ = map;
    }
}

#[cfg(test)]
impl ProbedMap {
    /// Full-table consistency check: counters match slot states, keys are
    /// unique, and every live key is found at its own slot by probing.
    pub(crate) fn validate(&self) -> Result<(), String> {
        use crate::probe::{find_slot, Probe};
        use std::collections::HashSet;

        let cap = self.capacity();
        if cap < MIN_CAPACITY || !cap.is_power_of_two() {
            return Err(format!("bad capacity {}", cap));
        }
        if self.occupied() * MAX_LOAD_DEN >= cap * MAX_LOAD_NUM {
            return Err(format!("load factor exceeded: {}/{}", self.occupied(), cap));
        }

        let mut filled = 0;
        let mut tombstones = 0;
        let mut keys = HashSet::new();
        for (idx, slot) in self.slots().iter().enumerate() {
            if slot.is_tombstone() {
                tombstones += 1;
            }
            let Some((key, _)) = slot.entry() else {
                continue;
            };
            filled += 1;
            if !keys.insert(key) {
                return Err(format!("duplicate key {} at slot {}", key, idx));
            }
            let found = find_slot(self.slots(), key);
            if found != Probe::Occupied(idx) {
                return Err(format!(
                    "key {} stored at slot {} but probing yields {:?}",
                    key, idx, found
                ));
            }
        }

        if filled != self.len() {
            return Err(format!("len {} but {} filled slots", self.len(), filled));
        }
        if filled + tombstones != self.occupied() {
            return Err(format!(
                "occupied {} but {} filled + {} tombstones",
                self.occupied(),
                filled,
                tombstones
            ));
        }
        Ok(())
    }
}
