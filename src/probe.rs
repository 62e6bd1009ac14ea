//! Hashing and probing: FNV-1a digest, triangular probe sequence, and the
//! slot finder shared by lookup, insertion, removal and growth.

use crate::slot::Slot;

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// 32-bit FNV-1a over `bytes`.
#[inline]
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ u32::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// Digest of a map key: FNV-1a over its little-endian bytes.
#[inline]
pub fn hash_key(key: u32) -> u32 {
    fnv1a_32(&key.to_le_bytes())
}

/// Slot indices visited for one key: `(home + i*(i+1)/2) mod capacity` for
/// `i` in `0..capacity`.
///
/// `capacity` must be a power of two; the sequence then visits every slot
/// exactly once.
#[derive(Clone, Debug)]
pub struct ProbeSeq {
    pos: usize,
    step: usize,
    mask: usize,
    remaining: usize,
}

impl ProbeSeq {
    #[inline]
    pub fn new(hash: u32, capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        let mask = capacity - 1;
        Self {
            pos: hash as usize & mask,
            step: 0,
            mask,
            remaining: capacity,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let cur = self.pos;
        // Consecutive triangular numbers differ by the attempt index.
        self.step += 1;
        self.pos = (self.pos + self.step) & self.mask;
        self.remaining -= 1;
        Some(cur)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}

/// Result of walking a key's probe chain.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Probe {
    /// The Filled slot holding the key.
    Occupied(usize),
    /// Where the key would be written: the first tombstone on the chain if
    /// one was passed, otherwise the Empty slot that ended the chain.
    Vacant(usize),
}

/// Walks the probe chain for `key` over `slots` (length a power of two).
///
/// An Empty slot ends the search: inserts always land on the first
/// non-Filled slot of a chain, so no entry for `key` can sit past it.
pub(crate) fn find_slot(slots: &[Slot], key: u32) -> Probe {
    let mut first_tombstone = None;
    for idx in ProbeSeq::new(hash_key(key), slots.len()) {
        match slots[idx] {
            Slot::Empty => return Probe::Vacant(first_tombstone.unwrap_or(idx)),
            Slot::Tombstone => {
                first_tombstone.get_or_insert(idx);
            }
            Slot::Filled { key: k, .. } if k == key => return Probe::Occupied(idx),
            Slot::Filled { .. } => {}
        }
    }
    match first_tombstone {
        Some(idx) => Probe::Vacant(idx),
        None => panic!("probe chain exhausted: table has no vacant slot"),
    }
}
