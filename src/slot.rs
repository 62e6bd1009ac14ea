//! Slot: the three-state cell stored in the map's backing array.

/// One cell of the backing array.
///
/// A slot's identity is its index in `ProbedMap::slots()`. Indices are only
/// meaningful until the next insert: a tombstone may be reused, and growth
/// replaces the whole array.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Slot {
    /// Never written since the last growth. Terminates a probe chain.
    #[default]
    Empty,
    /// Holds a live entry.
    Filled { key: u32, value: i32 },
    /// Held an entry that was removed. Probing continues past it, and an
    /// insert may reuse it.
    Tombstone,
}

impl Slot {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        matches!(self, Slot::Filled { .. })
    }

    #[inline]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    /// The live entry, if any.
    #[inline]
    pub fn entry(&self) -> Option<(u32, i32)> {
        match *self {
            Slot::Filled { key, value } => Some((key, value)),
            _ => None,
        }
    }
}
