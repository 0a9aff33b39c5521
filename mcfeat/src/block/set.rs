use std::fmt;

use crate::block;


/// An immutable set of block ids, usable in constant context.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockSet {
    bits: [u64; 4],
}

impl BlockSet {

    /// The empty set.
    pub const EMPTY: Self = Self { bits: [0; 4] };

    /// Create a set containing all the given ids.
    pub const fn new(ids: &[u8]) -> Self {
        let mut bits = [0u64; 4];
        let mut i = 0;
        while i < ids.len() {
            let id = ids[i] as usize;
            bits[id >> 6] |= 1 << (id & 63);
            i += 1;
        }
        Self { bits }
    }

    /// Return a copy of this set with the given id inserted.
    pub const fn with(mut self, id: u8) -> Self {
        self.bits[id as usize >> 6] |= 1 << (id & 63);
        self
    }

    #[inline]
    pub const fn contains(&self, id: u8) -> bool {
        self.bits[id as usize >> 6] & (1 << (id & 63)) != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == [0; 4]
    }

    /// Iterate over all ids in the set, in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=255u8).filter(move |&id| self.contains(id))
    }

}

impl fmt::Debug for BlockSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(block::name)).finish()
    }
}

impl FromIterator<u8> for BlockSet {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}
