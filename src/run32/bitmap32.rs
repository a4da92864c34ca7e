use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

use super::RunContainer32;

/// The membership operations a `u32` bitmap must offer to be combined with a
/// [`RunContainer32`].
pub trait Bitmap32: Clone + Default {
    /// Returns `true` if `value` is in the bitmap.
    fn contains(&self, value: u32) -> bool;

    /// Adds a value, returns `true` if it was not already present.
    fn insert(&mut self, value: u32) -> bool;

    /// Removes a value, returns `true` if it was present.
    fn remove(&mut self, value: u32) -> bool;

    /// The number of values in the bitmap.
    fn len(&self) -> u64;

    /// Returns `true` if there are no values in the bitmap.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Bitmap32 for BTreeSet<u32> {
    fn contains(&self, value: u32) -> bool {
        BTreeSet::contains(self, &value)
    }

    fn insert(&mut self, value: u32) -> bool {
        BTreeSet::insert(self, value)
    }

    fn remove(&mut self, value: u32) -> bool {
        BTreeSet::remove(self, &value)
    }

    fn len(&self) -> u64 {
        BTreeSet::len(self) as u64
    }
}

impl<S: BuildHasher + Clone + Default> Bitmap32 for HashSet<u32, S> {
    fn contains(&self, value: u32) -> bool {
        HashSet::contains(self, &value)
    }

    fn insert(&mut self, value: u32) -> bool {
        HashSet::insert(self, value)
    }

    fn remove(&mut self, value: u32) -> bool {
        HashSet::remove(self, &value)
    }

    fn len(&self) -> u64 {
        HashSet::len(self) as u64
    }
}

#[cfg(feature = "roaring")]
impl Bitmap32 for roaring::RoaringBitmap {
    fn contains(&self, value: u32) -> bool {
        roaring::RoaringBitmap::contains(self, value)
    }

    fn insert(&mut self, value: u32) -> bool {
        roaring::RoaringBitmap::insert(self, value)
    }

    fn remove(&mut self, value: u32) -> bool {
        roaring::RoaringBitmap::remove(self, value)
    }

    fn len(&self) -> u64 {
        roaring::RoaringBitmap::len(self)
    }
}

impl RunContainer32 {
    /// The values present both in this container and in `bitmap`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::BTreeSet;
    /// use roaring_runs::RunContainer32;
    ///
    /// let container: RunContainer32 = (0..10).collect();
    /// let bitmap: BTreeSet<u32> = [3, 9, 42].into_iter().collect();
    /// assert_eq!(container.and(&bitmap), BTreeSet::from([3, 9]));
    /// ```
    pub fn and<B: Bitmap32>(&self, bitmap: &B) -> B {
        let mut out = B::default();
        for value in self.iter().filter(|&value| bitmap.contains(value)) {
            out.insert(value);
        }
        out
    }

    /// The values present in this container or in `bitmap`.
    pub fn or<B: Bitmap32>(&self, bitmap: &B) -> B {
        let mut out = bitmap.clone();
        for value in self {
            out.insert(value);
        }
        out
    }

    /// The values present in exactly one of this container and `bitmap`.
    pub fn xor<B: Bitmap32>(&self, bitmap: &B) -> B {
        let mut out = bitmap.clone();
        for value in self {
            if !out.remove(value) {
                out.insert(value);
            }
        }
        out
    }
}
