use std::ops::{BitAndAssign, BitOrAssign, BitXorAssign, RangeInclusive, SubAssign};

use super::ArrayStore;

/// The number of 64-bit words of a [`BitmapStore`].
pub const BITMAP_LENGTH: usize = 1024;

/// A chunk of the 16-bit value space stored as a 65536-bit vector.
///
/// The cardinality is cached, except after a lazy union which leaves it
/// unknown until [`repair_len`](BitmapStore::repair_len) is called.
#[derive(Clone)]
pub struct BitmapStore {
    len: Option<u64>,
    bits: Box<[u64; BITMAP_LENGTH]>,
}

impl BitmapStore {
    /// Creates an empty `BitmapStore`.
    pub fn new() -> BitmapStore {
        BitmapStore { len: Some(0), bits: Box::new([0; BITMAP_LENGTH]) }
    }

    /// Creates a `BitmapStore` holding every value of the chunk.
    pub fn full() -> BitmapStore {
        BitmapStore { len: Some(1 << 16), bits: Box::new([u64::MAX; BITMAP_LENGTH]) }
    }

    pub fn insert(&mut self, index: u16) -> bool {
        let (key, bit) = (key(index), bit(index));
        let old_w = self.bits[key];
        let new_w = old_w | 1 << bit;
        let inserted = (old_w ^ new_w) >> bit;
        self.bits[key] = new_w;
        self.grow(inserted);
        inserted != 0
    }

    pub fn remove(&mut self, index: u16) -> bool {
        let (key, bit) = (key(index), bit(index));
        let old_w = self.bits[key];
        let new_w = old_w & !(1 << bit);
        let removed = (old_w ^ new_w) >> bit;
        self.bits[key] = new_w;
        self.shrink(removed);
        removed != 0
    }

    pub fn insert_range(&mut self, range: RangeInclusive<u16>) -> u64 {
        let mut inserted = 0;
        for (key, mask) in range_masks(range) {
            inserted += u64::from((!self.bits[key] & mask).count_ones());
            self.bits[key] |= mask;
        }
        self.grow(inserted);
        inserted
    }

    pub fn remove_range(&mut self, range: RangeInclusive<u16>) -> u64 {
        let mut removed = 0;
        for (key, mask) in range_masks(range) {
            removed += u64::from((self.bits[key] & mask).count_ones());
            self.bits[key] &= !mask;
        }
        self.shrink(removed);
        removed
    }

    /// Flips the membership of every value of `range`.
    pub fn flip_range(&mut self, range: RangeInclusive<u16>) {
        let (mut set, mut cleared) = (0, 0);
        for (key, mask) in range_masks(range) {
            let before = (self.bits[key] & mask).count_ones();
            set += u64::from(mask.count_ones() - before);
            cleared += u64::from(before);
            self.bits[key] ^= mask;
        }
        self.grow(set);
        self.shrink(cleared);
    }

    pub fn contains(&self, index: u16) -> bool {
        self.bits[key(index)] & (1 << bit(index)) != 0
    }

    pub fn is_disjoint(&self, other: &BitmapStore) -> bool {
        self.bits.iter().zip(other.bits.iter()).all(|(&i1, &i2)| (i1 & i2) == 0)
    }

    /// Returns `true` if any value of `range` is set.
    pub fn intersects_range(&self, range: RangeInclusive<u16>) -> bool {
        range_masks(range).any(|(key, mask)| self.bits[key] & mask != 0)
    }

    pub fn to_array_store(&self) -> ArrayStore {
        let mut vec = Vec::with_capacity(self.len() as usize);
        for (index, mut bit) in self.bits.iter().cloned().enumerate() {
            while bit != 0 {
                vec.push((u64::trailing_zeros(bit) + (64 * index as u32)) as u16);
                bit &= bit - 1;
            }
        }
        ArrayStore::from_vec_unchecked(vec)
    }

    pub fn len(&self) -> u64 {
        match self.len {
            Some(len) => len,
            None => count_ones(&self.bits[..]),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&word| word == 0)
    }

    /// Returns `false` while a lazy union left the cardinality unknown.
    pub fn has_cached_len(&self) -> bool {
        self.len.is_some()
    }

    /// Recounts the cardinality after lazy unions.
    pub fn repair_len(&mut self) {
        if self.len.is_none() {
            self.len = Some(count_ones(&self.bits[..]));
        }
    }

    pub fn min(&self) -> Option<u16> {
        self.bits
            .iter()
            .enumerate()
            .find(|&(_, &bit)| bit != 0)
            .map(|(index, bit)| (index * 64 + (bit.trailing_zeros() as usize)) as u16)
    }

    pub fn max(&self) -> Option<u16> {
        self.bits
            .iter()
            .enumerate()
            .rev()
            .find(|&(_, &bit)| bit != 0)
            .map(|(index, bit)| (index * 64 + (63 - bit.leading_zeros() as usize)) as u16)
    }

    pub fn rank(&self, index: u16) -> u64 {
        let (key, bit) = (key(index), bit(index));
        count_ones(&self.bits[..key]) + u64::from((self.bits[key] << (63 - bit)).count_ones())
    }

    pub fn select(&self, n: u16) -> Option<u16> {
        let mut n = u64::from(n);

        for (key, value) in self.bits.iter().cloned().enumerate() {
            let len = u64::from(value.count_ones());
            if n < len {
                let index = select(value, n);
                return Some((64 * key as u64 + index) as u16);
            }
            n -= len;
        }

        None
    }

    /// The number of runs of consecutive set bits.
    pub fn count_runs(&self) -> u64 {
        let mut runs = 0;
        for pair in self.bits.windows(2) {
            let (word, next_word) = (pair[0], pair[1]);
            runs += u64::from(((word << 1) & !word).count_ones()) + ((word >> 63) & !next_word);
        }
        let last = self.bits[BITMAP_LENGTH - 1];
        runs + u64::from(((last << 1) & !last).count_ones()) + (last >> 63)
    }

    /// Unions `rhs` in without maintaining the cardinality.
    pub fn lazy_or_assign(&mut self, rhs: &BitmapStore) {
        for (word, &other) in self.bits.iter_mut().zip(rhs.bits.iter()) {
            *word |= other;
        }
        self.len = None;
    }

    /// Unions the values of `rhs` in without maintaining the cardinality.
    pub fn lazy_or_assign_array(&mut self, rhs: &ArrayStore) {
        for &index in rhs.iter() {
            self.bits[key(index)] |= 1 << bit(index);
        }
        self.len = None;
    }

    pub fn iter(&self) -> BitmapIter<'_> {
        BitmapIter { words: &self.bits, key: 0, value: self.bits[0] }
    }

    pub fn as_array(&self) -> &[u64; BITMAP_LENGTH] {
        &self.bits
    }

    fn grow(&mut self, n: u64) {
        if let Some(len) = self.len.as_mut() {
            *len += n;
        }
    }

    fn shrink(&mut self, n: u64) {
        if let Some(len) = self.len.as_mut() {
            *len -= n;
        }
    }
}

impl Default for BitmapStore {
    fn default() -> Self {
        BitmapStore::new()
    }
}

impl PartialEq for BitmapStore {
    fn eq(&self, other: &BitmapStore) -> bool {
        self.bits == other.bits
    }
}

impl Eq for BitmapStore {}

fn count_ones(words: &[u64]) -> u64 {
    words.iter().map(|word| u64::from(word.count_ones())).sum()
}

// if n > value.count_ones() this method returns 64
fn select(mut value: u64, n: u64) -> u64 {
    // reset n of the least significant bits
    for _ in 0..n {
        value &= value - 1;
    }
    u64::from(value.trailing_zeros())
}

/// Every word overlapped by `range` with the mask of its bits in the range.
fn range_masks(range: RangeInclusive<u16>) -> impl Iterator<Item = (usize, u64)> {
    let (start, end) = (*range.start(), *range.end());
    let (start_key, end_key) = (key(start), key(end));
    let start_mask = u64::MAX << bit(start);
    let end_mask = u64::MAX >> (63 - bit(end));

    (start_key..=end_key).map(move |key| {
        let mut mask = u64::MAX;
        if key == start_key {
            mask &= start_mask;
        }
        if key == end_key {
            mask &= end_mask;
        }
        (key, mask)
    })
}

/// An iterator over the values of a [`BitmapStore`], in ascending order.
pub struct BitmapIter<'a> {
    words: &'a [u64; BITMAP_LENGTH],
    key: usize,
    value: u64,
}

impl Iterator for BitmapIter<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        loop {
            if self.value != 0 {
                let index = self.value.trailing_zeros() as usize;
                self.value &= self.value - 1;
                return Some((64 * self.key + index) as u16);
            }
            if self.key + 1 >= BITMAP_LENGTH {
                return None;
            }
            self.key += 1;
            self.value = self.words[self.key];
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = count_ones(&self.words[self.key + 1..]) + u64::from(self.value.count_ones());
        (len as usize, Some(len as usize))
    }
}

impl ExactSizeIterator for BitmapIter<'_> {}

#[inline]
pub fn key(index: u16) -> usize {
    index as usize / 64
}

#[inline]
pub fn bit(index: u16) -> usize {
    index as usize % 64
}

#[inline]
fn op_bitmaps(bits1: &mut BitmapStore, bits2: &BitmapStore, op: impl Fn(&mut u64, u64)) {
    let mut len = 0;
    for (index1, &index2) in bits1.bits.iter_mut().zip(bits2.bits.iter()) {
        op(index1, index2);
        len += u64::from(index1.count_ones());
    }
    bits1.len = Some(len);
}

impl BitOrAssign<&Self> for BitmapStore {
    fn bitor_assign(&mut self, rhs: &Self) {
        op_bitmaps(self, rhs, BitOrAssign::bitor_assign);
    }
}

impl BitOrAssign<&ArrayStore> for BitmapStore {
    fn bitor_assign(&mut self, rhs: &ArrayStore) {
        for &index in rhs.iter() {
            self.insert(index);
        }
    }
}

impl BitAndAssign<&Self> for BitmapStore {
    fn bitand_assign(&mut self, rhs: &Self) {
        op_bitmaps(self, rhs, BitAndAssign::bitand_assign);
    }
}

impl SubAssign<&Self> for BitmapStore {
    #[allow(clippy::suspicious_op_assign_impl)]
    fn sub_assign(&mut self, rhs: &Self) {
        op_bitmaps(self, rhs, |l, r| *l &= !r);
    }
}

impl SubAssign<&ArrayStore> for BitmapStore {
    fn sub_assign(&mut self, rhs: &ArrayStore) {
        for &index in rhs.iter() {
            self.remove(index);
        }
    }
}

impl BitXorAssign<&Self> for BitmapStore {
    fn bitxor_assign(&mut self, rhs: &Self) {
        op_bitmaps(self, rhs, BitXorAssign::bitxor_assign);
    }
}

impl BitXorAssign<&ArrayStore> for BitmapStore {
    fn bitxor_assign(&mut self, rhs: &ArrayStore) {
        for &index in rhs.iter() {
            if !self.remove(index) {
                self.insert(index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_across_words() {
        let mut store = BitmapStore::new();
        assert_eq!(store.insert_range(60..=130), 71);
        assert_eq!(store.insert_range(0..=64), 60);
        assert_eq!(store.len(), 131);
        assert_eq!(store.remove_range(10..=19), 10);
        assert_eq!(store.min(), Some(0));
        assert_eq!(store.max(), Some(130));
        assert_eq!(store.count_runs(), 2);
    }

    #[test]
    fn full_range() {
        let mut store = BitmapStore::new();
        assert_eq!(store.insert_range(0..=u16::MAX), 1 << 16);
        assert_eq!(store, BitmapStore::full());
        assert_eq!(store.count_runs(), 1);
        assert_eq!(store.remove_range(0..=u16::MAX), 1 << 16);
        assert!(store.is_empty());
    }

    #[test]
    fn flip() {
        let mut store = BitmapStore::new();
        store.insert_range(10..=20);
        store.flip_range(15..=100);
        assert_eq!(store.len(), 5 + 80);
        assert!(store.contains(14));
        assert!(!store.contains(15));
        assert!(store.contains(21));
        assert!(store.contains(100));
        assert!(!store.contains(101));
    }

    #[test]
    fn rank_and_select() {
        let mut store = BitmapStore::new();
        store.insert_range(100..=199);
        store.insert(1000);
        assert_eq!(store.rank(99), 0);
        assert_eq!(store.rank(150), 51);
        assert_eq!(store.rank(u16::MAX), 101);
        assert_eq!(store.select(0), Some(100));
        assert_eq!(store.select(100), Some(1000));
        assert_eq!(store.select(101), None);
    }

    #[test]
    fn lazy_union() {
        let mut lhs = BitmapStore::new();
        lhs.insert_range(0..=9);
        let mut rhs = BitmapStore::new();
        rhs.insert_range(5..=14);

        lhs.lazy_or_assign(&rhs);
        assert!(!lhs.has_cached_len());
        assert_eq!(lhs.len(), 15);
        assert!(lhs.insert(20));
        lhs.repair_len();
        assert!(lhs.has_cached_len());
        assert_eq!(lhs.len(), 16);
    }

    #[test]
    fn intersects_range() {
        let mut store = BitmapStore::new();
        store.insert(500);
        assert!(store.intersects_range(0..=500));
        assert!(store.intersects_range(500..=500));
        assert!(!store.intersects_range(501..=u16::MAX));
    }

    #[test]
    fn iterates_in_order() {
        let mut store = BitmapStore::new();
        for value in [u16::MAX, 0, 64, 63] {
            store.insert(value);
        }
        assert_eq!(store.iter().collect::<Vec<_>>(), vec![0, 63, 64, u16::MAX]);
        assert_eq!(store.to_array_store().as_slice(), &[0, 63, 64, u16::MAX]);
    }

    #[test]
    fn iter_len_is_exact() {
        let mut store = BitmapStore::new();
        for value in [3, 64, 65, 4000, u16::MAX] {
            store.insert(value);
        }
        let mut iter = store.iter();
        assert_eq!(iter.size_hint(), (5, Some(5)));
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 3);
        iter.by_ref().for_each(drop);
        assert_eq!(iter.size_hint(), (0, Some(0)));
    }
}
