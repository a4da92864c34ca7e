mod scalar;

use std::cmp::Ordering::*;
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitXor, RangeInclusive, Sub, SubAssign};

use super::bitmap_store::BitmapStore;
use super::ARRAY_ELEMENT_BYTES;

/// A chunk of the 16-bit value space stored as a sorted vector.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct ArrayStore {
    vec: Vec<u16>,
}

impl ArrayStore {
    /// Creates an empty `ArrayStore`.
    pub fn new() -> ArrayStore {
        ArrayStore { vec: vec![] }
    }

    ///
    /// Create a new ArrayStore from a given vec
    /// It is up to the caller to ensure the vec is sorted and deduplicated
    /// Favor `try_from` / `try_into` for cases in which these invariants should be checked
    ///
    /// # Panics
    ///
    /// When debug_assertions are enabled and the above invariants are not met
    #[inline]
    pub(crate) fn from_vec_unchecked(vec: Vec<u16>) -> ArrayStore {
        if cfg!(debug_assertions) {
            match ArrayStore::try_from(vec) {
                Ok(store) => store,
                Err(error) => panic!("{}", error),
            }
        } else {
            ArrayStore { vec }
        }
    }

    pub fn insert(&mut self, index: u16) -> bool {
        self.vec.binary_search(&index).map_err(|loc| self.vec.insert(loc, index)).is_err()
    }

    pub fn insert_range(&mut self, range: RangeInclusive<u16>) -> u64 {
        let (start, end) = (*range.start(), *range.end());
        let (pos_start, pos_end) = self.positions(start, end);

        // everything in between is overwritten by the range
        let dropped = self.vec.splice(pos_start..pos_end, start..=end);
        u64::from(end - start) + 1 - dropped.len() as u64
    }

    pub fn remove(&mut self, index: u16) -> bool {
        self.vec.binary_search(&index).map(|loc| self.vec.remove(loc)).is_ok()
    }

    pub fn remove_range(&mut self, range: RangeInclusive<u16>) -> u64 {
        let (pos_start, pos_end) = self.positions(*range.start(), *range.end());
        self.vec.drain(pos_start..pos_end);
        (pos_end - pos_start) as u64
    }

    /// The positions of the first value `>= start` and of the first value
    /// `> end`.
    fn positions(&self, start: u16, end: u16) -> (usize, usize) {
        let pos_start = self.vec.partition_point(|&value| value < start);
        let pos_end = pos_start + self.vec[pos_start..].partition_point(|&value| value <= end);
        (pos_start, pos_end)
    }

    pub(crate) fn retain(&mut self, f: impl FnMut(&u16) -> bool) {
        self.vec.retain(f);
    }

    pub fn contains(&self, index: u16) -> bool {
        self.vec.binary_search(&index).is_ok()
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        let (mut i1, mut i2) = (self.vec.iter(), other.vec.iter());
        let (mut value1, mut value2) = (i1.next(), i2.next());
        loop {
            match value1.and_then(|v1| value2.map(|v2| v1.cmp(v2))) {
                None => return true,
                Some(Equal) => return false,
                Some(Less) => value1 = i1.next(),
                Some(Greater) => value2 = i2.next(),
            }
        }
    }

    pub fn to_bitmap_store(&self) -> BitmapStore {
        let mut bits = BitmapStore::new();
        for &index in self.iter() {
            bits.insert(index);
        }
        bits
    }

    /// The number of runs of consecutive values.
    pub fn count_runs(&self) -> u64 {
        let breaks = self.vec.windows(2).filter(|pair| pair[0] + 1 != pair[1]).count();
        if self.vec.is_empty() {
            0
        } else {
            breaks as u64 + 1
        }
    }

    pub fn len(&self) -> u64 {
        self.vec.len() as u64
    }

    /// The number of bytes the values serialize into.
    pub fn byte_size(&self) -> usize {
        ArrayStore::serialized_byte_size(self.len())
    }

    /// The number of bytes `cardinality` values serialize into.
    pub const fn serialized_byte_size(cardinality: u64) -> usize {
        cardinality as usize * ARRAY_ELEMENT_BYTES
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn min(&self) -> Option<u16> {
        self.vec.first().copied()
    }

    pub fn max(&self) -> Option<u16> {
        self.vec.last().copied()
    }

    pub fn rank(&self, index: u16) -> u64 {
        match self.vec.binary_search(&index) {
            Ok(i) => i as u64 + 1,
            Err(i) => i as u64,
        }
    }

    pub fn select(&self, n: u16) -> Option<u16> {
        self.vec.get(n as usize).cloned()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u16> {
        self.vec.iter()
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.vec
    }
}

#[derive(Debug)]
pub struct Error {
    index: usize,
    kind: ErrorKind,
}

#[derive(Debug)]
pub enum ErrorKind {
    Duplicate,
    OutOfOrder,
}

impl Error {
    /// The position of the offending value.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ErrorKind::Duplicate => {
                write!(f, "Duplicate element found at index: {}", self.index)
            }
            ErrorKind::OutOfOrder => {
                write!(f, "An element was out of order at index: {}", self.index)
            }
        }
    }
}

impl std::error::Error for Error {}

impl TryFrom<Vec<u16>> for ArrayStore {
    type Error = Error;

    fn try_from(value: Vec<u16>) -> Result<Self, Self::Error> {
        for (index, pair) in value.windows(2).enumerate() {
            match pair[0].cmp(&pair[1]) {
                Less => {}
                Equal => return Err(Error { index: index + 1, kind: ErrorKind::Duplicate }),
                Greater => return Err(Error { index: index + 1, kind: ErrorKind::OutOfOrder }),
            }
        }
        Ok(ArrayStore { vec: value })
    }
}

impl FromIterator<u16> for ArrayStore {
    fn from_iter<I: IntoIterator<Item = u16>>(iterator: I) -> ArrayStore {
        let mut vec: Vec<u16> = iterator.into_iter().collect();
        vec.sort_unstable();
        vec.dedup();
        ArrayStore { vec }
    }
}

impl BitOr<Self> for &ArrayStore {
    type Output = ArrayStore;

    fn bitor(self, rhs: Self) -> Self::Output {
        ArrayStore { vec: scalar::or(self.as_slice(), rhs.as_slice()) }
    }
}

impl BitAnd<Self> for &ArrayStore {
    type Output = ArrayStore;

    fn bitand(self, rhs: Self) -> Self::Output {
        ArrayStore { vec: scalar::and(self.as_slice(), rhs.as_slice()) }
    }
}

impl BitAndAssign<&Self> for ArrayStore {
    fn bitand_assign(&mut self, rhs: &Self) {
        self.vec = scalar::and(self.as_slice(), rhs.as_slice());
    }
}

impl BitAndAssign<&BitmapStore> for ArrayStore {
    fn bitand_assign(&mut self, rhs: &BitmapStore) {
        self.vec.retain(|&index| rhs.contains(index));
    }
}

impl Sub<Self> for &ArrayStore {
    type Output = ArrayStore;

    fn sub(self, rhs: Self) -> Self::Output {
        ArrayStore { vec: scalar::sub(self.as_slice(), rhs.as_slice()) }
    }
}

impl SubAssign<&Self> for ArrayStore {
    fn sub_assign(&mut self, rhs: &Self) {
        self.vec = scalar::sub(self.as_slice(), rhs.as_slice());
    }
}

impl SubAssign<&BitmapStore> for ArrayStore {
    fn sub_assign(&mut self, rhs: &BitmapStore) {
        self.vec.retain(|&index| !rhs.contains(index));
    }
}

impl BitXor<Self> for &ArrayStore {
    type Output = ArrayStore;

    fn bitxor(self, rhs: Self) -> Self::Output {
        ArrayStore { vec: scalar::xor(self.as_slice(), rhs.as_slice()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(values: &[u16]) -> ArrayStore {
        ArrayStore::from_vec_unchecked(values.to_vec())
    }

    #[test]
    fn rejects_unsorted() {
        let error = ArrayStore::try_from(vec![1, 3, 2]).unwrap_err();
        assert_eq!(error.index(), 2);
        assert!(matches!(error.kind(), ErrorKind::OutOfOrder));

        let error = ArrayStore::try_from(vec![1, 1]).unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::Duplicate));
    }

    #[test]
    fn byte_sizes() {
        assert_eq!(store(&[1, 5, 9]).byte_size(), 6);
        assert_eq!(ArrayStore::new().byte_size(), 0);
        assert_eq!(ArrayStore::serialized_byte_size(4096), 8192);
    }

    #[test]
    fn ranges() {
        let mut array = store(&[1, 5, 10, 200]);
        assert_eq!(array.insert_range(4..=11), 6);
        assert_eq!(array.as_slice(), &[1, 4, 5, 6, 7, 8, 9, 10, 11, 200]);
        assert_eq!(array.remove_range(0..=5), 3);
        assert_eq!(array.as_slice(), &[6, 7, 8, 9, 10, 11, 200]);
        assert_eq!(array.remove_range(12..=199), 0);
        assert_eq!(array.remove_range(200..=u16::MAX), 1);
        assert_eq!(array.count_runs(), 1);
    }

    #[test]
    fn with_bitmap() {
        let mut bitmap = BitmapStore::new();
        bitmap.insert_range(10..=20);

        let mut array = store(&[1, 10, 15, 30]);
        array &= &bitmap;
        assert_eq!(array.as_slice(), &[10, 15]);

        let mut array = store(&[1, 10, 15, 30]);
        array -= &bitmap;
        assert_eq!(array.as_slice(), &[1, 30]);
    }

    #[test]
    fn rank_select() {
        let array = store(&[3, 8, 9]);
        assert_eq!(array.rank(2), 0);
        assert_eq!(array.rank(8), 2);
        assert_eq!(array.rank(u16::MAX), 3);
        assert_eq!(array.select(1), Some(8));
        assert_eq!(array.select(3), None);
        assert_eq!(array.count_runs(), 2);
        assert_eq!(ArrayStore::new().count_runs(), 0);
    }

    #[test]
    fn disjoint() {
        assert!(store(&[1, 3]).is_disjoint(&store(&[2, 4])));
        assert!(!store(&[1, 3]).is_disjoint(&store(&[3])));
    }
}
