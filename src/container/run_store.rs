use std::ops::RangeInclusive;

use super::{ArrayStore, BitmapStore, BITMAP_LENGTH};
use crate::interval::Interval16;
use crate::iter::{RunCursor, RunIter};
use crate::runs;
use crate::search::{self, SearchOptions, SearchResult};
use crate::NonSortedIntegers;

/// Bytes taken by the run count of a serialized run store.
pub const RUN_NUM_BYTES: usize = 2;
/// Bytes taken by each serialized run.
pub const RUN_ELEMENT_BYTES: usize = 4;

/// A chunk of the 16-bit value space stored as sorted runs of consecutive
/// values.
///
/// The runs are closed intervals so that a single run covers the full chunk.
/// Runs never overlap nor touch, and the cardinality is maintained eagerly.
///
/// # Examples
///
/// ```rust
/// use roaring_runs::{Interval16, RunStore};
///
/// let mut store = RunStore::new();
/// store.insert_range(10..=20);
/// store.insert(21);
/// assert_eq!(store.intervals(), &[Interval16::new(10, 21)]);
/// assert_eq!(store.invert().len(), 65536 - 12);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RunStore {
    intervals: Vec<Interval16>,
    len: u64,
}

impl RunStore {
    /// Creates an empty `RunStore`.
    pub fn new() -> RunStore {
        RunStore::default()
    }

    /// Creates a `RunStore` holding every value of the chunk.
    pub fn full() -> RunStore {
        RunStore { intervals: vec![Interval16::full()], len: 1 << 16 }
    }

    /// Creates a store holding a copy of `intervals`.
    ///
    /// # Panics
    ///
    /// If the intervals are not sorted or if two of them overlap or touch.
    pub fn from_intervals(intervals: &[Interval16]) -> RunStore {
        RunStore::from_interval_vec(intervals.to_vec())
    }

    /// Creates a store that takes ownership of `intervals`.
    ///
    /// # Panics
    ///
    /// If the intervals are not sorted or if two of them overlap or touch.
    pub fn from_interval_vec(intervals: Vec<Interval16>) -> RunStore {
        assert!(runs::is_canonical(&intervals), "intervals are not canonical: {:?}", intervals);
        RunStore::from_canonical(intervals)
    }

    pub(crate) fn from_canonical(intervals: Vec<Interval16>) -> RunStore {
        debug_assert!(runs::is_canonical(&intervals));
        let len = runs::cardinality(&intervals);
        RunStore { intervals, len }
    }

    /// Creates a store from an ascending sequence of values. Repeated values
    /// are ignored.
    pub fn from_sorted_iter<I: IntoIterator<Item = u16>>(
        iterator: I,
    ) -> Result<RunStore, NonSortedIntegers> {
        let intervals = runs::from_sorted(iterator.into_iter().map(u64::from))?;
        Ok(RunStore::from_canonical(intervals))
    }

    /// The runs of an array store.
    pub fn from_array(array: &ArrayStore) -> RunStore {
        let mut store = RunStore::new();
        for &value in array.iter() {
            store.push(value);
        }
        store
    }

    /// The runs of a bitmap store, found a word at a time.
    pub fn from_bitmap(bitmap: &BitmapStore) -> RunStore {
        let words = bitmap.as_array();
        let mut intervals = Vec::new();
        let mut i = 0;
        let mut current = words[0];

        loop {
            // skip empty words
            while current == 0 && i < BITMAP_LENGTH - 1 {
                i += 1;
                current = words[i];
            }
            if current == 0 {
                break;
            }
            let start = 64 * i + current.trailing_zeros() as usize;

            // set the bits below the run start, then look for its first zero
            current |= current - 1;
            while current == u64::MAX && i < BITMAP_LENGTH - 1 {
                i += 1;
                current = words[i];
            }
            if current == u64::MAX {
                intervals.push(Interval16::new(start as u16, u16::MAX));
                break;
            }
            let end = 64 * i + (!current).trailing_zeros() as usize;
            intervals.push(Interval16::new(start as u16, (end - 1) as u16));

            // clear the bits up to the run end
            current &= current + 1;
        }

        RunStore { intervals, len: bitmap.len() }
    }

    pub fn to_array_store(&self) -> ArrayStore {
        ArrayStore::from_vec_unchecked(self.intervals.iter().flatten().collect())
    }

    pub fn to_bitmap_store(&self) -> BitmapStore {
        let mut bitmap = BitmapStore::new();
        for interval in &self.intervals {
            bitmap.insert_range(interval.into_iter());
        }
        bitmap
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn run_amount(&self) -> u64 {
        self.intervals.len() as u64
    }

    pub fn intervals(&self) -> &[Interval16] {
        &self.intervals
    }

    pub fn contains(&self, index: u16) -> bool {
        self.search(index, None).is_present()
    }

    /// Locates `key` among the runs, optionally restricted to a range of run
    /// indices.
    pub fn search(&self, key: u16, options: Option<&SearchOptions>) -> SearchResult {
        search::search(&self.intervals, u64::from(key), options)
    }

    pub fn insert(&mut self, index: u16) -> bool {
        let inserted = runs::insert(&mut self.intervals, u64::from(index));
        self.len += u64::from(inserted);
        inserted
    }

    /// Appends `index` after the last run, extending it when they touch.
    ///
    /// Returns `false`, leaving the store unchanged, if `index` is not
    /// greater than every value already present.
    pub fn push(&mut self, index: u16) -> bool {
        if let Some(last) = self.intervals.last_mut() {
            if last.last() >= index {
                return false;
            }
            if last.last() + 1 == index {
                *last = Interval16::new(last.start(), index);
                self.len += 1;
                return true;
            }
        }
        self.intervals.push(Interval16::singleton(index));
        self.len += 1;
        true
    }

    pub fn remove(&mut self, index: u16) -> bool {
        let removed = runs::remove(&mut self.intervals, u64::from(index));
        self.len -= u64::from(removed);
        removed
    }

    pub fn insert_range(&mut self, range: RangeInclusive<u16>) -> u64 {
        let (lower, upper) = bounds(&range);
        let inserted = runs::insert_range(&mut self.intervals, lower, upper);
        self.len += inserted;
        inserted
    }

    pub fn remove_range(&mut self, range: RangeInclusive<u16>) -> u64 {
        let (lower, upper) = bounds(&range);
        let removed = runs::remove_range(&mut self.intervals, lower, upper);
        self.len -= removed;
        removed
    }

    /// Removes every value of `interval`, returns how many were present.
    pub fn subtract(&mut self, interval: Interval16) -> u64 {
        self.remove_range(interval.into_iter())
    }

    pub fn union(&self, other: &RunStore) -> RunStore {
        RunStore::from_canonical(runs::union(&self.intervals, &other.intervals))
    }

    pub fn intersect(&self, other: &RunStore) -> RunStore {
        RunStore::from_canonical(runs::intersect(&self.intervals, &other.intervals))
    }

    pub fn intersects(&self, other: &RunStore) -> bool {
        runs::intersects(&self.intervals, &other.intervals)
    }

    /// Every value of the chunk missing from this store.
    pub fn invert(&self) -> RunStore {
        RunStore::from_canonical(runs::invert(&self.intervals))
    }

    /// This store with the membership of every value of `range` flipped.
    pub fn not(&self, range: RangeInclusive<u16>) -> RunStore {
        let (lower, upper) = bounds(&range);
        RunStore::from_canonical(runs::flip_range(&self.intervals, lower, upper))
    }

    pub fn rank(&self, index: u16) -> u64 {
        runs::rank(&self.intervals, u64::from(index))
    }

    pub fn select(&self, n: u16) -> Option<u16> {
        runs::select(&self.intervals, u64::from(n)).map(|value| value as u16)
    }

    pub fn min(&self) -> Option<u16> {
        self.intervals.first().map(Interval16::start)
    }

    pub fn max(&self) -> Option<u16> {
        self.intervals.last().map(Interval16::last)
    }

    pub fn iter(&self) -> RunIter<'_, Interval16> {
        RunIter::new(&self.intervals, self.len)
    }

    /// A cursor over the values that can remove the value it points at.
    pub fn cursor(&mut self) -> RunCursor<'_, Interval16> {
        RunCursor::new(&mut self.intervals, &mut self.len)
    }

    /// The number of bytes the runs serialize into.
    pub fn byte_size(&self) -> usize {
        RunStore::serialized_byte_size(self.run_amount())
    }

    /// The number of bytes a store of `runs` runs serializes into.
    pub const fn serialized_byte_size(runs: u64) -> usize {
        RUN_NUM_BYTES + RUN_ELEMENT_BYTES * runs as usize
    }
}

impl FromIterator<u16> for RunStore {
    fn from_iter<I: IntoIterator<Item = u16>>(iterator: I) -> RunStore {
        RunStore::from_array(&iterator.into_iter().collect())
    }
}

/// The widened half-open bounds of a closed range, empty ranges included.
fn bounds(range: &RangeInclusive<u16>) -> (u64, u64) {
    if range.is_empty() {
        (0, 0)
    } else {
        (u64::from(*range.start()), u64::from(*range.end()) + 1)
    }
}
