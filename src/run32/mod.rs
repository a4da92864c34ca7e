mod bitmap32;
mod fmt;
mod ops;

#[cfg(test)]
mod proptests;
#[cfg(feature = "serde")]
mod serde;
#[cfg(feature = "std")]
mod serialization;

use std::ops::Range;

use crate::interval::Interval32;
use crate::iter::{RunCursor, RunIter};
use crate::runs;
use crate::search::{self, SearchOptions, SearchResult};
use crate::NonSortedIntegers;

pub use self::bitmap32::Bitmap32;

/// The largest value a [`RunContainer32`] can hold. `u32::MAX` is excluded
/// so that the end of every half-open interval stays representable.
pub const UPPER_LIMIT: u32 = u32::MAX - 1;

/// Bytes taken by the run count of a serialized container.
pub const RUN_NUM_BYTES: usize = 4;
/// Bytes taken by each serialized run.
pub const RUN_ELEMENT_BYTES: usize = 8;

/// A set of `u32` values stored as sorted runs of consecutive integers.
///
/// Runs never overlap nor touch, so any given set has exactly one
/// representation. The cardinality is maintained eagerly.
///
/// # Examples
///
/// ```rust
/// use roaring_runs::{Interval32, RunContainer32};
///
/// let mut container = RunContainer32::new();
/// container.insert(1);
/// container.insert(2);
/// container.insert(3);
/// container.insert(8);
///
/// assert_eq!(container.intervals(), &[Interval32::new(1, 4), Interval32::new(8, 9)]);
/// assert_eq!(container.len(), 4);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RunContainer32 {
    intervals: Vec<Interval32>,
    len: u64,
}

impl RunContainer32 {
    /// Creates an empty `RunContainer32`.
    pub fn new() -> RunContainer32 {
        RunContainer32::default()
    }

    /// Creates a container holding a copy of `intervals`.
    ///
    /// # Panics
    ///
    /// If the intervals are not sorted or if two of them overlap or touch.
    pub fn from_intervals(intervals: &[Interval32]) -> RunContainer32 {
        RunContainer32::from_interval_vec(intervals.to_vec())
    }

    /// Creates a container that takes ownership of `intervals`.
    ///
    /// # Panics
    ///
    /// If the intervals are not sorted or if two of them overlap or touch.
    pub fn from_interval_vec(intervals: Vec<Interval32>) -> RunContainer32 {
        assert!(runs::is_canonical(&intervals), "intervals are not canonical: {:?}", intervals);
        let len = runs::cardinality(&intervals);
        RunContainer32 { intervals, len }
    }

    pub(crate) fn from_canonical(intervals: Vec<Interval32>) -> RunContainer32 {
        debug_assert!(runs::is_canonical(&intervals));
        let len = runs::cardinality(&intervals);
        RunContainer32 { intervals, len }
    }

    /// Creates a container from an ascending sequence of values. Repeated
    /// values are ignored.
    ///
    /// Returns `Err` with the index of the first value smaller than its
    /// predecessor when the sequence is not sorted.
    ///
    /// # Panics
    ///
    /// If a value exceeds [`UPPER_LIMIT`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roaring_runs::RunContainer32;
    ///
    /// let container = RunContainer32::from_sorted_iter([1, 2, 3, 7]).unwrap();
    /// assert_eq!(container.run_amount(), 2);
    ///
    /// let error = RunContainer32::from_sorted_iter([1, 2, 0]).unwrap_err();
    /// assert_eq!(error.valid_until(), 2);
    /// ```
    pub fn from_sorted_iter<I: IntoIterator<Item = u32>>(
        iterator: I,
    ) -> Result<RunContainer32, NonSortedIntegers> {
        let intervals = runs::from_sorted(iterator.into_iter().map(u64::from))?;
        Ok(RunContainer32::from_canonical(intervals))
    }

    /// The number of values in the container.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if there are no values in the container.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The number of runs.
    pub fn run_amount(&self) -> u64 {
        self.intervals.len() as u64
    }

    /// The runs, in ascending order.
    pub fn intervals(&self) -> &[Interval32] {
        &self.intervals
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.intervals.clear();
        self.len = 0;
    }

    /// Returns `true` if `value` is in the container.
    pub fn contains(&self, value: u32) -> bool {
        self.search(value, None).is_present()
    }

    /// Locates `key` among the runs, optionally restricted to a range of
    /// run indices.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roaring_runs::{Position, RunContainer32};
    ///
    /// let container: RunContainer32 = [2, 3, 4, 10].into_iter().collect();
    /// assert_eq!(container.search(3, None).position, Position::Within(0));
    /// assert_eq!(container.search(7, None).position, Position::After(0));
    /// assert_eq!(container.search(1, None).position, Position::Before);
    /// ```
    pub fn search(&self, key: u32, options: Option<&SearchOptions>) -> SearchResult {
        search::search(&self.intervals, u64::from(key), options)
    }

    /// Adds a value, returns `true` if it was not already present.
    ///
    /// # Panics
    ///
    /// If `value` exceeds [`UPPER_LIMIT`].
    pub fn insert(&mut self, value: u32) -> bool {
        let inserted = runs::insert(&mut self.intervals, u64::from(value));
        self.len += u64::from(inserted);
        inserted
    }

    /// Removes a value, returns `true` if it was present.
    pub fn remove(&mut self, value: u32) -> bool {
        let removed = runs::remove(&mut self.intervals, u64::from(value));
        self.len -= u64::from(removed);
        removed
    }

    /// Adds every value of `range`, returns how many were not already
    /// present.
    pub fn insert_range(&mut self, range: Range<u32>) -> u64 {
        let inserted =
            runs::insert_range(&mut self.intervals, u64::from(range.start), u64::from(range.end));
        self.len += inserted;
        inserted
    }

    /// Removes every value of `range`, returns how many were present.
    pub fn remove_range(&mut self, range: Range<u32>) -> u64 {
        let removed =
            runs::remove_range(&mut self.intervals, u64::from(range.start), u64::from(range.end));
        self.len -= removed;
        removed
    }

    /// Removes every value of `interval`, returns how many were present.
    pub fn subtract(&mut self, interval: Interval32) -> u64 {
        self.remove_range(interval.start()..interval.end())
    }

    /// The union of both containers.
    pub fn union(&self, other: &RunContainer32) -> RunContainer32 {
        RunContainer32::from_canonical(runs::union(&self.intervals, &other.intervals))
    }

    /// The intersection of both containers.
    pub fn intersect(&self, other: &RunContainer32) -> RunContainer32 {
        RunContainer32::from_canonical(runs::intersect(&self.intervals, &other.intervals))
    }

    /// Returns `true` if the containers share a value.
    pub fn intersects(&self, other: &RunContainer32) -> bool {
        runs::intersects(&self.intervals, &other.intervals)
    }

    /// Every value of `[0, UPPER_LIMIT]` missing from this container.
    pub fn invert(&self) -> RunContainer32 {
        RunContainer32::from_canonical(runs::invert(&self.intervals))
    }

    /// This container with the membership of every value of `range` flipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roaring_runs::RunContainer32;
    ///
    /// let container: RunContainer32 = [1, 2, 3, 8].into_iter().collect();
    /// assert!(container.not(2..6).iter().eq([1, 4, 5, 8]));
    /// ```
    pub fn not(&self, range: Range<u32>) -> RunContainer32 {
        let intervals =
            runs::flip_range(&self.intervals, u64::from(range.start), u64::from(range.end));
        RunContainer32::from_canonical(intervals)
    }

    /// The number of values lower than or equal to `value`.
    pub fn rank(&self, value: u32) -> u64 {
        runs::rank(&self.intervals, u64::from(value))
    }

    /// The `n`th smallest value, starting at zero.
    pub fn select(&self, n: u64) -> Option<u32> {
        runs::select(&self.intervals, n).map(|value| value as u32)
    }

    /// The smallest value.
    pub fn min(&self) -> Option<u32> {
        self.intervals.first().map(Interval32::start)
    }

    /// The largest value.
    pub fn max(&self) -> Option<u32> {
        self.intervals.last().map(|interval| interval.end() - 1)
    }

    /// Iterates over the values in ascending order.
    pub fn iter(&self) -> RunIter<'_, Interval32> {
        RunIter::new(&self.intervals, self.len)
    }

    /// Every value in ascending order.
    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }

    /// A cursor over the values that can remove the value it points at.
    pub fn cursor(&mut self) -> RunCursor<'_, Interval32> {
        RunCursor::new(&mut self.intervals, &mut self.len)
    }

    /// The number of bytes [`serialize_into`](Self::serialize_into) writes.
    pub fn byte_size(&self) -> usize {
        RunContainer32::serialized_byte_size(self.run_amount())
    }

    /// The number of bytes a container of `runs` runs serializes into.
    pub const fn serialized_byte_size(runs: u64) -> usize {
        RUN_NUM_BYTES + RUN_ELEMENT_BYTES * runs as usize
    }
}

impl FromIterator<u32> for RunContainer32 {
    fn from_iter<I: IntoIterator<Item = u32>>(iterator: I) -> RunContainer32 {
        let mut values: Vec<u32> = iterator.into_iter().collect();
        values.sort_unstable();
        values.dedup();
        let intervals = values.iter().map(|&value| u64::from(value));
        match runs::from_sorted(intervals) {
            Ok(intervals) => RunContainer32::from_canonical(intervals),
            Err(_) => unreachable!("sorted values were reported unsorted"),
        }
    }
}

impl Extend<u32> for RunContainer32 {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iterator: I) {
        for value in iterator {
            self.insert(value);
        }
    }
}

impl<'a> IntoIterator for &'a RunContainer32 {
    type Item = u32;
    type IntoIter = RunIter<'a, Interval32>;

    fn into_iter(self) -> RunIter<'a, Interval32> {
        self.iter()
    }
}
