//! Runs of consecutive integers.
//!
//! Two conventions coexist. [`Interval32`] is half-open, `[start, end)`, and
//! backs the standalone [`RunContainer32`](crate::RunContainer32).
//! [`Interval16`] is closed, `[start, last]`, so that a single run can cover
//! the whole 16-bit chunk, and backs [`RunStore`](crate::RunStore).
//!
//! The [`Interval`] trait views both through the same widened half-open
//! bounds, which is what the run algorithms operate on.

use std::fmt;
use std::ops::RangeInclusive;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Interval16 {}
    impl Sealed for super::Interval32 {}
}

/// A non-empty run of consecutive integers.
///
/// This trait is sealed; it is implemented by [`Interval16`] and
/// [`Interval32`] only.
pub trait Interval: Copy + Eq + fmt::Debug + sealed::Sealed {
    /// The integer type stored by containers of these intervals.
    type Value: Copy + Ord + Into<u64> + fmt::Debug;

    /// The largest value a container of these intervals can hold.
    const UPPER_LIMIT: u64;

    /// The smallest member of the run.
    fn lower(&self) -> u64;

    /// One past the largest member of the run.
    fn upper(&self) -> u64;

    #[doc(hidden)]
    fn from_bounds(lower: u64, upper: u64) -> Self;

    #[doc(hidden)]
    fn narrow(value: u64) -> Self::Value;

    /// The number of integers in the run, always at least one.
    #[inline]
    fn run_len(&self) -> u64 {
        self.upper() - self.lower()
    }

    /// Returns `true` if `value` belongs to the run.
    #[inline]
    fn contains_value(&self, value: u64) -> bool {
        self.lower() <= value && value < self.upper()
    }

    /// Returns `true` if the two runs overlap or touch, so that their union
    /// is a single run.
    #[inline]
    fn can_merge(&self, other: &Self) -> bool {
        self.upper() >= other.lower() && other.upper() >= self.lower()
    }

    /// Returns `true` if the two runs share at least one integer.
    #[inline]
    fn overlaps(&self, other: &Self) -> bool {
        self.lower() < other.upper() && other.lower() < self.upper()
    }

    /// Returns the single run covering both runs.
    ///
    /// # Panics
    ///
    /// If the runs can't be merged, see [`can_merge`](Interval::can_merge).
    fn merge(&self, other: &Self) -> Self {
        assert!(self.can_merge(other), "cannot merge {:?} and {:?}", self, other);
        Self::from_bounds(self.lower().min(other.lower()), self.upper().max(other.upper()))
    }

    /// Returns the integers common to both runs, if any.
    fn intersect(&self, other: &Self) -> Option<Self> {
        let lower = self.lower().max(other.lower());
        let upper = self.upper().min(other.upper());
        if lower < upper {
            Some(Self::from_bounds(lower, upper))
        } else {
            None
        }
    }
}

/// A half-open run `[start, end)` of `u32` values.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval32 {
    start: u32,
    end: u32,
}

impl Interval32 {
    /// Creates the run `[start, end)`.
    ///
    /// # Panics
    ///
    /// If `start >= end`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roaring_runs::{Interval, Interval32};
    ///
    /// let interval = Interval32::new(3, 5);
    /// assert_eq!(interval.run_len(), 2);
    /// assert!(!interval.contains_value(5));
    /// ```
    pub fn new(start: u32, end: u32) -> Interval32 {
        assert!(start < end, "empty or reversed interval [{}, {})", start, end);
        Interval32 { start, end }
    }

    /// The run containing only `value`.
    ///
    /// # Panics
    ///
    /// If `value` is `u32::MAX`, whose exclusive end is not representable.
    pub fn singleton(value: u32) -> Interval32 {
        assert!(u64::from(value) <= Self::UPPER_LIMIT, "{} is above the upper limit", value);
        Interval32 { start: value, end: value + 1 }
    }

    /// The smallest member.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// One past the largest member.
    pub fn end(&self) -> u32 {
        self.end
    }
}

impl Interval for Interval32 {
    type Value = u32;

    const UPPER_LIMIT: u64 = u32::MAX as u64 - 1;

    #[inline]
    fn lower(&self) -> u64 {
        u64::from(self.start)
    }

    #[inline]
    fn upper(&self) -> u64 {
        u64::from(self.end)
    }

    #[inline]
    fn from_bounds(lower: u64, upper: u64) -> Self {
        debug_assert!(lower < upper && upper <= Self::UPPER_LIMIT + 1);
        Interval32 { start: lower as u32, end: upper as u32 }
    }

    #[inline]
    fn narrow(value: u64) -> u32 {
        value as u32
    }
}

impl fmt::Debug for Interval32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A closed run `[start, last]` of `u16` values.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval16 {
    start: u16,
    last: u16,
}

impl Interval16 {
    /// Creates the run `[start, last]`.
    ///
    /// # Panics
    ///
    /// If `start > last`.
    pub fn new(start: u16, last: u16) -> Interval16 {
        assert!(start <= last, "reversed interval [{}, {}]", start, last);
        Interval16 { start, last }
    }

    /// The run containing only `value`.
    pub fn singleton(value: u16) -> Interval16 {
        Interval16 { start: value, last: value }
    }

    /// The run covering the whole chunk.
    pub fn full() -> Interval16 {
        Interval16 { start: 0, last: u16::MAX }
    }

    /// The smallest member.
    pub fn start(&self) -> u16 {
        self.start
    }

    /// The largest member.
    pub fn last(&self) -> u16 {
        self.last
    }
}

impl Interval for Interval16 {
    type Value = u16;

    const UPPER_LIMIT: u64 = u16::MAX as u64;

    #[inline]
    fn lower(&self) -> u64 {
        u64::from(self.start)
    }

    #[inline]
    fn upper(&self) -> u64 {
        u64::from(self.last) + 1
    }

    #[inline]
    fn from_bounds(lower: u64, upper: u64) -> Self {
        debug_assert!(lower < upper && upper <= Self::UPPER_LIMIT + 1);
        Interval16 { start: lower as u16, last: (upper - 1) as u16 }
    }

    #[inline]
    fn narrow(value: u64) -> u16 {
        value as u16
    }
}

impl IntoIterator for Interval16 {
    type Item = u16;
    type IntoIter = RangeInclusive<u16>;

    fn into_iter(self) -> RangeInclusive<u16> {
        self.start..=self.last
    }
}

impl IntoIterator for &'_ Interval16 {
    type Item = u16;
    type IntoIter = RangeInclusive<u16>;

    fn into_iter(self) -> RangeInclusive<u16> {
        self.start..=self.last
    }
}

impl fmt::Debug for Interval16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.last)
    }
}
