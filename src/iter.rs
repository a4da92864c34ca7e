use std::iter::FusedIterator;
use std::slice;

use crate::interval::Interval;
use crate::runs;

/// An iterator over the values of a run container, in ascending order.
pub struct RunIter<'a, I: Interval> {
    intervals: slice::Iter<'a, I>,
    front: Option<(u64, u64)>,
    back: Option<(u64, u64)>,
    remaining: u64,
}

impl<'a, I: Interval> RunIter<'a, I> {
    pub(crate) fn new(intervals: &'a [I], len: u64) -> RunIter<'a, I> {
        RunIter { intervals: intervals.iter(), front: None, back: None, remaining: len }
    }
}

impl<I: Interval> Iterator for RunIter<'_, I> {
    type Item = I::Value;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((next, end)) = &mut self.front {
                if next < end {
                    let value = *next;
                    *next += 1;
                    self.remaining -= 1;
                    return Some(I::narrow(value));
                }
            }
            match self.intervals.next() {
                Some(interval) => self.front = Some((interval.lower(), interval.upper())),
                None => {
                    // the back half may hold what is left of the last run
                    let (next, end) = self.back.as_mut()?;
                    if next == end {
                        return None;
                    }
                    let value = *next;
                    *next += 1;
                    self.remaining -= 1;
                    return Some(I::narrow(value));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }

    fn count(self) -> usize {
        self.remaining as usize
    }
}

impl<I: Interval> DoubleEndedIterator for RunIter<'_, I> {
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((start, end)) = &mut self.back {
                if start < end {
                    *end -= 1;
                    self.remaining -= 1;
                    return Some(I::narrow(*end));
                }
            }
            match self.intervals.next_back() {
                Some(interval) => self.back = Some((interval.lower(), interval.upper())),
                None => {
                    let (start, end) = self.front.as_mut()?;
                    if start == end {
                        return None;
                    }
                    *end -= 1;
                    self.remaining -= 1;
                    return Some(I::narrow(*end));
                }
            }
        }
    }
}

impl<I: Interval> FusedIterator for RunIter<'_, I> {}

/// A cursor over the values of a run container that can remove the value it
/// points at.
///
/// The cursor starts before the first value: [`next_value`](Self::next_value)
/// must be called before [`current`](Self::current) or
/// [`remove`](Self::remove). It mutably borrows its container, so nothing
/// else can modify the container while the cursor is alive.
///
/// # Examples
///
/// ```rust
/// use roaring_runs::RunContainer32;
///
/// let mut container: RunContainer32 = [5, 6, 9, 10, 12].into_iter().collect();
/// let mut cursor = container.cursor();
/// while cursor.has_next() {
///     if cursor.next_value() % 2 == 0 {
///         cursor.remove();
///     }
/// }
/// assert!(container.iter().eq([5, 9]));
/// ```
pub struct RunCursor<'a, I: Interval> {
    intervals: &'a mut Vec<I>,
    len: &'a mut u64,
    // interval index and offset of the next value to yield
    next: (usize, u64),
    current: Option<u64>,
    consumed: u64,
}

impl<'a, I: Interval> RunCursor<'a, I> {
    pub(crate) fn new(intervals: &'a mut Vec<I>, len: &'a mut u64) -> RunCursor<'a, I> {
        RunCursor { intervals, len, next: (0, 0), current: None, consumed: 0 }
    }

    /// Returns `true` if a call to [`next_value`](Self::next_value) would
    /// succeed.
    pub fn has_next(&self) -> bool {
        self.next.0 < self.intervals.len()
    }

    /// Advances to the next value and returns it.
    ///
    /// # Panics
    ///
    /// If there is no next value, see [`has_next`](Self::has_next).
    pub fn next_value(&mut self) -> I::Value {
        assert!(self.has_next(), "no next value available");

        let (index, offset) = self.next;
        let interval = self.intervals[index];
        let value = interval.lower() + offset;

        self.next = if offset + 1 == interval.run_len() { (index + 1, 0) } else { (index, offset + 1) };
        self.current = Some(value);
        self.consumed += 1;
        I::narrow(value)
    }

    /// The value last returned by [`next_value`](Self::next_value).
    ///
    /// # Panics
    ///
    /// Before the first call to `next_value` or right after a
    /// [`remove`](Self::remove).
    pub fn current(&self) -> I::Value {
        match self.current {
            Some(value) => I::narrow(value),
            None => panic!("current called before next_value"),
        }
    }

    /// The number of values yielded so far that are still in the container.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Removes the current value from the container and returns it. The
    /// following call to [`next_value`](Self::next_value) yields its
    /// successor.
    ///
    /// # Panics
    ///
    /// Before the first call to `next_value` or when the current value has
    /// already been removed.
    pub fn remove(&mut self) -> I::Value {
        let value = match self.current.take() {
            Some(value) => value,
            None => panic!("remove called before next_value"),
        };

        let (index, offset) = match self.next {
            (index, 0) => (index - 1, self.intervals[index - 1].run_len() - 1),
            (index, offset) => (index, offset - 1),
        };
        debug_assert_eq!(self.intervals[index].lower() + offset, value);

        self.next = runs::delete_at(self.intervals, index, offset);
        *self.len -= 1;
        self.consumed -= 1;
        I::narrow(value)
    }
}
