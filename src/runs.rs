//! Algorithms over sorted, disjoint, non-adjacent interval lists, shared by
//! both interval conventions through the widened [`Interval`] bounds.

use std::cmp::Ordering;

use crate::interval::Interval;
use crate::search::{search, Position, SearchOptions};
use crate::NonSortedIntegers;

pub(crate) fn cardinality<I: Interval>(intervals: &[I]) -> u64 {
    intervals.iter().map(Interval::run_len).sum()
}

/// Sorted, with a gap of at least one value between consecutive runs.
pub(crate) fn is_canonical<I: Interval>(intervals: &[I]) -> bool {
    intervals.windows(2).all(|pair| pair[0].upper() < pair[1].lower())
}

#[inline]
pub(crate) fn assert_in_domain<I: Interval>(value: u64) {
    assert!(value <= I::UPPER_LIMIT, "{} is above the upper limit {}", value, I::UPPER_LIMIT);
}

/// Builds runs from an ascending sequence, ignoring repeated values.
pub(crate) fn from_sorted<I, V>(values: V) -> Result<Vec<I>, NonSortedIntegers>
where
    I: Interval,
    V: IntoIterator<Item = u64>,
{
    let mut intervals = Vec::new();
    let mut current: Option<(u64, u64)> = None;

    for (index, value) in values.into_iter().enumerate() {
        assert_in_domain::<I>(value);
        current = match current {
            None => Some((value, value + 1)),
            Some((lower, upper)) => match value.cmp(&upper) {
                Ordering::Equal => Some((lower, upper + 1)),
                Ordering::Greater => {
                    intervals.push(I::from_bounds(lower, upper));
                    Some((value, value + 1))
                }
                Ordering::Less if value + 1 == upper => Some((lower, upper)),
                Ordering::Less => return Err(NonSortedIntegers { valid_until: index as u64 }),
            },
        };
    }

    if let Some((lower, upper)) = current {
        intervals.push(I::from_bounds(lower, upper));
    }
    Ok(intervals)
}

/// The first interval at or after `start_index` that is not entirely below
/// `key`: the one containing it, otherwise the one following it.
fn index_at_or_after<I: Interval>(intervals: &[I], key: u64, start_index: usize) -> usize {
    let options = SearchOptions::starting_at(start_index);
    match search(intervals, key, Some(&options)).position {
        Position::Before => start_index,
        Position::Within(index) => index,
        Position::After(index) => index + 1,
    }
}

/// The first interval at or after `start_index` whose end exceeds `key`,
/// `None` when there is none.
fn next_intersecting<I: Interval>(intervals: &[I], start_index: usize, key: u64) -> Option<usize> {
    if start_index >= intervals.len() {
        return None;
    }
    let options = SearchOptions::starting_at(start_index);
    match search(intervals, key, Some(&options)).position {
        Position::Within(index) if index >= start_index => Some(index),
        Position::After(index) if index >= start_index => {
            Some(index + 1).filter(|&next| next < intervals.len())
        }
        _ => Some(start_index),
    }
}

pub(crate) fn union<I: Interval>(lhs: &[I], rhs: &[I]) -> Vec<I> {
    let mut out = Vec::with_capacity(lhs.len() + rhs.len());
    let (mut i, mut j) = (0, 0);
    let mut merged: Option<I> = None;

    while i < lhs.len() && j < rhs.len() {
        let (a, b) = (lhs[i], rhs[j]);
        match merged {
            None if !a.can_merge(&b) => {
                if a.lower() < b.lower() {
                    out.push(a);
                    i += 1;
                } else {
                    out.push(b);
                    j += 1;
                }
            }
            None => {
                let run = a.merge(&b);
                i = index_at_or_after(lhs, run.upper(), i + 1);
                j = index_at_or_after(rhs, run.upper(), j + 1);
                merged = Some(run);
            }
            Some(mut run) => {
                let mut extended = false;
                if a.can_merge(&run) {
                    run = run.merge(&a);
                    i = index_at_or_after(lhs, run.upper(), i + 1);
                    extended = true;
                }
                if b.can_merge(&run) {
                    run = run.merge(&b);
                    j = index_at_or_after(rhs, run.upper(), j + 1);
                    extended = true;
                }
                if extended {
                    merged = Some(run);
                } else {
                    out.push(run);
                    merged = None;
                }
            }
        }
    }

    if let Some(mut run) = merged {
        while i < lhs.len() && lhs[i].can_merge(&run) {
            run = run.merge(&lhs[i]);
            i = index_at_or_after(lhs, run.upper(), i + 1);
        }
        while j < rhs.len() && rhs[j].can_merge(&run) {
            run = run.merge(&rhs[j]);
            j = index_at_or_after(rhs, run.upper(), j + 1);
        }
        out.push(run);
    }

    out.extend_from_slice(&lhs[i..]);
    out.extend_from_slice(&rhs[j..]);
    out
}

pub(crate) fn intersect<I: Interval>(lhs: &[I], rhs: &[I]) -> Vec<I> {
    let mut out = Vec::new();
    if lhs.is_empty() || rhs.is_empty() {
        return out;
    }

    let (mut i, mut j) = (0, 0);
    // the part of lhs[i] and rhs[j] before these is already accounted for
    let (mut a_start, mut b_start) = (lhs[0].lower(), rhs[0].lower());

    loop {
        let (a_end, b_end) = (lhs[i].upper(), rhs[j].upper());

        if a_end <= b_start || b_end <= a_start {
            if a_start < b_start {
                match next_intersecting(lhs, i + 1, b_start) {
                    Some(next) => i = next,
                    None => break,
                }
                a_start = lhs[i].lower();
            } else {
                match next_intersecting(rhs, j + 1, a_start) {
                    Some(next) => j = next,
                    None => break,
                }
                b_start = rhs[j].lower();
            }
            continue;
        }

        let start = a_start.max(b_start);
        match a_end.cmp(&b_end) {
            Ordering::Greater => {
                out.push(I::from_bounds(start, b_end));
                a_start = b_end;
                j += 1;
                if j == rhs.len() {
                    break;
                }
                b_start = rhs[j].lower();
            }
            Ordering::Less => {
                out.push(I::from_bounds(start, a_end));
                b_start = a_end;
                i += 1;
                if i == lhs.len() {
                    break;
                }
                a_start = lhs[i].lower();
            }
            Ordering::Equal => {
                out.push(I::from_bounds(start, a_end));
                i += 1;
                j += 1;
                if i == lhs.len() || j == rhs.len() {
                    break;
                }
                a_start = lhs[i].lower();
                b_start = rhs[j].lower();
            }
        }
    }

    out
}

pub(crate) fn intersects<I: Interval>(lhs: &[I], rhs: &[I]) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < lhs.len() && j < rhs.len() {
        if lhs[i].overlaps(&rhs[j]) {
            return true;
        }
        if lhs[i].upper() <= rhs[j].lower() {
            i += 1;
        } else {
            j += 1;
        }
    }
    false
}

/// Inserts `value`, returns `false` if it was already present.
pub(crate) fn insert<I: Interval>(intervals: &mut Vec<I>, value: u64) -> bool {
    assert_in_domain::<I>(value);

    match search(intervals, value, None).position {
        Position::Within(_) => false,
        Position::Before => {
            match intervals.first_mut() {
                Some(first) if first.lower() == value + 1 => {
                    *first = I::from_bounds(value, first.upper());
                }
                _ => intervals.insert(0, I::from_bounds(value, value + 1)),
            }
            true
        }
        Position::After(left) => {
            let right = left + 1;
            let grows_left = intervals[left].upper() == value;
            let grows_right = right < intervals.len() && intervals[right].lower() == value + 1;

            match (grows_left, grows_right) {
                (true, true) => {
                    // the value fills the only gap between two runs
                    intervals[left] = I::from_bounds(intervals[left].lower(), intervals[right].upper());
                    intervals.remove(right);
                }
                (true, false) => {
                    intervals[left] = I::from_bounds(intervals[left].lower(), value + 1);
                }
                (false, true) => {
                    intervals[right] = I::from_bounds(value, intervals[right].upper());
                }
                (false, false) => intervals.insert(right, I::from_bounds(value, value + 1)),
            }
            true
        }
    }
}

/// Removes `value`, returns `false` if it was absent.
pub(crate) fn remove<I: Interval>(intervals: &mut Vec<I>, value: u64) -> bool {
    match search(intervals, value, None).position {
        Position::Within(index) => {
            let offset = value - intervals[index].lower();
            delete_at(intervals, index, offset);
            true
        }
        Position::Before | Position::After(_) => false,
    }
}

/// Removes the value at `offset` within the interval at `index`.
///
/// Returns the `(index, offset)` where the removed value's successor now
/// lives, which is out of bounds when it had none.
pub(crate) fn delete_at<I: Interval>(
    intervals: &mut Vec<I>,
    index: usize,
    offset: u64,
) -> (usize, u64) {
    let interval = intervals[index];
    let (lower, upper) = (interval.lower(), interval.upper());
    let last = interval.run_len() - 1;

    if last == 0 {
        intervals.remove(index);
        (index, 0)
    } else if offset == 0 {
        intervals[index] = I::from_bounds(lower + 1, upper);
        (index, 0)
    } else if offset == last {
        intervals[index] = I::from_bounds(lower, upper - 1);
        (index + 1, 0)
    } else {
        let value = lower + offset;
        intervals[index] = I::from_bounds(lower, value);
        intervals.insert(index + 1, I::from_bounds(value + 1, upper));
        (index + 1, 0)
    }
}

/// Adds every value of `[lower, upper)`, returns how many were missing.
pub(crate) fn insert_range<I: Interval>(intervals: &mut Vec<I>, lower: u64, upper: u64) -> u64 {
    if lower >= upper {
        return 0;
    }
    assert_in_domain::<I>(upper - 1);

    let range = [I::from_bounds(lower, upper)];
    let present = cardinality(&intersect(intervals, &range));
    *intervals = union(intervals, &range);
    upper - lower - present
}

/// Removes every value of `[lower, upper)` in place, returns how many were
/// present.
pub(crate) fn remove_range<I: Interval>(intervals: &mut Vec<I>, lower: u64, upper: u64) -> u64 {
    if lower >= upper {
        return 0;
    }

    let first = intervals.partition_point(|interval| interval.upper() <= lower);
    let end = intervals.partition_point(|interval| interval.lower() < upper);
    if first >= end {
        return 0;
    }

    let mut remnants = Vec::with_capacity(2);
    if intervals[first].lower() < lower {
        remnants.push(I::from_bounds(intervals[first].lower(), lower));
    }
    if intervals[end - 1].upper() > upper {
        remnants.push(I::from_bounds(upper, intervals[end - 1].upper()));
    }

    let affected = cardinality(&intervals[first..end]);
    let kept = cardinality(&remnants);
    intervals.splice(first..end, remnants);
    affected - kept
}

/// The values of `[lower, upper)` missing from `intervals`.
fn gaps_within<I: Interval>(intervals: &[I], lower: u64, upper: u64) -> Vec<I> {
    if lower >= upper {
        return Vec::new();
    }

    let bounded = intersect(intervals, &[I::from_bounds(lower, upper)]);
    let mut out = Vec::with_capacity(bounded.len() + 1);
    let mut next = lower;
    for interval in &bounded {
        if interval.lower() > next {
            out.push(I::from_bounds(next, interval.lower()));
        }
        next = interval.upper();
    }
    if next < upper {
        out.push(I::from_bounds(next, upper));
    }
    out
}

/// Complement over the whole domain `[0, UPPER_LIMIT]`.
pub(crate) fn invert<I: Interval>(intervals: &[I]) -> Vec<I> {
    gaps_within(intervals, 0, I::UPPER_LIMIT + 1)
}

/// Flips the membership of every value of `[lower, upper)`.
pub(crate) fn flip_range<I: Interval>(intervals: &[I], lower: u64, upper: u64) -> Vec<I> {
    if lower >= upper {
        return intervals.to_vec();
    }

    let flipped = gaps_within(intervals, lower, upper);
    let mut untouched = intervals.to_vec();
    remove_range(&mut untouched, lower, upper);
    union(&untouched, &flipped)
}

/// The number of values lower than or equal to `value`.
pub(crate) fn rank<I: Interval>(intervals: &[I], value: u64) -> u64 {
    let mut rank = 0;
    for interval in intervals {
        if value < interval.lower() {
            break;
        }
        if value < interval.upper() {
            return rank + value - interval.lower() + 1;
        }
        rank += interval.run_len();
    }
    rank
}

/// The `n`th smallest value, starting at zero.
pub(crate) fn select<I: Interval>(intervals: &[I], mut n: u64) -> Option<u64> {
    for interval in intervals {
        let len = interval.run_len();
        if n < len {
            return Some(interval.lower() + n);
        }
        n -= len;
    }
    None
}
