//! Binary search over the intervals of a run container.

use crate::interval::Interval;

/// Restricts a search to the intervals `[start_index, end_index)`.
///
/// The merge algorithms use this to skip the prefix they already consumed.
/// A missing `end_index` means up to the last interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// The first interval index considered.
    pub start_index: usize,
    /// One past the last interval index considered.
    pub end_index: Option<usize>,
}

impl SearchOptions {
    /// Searches from `start_index` to the end.
    pub fn starting_at(start_index: usize) -> SearchOptions {
        SearchOptions { start_index, end_index: None }
    }
}

/// Where a key falls relative to the intervals of a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// Before every searched interval.
    Before,
    /// Inside the interval at this index.
    Within(usize),
    /// After the interval at this index and before the next one, if any.
    After(usize),
}

/// The outcome of a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Where the key falls.
    pub position: Position,
    /// How many interval starts were compared against the key.
    pub comparisons: usize,
}

impl SearchResult {
    /// Returns `true` if the key is a member of the container.
    pub fn is_present(&self) -> bool {
        matches!(self.position, Position::Within(_))
    }

    /// The index of the interval containing the key, or of the closest one
    /// before it. `None` when the key precedes every interval.
    pub fn index(&self) -> Option<usize> {
        match self.position {
            Position::Before => None,
            Position::Within(index) | Position::After(index) => Some(index),
        }
    }
}

/// Locates `key` in the sorted, disjoint `intervals`.
///
/// Finds the first interval of the searched range whose start exceeds the
/// key, the candidate is then the interval right before it.
pub(crate) fn search<I: Interval>(
    intervals: &[I],
    key: u64,
    options: Option<&SearchOptions>,
) -> SearchResult {
    let len = intervals.len();
    let (mut low, mut high) = match options {
        Some(options) => {
            let high = options.end_index.map_or(len, |end| end.min(len));
            (options.start_index.min(high), high)
        }
        None => (0, len),
    };

    let mut comparisons = 0;
    while low < high {
        let mid = low + (high - low) / 2;
        comparisons += 1;
        if key < intervals[mid].lower() {
            high = mid;
        } else {
            low = mid + 1;
        }
    }

    let position = match low.checked_sub(1) {
        None => Position::Before,
        Some(index) if intervals[index].contains_value(key) => Position::Within(index),
        Some(index) => Position::After(index),
    };

    SearchResult { position, comparisons }
}
