//! The three interchangeable representations of a 16-bit chunk of a Roaring
//! bitmap and the algebra between them.
//!
//! A [`Container`] is an [`ArrayStore`] while it holds at most
//! [`ARRAY_LIMIT`] values and a [`BitmapStore`] beyond that. A [`RunStore`]
//! is used when [`Container::optimize`] finds runs to be the most compact
//! encoding, and is kept as long as it stays so.

mod array_store;
mod bitmap_store;
mod fmt;
mod iter;
mod ops;
mod run_store;

#[cfg(test)]
mod arbitrary;
#[cfg(test)]
mod proptests;
#[cfg(feature = "serde")]
mod serde;
#[cfg(feature = "std")]
mod serialization;

use std::ops::RangeInclusive;

use tracing::trace;

pub use self::array_store::{ArrayStore, Error, ErrorKind};
pub use self::bitmap_store::{BitmapIter, BitmapStore, BITMAP_LENGTH};
pub use self::iter::Iter;
pub use self::run_store::RunStore;

/// The cardinality above which an array container becomes a bitmap.
pub const ARRAY_LIMIT: u64 = 4096;

/// Bytes taken by each value of a serialized array store.
pub const ARRAY_ELEMENT_BYTES: usize = 2;
/// Bytes taken by a serialized bitmap store.
pub const BITMAP_BYTES: usize = BITMAP_LENGTH * 8;

/// A set of `u16` values in one of three representations.
///
/// Two containers are equal only if they have the same kind and the same
/// values.
#[derive(Clone, PartialEq, Eq)]
pub enum Container {
    /// A sorted vector of values.
    Array(ArrayStore),
    /// A 65536-bit vector.
    Bitmap(BitmapStore),
    /// Sorted runs of consecutive values.
    Run(RunStore),
}

/// The representation of a [`Container`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// [`Container::Array`].
    Array,
    /// [`Container::Bitmap`].
    Bitmap,
    /// [`Container::Run`].
    Run,
}

impl Container {
    /// Creates an empty array container.
    pub fn new() -> Container {
        Container::Array(ArrayStore::new())
    }

    /// Creates a run container holding every value of the chunk.
    pub fn full() -> Container {
        Container::Run(RunStore::full())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Container::Array(_) => Kind::Array,
            Container::Bitmap(_) => Kind::Bitmap,
            Container::Run(_) => Kind::Run,
        }
    }

    /// The number of values in the container.
    pub fn len(&self) -> u64 {
        match self {
            Container::Array(array) => array.len(),
            Container::Bitmap(bitmap) => bitmap.len(),
            Container::Run(run) => run.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Container::Array(array) => array.is_empty(),
            Container::Bitmap(bitmap) => bitmap.is_empty(),
            Container::Run(run) => run.is_empty(),
        }
    }

    pub fn contains(&self, index: u16) -> bool {
        match self {
            Container::Array(array) => array.contains(index),
            Container::Bitmap(bitmap) => bitmap.contains(index),
            Container::Run(run) => run.contains(index),
        }
    }

    /// Adds a value without changing the representation, returns `true` if
    /// it was not already present.
    pub fn insert(&mut self, index: u16) -> bool {
        match self {
            Container::Array(array) => array.insert(index),
            Container::Bitmap(bitmap) => bitmap.insert(index),
            Container::Run(run) => run.insert(index),
        }
    }

    /// Removes a value without changing the representation, returns `true`
    /// if it was present.
    pub fn remove(&mut self, index: u16) -> bool {
        match self {
            Container::Array(array) => array.remove(index),
            Container::Bitmap(bitmap) => bitmap.remove(index),
            Container::Run(run) => run.remove(index),
        }
    }

    /// Adds a value, then switches to the representation suited to the new
    /// cardinality.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roaring_runs::{Container, Kind, ARRAY_LIMIT};
    ///
    /// let mut container: Container = (0..ARRAY_LIMIT as u16).collect();
    /// assert_eq!(container.kind(), Kind::Array);
    ///
    /// container = container.insert_minimized(ARRAY_LIMIT as u16);
    /// assert_eq!(container.kind(), Kind::Bitmap);
    ///
    /// container = container.remove_minimized(ARRAY_LIMIT as u16);
    /// assert_eq!(container.kind(), Kind::Array);
    /// ```
    pub fn insert_minimized(mut self, index: u16) -> Container {
        if self.insert(index) {
            self.ensure_correct_store()
        } else {
            self
        }
    }

    /// Removes a value, then switches to the representation suited to the
    /// new cardinality.
    pub fn remove_minimized(mut self, index: u16) -> Container {
        if self.remove(index) {
            self.ensure_correct_store()
        } else {
            self
        }
    }

    /// Adds every value of `range`.
    pub fn iadd_range(self, range: RangeInclusive<u16>) -> Container {
        if range.is_empty() {
            return self;
        }
        let range_len = u64::from(*range.end() - *range.start()) + 1;

        match self {
            Container::Array(array) if array.len() + range_len > ARRAY_LIMIT => {
                converted(Kind::Array, Kind::Bitmap, array.len());
                let mut bitmap = array.to_bitmap_store();
                bitmap.insert_range(range);
                Container::Bitmap(bitmap)
            }
            Container::Array(mut array) => {
                array.insert_range(range);
                Container::Array(array)
            }
            Container::Bitmap(mut bitmap) => {
                bitmap.insert_range(range);
                Container::Bitmap(bitmap)
            }
            Container::Run(mut run) => {
                run.insert_range(range);
                Container::Run(run)
            }
        }
        .ensure_correct_store()
    }

    /// Removes every value of `range`.
    pub fn iremove_range(mut self, range: RangeInclusive<u16>) -> Container {
        if range.is_empty() {
            return self;
        }
        let removed = match &mut self {
            Container::Array(array) => array.remove_range(range),
            Container::Bitmap(bitmap) => bitmap.remove_range(range),
            Container::Run(run) => run.remove_range(range),
        };
        if removed == 0 {
            self
        } else {
            self.ensure_correct_store()
        }
    }

    /// This container with the membership of every value of `range` flipped.
    pub fn not(&self, range: RangeInclusive<u16>) -> Container {
        self.clone().inot(range)
    }

    /// Flips the membership of every value of `range`.
    pub fn inot(self, range: RangeInclusive<u16>) -> Container {
        if range.is_empty() {
            return self;
        }
        let range_len = u64::from(*range.end() - *range.start()) + 1;

        match self {
            Container::Array(array) if array.len() + range_len <= ARRAY_LIMIT => {
                let flipped: ArrayStore = range.collect();
                Container::Array(&array ^ &flipped)
            }
            Container::Array(array) => {
                let mut bitmap = array.to_bitmap_store();
                bitmap.flip_range(range);
                Container::Bitmap(bitmap)
            }
            Container::Bitmap(mut bitmap) => {
                bitmap.flip_range(range);
                Container::Bitmap(bitmap)
            }
            Container::Run(run) => Container::Run(run.not(range)),
        }
        .ensure_correct_store()
    }

    /// The number of values lower than or equal to `index`.
    pub fn rank(&self, index: u16) -> u64 {
        match self {
            Container::Array(array) => array.rank(index),
            Container::Bitmap(bitmap) => bitmap.rank(index),
            Container::Run(run) => run.rank(index),
        }
    }

    /// The `n`th smallest value, starting at zero.
    pub fn select(&self, n: u16) -> Option<u16> {
        match self {
            Container::Array(array) => array.select(n),
            Container::Bitmap(bitmap) => bitmap.select(n),
            Container::Run(run) => run.select(n),
        }
    }

    pub fn min(&self) -> Option<u16> {
        match self {
            Container::Array(array) => array.min(),
            Container::Bitmap(bitmap) => bitmap.min(),
            Container::Run(run) => run.min(),
        }
    }

    pub fn max(&self) -> Option<u16> {
        match self {
            Container::Array(array) => array.max(),
            Container::Bitmap(bitmap) => bitmap.max(),
            Container::Run(run) => run.max(),
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        match self {
            Container::Array(array) => Iter::Array(array.iter()),
            Container::Bitmap(bitmap) => Iter::Bitmap(bitmap.iter()),
            Container::Run(run) => Iter::Run(run.iter()),
        }
    }

    /// The number of runs of consecutive values.
    pub fn count_runs(&self) -> u64 {
        match self {
            Container::Array(array) => array.count_runs(),
            Container::Bitmap(bitmap) => bitmap.count_runs(),
            Container::Run(run) => run.run_amount(),
        }
    }

    /// The number of bytes the values take in the standard Roaring format.
    pub fn byte_size(&self) -> usize {
        match self {
            Container::Array(array) => array.byte_size(),
            Container::Bitmap(_) => BITMAP_BYTES,
            Container::Run(run) => run.byte_size(),
        }
    }

    /// The same values in the representation `kind`.
    pub fn convert(self, kind: Kind) -> Container {
        if self.kind() == kind {
            return self;
        }
        converted(self.kind(), kind, self.len());

        match (self, kind) {
            (Container::Array(array), Kind::Bitmap) => Container::Bitmap(array.to_bitmap_store()),
            (Container::Array(array), Kind::Run) => Container::Run(RunStore::from_array(&array)),
            (Container::Bitmap(bitmap), Kind::Array) => Container::Array(bitmap.to_array_store()),
            (Container::Bitmap(bitmap), Kind::Run) => Container::Run(RunStore::from_bitmap(&bitmap)),
            (Container::Run(run), Kind::Array) => Container::Array(run.to_array_store()),
            (Container::Run(run), Kind::Bitmap) => Container::Bitmap(run.to_bitmap_store()),
            (container, _) => container,
        }
    }

    /// Switches to whichever representation serializes into the fewest
    /// bytes, runs included.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roaring_runs::{Container, Kind};
    ///
    /// let container: Container = (100..3000).collect();
    /// assert_eq!(container.kind(), Kind::Array);
    /// assert_eq!(container.optimize().kind(), Kind::Run);
    /// ```
    pub fn optimize(self) -> Container {
        let size_as_run = RunStore::serialized_byte_size(self.count_runs());
        let min_size_non_run = plain_size(self.len());
        if size_as_run < min_size_non_run {
            return self.convert(Kind::Run);
        }
        self.remove_run_compression().ensure_correct_store()
    }

    /// Replaces runs by an array or a bitmap, whichever the cardinality
    /// threshold selects. Other kinds are returned as they are.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roaring_runs::{Container, Kind};
    ///
    /// let container = Container::full().remove_run_compression();
    /// assert_eq!(container.kind(), Kind::Bitmap);
    /// assert_eq!(container.len(), 65536);
    /// ```
    pub fn remove_run_compression(self) -> Container {
        match self {
            Container::Run(run) => {
                let container = Container::Run(run);
                if container.len() <= ARRAY_LIMIT {
                    container.convert(Kind::Array)
                } else {
                    container.convert(Kind::Bitmap)
                }
            }
            container => container,
        }
    }

    /// Applies the cardinality threshold between arrays and bitmaps, and
    /// abandons runs that take more room than both.
    pub(crate) fn ensure_correct_store(self) -> Container {
        match self {
            Container::Array(array) if array.len() > ARRAY_LIMIT => {
                converted(Kind::Array, Kind::Bitmap, array.len());
                Container::Bitmap(array.to_bitmap_store())
            }
            Container::Bitmap(bitmap) if bitmap.len() <= ARRAY_LIMIT => {
                converted(Kind::Bitmap, Kind::Array, bitmap.len());
                Container::Array(bitmap.to_array_store())
            }
            Container::Run(run) if run.byte_size() > plain_size(run.len()) => {
                Container::Run(run).remove_run_compression()
            }
            container => container,
        }
    }
}

/// The serialized size of `len` values as an array or a bitmap, whichever
/// the cardinality threshold selects.
fn plain_size(len: u64) -> usize {
    if len <= ARRAY_LIMIT {
        ArrayStore::serialized_byte_size(len)
    } else {
        BITMAP_BYTES
    }
}

fn converted(from: Kind, to: Kind, len: u64) {
    trace!(?from, ?to, len, "container changed representation");
}

impl Default for Container {
    fn default() -> Self {
        Container::new()
    }
}

impl FromIterator<u16> for Container {
    fn from_iter<I: IntoIterator<Item = u16>>(iterator: I) -> Container {
        Container::Array(iterator.into_iter().collect()).ensure_correct_store()
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = u16;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
