//! Run-length encoded containers for [Roaring bitmaps][Roaring bitmap] and
//! the algebra that lets the three container kinds (sorted arrays, bit
//! vectors and runs of consecutive integers) interoperate.
//!
//! Two run containers are provided:
//!
//! - [`RunContainer32`], a standalone set of `u32` values stored as half-open
//!   intervals, usable without any other Roaring machinery.
//! - [`RunStore`], the 16-bit chunk-local flavour stored as closed intervals,
//!   one of the variants of [`Container`].
//!
//! [`Container`] dispatches every binary set operation over the nine
//! pairings of its kinds and converts between array and bitmap
//! representations when the cardinality crosses [`ARRAY_LIMIT`].
//!
//! ```rust
//! use roaring_runs::RunContainer32;
//!
//! let a: RunContainer32 = [0, 2, 4, 6, 10, 11].into_iter().collect();
//! let b: RunContainer32 = [4, 6, 7, 4294967293].into_iter().collect();
//!
//! let union = a.union(&b);
//! assert!(union.iter().eq([0, 2, 4, 6, 7, 10, 11, 4294967293]));
//! assert_eq!(a.intersect(&b).len(), 2);
//! ```
//!
//! [Roaring bitmap]: https://roaringbitmap.org

#![cfg_attr(test, allow(clippy::bool_assert_comparison))]
#![warn(unsafe_op_in_unsafe_fn)]
#![warn(variant_size_differences)]

use std::error::Error;
use std::fmt;

mod iter;
mod runs;

pub mod container;
pub mod interval;
pub mod run32;
pub mod search;

pub use crate::container::{
    ArrayStore, BitmapStore, Container, Kind, RunStore, ARRAY_LIMIT, BITMAP_LENGTH,
};
pub use crate::interval::{Interval, Interval16, Interval32};
pub use crate::iter::{RunCursor, RunIter};
pub use crate::run32::{Bitmap32, RunContainer32, UPPER_LIMIT};
pub use crate::search::{Position, SearchOptions, SearchResult};

/// An error type that is returned when an iterator isn't sorted.
#[derive(PartialEq, Eq, Debug)]
pub struct NonSortedIntegers {
    valid_until: u64,
}

impl NonSortedIntegers {
    /// The index of the first value that broke the ascending order.
    pub fn valid_until(&self) -> u64 {
        self.valid_until
    }
}

impl fmt::Display for NonSortedIntegers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "integers are ordered up to the {}th element", self.valid_until())
    }
}

impl Error for NonSortedIntegers {}
