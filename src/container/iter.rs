use std::iter::FusedIterator;
use std::slice;

use super::BitmapIter;
use crate::interval::Interval16;
use crate::iter::RunIter;

/// An iterator over the values of a [`Container`](super::Container), in
/// ascending order.
pub enum Iter<'a> {
    Array(slice::Iter<'a, u16>),
    Bitmap(BitmapIter<'a>),
    Run(RunIter<'a, Interval16>),
}

impl Iterator for Iter<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        match self {
            Iter::Array(inner) => inner.next().copied(),
            Iter::Bitmap(inner) => inner.next(),
            Iter::Run(inner) => inner.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Iter::Array(inner) => inner.size_hint(),
            Iter::Bitmap(inner) => inner.size_hint(),
            Iter::Run(inner) => inner.size_hint(),
        }
    }
}

impl FusedIterator for Iter<'_> {}
