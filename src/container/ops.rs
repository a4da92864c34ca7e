use std::mem;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign};

use super::Container::{Array, Bitmap, Run};
use super::{ArrayStore, BitmapStore, Container, RunStore, ARRAY_LIMIT};

impl Container {
    /// The values present in both containers.
    pub fn and(&self, rhs: &Container) -> Container {
        match (self, rhs) {
            (Array(lhs), Array(rhs)) => Array(lhs & rhs),
            (Array(array), Bitmap(bitmap)) | (Bitmap(bitmap), Array(array)) => {
                let mut array = array.clone();
                array &= bitmap;
                Array(array)
            }
            (Bitmap(lhs), Bitmap(rhs)) => {
                let mut lhs = lhs.clone();
                lhs &= rhs;
                Bitmap(lhs)
            }
            (Run(lhs), Run(rhs)) => Run(lhs.intersect(rhs)),
            (Run(run), Array(array)) | (Array(array), Run(run)) => {
                let mut array = array.clone();
                array.retain(|&value| run.contains(value));
                Array(array)
            }
            (Run(run), Bitmap(bitmap)) | (Bitmap(bitmap), Run(run)) => run_and_bitmap(run, bitmap),
        }
        .ensure_correct_store()
    }

    /// The values present in either container.
    pub fn or(&self, rhs: &Container) -> Container {
        match (self, rhs) {
            (Array(lhs), Array(rhs)) => Array(lhs | rhs),
            (Array(array), Bitmap(bitmap)) | (Bitmap(bitmap), Array(array)) => {
                let mut bitmap = bitmap.clone();
                bitmap |= array;
                Bitmap(bitmap)
            }
            (Bitmap(lhs), Bitmap(rhs)) => {
                let mut lhs = lhs.clone();
                lhs |= rhs;
                Bitmap(lhs)
            }
            (Run(lhs), Run(rhs)) => Run(lhs.union(rhs)),
            (Run(run), Array(array)) | (Array(array), Run(run)) => {
                Run(run.union(&RunStore::from_array(array)))
            }
            (Run(run), Bitmap(bitmap)) | (Bitmap(bitmap), Run(run)) => {
                let mut bitmap = bitmap.clone();
                insert_runs(&mut bitmap, run);
                Bitmap(bitmap)
            }
        }
        .ensure_correct_store()
    }

    /// The values present in exactly one of the containers.
    pub fn xor(&self, rhs: &Container) -> Container {
        match (self, rhs) {
            (Array(lhs), Array(rhs)) => Array(lhs ^ rhs),
            (Array(array), Bitmap(bitmap)) | (Bitmap(bitmap), Array(array)) => {
                let mut bitmap = bitmap.clone();
                bitmap ^= array;
                Bitmap(bitmap)
            }
            (Bitmap(lhs), Bitmap(rhs)) => {
                let mut lhs = lhs.clone();
                lhs ^= rhs;
                Bitmap(lhs)
            }
            (Run(run), other) | (other, Run(run)) => {
                let mut bitmap = run.to_bitmap_store();
                match other {
                    Array(array) => bitmap ^= array,
                    Bitmap(other) => bitmap ^= other,
                    Run(other) => bitmap ^= &other.to_bitmap_store(),
                }
                Bitmap(bitmap)
            }
        }
        .ensure_correct_store()
    }

    /// The values of `self` that are absent from `rhs`.
    pub fn and_not(&self, rhs: &Container) -> Container {
        match (self, rhs) {
            (Array(lhs), Array(rhs)) => Array(lhs - rhs),
            (Array(lhs), Bitmap(rhs)) => {
                let mut lhs = lhs.clone();
                lhs -= rhs;
                Array(lhs)
            }
            (Array(lhs), Run(rhs)) => {
                let mut lhs = lhs.clone();
                lhs.retain(|&value| !rhs.contains(value));
                Array(lhs)
            }
            (Bitmap(lhs), Array(rhs)) => {
                let mut lhs = lhs.clone();
                lhs -= rhs;
                Bitmap(lhs)
            }
            (Bitmap(lhs), Bitmap(rhs)) => {
                let mut lhs = lhs.clone();
                lhs -= rhs;
                Bitmap(lhs)
            }
            (Bitmap(lhs), Run(rhs)) => {
                let mut lhs = lhs.clone();
                remove_runs(&mut lhs, rhs);
                Bitmap(lhs)
            }
            (Run(lhs), Array(rhs)) => {
                let mut lhs = lhs.clone();
                for &value in rhs.iter() {
                    lhs.remove(value);
                }
                Run(lhs)
            }
            (Run(lhs), Bitmap(rhs)) => {
                let mut lhs = lhs.to_bitmap_store();
                lhs -= rhs;
                Bitmap(lhs)
            }
            (Run(lhs), Run(rhs)) => {
                let mut lhs = lhs.to_bitmap_store();
                lhs -= &rhs.to_bitmap_store();
                Bitmap(lhs)
            }
        }
        .ensure_correct_store()
    }

    /// Intersects in place, reusing the storage of `self` when the kinds
    /// allow it.
    pub fn iand(self, rhs: &Container) -> Container {
        match (self, rhs) {
            (Array(mut lhs), Array(rhs)) => {
                lhs &= rhs;
                Array(lhs)
            }
            (Array(mut lhs), Bitmap(rhs)) => {
                lhs &= rhs;
                Array(lhs)
            }
            (Array(mut lhs), Run(rhs)) => {
                lhs.retain(|&value| rhs.contains(value));
                Array(lhs)
            }
            (Bitmap(mut lhs), Bitmap(rhs)) => {
                lhs &= rhs;
                Bitmap(lhs)
            }
            (Bitmap(mut lhs), Run(rhs)) if rhs.len() > ARRAY_LIMIT => {
                remove_runs(&mut lhs, &rhs.invert());
                Bitmap(lhs)
            }
            (lhs, rhs) => return lhs.and(rhs),
        }
        .ensure_correct_store()
    }

    /// Unites in place, reusing the storage of `self` when the kinds allow
    /// it.
    pub fn ior(self, rhs: &Container) -> Container {
        match (self, rhs) {
            (Bitmap(mut lhs), Array(rhs)) => {
                lhs |= rhs;
                Bitmap(lhs)
            }
            (Bitmap(mut lhs), Bitmap(rhs)) => {
                lhs |= rhs;
                Bitmap(lhs)
            }
            (Bitmap(mut lhs), Run(rhs)) => {
                insert_runs(&mut lhs, rhs);
                Bitmap(lhs)
            }
            (Run(mut lhs), Array(rhs)) if rhs.len() < lhs.len() => {
                for &value in rhs.iter() {
                    lhs.insert(value);
                }
                Run(lhs)
            }
            (lhs, rhs) => return lhs.or(rhs),
        }
        .ensure_correct_store()
    }

    /// Computes the symmetric difference in place, reusing the storage of
    /// `self` when the kinds allow it.
    pub fn ixor(self, rhs: &Container) -> Container {
        match (self, rhs) {
            (Bitmap(mut lhs), Array(rhs)) => {
                lhs ^= rhs;
                Bitmap(lhs)
            }
            (Bitmap(mut lhs), Bitmap(rhs)) => {
                lhs ^= rhs;
                Bitmap(lhs)
            }
            (Bitmap(mut lhs), Run(rhs)) => {
                lhs ^= &rhs.to_bitmap_store();
                Bitmap(lhs)
            }
            (lhs, rhs) => return lhs.xor(rhs),
        }
        .ensure_correct_store()
    }

    /// Removes the values of `rhs` in place, reusing the storage of `self`
    /// when the kinds allow it.
    pub fn iand_not(self, rhs: &Container) -> Container {
        match (self, rhs) {
            (Array(mut lhs), Array(rhs)) => {
                lhs -= rhs;
                Array(lhs)
            }
            (Array(mut lhs), Bitmap(rhs)) => {
                lhs -= rhs;
                Array(lhs)
            }
            (Array(mut lhs), Run(rhs)) => {
                lhs.retain(|&value| !rhs.contains(value));
                Array(lhs)
            }
            (Bitmap(mut lhs), Array(rhs)) => {
                lhs -= rhs;
                Bitmap(lhs)
            }
            (Bitmap(mut lhs), Bitmap(rhs)) => {
                lhs -= rhs;
                Bitmap(lhs)
            }
            (Bitmap(mut lhs), Run(rhs)) => {
                remove_runs(&mut lhs, rhs);
                Bitmap(lhs)
            }
            (Run(mut lhs), Array(rhs)) => {
                for &value in rhs.iter() {
                    lhs.remove(value);
                }
                Run(lhs)
            }
            (lhs, rhs) => return lhs.and_not(rhs),
        }
        .ensure_correct_store()
    }

    /// Unites without maintaining the cardinality of bitmap results.
    ///
    /// The result may be a bitmap holding [`ARRAY_LIMIT`] values or fewer,
    /// and [`Container::len`] recounts its bits on every call. Chains of
    /// lazy unions are closed with [`Container::repair_after_lazy`].
    pub fn lazy_or(&self, rhs: &Container) -> Container {
        match (self, rhs) {
            (Array(lhs), Array(rhs)) if lhs.len() + rhs.len() > ARRAY_LIMIT => {
                let mut bitmap = lhs.to_bitmap_store();
                bitmap.lazy_or_assign_array(rhs);
                Bitmap(bitmap)
            }
            (Array(array), Bitmap(bitmap)) | (Bitmap(bitmap), Array(array)) => {
                let mut bitmap = bitmap.clone();
                bitmap.lazy_or_assign_array(array);
                Bitmap(bitmap)
            }
            (Bitmap(lhs), Bitmap(rhs)) => {
                let mut lhs = lhs.clone();
                lhs.lazy_or_assign(rhs);
                Bitmap(lhs)
            }
            (Run(run), Bitmap(bitmap)) | (Bitmap(bitmap), Run(run)) => {
                let mut bitmap = bitmap.clone();
                bitmap.lazy_or_assign(&run.to_bitmap_store());
                Bitmap(bitmap)
            }
            (Array(lhs), Array(rhs)) => Array(lhs | rhs),
            (Run(lhs), Run(rhs)) => Run(lhs.union(rhs)),
            (Run(run), Array(array)) | (Array(array), Run(run)) => {
                Run(run.union(&RunStore::from_array(array)))
            }
        }
    }

    /// The in-place form of [`Container::lazy_or`].
    pub fn lazy_ior(self, rhs: &Container) -> Container {
        match (self, rhs) {
            (Bitmap(mut lhs), Array(rhs)) => {
                lhs.lazy_or_assign_array(rhs);
                Bitmap(lhs)
            }
            (Bitmap(mut lhs), Bitmap(rhs)) => {
                lhs.lazy_or_assign(rhs);
                Bitmap(lhs)
            }
            (Bitmap(mut lhs), Run(rhs)) => {
                lhs.lazy_or_assign(&rhs.to_bitmap_store());
                Bitmap(lhs)
            }
            (lhs, rhs) => lhs.lazy_or(rhs),
        }
    }

    /// Recounts the cardinality left unknown by lazy unions and restores the
    /// representation invariants.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roaring_runs::{Container, Kind};
    ///
    /// let evens: Container = (0..3000).map(|value| value * 2).collect();
    /// let odds: Container = (0..3000).map(|value| value * 2 + 1).collect();
    ///
    /// let union = evens.lazy_or(&odds).repair_after_lazy();
    /// assert_eq!(union.len(), 6000);
    /// assert_eq!(union.kind(), Kind::Bitmap);
    /// ```
    pub fn repair_after_lazy(self) -> Container {
        match self {
            Bitmap(mut bitmap) => {
                bitmap.repair_len();
                Bitmap(bitmap).ensure_correct_store()
            }
            other => other.ensure_correct_store(),
        }
    }

    /// Whether the containers share at least one value.
    pub fn intersects(&self, rhs: &Container) -> bool {
        match (self, rhs) {
            (Array(lhs), Array(rhs)) => !lhs.is_disjoint(rhs),
            (Array(array), Bitmap(bitmap)) | (Bitmap(bitmap), Array(array)) => {
                array.iter().any(|&value| bitmap.contains(value))
            }
            (Bitmap(lhs), Bitmap(rhs)) => !lhs.is_disjoint(rhs),
            (Run(lhs), Run(rhs)) => lhs.intersects(rhs),
            (Run(run), Array(array)) | (Array(array), Run(run)) => {
                array.iter().any(|&value| run.contains(value))
            }
            (Run(run), Bitmap(bitmap)) | (Bitmap(bitmap), Run(run)) => run
                .intervals()
                .iter()
                .any(|interval| bitmap.intersects_range(interval.into_iter())),
        }
    }
}

/// Small runs are decompressed and looked up, large ones clear their gaps in a
/// copy of the bitmap.
fn run_and_bitmap(run: &RunStore, bitmap: &BitmapStore) -> Container {
    if run.len() <= ARRAY_LIMIT {
        let values = run.iter().filter(|&value| bitmap.contains(value)).collect();
        Array(ArrayStore::from_vec_unchecked(values))
    } else {
        let mut bitmap = bitmap.clone();
        remove_runs(&mut bitmap, &run.invert());
        Bitmap(bitmap)
    }
}

fn insert_runs(bitmap: &mut BitmapStore, run: &RunStore) {
    for interval in run.intervals() {
        bitmap.insert_range(interval.into_iter());
    }
}

fn remove_runs(bitmap: &mut BitmapStore, run: &RunStore) {
    for interval in run.intervals() {
        bitmap.remove_range(interval.into_iter());
    }
}

impl BitOr<&Container> for &Container {
    type Output = Container;

    fn bitor(self, rhs: &Container) -> Container {
        self.or(rhs)
    }
}

impl BitOrAssign<&Container> for Container {
    fn bitor_assign(&mut self, rhs: &Container) {
        *self = mem::take(self).ior(rhs);
    }
}

impl BitAnd<&Container> for &Container {
    type Output = Container;

    fn bitand(self, rhs: &Container) -> Container {
        self.and(rhs)
    }
}

impl BitAndAssign<&Container> for Container {
    fn bitand_assign(&mut self, rhs: &Container) {
        *self = mem::take(self).iand(rhs);
    }
}

impl Sub<&Container> for &Container {
    type Output = Container;

    fn sub(self, rhs: &Container) -> Container {
        self.and_not(rhs)
    }
}

impl SubAssign<&Container> for Container {
    fn sub_assign(&mut self, rhs: &Container) {
        *self = mem::take(self).iand_not(rhs);
    }
}

impl BitXor<&Container> for &Container {
    type Output = Container;

    fn bitxor(self, rhs: &Container) -> Container {
        self.xor(rhs)
    }
}

impl BitXorAssign<&Container> for Container {
    fn bitxor_assign(&mut self, rhs: &Container) {
        *self = mem::take(self).ixor(rhs);
    }
}
