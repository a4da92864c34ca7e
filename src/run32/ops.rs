use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign};

use super::RunContainer32;
use crate::runs;

impl BitOr<&RunContainer32> for &RunContainer32 {
    type Output = RunContainer32;

    fn bitor(self, rhs: &RunContainer32) -> RunContainer32 {
        self.union(rhs)
    }
}

impl BitOrAssign<&RunContainer32> for RunContainer32 {
    fn bitor_assign(&mut self, rhs: &RunContainer32) {
        *self = self.union(rhs);
    }
}

impl BitAnd<&RunContainer32> for &RunContainer32 {
    type Output = RunContainer32;

    fn bitand(self, rhs: &RunContainer32) -> RunContainer32 {
        self.intersect(rhs)
    }
}

impl BitAndAssign<&RunContainer32> for RunContainer32 {
    fn bitand_assign(&mut self, rhs: &RunContainer32) {
        *self = self.intersect(rhs);
    }
}

impl Sub<&RunContainer32> for &RunContainer32 {
    type Output = RunContainer32;

    fn sub(self, rhs: &RunContainer32) -> RunContainer32 {
        let mut out = self.clone();
        out -= rhs;
        out
    }
}

impl SubAssign<&RunContainer32> for RunContainer32 {
    fn sub_assign(&mut self, rhs: &RunContainer32) {
        for interval in rhs.intervals() {
            if self.is_empty() {
                break;
            }
            self.len -= runs::remove_range(
                &mut self.intervals,
                u64::from(interval.start()),
                u64::from(interval.end()),
            );
        }
    }
}
