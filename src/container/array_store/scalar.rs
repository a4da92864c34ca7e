//! Merge-based set operations on the sorted slices backing [ArrayStore]s.
//!
//! [ArrayStore]: super::ArrayStore

use std::cmp::Ordering::*;

/// Which values of a merge end up in the output.
#[derive(Clone, Copy)]
struct Keep {
    left_only: bool,
    right_only: bool,
    both: bool,
}

#[inline]
pub fn or(lhs: &[u16], rhs: &[u16]) -> Vec<u16> {
    merge(lhs, rhs, Keep { left_only: true, right_only: true, both: true })
}

#[inline]
pub fn and(lhs: &[u16], rhs: &[u16]) -> Vec<u16> {
    merge(lhs, rhs, Keep { left_only: false, right_only: false, both: true })
}

#[inline]
pub fn sub(lhs: &[u16], rhs: &[u16]) -> Vec<u16> {
    merge(lhs, rhs, Keep { left_only: true, right_only: false, both: false })
}

#[inline]
pub fn xor(lhs: &[u16], rhs: &[u16]) -> Vec<u16> {
    merge(lhs, rhs, Keep { left_only: true, right_only: true, both: false })
}

fn merge(lhs: &[u16], rhs: &[u16], keep: Keep) -> Vec<u16> {
    let capacity = match (keep.left_only, keep.right_only) {
        (true, true) => lhs.len() + rhs.len(),
        (true, false) => lhs.len(),
        (false, true) => rhs.len(),
        (false, false) => lhs.len().min(rhs.len()),
    };
    let mut vec = Vec::with_capacity(capacity.min(4096));

    let (mut i, mut j) = (0, 0);
    while i < lhs.len() && j < rhs.len() {
        let (a, b) = (lhs[i], rhs[j]);
        match a.cmp(&b) {
            Less => {
                if keep.left_only {
                    vec.push(a);
                }
                i += 1;
            }
            Greater => {
                if keep.right_only {
                    vec.push(b);
                }
                j += 1;
            }
            Equal => {
                if keep.both {
                    vec.push(a);
                }
                i += 1;
                j += 1;
            }
        }
    }

    // one side is exhausted, the rest of the other has no counterpart
    if keep.left_only {
        vec.extend_from_slice(&lhs[i..]);
    }
    if keep.right_only {
        vec.extend_from_slice(&rhs[j..]);
    }
    vec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges() {
        let lhs = [1, 2, 5, 9];
        let rhs = [2, 3, 9, 12];
        assert_eq!(or(&lhs, &rhs), vec![1, 2, 3, 5, 9, 12]);
        assert_eq!(and(&lhs, &rhs), vec![2, 9]);
        assert_eq!(sub(&lhs, &rhs), vec![1, 5]);
        assert_eq!(sub(&rhs, &lhs), vec![3, 12]);
        assert_eq!(xor(&lhs, &rhs), vec![1, 3, 5, 12]);
        assert_eq!(and(&lhs, &[]), Vec::<u16>::new());
    }
}
