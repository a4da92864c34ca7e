use std::collections::BTreeSet;

use roaring_runs::{Interval32, Position, RunContainer32, SearchOptions, UPPER_LIMIT};

fn container(intervals: &[(u32, u32)]) -> RunContainer32 {
    let intervals: Vec<_> = intervals.iter().map(|&(start, end)| Interval32::new(start, end)).collect();
    RunContainer32::from_interval_vec(intervals)
}

#[test]
fn union() {
    let a = container(&[(0, 1), (2, 3), (4, 5)]);
    let b = container(&[(6, 8), (10, 12), (4294967293, 4294967294)]);

    let union = a.union(&b);
    assert_eq!(union.len(), 8);
    assert_eq!(union.to_vec(), [0, 2, 4, 6, 7, 10, 11, 4294967293]);
    assert_eq!(union, b.union(&a));
    assert_eq!(union, &a | &b);
}

#[test]
fn union_fuses_touching_runs() {
    let a = container(&[(0, 10), (20, 30)]);
    let b = container(&[(10, 20), (40, 41)]);
    assert_eq!(a.union(&b), container(&[(0, 30), (40, 41)]));
}

#[test]
fn intersect() {
    let a = container(&[(2, 5), (8, 10), (14, 17), (20, 23)]);
    let b = container(&[(3, 19), (22, 24)]);

    let intersection = a.intersect(&b);
    assert_eq!(intersection.len(), 8);
    assert_eq!(intersection.to_vec(), [3, 4, 8, 9, 14, 15, 16, 22]);
    assert_eq!(intersection, b.intersect(&a));
    assert_eq!(intersection, &a & &b);
    assert!(a.intersects(&b));
    assert!(!a.intersects(&container(&[(5, 8), (10, 14)])));
}

#[test]
fn search_after_removing_the_last_value() {
    let mut container: RunContainer32 = (0..11).map(|i| i * 10).collect();
    container.insert(UPPER_LIMIT);
    assert_eq!(container.run_amount(), 12);
    assert!(container.remove(UPPER_LIMIT));
    assert_eq!(container.run_amount(), 11);

    let result = container.search(UPPER_LIMIT, None);
    assert!(!result.is_present());
    assert_eq!(result.position, Position::After(10));
    assert_eq!(result.comparisons, 3);

    let result = container.search(UPPER_LIMIT, Some(&SearchOptions::starting_at(5)));
    assert_eq!(result.position, Position::After(10));
    assert_eq!(result.comparisons, 2);
}

#[test]
fn add_remove_inverse() {
    let original: RunContainer32 = [1, 2, 3, 5, 7, 8, 9].into_iter().collect();
    for value in [0, 4, 6, 10, 1000] {
        let mut container = original.clone();
        assert!(container.insert(value));
        assert!(container.remove(value));
        assert_eq!(container, original);
    }
}

#[test]
fn invert_involution() {
    let container = container(&[(0, 5), (100, 200), (UPPER_LIMIT, UPPER_LIMIT + 1)]);
    let inverted = container.invert();
    assert_eq!(inverted, self::container(&[(5, 100), (200, UPPER_LIMIT)]));
    assert_eq!(inverted.invert(), container);
    assert_eq!(container.len() + inverted.len(), u64::from(UPPER_LIMIT) + 1);
}

#[test]
fn agrees_with_sets() {
    let sparse: BTreeSet<u32> = (0..2000).map(|i| i * 37 % 5000).collect();
    let dense: BTreeSet<u32> = (0..4000).filter(|i| i % 7 != 0).collect();

    let a: RunContainer32 = sparse.iter().copied().collect();
    let b: RunContainer32 = dense.iter().copied().collect();

    assert!(a.union(&b).iter().eq(sparse.union(&dense).copied()));
    assert!(a.intersect(&b).iter().eq(sparse.intersection(&dense).copied()));
    assert!((&a - &b).iter().eq(sparse.difference(&dense).copied()));
    assert_eq!(a.union(&b).len(), sparse.union(&dense).count() as u64);
}

#[test]
fn ranges() {
    let mut container = RunContainer32::new();
    assert_eq!(container.insert_range(10..20), 10);
    assert_eq!(container.insert_range(15..30), 10);
    assert_eq!(container.remove_range(12..14), 2);
    assert_eq!(container.intervals(), &[Interval32::new(10, 12), Interval32::new(14, 30)]);
    assert!(container.not(0..40).iter().eq((0..10).chain(12..14).chain(30..40)));
}

#[test]
fn from_sorted_iter() {
    let container = RunContainer32::from_sorted_iter([1, 2, 3, 10]).unwrap();
    assert_eq!(container.run_amount(), 2);

    let error = RunContainer32::from_sorted_iter([1, 5, 3]).unwrap_err();
    assert_eq!(error.valid_until(), 2);
}
