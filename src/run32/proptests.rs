//! Set algebra on `RunContainer32` agrees with a `BTreeSet<u32>` holding the
//! same values, from small dense sets up to values next to `UPPER_LIMIT`.

use std::collections::BTreeSet;
use std::ops::Range;

use proptest::collection::{btree_set, vec};
use proptest::prelude::*;

use super::{RunContainer32, UPPER_LIMIT};
use crate::runs;
use crate::search::SearchOptions;

fn sets() -> impl Strategy<Value = BTreeSet<u32>> {
    prop_oneof![
        btree_set(0..200u32, 0..64),
        btree_set(0..=UPPER_LIMIT, 0..64),
        btree_set(UPPER_LIMIT - 200..=UPPER_LIMIT, 0..64),
        vec((0..=UPPER_LIMIT, 0..40u32), 0..12).prop_map(|runs| {
            runs.into_iter()
                .flat_map(|(start, len)| start..=start.saturating_add(len).min(UPPER_LIMIT))
                .collect::<BTreeSet<u32>>()
        }),
    ]
}

fn ranges() -> impl Strategy<Value = Range<u32>> {
    prop_oneof![
        (0..300u32, 0..300u32),
        (any::<u32>(), any::<u32>()),
        (UPPER_LIMIT - 300..=u32::MAX, UPPER_LIMIT - 300..=u32::MAX),
    ]
    .prop_map(|(a, b)| a.min(b)..a.max(b))
}

fn keys() -> impl Strategy<Value = u32> {
    prop_oneof![0..256u32, 0..=UPPER_LIMIT, UPPER_LIMIT - 256..=UPPER_LIMIT]
}

fn container(values: &BTreeSet<u32>) -> RunContainer32 {
    values.iter().copied().collect()
}

fn model(container: &RunContainer32) -> BTreeSet<u32> {
    container.iter().collect()
}

fn canonical(container: &RunContainer32) -> bool {
    runs::is_canonical(container.intervals())
        && container.len() == container.iter().count() as u64
        && container.len() == runs::cardinality(container.intervals())
}

proptest! {
    #[test]
    fn unions(a in sets(), b in sets()) {
        let expected: BTreeSet<u32> = a.union(&b).copied().collect();
        let (a, b) = (container(&a), container(&b));

        let union = a.union(&b);
        prop_assert_eq!(model(&union), expected.clone());
        prop_assert!(canonical(&union));
        prop_assert_eq!(&a | &b, union.clone());

        let mut assigned = a.clone();
        assigned |= &b;
        prop_assert_eq!(assigned, union);
    }

    #[test]
    fn intersections(a in sets(), b in sets()) {
        let expected: BTreeSet<u32> = a.intersection(&b).copied().collect();
        let (a, b) = (container(&a), container(&b));

        let intersection = a.intersect(&b);
        prop_assert_eq!(model(&intersection), expected.clone());
        prop_assert!(canonical(&intersection));
        prop_assert_eq!(&a & &b, intersection);

        prop_assert_eq!(a.intersects(&b), !expected.is_empty());
        prop_assert_eq!(b.intersects(&a), !expected.is_empty());
    }

    #[test]
    fn differences(a in sets(), b in sets()) {
        let expected: BTreeSet<u32> = a.difference(&b).copied().collect();
        let (a, b) = (container(&a), container(&b));

        let difference = &a - &b;
        prop_assert_eq!(model(&difference), expected);
        prop_assert!(canonical(&difference));

        let mut assigned = a.clone();
        assigned -= &b;
        prop_assert_eq!(assigned, difference);
    }

    #[test]
    fn not_range(values in sets(), range in ranges()) {
        let original = container(&values);
        let flipped = original.not(range.clone());
        prop_assert!(canonical(&flipped));

        let inside = values.range(range.clone()).count() as u64;
        let range_len = u64::from(range.end - range.start);
        prop_assert_eq!(flipped.len(), values.len() as u64 - inside + range_len - inside);

        let mut checked: Vec<u32> = values.iter().copied().collect();
        checked.extend([range.start, range.end]);
        checked.extend([range.start.wrapping_sub(1), range.end.wrapping_sub(1)]);
        for value in checked.into_iter().filter(|&value| value <= UPPER_LIMIT) {
            let expected = values.contains(&value) != range.contains(&value);
            prop_assert_eq!(flipped.contains(value), expected, "value {}", value);
        }

        prop_assert_eq!(flipped.not(range), original);
    }

    #[test]
    fn bounded_search(values in sets(), key in keys(), start in 0usize..32) {
        let container = container(&values);

        let unbounded = container.search(key, None);
        prop_assert_eq!(unbounded.is_present(), values.contains(&key));

        let start = start.min(unbounded.index().unwrap_or(0));
        let bounded = container.search(key, Some(&SearchOptions::starting_at(start)));
        prop_assert_eq!(bounded.position, unbounded.position);
    }

    #[test]
    fn bounded_search_finds_members(values in sets(), start in 0usize..32) {
        let container = container(&values);
        for &key in values.iter().take(16) {
            let unbounded = container.search(key, None);
            prop_assert!(unbounded.is_present());

            let index = unbounded.index().unwrap_or(0);
            let start = start.min(index);
            let bounded = container.search(key, Some(&SearchOptions::starting_at(start)));
            prop_assert_eq!(bounded.position, unbounded.position);
            prop_assert_eq!(bounded.index(), Some(index));
        }
    }
}
