//! Every operation, on every pair of representations, agrees with a
//! `BTreeSet<u16>` holding the same values.

use std::collections::BTreeSet;

use proptest::prelude::*;

use super::{plain_size, Container, Kind, ARRAY_LIMIT};

fn model(container: &Container) -> BTreeSet<u16> {
    container.iter().collect()
}

fn well_formed(container: &Container) -> bool {
    match container {
        Container::Array(array) => array.len() <= ARRAY_LIMIT,
        Container::Bitmap(bitmap) => bitmap.has_cached_len() && bitmap.len() > ARRAY_LIMIT,
        Container::Run(run) => run.byte_size() <= plain_size(run.len()),
    }
}

fn range() -> impl Strategy<Value = (u16, u16)> {
    (any::<u16>(), any::<u16>()).prop_map(|(a, b)| (a.min(b), a.max(b)))
}

proptest! {
    #[test]
    fn iteration_matches_len(a in Container::arbitrary()) {
        let values = model(&a);
        prop_assert_eq!(a.len(), values.len() as u64);
        prop_assert_eq!(a.iter().count(), values.len());
        prop_assert_eq!(a.is_empty(), values.is_empty());
        prop_assert_eq!(a.min(), values.iter().next().copied());
        prop_assert_eq!(a.max(), values.iter().next_back().copied());
        prop_assert!(a.iter().zip(a.iter().skip(1)).all(|(x, y)| x < y));
    }

    #[test]
    fn intersections(a in Container::arbitrary(), b in Container::arbitrary()) {
        let expected: BTreeSet<u16> = model(&a).intersection(&model(&b)).copied().collect();

        let and = a.and(&b);
        prop_assert_eq!(model(&and), expected.clone());
        prop_assert!(well_formed(&and));

        let iand = a.clone().iand(&b);
        prop_assert_eq!(model(&iand), expected.clone());
        prop_assert!(well_formed(&iand));

        prop_assert_eq!(a.intersects(&b), !expected.is_empty());
        prop_assert_eq!(b.intersects(&a), !expected.is_empty());
    }

    #[test]
    fn unions(a in Container::arbitrary(), b in Container::arbitrary()) {
        let expected: BTreeSet<u16> = model(&a).union(&model(&b)).copied().collect();

        let or = a.or(&b);
        prop_assert_eq!(model(&or), expected.clone());
        prop_assert!(well_formed(&or));

        let ior = a.clone().ior(&b);
        prop_assert_eq!(model(&ior), expected.clone());
        prop_assert!(well_formed(&ior));

        let lazy = a.lazy_or(&b).repair_after_lazy();
        prop_assert_eq!(model(&lazy), expected.clone());
        prop_assert!(well_formed(&lazy));

        let lazy = a.clone().lazy_ior(&b).lazy_ior(&a).repair_after_lazy();
        prop_assert_eq!(model(&lazy), expected);
        prop_assert!(well_formed(&lazy));
    }

    #[test]
    fn symmetric_differences(a in Container::arbitrary(), b in Container::arbitrary()) {
        let expected: BTreeSet<u16> =
            model(&a).symmetric_difference(&model(&b)).copied().collect();

        let xor = a.xor(&b);
        prop_assert_eq!(model(&xor), expected.clone());
        prop_assert!(well_formed(&xor));

        let ixor = a.clone().ixor(&b);
        prop_assert_eq!(model(&ixor), expected);
        prop_assert!(well_formed(&ixor));
    }

    #[test]
    fn differences(a in Container::arbitrary(), b in Container::arbitrary()) {
        let expected: BTreeSet<u16> = model(&a).difference(&model(&b)).copied().collect();

        let and_not = a.and_not(&b);
        prop_assert_eq!(model(&and_not), expected.clone());
        prop_assert!(well_formed(&and_not));

        let iand_not = a.clone().iand_not(&b);
        prop_assert_eq!(model(&iand_not), expected);
        prop_assert!(well_formed(&iand_not));
    }

    #[test]
    fn conversions_keep_values(a in Container::arbitrary()) {
        let values = model(&a);
        for kind in [Kind::Array, Kind::Bitmap, Kind::Run] {
            let converted = a.clone().convert(kind);
            prop_assert_eq!(converted.kind(), kind);
            prop_assert_eq!(converted.len(), a.len());
            prop_assert_eq!(model(&converted), values.clone());
        }

        let optimized = a.clone().optimize();
        prop_assert_eq!(model(&optimized), values);
        prop_assert!(optimized.byte_size() <= plain_size(a.len()));
    }

    #[test]
    fn minimized_mutations(a in Container::arbitrary(), value in any::<u16>()) {
        let mut values = model(&a);

        let inserted = a.clone().insert_minimized(value);
        values.insert(value);
        prop_assert_eq!(model(&inserted), values.clone());

        let removed = inserted.remove_minimized(value);
        values.remove(&value);
        prop_assert_eq!(model(&removed), values);
    }

    #[test]
    fn ranges(a in Container::arbitrary(), (start, end) in range()) {
        let values = model(&a);
        let flipped: BTreeSet<u16> = (start..=end).collect();

        let added = a.clone().iadd_range(start..=end);
        prop_assert_eq!(model(&added), values.union(&flipped).copied().collect::<BTreeSet<_>>());
        prop_assert!(well_formed(&added));

        let removed = a.clone().iremove_range(start..=end);
        prop_assert_eq!(
            model(&removed),
            values.difference(&flipped).copied().collect::<BTreeSet<_>>()
        );

        let not = a.not(start..=end);
        prop_assert_eq!(
            model(&not),
            values.symmetric_difference(&flipped).copied().collect::<BTreeSet<_>>()
        );
        prop_assert!(well_formed(&not));
        prop_assert_eq!(model(&not.inot(start..=end)), values);
    }

    #[test]
    fn rank_and_select(a in Container::arbitrary(), value in any::<u16>()) {
        let values: Vec<u16> = a.iter().collect();
        let rank = values.partition_point(|&v| v <= value) as u64;
        prop_assert_eq!(a.rank(value), rank);

        let n = (value as usize).min(values.len().saturating_sub(1)) as u16;
        prop_assert_eq!(a.select(n), values.get(n as usize).copied());
        if let Some(selected) = a.select(n) {
            prop_assert_eq!(a.rank(selected), u64::from(n) + 1);
        }
    }
}
