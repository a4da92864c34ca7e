use proptest::bits::{BitSetLike, SampledBitSetStrategy};
use proptest::collection::{vec, SizeRange};
use proptest::prelude::*;

use super::{ArrayStore, BitmapStore, Container, RunStore, ARRAY_LIMIT};

const MAX: usize = u16::MAX as usize;

impl BitSetLike for BitmapStore {
    fn new_bitset(max: usize) -> Self {
        assert!(max <= MAX + 1);
        BitmapStore::new()
    }

    fn len(&self) -> usize {
        MAX + 1
    }

    fn test(&self, bit: usize) -> bool {
        assert!(bit <= MAX);
        self.contains(bit as u16)
    }

    fn set(&mut self, bit: usize) {
        assert!(bit <= MAX);
        self.insert(bit as u16);
    }

    fn clear(&mut self, bit: usize) {
        assert!(bit <= MAX);
        self.remove(bit as u16);
    }

    fn count(&self) -> usize {
        self.len() as usize
    }
}

impl BitSetLike for ArrayStore {
    fn new_bitset(max: usize) -> Self {
        assert!(max <= MAX + 1);
        ArrayStore::new()
    }

    fn len(&self) -> usize {
        MAX + 1
    }

    fn test(&self, bit: usize) -> bool {
        assert!(bit <= MAX);
        self.contains(bit as u16)
    }

    fn set(&mut self, bit: usize) {
        assert!(bit <= MAX);
        self.insert(bit as u16);
    }

    fn clear(&mut self, bit: usize) {
        assert!(bit <= MAX);
        self.remove(bit as u16);
    }

    fn count(&self) -> usize {
        self.len() as usize
    }
}

impl BitmapStore {
    pub fn sampled(
        size: impl Into<SizeRange>,
        bits: impl Into<SizeRange>,
    ) -> SampledBitSetStrategy<BitmapStore> {
        SampledBitSetStrategy::new(size.into(), bits.into())
    }
}

impl ArrayStore {
    pub fn sampled(
        size: impl Into<SizeRange>,
        bits: impl Into<SizeRange>,
    ) -> SampledBitSetStrategy<ArrayStore> {
        SampledBitSetStrategy::new(size.into(), bits.into())
    }
}

impl RunStore {
    /// Up to 64 runs of up to 2048 values each, placed anywhere in the chunk.
    pub fn arbitrary() -> impl Strategy<Value = RunStore> {
        vec((any::<u16>(), 0..2048u16), 0..64).prop_map(|runs| {
            let mut store = RunStore::new();
            for (start, len_minus_one) in runs {
                store.insert_range(start..=start.saturating_add(len_minus_one));
            }
            store
        })
    }
}

impl Container {
    pub fn arbitrary() -> impl Strategy<Value = Container> {
        prop_oneof![
            ArrayStore::sampled(..=ARRAY_LIMIT as usize, ..=MAX).prop_map(Container::Array),
            BitmapStore::sampled(ARRAY_LIMIT as usize + 1..MAX, ..=MAX)
                .prop_map(Container::Bitmap),
            RunStore::arbitrary().prop_map(Container::Run),
            // dense runs, to exercise the bitmap paths of run operations
            vec((any::<u16>(), 0..16384u16), 1..8).prop_map(|runs| {
                let mut store = RunStore::new();
                for (start, len_minus_one) in runs {
                    store.insert_range(start..=start.saturating_add(len_minus_one));
                }
                Container::Run(store)
            }),
        ]
    }
}
