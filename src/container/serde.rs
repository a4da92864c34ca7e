use serde::de::SeqAccess;
use serde::de::Visitor;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use super::RunStore;

impl<'de> Deserialize<'de> for RunStore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RunStoreVisitor;

        impl<'de> Visitor<'de> for RunStoreVisitor {
            type Value = RunStore;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("serialized runs of u16 values")
            }

            fn visit_bytes<E>(self, bytes: &[u8]) -> Result<RunStore, E>
            where
                E: serde::de::Error,
            {
                RunStore::deserialize_from(bytes).map_err(serde::de::Error::custom)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<RunStore, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut bytes: Vec<u8> = Vec::new();
                while let Some(el) = seq.next_element()? {
                    bytes.push(el);
                }
                RunStore::deserialize_from(&*bytes).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_bytes(RunStoreVisitor)
    }
}

impl Serialize for RunStore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut buf = Vec::with_capacity(self.byte_size());
        self.serialize_into(&mut buf).map_err(serde::ser::Error::custom)?;

        serializer.serialize_bytes(&buf)
    }
}

#[cfg(test)]
mod test {
    use crate::RunStore;
    use proptest::collection::btree_set;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_serde_json(
            values in btree_set(any::<u16>(), 0..2048),
        ) {
            let store: RunStore = values.into_iter().collect();
            let json = serde_json::to_vec(&store).unwrap();
            prop_assert_eq!(store, serde_json::from_slice(&json).unwrap());
        }

        #[test]
        fn test_bincode(
            values in btree_set(any::<u16>(), 0..2048),
        ) {
            let store: RunStore = values.into_iter().collect();
            let buffer = bincode::serialize(&store).unwrap();
            prop_assert_eq!(store, bincode::deserialize(&buffer).unwrap());
        }
    }
}
