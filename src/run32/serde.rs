use serde::de::SeqAccess;
use serde::de::Visitor;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::RunContainer32;

impl<'de> Deserialize<'de> for RunContainer32 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RunContainerVisitor;

        impl<'de> Visitor<'de> for RunContainerVisitor {
            type Value = RunContainer32;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("serialized runs of u32 values")
            }

            fn visit_bytes<E>(self, bytes: &[u8]) -> Result<RunContainer32, E>
            where
                E: serde::de::Error,
            {
                RunContainer32::deserialize_from(bytes).map_err(serde::de::Error::custom)
            }

            // some formats hand bytes over as a sequence
            fn visit_seq<A>(self, mut seq: A) -> Result<RunContainer32, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut bytes: Vec<u8> = Vec::new();
                while let Some(el) = seq.next_element()? {
                    bytes.push(el);
                }
                RunContainer32::deserialize_from(&*bytes).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_bytes(RunContainerVisitor)
    }
}

impl Serialize for RunContainer32 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut buf = Vec::with_capacity(self.byte_size());
        self.serialize_into(&mut buf).map_err(serde::ser::Error::custom)?;

        serializer.serialize_bytes(&buf)
    }
}
