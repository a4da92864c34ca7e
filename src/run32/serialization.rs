use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;
use tracing::debug;

use super::RunContainer32;
use crate::interval::Interval32;
use crate::runs;

// Runs are read in batches so that a forged run count can't trigger a huge
// allocation before any data is seen.
const READ_BATCH: usize = 1024;

impl RunContainer32 {
    /// Serializes the runs: a little-endian `u32` run count followed, for
    /// each run, by its start and its length minus one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roaring_runs::RunContainer32;
    ///
    /// let container: RunContainer32 = (1..4).chain(10..12).collect();
    /// let mut bytes = Vec::with_capacity(container.byte_size());
    /// container.serialize_into(&mut bytes).unwrap();
    /// assert_eq!(bytes.len(), container.byte_size());
    ///
    /// let deserialized = RunContainer32::deserialize_from(&bytes[..]).unwrap();
    /// assert_eq!(container, deserialized);
    /// ```
    pub fn serialize_into<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self.intervals.len() as u32)?;
        for interval in &self.intervals {
            writer.write_u32::<LittleEndian>(interval.start())?;
            writer.write_u32::<LittleEndian>(interval.end() - interval.start() - 1)?;
        }
        Ok(())
    }

    /// Deserializes runs written by [`serialize_into`](Self::serialize_into).
    ///
    /// Fails with [`io::ErrorKind::InvalidData`] if a run goes beyond
    /// [`UPPER_LIMIT`](super::UPPER_LIMIT) or if the runs are not sorted,
    /// disjoint and separated.
    pub fn deserialize_from<R: io::Read>(mut reader: R) -> io::Result<RunContainer32> {
        let runs = reader.read_u32::<LittleEndian>()? as usize;
        let mut intervals = Vec::with_capacity(runs.min(READ_BATCH));
        let mut batch = vec![[0u32; 2]; runs.min(READ_BATCH)];

        let mut remaining = runs;
        while remaining != 0 {
            let pairs = &mut batch[..remaining.min(READ_BATCH)];
            reader.read_exact(bytemuck::cast_slice_mut(pairs))?;
            for &[start, len_minus_one] in pairs.iter() {
                let (start, len_minus_one) = (u32::from_le(start), u32::from_le(len_minus_one));
                let end = match start.checked_add(len_minus_one).and_then(|last| last.checked_add(1))
                {
                    Some(end) => end,
                    None => {
                        debug!(start, len_minus_one, "run exceeds the upper limit");
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            "run exceeds the upper limit",
                        ));
                    }
                };
                intervals.push(Interval32::new(start, end));
            }
            remaining -= pairs.len();
        }

        if !runs::is_canonical(&intervals) {
            debug!(runs, "runs are not sorted and separated");
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "runs are not sorted and separated",
            ));
        }

        Ok(RunContainer32::from_canonical(intervals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run32::UPPER_LIMIT;

    #[test]
    fn layout() {
        let container = RunContainer32::from_intervals(&[Interval32::new(2, 5)]);
        let mut bytes = Vec::new();
        container.serialize_into(&mut bytes).unwrap();
        assert_eq!(bytes, [1, 0, 0, 0, 2, 0, 0, 0, 2, 0, 0, 0]);
    }

    #[test]
    fn upper_limit_roundtrip() {
        let mut container = RunContainer32::new();
        container.insert(0);
        container.insert_range(100..3000);
        container.insert(UPPER_LIMIT);
        let mut bytes = Vec::new();
        container.serialize_into(&mut bytes).unwrap();
        assert_eq!(RunContainer32::deserialize_from(&bytes[..]).unwrap(), container);
    }

    #[test]
    fn many_runs() {
        let container: RunContainer32 = (0..5000).map(|value| value * 3).collect();
        let mut bytes = Vec::new();
        container.serialize_into(&mut bytes).unwrap();
        assert_eq!(RunContainer32::deserialize_from(&bytes[..]).unwrap(), container);
    }

    #[test]
    fn overflowing_run() {
        let mut bytes = vec![1, 0, 0, 0];
        bytes.extend_from_slice(&(u32::MAX - 1).to_le_bytes());
        bytes.extend_from_slice(&1u32.to_le_bytes());
        let error = RunContainer32::deserialize_from(&bytes[..]).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn touching_runs() {
        let mut bytes = vec![2, 0, 0, 0];
        for value in [0u32, 1, 2, 0] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        let error = RunContainer32::deserialize_from(&bytes[..]).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn truncated() {
        let bytes = [3, 0, 0, 0, 1, 0];
        let error = RunContainer32::deserialize_from(&bytes[..]).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::UnexpectedEof);
    }
}
