use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;
use tracing::debug;

use super::RunStore;
use crate::interval::Interval16;
use crate::runs;

const READ_BATCH: usize = 1024;

impl RunStore {
    /// Serializes the runs in the layout of the Roaring run containers: a
    /// little-endian `u16` run count followed, for each run, by its start and
    /// its length minus one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roaring_runs::RunStore;
    ///
    /// let store: RunStore = (5..=9).chain(u16::MAX..=u16::MAX).collect();
    /// let mut bytes = vec![];
    /// store.serialize_into(&mut bytes).unwrap();
    /// assert_eq!(bytes, [2, 0, 5, 0, 4, 0, 255, 255, 0, 0]);
    /// assert_eq!(RunStore::deserialize_from(&bytes[..]).unwrap(), store);
    /// ```
    pub fn serialize_into<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u16::<LittleEndian>(self.run_amount() as u16)?;
        for interval in self.intervals() {
            writer.write_u16::<LittleEndian>(interval.start())?;
            writer.write_u16::<LittleEndian>(interval.last() - interval.start())?;
        }
        Ok(())
    }

    /// Deserializes runs written by [`serialize_into`](Self::serialize_into).
    ///
    /// Fails with [`io::ErrorKind::InvalidData`] if a run goes beyond the
    /// chunk or if the runs are not sorted, disjoint and separated.
    pub fn deserialize_from<R: io::Read>(mut reader: R) -> io::Result<RunStore> {
        let runs = reader.read_u16::<LittleEndian>()? as usize;
        let mut intervals = Vec::with_capacity(runs);
        let mut batch = vec![[0u16; 2]; runs.min(READ_BATCH)];

        let mut remaining = runs;
        while remaining != 0 {
            let pairs = &mut batch[..remaining.min(READ_BATCH)];
            reader.read_exact(bytemuck::cast_slice_mut(pairs))?;
            for &[start, len_minus_one] in pairs.iter() {
                let (start, len_minus_one) = (u16::from_le(start), u16::from_le(len_minus_one));
                match start.checked_add(len_minus_one) {
                    Some(last) => intervals.push(Interval16::new(start, last)),
                    None => {
                        debug!(start, len_minus_one, "run exceeds the chunk");
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            "run exceeds the chunk",
                        ));
                    }
                }
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

        Ok(RunStore::from_canonical(intervals))
    }
}
