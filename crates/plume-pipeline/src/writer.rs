//! Batched record persistence.

use plume_core::{ProcessedRecord, RecordSink, SinkError};

/// Buffers assembled records and bulk-inserts them in threshold-sized
/// batches, in assembly order.
///
/// The buffer is cleared only after the sink accepts a batch, so a
/// failed flush leaves every unpersisted record in place for retry or
/// diagnosis. Interrupting a run between flushes loses at most the
/// current buffer, never an already-flushed batch.
pub struct BatchedWriter<'a, S: RecordSink + ?Sized> {
    sink: &'a mut S,
    buffer: Vec<ProcessedRecord>,
    threshold: usize,
    records_flushed: u64,
    batches_flushed: u64,
}

impl<'a, S: RecordSink + ?Sized> BatchedWriter<'a, S> {
    /// Create a writer flushing every `threshold` records.
    pub fn new(sink: &'a mut S, threshold: usize) -> Self {
        Self {
            sink,
            buffer: Vec::new(),
            threshold,
            records_flushed: 0,
            batches_flushed: 0,
        }
    }

    /// Buffer one record, flushing if the threshold is reached.
    ///
    /// Returns `true` when this push triggered a flush.
    ///
    /// # Errors
    ///
    /// Propagates the sink's failure; the record and the rest of the
    /// buffer stay buffered.
    pub fn push(&mut self, record: ProcessedRecord) -> Result<bool, SinkError> {
        self.buffer.push(record);
        if self.buffer.len() >= self.threshold {
            self.flush()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Records currently buffered and not yet persisted.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Records persisted so far.
    pub fn records_flushed(&self) -> u64 {
        self.records_flushed
    }

    /// Flush the remainder and return the run totals.
    ///
    /// # Errors
    ///
    /// Propagates the sink's failure; the remainder stays buffered in
    /// the dropped writer, so the caller sees the run abort rather than
    /// a silently shortened output.
    pub fn finish(mut self) -> Result<WriterStats, SinkError> {
        self.flush()?;
        Ok(WriterStats {
            records: self.records_flushed,
            batches: self.batches_flushed,
        })
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        self.sink.insert_many(&self.buffer)?;
        self.records_flushed += self.buffer.len() as u64;
        self.batches_flushed += 1;
        self.buffer.clear();
        Ok(())
    }
}

/// Totals accumulated by a writer over one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Records persisted across all batches.
    pub records: u64,
    /// Number of bulk inserts that succeeded.
    pub batches: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_core::SubDomainId;
    use plume_test_utils::MemorySink;

    fn record(tag: usize) -> ProcessedRecord {
        ProcessedRecord {
            mesh_size: 1,
            sub_domain: SubDomainId(1),
            input: vec![tag as f64],
            labels: vec![],
        }
    }

    #[test]
    fn records_below_threshold_stay_buffered() {
        let mut sink = MemorySink::default();
        let mut writer = BatchedWriter::new(&mut sink, 10);
        for i in 0..9 {
            assert!(!writer.push(record(i)).unwrap());
        }
        assert_eq!(writer.buffered(), 9);
        assert!(sink.batches.is_empty());
    }

    #[test]
    fn threshold_plus_one_makes_two_batches() {
        let mut sink = MemorySink::default();
        let threshold = 5;
        {
            let mut writer = BatchedWriter::new(&mut sink, threshold);
            let mut flushes = 0;
            for i in 0..threshold + 1 {
                if writer.push(record(i)).unwrap() {
                    flushes += 1;
                }
            }
            assert_eq!(flushes, 1);
            let stats = writer.finish().unwrap();
            assert_eq!(stats.batches, 2);
            assert_eq!(stats.records, (threshold + 1) as u64);
        }
        assert_eq!(sink.batches.len(), 2);
        assert_eq!(sink.batches[0].len(), threshold);
        assert_eq!(sink.batches[1].len(), 1);
    }

    #[test]
    fn records_arrive_in_assembly_order() {
        let mut sink = MemorySink::default();
        {
            let mut writer = BatchedWriter::new(&mut sink, 3);
            for i in 0..7 {
                writer.push(record(i)).unwrap();
            }
            writer.finish().unwrap();
        }
        let inputs: Vec<f64> = sink.records().map(|r| r.input[0]).collect();
        assert_eq!(inputs, [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn empty_writer_finishes_without_inserting() {
        let mut sink = MemorySink::default();
        let stats = BatchedWriter::new(&mut sink, 5).finish().unwrap();
        assert_eq!(stats, WriterStats::default());
        assert!(sink.batches.is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn batches_are_full_except_the_last(
                count in 0usize..200,
                threshold in 1usize..20,
            ) {
                let mut sink = MemorySink::default();
                {
                    let mut writer = BatchedWriter::new(&mut sink, threshold);
                    for i in 0..count {
                        writer.push(record(i)).unwrap();
                    }
                    let stats = writer.finish().unwrap();
                    prop_assert_eq!(stats.records, count as u64);
                }
                let total: usize = sink.batches.iter().map(Vec::len).sum();
                prop_assert_eq!(total, count);
                if let Some((last, full)) = sink.batches.split_last() {
                    prop_assert!(full.iter().all(|b| b.len() == threshold));
                    prop_assert!(!last.is_empty() && last.len() <= threshold);
                }
            }
        }
    }

    #[test]
    fn failed_flush_keeps_the_buffer() {
        let mut sink = MemorySink::default();
        sink.fail_next_insert = true;
        let mut writer = BatchedWriter::new(&mut sink, 2);
        writer.push(record(0)).unwrap();
        assert!(writer.push(record(1)).is_err());
        // Nothing was lost: both records are still buffered.
        assert_eq!(writer.buffered(), 2);
        assert_eq!(writer.records_flushed(), 0);
        // The sink recovered, so finishing persists the held batch.
        let stats = writer.finish().unwrap();
        assert_eq!(stats.records, 2);
        assert_eq!(stats.batches, 1);
    }
}
