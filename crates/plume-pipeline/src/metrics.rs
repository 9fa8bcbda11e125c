//! Per-run accounting.

use std::time::Duration;

/// Hour-level counters collected by the temporal aligner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlignmentCounts {
    /// Hours that produced records.
    pub hours_processed: u64,
    /// Hours skipped for a missing weather sample.
    pub hours_skipped_no_weather: u64,
    /// Hours skipped for a missing traffic-volume entry.
    pub hours_skipped_no_traffic: u64,
    /// Hours skipped because the model produced no estimates.
    pub hours_skipped_no_estimates: u64,
}

/// Summary of one processed run tag.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// The estimate-run tag this report covers.
    pub run_tag: String,
    /// Hour-level alignment counters.
    pub counts: AlignmentCounts,
    /// Records persisted for the run.
    pub records_emitted: u64,
    /// Bulk inserts issued for the run.
    pub batches_flushed: u64,
    /// Wall-clock time the run took.
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_counts_are_zero() {
        let counts = AlignmentCounts::default();
        assert_eq!(counts.hours_processed, 0);
        assert_eq!(counts.hours_skipped_no_weather, 0);
        assert_eq!(counts.hours_skipped_no_traffic, 0);
        assert_eq!(counts.hours_skipped_no_estimates, 0);
    }
}
