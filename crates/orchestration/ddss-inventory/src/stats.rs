//! Statistics for inventory runs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::batcher::FlushOutcome;

/// Statistics collected during an inventory run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// When the run started
    pub started_at: Option<DateTime<Utc>>,

    /// When the run completed
    pub completed_at: Option<DateTime<Utc>>,

    /// Total number of objects listed (before journal filtering)
    pub objects_listed: usize,

    /// Number of objects that are journal files
    pub journals_found: usize,

    /// Number of events built and submitted
    pub events_built: usize,

    /// Number of journal keys skipped as malformed
    pub keys_skipped: usize,

    /// Number of delivery calls made
    pub batches_delivered: usize,

    /// Records delivered
    pub records_delivered: usize,

    /// Serialized bytes delivered
    pub bytes_delivered: u64,

    /// Errors for skipped keys
    pub errors: Vec<String>,
}

impl RunStats {
    /// Create a new stats tracker with the current time as start time.
    pub fn new() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Mark the run as complete with the current time.
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Record the result of listing the bucket.
    pub fn record_listing(&mut self, objects_listed: usize, journals_found: usize) {
        self.objects_listed = objects_listed;
        self.journals_found = journals_found;
    }

    /// Record an event that was built and submitted.
    pub fn record_event(&mut self) {
        self.events_built += 1;
    }

    /// Record a journal key that could not be parsed.
    pub fn record_skipped(&mut self, error: impl ToString) {
        self.keys_skipped += 1;
        self.errors.push(error.to_string());
    }

    /// Record deliveries made by a submit.
    pub fn record_flush(&mut self, outcome: FlushOutcome) {
        self.batches_delivered += outcome.batches;
        self.records_delivered += outcome.records;
        self.bytes_delivered += outcome.bytes as u64;
    }

    /// Get the duration of the run.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Check if any keys were skipped.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration as StdDuration;

    #[test]
    fn test_stats_new() {
        let stats = RunStats::new();
        assert!(stats.started_at.is_some());
        assert!(stats.completed_at.is_none());
        assert_eq!(stats.events_built, 0);
    }

    #[test]
    fn test_stats_record_flush() {
        let mut stats = RunStats::new();
        stats.record_flush(FlushOutcome {
            batches: 1,
            records: 200,
            bytes: 90_000,
        });
        stats.record_flush(FlushOutcome {
            batches: 1,
            records: 1,
            bytes: 450,
        });
        stats.record_flush(FlushOutcome::default());

        assert_eq!(stats.batches_delivered, 2);
        assert_eq!(stats.records_delivered, 201);
        assert_eq!(stats.bytes_delivered, 90_450);
    }

    #[test]
    fn test_stats_skipped_keys() {
        let mut stats = RunStats::new();
        assert!(!stats.has_errors());

        stats.record_skipped("Malformed journal key 'x': too short");
        assert!(stats.has_errors());
        assert_eq!(stats.keys_skipped, 1);
        assert_eq!(stats.error_count(), 1);
    }

    #[test]
    fn test_stats_duration() {
        let mut stats = RunStats::new();
        sleep(StdDuration::from_millis(10));
        stats.complete();

        let duration = stats.duration().unwrap();
        assert!(duration.num_milliseconds() >= 10);
    }

    #[test]
    fn test_stats_serialize() {
        let mut stats = RunStats::default();
        stats.record_listing(10, 4);

        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["objects_listed"], 10);
        assert_eq!(value["journals_found"], 4);
    }
}
