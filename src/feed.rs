use crate::data_types::Sample;
use eyre::Result;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Bounded live history shared between a collector thread and the UI.
///
/// Producers publish from any thread. The UI side asks for the history
/// with the last revision it saw and only gets a copy when it changed.
#[derive(Clone)]
pub struct MetricFeed {
    inner: Arc<Mutex<FeedInner>>,
}

struct FeedInner {
    history: VecDeque<Sample>,
    capacity: usize,
    revision: u64,
}

impl MetricFeed {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Mutex::new(FeedInner {
                history: VecDeque::with_capacity(capacity),
                capacity,
                revision: 0,
            })),
        }
    }

    pub fn publish(&self, sample: Sample) {
        let mut inner = self.inner.lock();
        if inner.history.len() == inner.capacity {
            inner.history.pop_front();
        }
        inner.history.push_back(sample);
        inner.revision += 1;
    }

    /// Parses a collector snapshot and publishes it.
    pub fn publish_snapshot_json(&self, timestamp_ms: i64, json: &str) -> Result<()> {
        let sample = Sample::from_snapshot_json(timestamp_ms, json)?;
        self.publish(sample);
        Ok(())
    }

    /// Drops the history, e.g. when the observed device changes.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.history.clear();
        inner.revision += 1;
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity
    }

    pub fn revision(&self) -> u64 {
        self.inner.lock().revision
    }

    pub fn len(&self) -> usize {
        self.inner.lock().history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The whole history and its revision, if newer than `seen`.
    pub fn read_since(&self, seen: u64) -> Option<(u64, Vec<Sample>)> {
        let inner = self.inner.lock();
        if inner.revision == seen {
            return None;
        }
        Some((inner.revision, inner.history.iter().cloned().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_bounded() {
        let feed = MetricFeed::new(2);
        for i in 0..5_i64 {
            feed.publish(Sample::new(i));
        }
        let (_, history) = feed.read_since(0).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].x, crate::data_types::XKey::Timestamp(3));
    }

    #[test]
    fn unchanged_revision_reads_nothing() {
        let feed = MetricFeed::new(4);
        feed.publish(Sample::new(1_i64));
        let (rev, _) = feed.read_since(0).unwrap();
        assert!(feed.read_since(rev).is_none());
    }
}
