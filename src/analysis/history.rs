use std::collections::VecDeque;

use crate::analysis::peaks::Resonance;

/// One analysis tick's worth of estimates. Immutable once appended; a
/// pitch of 0.0 means "no pitch detected", not 0 Hz.
#[derive(Clone, Debug, PartialEq)]
pub struct Estimate {
    pub timestamp: f64, // seconds since the app epoch, monotonic
    pub pitch: f32,
    pub formants: Vec<f32>,
    pub resonances: Vec<Resonance>,
}

/// Time-windowed estimate sequence backing the scrolling graph.
///
/// Entries arrive in timestamp order and leave from the front, so the
/// deque is chronologically sorted at all times.
pub struct EstimateHistory {
    entries: VecDeque<Estimate>,
    retention: f64,
}

impl EstimateHistory {
    pub fn new(retention_seconds: f64) -> Self {
        Self {
            entries: VecDeque::new(),
            retention: retention_seconds,
        }
    }

    pub fn append(&mut self, estimate: Estimate) {
        self.entries.push_back(estimate);
    }

    /// Drops entries older than the retention window. Amortized O(1) per
    /// tick since entries are time-ordered.
    pub fn prune(&mut self, now: f64) {
        let cutoff = now - self.retention;
        while self
            .entries
            .front()
            .map(|e| e.timestamp < cutoff)
            .unwrap_or(false)
        {
            self.entries.pop_front();
        }
    }

    /// Entries with `timestamp >= now - window`, oldest first, without
    /// copying or mutating the buffer.
    pub fn iter_window(&self, now: f64, window: f64) -> impl Iterator<Item = &Estimate> + '_ {
        let cutoff = now - window;
        let start = self.entries.partition_point(|e| e.timestamp < cutoff);
        self.entries.iter().skip(start)
    }

    pub fn latest(&self) -> Option<&Estimate> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fixed-capacity pitch ring for the short-term contour.
///
/// Pushing past capacity silently overwrites the oldest slot. Slots start
/// at zero, which reads as "no data" by the pitch sentinel convention.
pub struct PitchRing {
    slots: Vec<f32>,
    write_pos: usize,
}

impl PitchRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![0.0; capacity.max(1)],
            write_pos: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn push(&mut self, value: f32) {
        self.slots[self.write_pos] = value;
        self.write_pos = (self.write_pos + 1) % self.slots.len();
    }

    /// All slots, oldest first.
    pub fn iter_chronological(&self) -> impl Iterator<Item = f32> + '_ {
        let capacity = self.slots.len();
        (0..capacity).map(move |i| self.slots[(self.write_pos + i) % capacity])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(timestamp: f64, pitch: f32) -> Estimate {
        Estimate {
            timestamp,
            pitch,
            formants: Vec::new(),
            resonances: Vec::new(),
        }
    }

    #[test]
    fn prune_drops_everything_older_than_the_retention_window() {
        let mut history = EstimateHistory::new(5.0);
        for i in 0..10 {
            history.append(estimate(i as f64, 100.0));
        }

        history.prune(10.0);

        assert!(history.iter_window(10.0, 100.0).all(|e| e.timestamp >= 5.0));
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn entries_stay_chronological_across_append_and_prune() {
        let mut history = EstimateHistory::new(5.0);
        for i in 0..20 {
            history.append(estimate(i as f64 * 0.5, 100.0));
            history.prune(i as f64 * 0.5);
        }

        let times: Vec<f64> = history
            .iter_window(9.5, 100.0)
            .map(|e| e.timestamp)
            .collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn iter_window_yields_only_recent_entries() {
        let mut history = EstimateHistory::new(100.0);
        for i in 0..10 {
            history.append(estimate(i as f64, 100.0));
        }

        let recent: Vec<f64> = history.iter_window(9.0, 3.0).map(|e| e.timestamp).collect();
        assert_eq!(recent, vec![6.0, 7.0, 8.0, 9.0]);

        // Iteration must not consume the buffer.
        assert_eq!(history.len(), 10);
    }

    #[test]
    fn ring_holds_exactly_the_last_capacity_values() {
        let capacity = 8;
        let mut ring = PitchRing::new(capacity);
        let pushes = capacity + 5;
        for i in 0..pushes {
            ring.push((i + 1) as f32);
        }

        let contents: Vec<f32> = ring.iter_chronological().collect();
        let expected: Vec<f32> = ((pushes - capacity)..pushes).map(|i| (i + 1) as f32).collect();
        assert_eq!(contents, expected);
    }

    #[test]
    fn unfilled_ring_slots_read_as_no_data() {
        let mut ring = PitchRing::new(4);
        ring.push(220.0);

        let contents: Vec<f32> = ring.iter_chronological().collect();
        assert_eq!(contents, vec![0.0, 0.0, 0.0, 220.0]);
    }

    #[test]
    fn ring_wraps_silently_without_growing() {
        let mut ring = PitchRing::new(4);
        for i in 0..1000 {
            ring.push(i as f32);
        }
        assert_eq!(ring.capacity(), 4);
        let contents: Vec<f32> = ring.iter_chronological().collect();
        assert_eq!(contents, vec![996.0, 997.0, 998.0, 999.0]);
    }
}
