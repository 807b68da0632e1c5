/// Running aggregate of collision intervals (ticks between successive
/// collisions of the same electron).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatisticsAggregator {
    sum: u64,
    count: u64,
}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observed interval.
    #[inline]
    pub fn record_interval(&mut self, ticks: u64) {
        self.sum = self.sum.saturating_add(ticks);
        self.count = self.count.saturating_add(1);
    }

    /// Mean interval in ticks, or `0.0` before any collision has been recorded.
    pub fn mean_interval(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum as f64 / self.count as f64
    }

    /// Number of recorded intervals (equals the number of collisions).
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of recorded intervals.
    pub fn sum(&self) -> u64 {
        self.sum
    }

    /// Fold a partial aggregate (e.g. from a worker) into this one.
    pub fn merge(&mut self, other: &StatisticsAggregator) {
        self.sum = self.sum.saturating_add(other.sum);
        self.count = self.count.saturating_add(other.count);
    }
}
