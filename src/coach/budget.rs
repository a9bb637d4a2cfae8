//! Duplicate-attempt budget for one `search_more` call

/// Duplicate hits allowed per `search_more` call by default.
pub const DEFAULT_DUPLICATE_BUDGET: usize = 10;

/// Termination policy for duplicate configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateBudget {
    /// Stop after this many duplicates in total, however they are spread
    /// across successful trials. The counter never resets within a call.
    Total(usize),
    /// Stop after this many duplicates in a row; each trained model resets
    /// the counter.
    Consecutive(usize),
}

impl DuplicateBudget {
    /// Maximum duplicate count before the search stops.
    #[must_use]
    pub const fn limit(self) -> usize {
        match self {
            Self::Total(limit) | Self::Consecutive(limit) => limit,
        }
    }

    pub(crate) const fn tracker(self) -> BudgetTracker {
        BudgetTracker {
            policy: self,
            count: 0,
        }
    }
}

impl Default for DuplicateBudget {
    fn default() -> Self {
        Self::Total(DEFAULT_DUPLICATE_BUDGET)
    }
}

/// Per-call duplicate counter.
#[derive(Debug)]
pub(crate) struct BudgetTracker {
    policy: DuplicateBudget,
    count: usize,
}

impl BudgetTracker {
    pub(crate) fn record_duplicate(&mut self) {
        self.count += 1;
    }

    pub(crate) fn record_success(&mut self) {
        if matches!(self.policy, DuplicateBudget::Consecutive(_)) {
            self.count = 0;
        }
    }

    pub(crate) const fn exhausted(&self) -> bool {
        self.count >= self.policy.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_total_ten() {
        assert_eq!(DuplicateBudget::default(), DuplicateBudget::Total(10));
        assert_eq!(DuplicateBudget::default().limit(), DEFAULT_DUPLICATE_BUDGET);
    }

    #[test]
    fn test_total_never_resets() {
        let mut tracker = DuplicateBudget::Total(2).tracker();
        tracker.record_duplicate();
        tracker.record_success();
        assert!(!tracker.exhausted());
        tracker.record_duplicate();
        assert!(tracker.exhausted());
    }

    #[test]
    fn test_consecutive_resets_on_success() {
        let mut tracker = DuplicateBudget::Consecutive(2).tracker();
        tracker.record_duplicate();
        tracker.record_success();
        tracker.record_duplicate();
        assert!(!tracker.exhausted());
        tracker.record_duplicate();
        assert!(tracker.exhausted());
    }
}
