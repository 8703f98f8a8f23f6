//! Budgets and allocation guards for the backtracking search.
//!
//! First-success-wins backtracking is cheap on typical grids but can revisit an exponential number
//! of partial routes when the far corner is walled off. Callers that feed untrusted grids bound the
//! work with [`SearchLimits`]; the tracker turns an exhausted budget into a [`SearchError`]
//! instead of an unbounded run.

use thiserror::Error;

/// Search budgets.
///
/// - `max_steps`: number of cell entries the traversal may perform
/// - `max_depth`: number of frames the traversal stack may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_steps: u64,
    pub max_depth: usize,
}

impl SearchLimits {
    /// No budget at all; the search runs to completion.
    pub const fn unbounded() -> Self {
        Self {
            max_steps: u64::MAX,
            max_depth: usize::MAX,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_steps: 50_000_000,
            max_depth: 1 << 20,
        }
    }
}

/// Running counters tracked during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceCounts {
    pub steps: u64,
    pub depth: u64,
}

/// Structured errors returned by search routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A configured budget was exceeded.
    #[error(
        "limit exceeded at {stage}: {metric} (limit={limit}, observed={observed}); \
         counts(steps={}, depth={})",
        .counts.steps,
        .counts.depth
    )]
    LimitExceeded {
        stage: &'static str,
        metric: &'static str,
        limit: u64,
        observed: u64,
        counts: ResourceCounts,
    },
    /// A `try_reserve` allocation failed.
    #[error(
        "allocation failed at {stage} for {structure}; counts(steps={}, depth={})",
        .counts.steps,
        .counts.depth
    )]
    AllocationFailed {
        stage: &'static str,
        structure: &'static str,
        counts: ResourceCounts,
    },
}

/// Tracks budgets/counters during a search.
#[derive(Debug, Clone)]
pub struct ResourceTracker {
    limits: SearchLimits,
    counts: ResourceCounts,
}

impl ResourceTracker {
    #[inline]
    pub fn new(limits: SearchLimits) -> Self {
        Self {
            limits,
            counts: ResourceCounts::default(),
        }
    }

    #[inline]
    pub fn counts(&self) -> ResourceCounts {
        self.counts
    }

    #[inline]
    pub fn bump_steps(&mut self, stage: &'static str, delta: u64) -> Result<(), SearchError> {
        self.counts.steps = self.counts.steps.saturating_add(delta);
        self.check(stage, "steps", self.counts.steps, self.limits.max_steps)
    }

    /// Record the current stack depth; only the deepest point is kept.
    #[inline]
    pub fn observe_depth(&mut self, stage: &'static str, depth: usize) -> Result<(), SearchError> {
        let depth = depth as u64;
        self.counts.depth = self.counts.depth.max(depth);
        self.check(stage, "depth", depth, self.limits.max_depth as u64)
    }

    fn check(
        &self,
        stage: &'static str,
        metric: &'static str,
        observed: u64,
        limit: u64,
    ) -> Result<(), SearchError> {
        if observed > limit {
            return Err(SearchError::LimitExceeded {
                stage,
                metric,
                limit,
                observed,
                counts: self.counts,
            });
        }
        Ok(())
    }

    pub fn try_reserve_vec<T>(
        &self,
        stage: &'static str,
        structure: &'static str,
        v: &mut Vec<T>,
        additional: usize,
    ) -> Result<(), SearchError> {
        v.try_reserve(additional)
            .map_err(|_| SearchError::AllocationFailed {
                stage,
                structure,
                counts: self.counts,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_budget_is_inclusive() {
        let mut tracker = ResourceTracker::new(SearchLimits::unbounded().with_max_steps(2));
        tracker.bump_steps("test", 1).unwrap();
        tracker.bump_steps("test", 1).unwrap();

        let err = tracker.bump_steps("test", 1).unwrap_err();
        assert_eq!(
            err,
            SearchError::LimitExceeded {
                stage: "test",
                metric: "steps",
                limit: 2,
                observed: 3,
                counts: ResourceCounts { steps: 3, depth: 0 },
            }
        );
        assert!(err.to_string().starts_with("limit exceeded at test: steps"));
    }

    #[test]
    fn depth_keeps_the_high_water_mark() {
        let mut tracker = ResourceTracker::new(SearchLimits::unbounded().with_max_depth(4));
        tracker.observe_depth("test", 3).unwrap();
        tracker.observe_depth("test", 1).unwrap();
        assert_eq!(tracker.counts().depth, 3);
        assert!(tracker.observe_depth("test", 5).is_err());
    }
}
