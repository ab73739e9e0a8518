//! Allocation run loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use super::allocator::Allocator;
use super::config::AllocationConfig;
use super::types::{AllocationResult, RoundOutcome};
use crate::AllocError;

/// Drives an [`Allocator`] through successive rounds.
pub struct AllocationRunner;

impl AllocationRunner {
    /// Runs rounds until topics or groups are exhausted.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_allot::allocation::{AllocationConfig, AllocationRunner};
    ///
    /// let config = AllocationConfig::new(2, 2)
    ///     .with_priorities(vec![vec![5, 1], vec![1, 5]])
    ///     .with_seed(42);
    /// let result = AllocationRunner::run(&config).unwrap();
    ///
    /// assert_eq!(result.topic_of(0), Some(0));
    /// assert_eq!(result.topic_of(1), Some(1));
    /// ```
    pub fn run(config: &AllocationConfig) -> Result<AllocationResult, AllocError> {
        Self::run_with(config, |_| true)
    }

    /// Runs rounds, asking `proceed` after each one whether to continue.
    ///
    /// `proceed` is only consulted when another round is possible. When
    /// it returns `false` the run stops with the remaining groups and
    /// topics unresolved and `stopped_early` set.
    pub fn run_with<F>(
        config: &AllocationConfig,
        mut proceed: F,
    ) -> Result<AllocationResult, AllocError>
    where
        F: FnMut(&RoundOutcome) -> bool,
    {
        let mut allocator = Allocator::new(config.clone())?;
        let mut stopped_early = false;

        while let Some(outcome) = allocator.step() {
            if allocator.is_exhausted() {
                break;
            }
            if !proceed(&outcome) {
                stopped_early = true;
                break;
            }
        }

        Ok(Self::finish(allocator, stopped_early, false))
    }

    /// Runs rounds with an optional cancellation token, checked before
    /// each round.
    pub fn run_with_cancel(
        config: &AllocationConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AllocationResult, AllocError> {
        let mut allocator = Allocator::new(config.clone())?;
        let mut cancelled = false;

        while !allocator.is_exhausted() {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            allocator.step();
        }

        Ok(Self::finish(allocator, false, cancelled))
    }

    fn finish(allocator: Allocator, stopped_early: bool, cancelled: bool) -> AllocationResult {
        let mut result = allocator.into_result();
        result.stopped_early = stopped_early;
        result.cancelled = cancelled;
        info!(
            rounds = result.rounds,
            assigned = result.assignments.len(),
            unassigned = result.unassigned_groups.len(),
            stopped_early,
            cancelled,
            "allocation finished"
        );
        result
    }
}
