//! Stepwise allocation state machine.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::config::AllocationConfig;
use super::ranking::{is_unique_claim, most_contested, top_choice_buckets, top_topic_for};
use super::types::{AllocationResult, Assignment, GroupId, Resolution, RoundOutcome, TopicId};
use crate::AllocError;

/// Owns the allocation state and runs it one round at a time.
///
/// Use this directly when a caller needs to inspect or interrupt the
/// allocation between rounds; [`AllocationRunner`](super::AllocationRunner)
/// wraps it for batch runs.
///
/// # Examples
///
/// ```
/// use u_allot::allocation::{AllocationConfig, Allocator, Resolution};
///
/// let config = AllocationConfig::new(2, 2).with_priorities(vec![vec![5, 1], vec![1, 5]]);
/// let mut allocator = Allocator::new(config).unwrap();
///
/// let first = allocator.step().unwrap();
/// assert_eq!(first.resolution, Resolution::Unique);
/// assert_eq!((first.assignment.group, first.assignment.topic), (0, 0));
///
/// allocator.step().unwrap();
/// assert!(allocator.is_exhausted());
/// ```
#[derive(Debug)]
pub struct Allocator<R = StdRng> {
    priorities: Vec<Vec<i64>>,
    repeatable: BTreeSet<TopicId>,
    remaining_topics: BTreeSet<TopicId>,
    remaining_groups: BTreeSet<GroupId>,
    assignments: Vec<Assignment>,
    history: Vec<RoundOutcome>,
    rng: R,
}

impl Allocator<StdRng> {
    /// Creates an allocator whose lottery RNG is seeded from
    /// `config.seed`, or from OS entropy when unset.
    pub fn new(config: AllocationConfig) -> Result<Self, AllocError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Allocator<R> {
    /// Creates an allocator drawing lottery winners from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn with_rng(config: AllocationConfig, rng: R) -> Result<Self, AllocError> {
        config.validate()?;
        Ok(Self {
            remaining_topics: (0..config.topic_count).collect(),
            remaining_groups: (0..config.group_count).collect(),
            priorities: config.priorities,
            repeatable: config.repeatable,
            assignments: Vec::new(),
            history: Vec::new(),
            rng,
        })
    }

    /// Topics still available, ascending.
    pub fn remaining_topics(&self) -> &BTreeSet<TopicId> {
        &self.remaining_topics
    }

    /// Groups still waiting for a topic, ascending.
    pub fn remaining_groups(&self) -> &BTreeSet<GroupId> {
        &self.remaining_groups
    }

    /// Assignments made so far, in order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Outcomes of the rounds run so far.
    pub fn history(&self) -> &[RoundOutcome] {
        &self.history
    }

    pub fn rounds(&self) -> usize {
        self.history.len()
    }

    /// Whether no further round can run.
    pub fn is_exhausted(&self) -> bool {
        self.remaining_topics.is_empty() || self.remaining_groups.is_empty()
    }

    /// The top remaining topic for `group`.
    pub fn top_topic_for(&self, group: GroupId) -> Option<TopicId> {
        top_topic_for(&self.priorities[group], &self.remaining_topics)
    }

    /// The assignment the direct-assignment pass would make now, if any.
    ///
    /// Scans remaining groups in ascending order and returns the first
    /// whose top choice is a unique claim. Does not mutate state.
    pub fn direct_candidate(&self) -> Option<Assignment> {
        self.remaining_groups.iter().find_map(|&group| {
            let topic = self.top_topic_for(group)?;
            is_unique_claim(&self.priorities, group, topic, &self.remaining_groups)
                .then_some(Assignment { group, topic })
        })
    }

    /// Runs one round, producing exactly one assignment.
    ///
    /// Returns `None` without touching state when either pool is empty.
    pub fn step(&mut self) -> Option<RoundOutcome> {
        if self.is_exhausted() {
            return None;
        }
        let round = self.rounds() + 1;

        let (assignment, resolution) = match self.direct_candidate() {
            Some(assignment) => {
                debug!(
                    round,
                    group = assignment.group,
                    topic = assignment.topic,
                    "unique top choice"
                );
                (assignment, Resolution::Unique)
            }
            None => self.lottery(round)?,
        };

        self.commit(assignment);
        let outcome = RoundOutcome {
            round,
            assignment,
            resolution,
        };
        self.history.push(outcome.clone());
        Some(outcome)
    }

    /// Resolves the most contested topic among current top choices.
    fn lottery(&mut self, round: usize) -> Option<(Assignment, Resolution)> {
        let buckets = top_choice_buckets(
            &self.priorities,
            &self.remaining_groups,
            &self.remaining_topics,
        );
        debug!(round, buckets = buckets.len(), "no unique top choice");

        let (topic, candidates) = most_contested(&buckets)?;
        if let [group] = candidates {
            return Some((
                Assignment {
                    group: *group,
                    topic,
                },
                Resolution::OnlyInterested,
            ));
        }

        let winner = candidates[self.rng.random_range(0..candidates.len())];
        info!(
            round,
            topic,
            winner,
            candidates = ?candidates,
            "lottery drawn"
        );
        Some((
            Assignment {
                group: winner,
                topic,
            },
            Resolution::Lottery {
                candidates: candidates.to_vec(),
            },
        ))
    }

    fn commit(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
        self.remaining_groups.remove(&assignment.group);
        if !self.repeatable.contains(&assignment.topic) {
            self.remaining_topics.remove(&assignment.topic);
        }
    }

    /// Consumes the allocator, reporting its current state.
    pub fn into_result(self) -> AllocationResult {
        AllocationResult {
            rounds: self.history.len(),
            assignments: self.assignments,
            history: self.history,
            unassigned_groups: self.remaining_groups.into_iter().collect(),
            remaining_topics: self.remaining_topics.into_iter().collect(),
            stopped_early: false,
            cancelled: false,
        }
    }
}
